//! # fxconv Core
//!
//! Domain types and state machines for the fxconv currency converter.
//!
//! ## Overview
//!
//! - **Rate normalization**: raw tickers to fixed-precision rates with the
//!   paired currency extracted from `XXX-YYY` or `XXXYYY` pairs
//! - **Currency catalog**: distinct codes referenced by a ticker set
//! - **Debounced input**: amount validation, clamping and quiet-period commits
//! - **Query layer**: per-resource cache with TTL and bounded retries
//! - **View model**: catalog, rates and amount composed into one snapshot
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Ticker source adapters (Uphold) |
//! | [`cache`] | TTL cache keyed by resource and parameters |
//! | [`config`] | API endpoints, query policies, input limits |
//! | [`data_source`] | Ticker source trait and structured source errors |
//! | [`domain`] | Tickers, normalized rates, currency codes and catalogs |
//! | [`error`] | Core error types |
//! | [`format`] | Money and icon formatting |
//! | [`http_client`] | HTTP client abstraction |
//! | [`input`] | Debounced amount input |
//! | [`query`] | Cached, retried catalog and rate queries |
//! | [`retry`] | Backoff and retry helpers |
//! | [`service`] | Catalog and rate fetches over a ticker source |
//! | [`theme`] | Persisted light/dark preference |
//! | [`view_model`] | Conversion view model |
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐
//! │ DebouncedInput  │────▶│ ConversionView-  │
//! │ (keystrokes)    │     │ Model            │
//! └─────────────────┘     └────────┬─────────┘
//!                                  │
//!                                  ▼
//!                         ┌──────────────────┐     ┌──────────────┐
//!                         │ QueryClient      │────▶│ CacheStore   │
//!                         │ (retry + TTL)    │     └──────────────┘
//!                         └────────┬─────────┘
//!                                  │
//!                                  ▼
//!                         ┌──────────────────┐     ┌──────────────┐
//!                         │ RateService      │────▶│ TickerSource │
//!                         │ (normalize)      │     │ + HttpClient │
//!                         └──────────────────┘     └──────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Fetch failures carry a [`SourceErrorKind`]; only transient kinds are retried.
//!
//! ```rust
//! use fxconv_core::{SourceError, SourceErrorKind};
//!
//! fn describe(error: &SourceError) -> &'static str {
//!     match error.kind() {
//!         SourceErrorKind::RateLimited | SourceErrorKind::Unavailable => "try again later",
//!         _ => "request rejected",
//!     }
//! }
//!
//! assert_eq!(describe(&SourceError::unavailable("down")), "try again later");
//! ```

pub mod adapters;
pub mod cache;
pub mod config;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod format;
pub mod http_client;
pub mod input;
pub mod query;
pub mod retry;
pub mod service;
pub mod theme;
pub mod view_model;

// Adapter implementations
pub use adapters::UpholdTickerSource;

// Caching
pub use cache::{CacheKey, CacheMode, CacheStore};

// Configuration
pub use config::{ApiConfig, BuildMode, InputConfig, QueryPolicy};

// Ticker source trait and errors
pub use data_source::{SourceError, SourceErrorKind, TickerFuture, TickerSource};

// Domain models
pub use domain::{
    build_catalog, extract_paired_currency, format_fixed, normalize, normalize_all, CurrencyCode,
    CurrencySet, NormalizedRate, Ticker, TickerPayload, DEFAULT_CURRENCY, RATE_PRECISION,
};

// Error types
pub use error::{CoreError, ValidationError};

// HTTP client types
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient, StaticHttpClient,
};

// Input
pub use input::{AmountInput, DebouncedInput, EditOutcome, InputPhase, InputState, ScopedTimer};

// Queries and services
pub use query::QueryClient;
pub use service::RateService;

// Retry logic
pub use retry::{Backoff, RetryConfig};

// Theme
pub use theme::{JsonFilePreferenceStore, MemoryPreferenceStore, PreferenceStore, ThemeMode, ThemeState};

// View model
pub use view_model::{
    ConversionView, ConversionViewModel, QueryStatus, RateRow, RatesPanel, Screen, ViewError,
};
