//! # Domain Models
//!
//! Ticker records, their normalized form and the currency catalog.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Ticker`] | Raw exchange-rate record (`pair`, `ask`, `bid`, `currency`) |
//! | [`TickerPayload`] | Ticker endpoint body, single object or array |
//! | [`NormalizedRate`] | Ticker with 6-digit prices and its paired currency |
//! | [`CurrencySet`] | Unique selectable currency codes |
//! | [`CurrencyCode`] | Validated, uppercase user-supplied code |
//!
//! ## Pair formats
//!
//! The ticker API encodes pairs either hyphen-joined (`XCH-USD`) or
//! concatenated (`XAUUSD`). [`extract_paired_currency`] handles both:
//!
//! ```rust
//! use fxconv_core::extract_paired_currency;
//!
//! assert_eq!(extract_paired_currency("XCH-USD", "USD"), "XCH");
//! assert_eq!(extract_paired_currency("XAUUSD", "USD"), "XAU");
//! ```

mod catalog;
mod currency;
mod ticker;

pub use catalog::{build_catalog, CurrencySet};
pub use currency::{CurrencyCode, DEFAULT_CURRENCY};
pub use ticker::{
    extract_paired_currency, format_fixed, normalize, normalize_all, NormalizedRate, Ticker,
    TickerPayload, RATE_PRECISION,
};
