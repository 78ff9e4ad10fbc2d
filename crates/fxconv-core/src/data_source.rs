//! Ticker source contract and its error type.
//!
//! A [`TickerSource`] answers "which tickers quote against this currency?".
//! An empty currency asks for the baseline ticker set, which is what the
//! currency catalog is built from.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::retry::Retryable;
use crate::Ticker;

/// Source-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    Unavailable,
    RateLimited,
    InvalidRequest,
    InvalidPayload,
    Internal,
}

/// Structured error returned by ticker sources and the query layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    retryable: bool,
}

impl SourceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::RateLimited,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidPayload,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::RateLimited => "source.rate_limited",
            SourceErrorKind::InvalidRequest => "source.invalid_request",
            SourceErrorKind::InvalidPayload => "source.invalid_payload",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

impl Retryable for SourceError {
    fn is_retryable(&self) -> bool {
        self.retryable
    }
}

/// Boxed future returned by [`TickerSource::tickers`].
pub type TickerFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<Ticker>, SourceError>> + Send + 'a>>;

/// Remote ticker data contract.
///
/// Implementations must be `Send + Sync`; the view model shares one source
/// between the catalog and rate queries.
pub trait TickerSource: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Tickers quoted against `currency`; `""` requests the baseline set.
    ///
    /// A single-object response is returned as a one-element list.
    fn tickers<'a>(&'a self, currency: &'a str) -> TickerFuture<'a>;
}
