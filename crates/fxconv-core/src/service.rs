use std::sync::Arc;

use crate::data_source::{SourceError, TickerSource};
use crate::{build_catalog, normalize_all, CurrencySet, NormalizedRate, DEFAULT_CURRENCY};

/// Ticker-backed operations the converter needs: the catalog and per-base rates.
///
/// Failures from the source are returned untouched; retry and caching belong
/// to the query layer.
#[derive(Clone)]
pub struct RateService {
    source: Arc<dyn TickerSource>,
    default_currency: String,
}

impl RateService {
    pub fn new(source: Arc<dyn TickerSource>) -> Self {
        Self {
            source,
            default_currency: DEFAULT_CURRENCY.to_owned(),
        }
    }

    pub fn with_default_currency(mut self, currency: impl Into<String>) -> Self {
        self.default_currency = currency.into();
        self
    }

    pub fn default_currency(&self) -> &str {
        &self.default_currency
    }

    /// Every code referenced by the baseline ticker set, plus the default currency.
    pub async fn all_currencies(&self) -> Result<CurrencySet, SourceError> {
        let tickers = self.source.tickers("").await?;
        let catalog = build_catalog(&tickers, &self.default_currency);
        tracing::debug!(source = self.source.name(), count = catalog.len(), "built currency catalog");
        Ok(catalog)
    }

    /// Normalized tickers quoted against `base_currency`.
    pub async fn currency_rates(&self, base_currency: &str) -> Result<Vec<NormalizedRate>, SourceError> {
        let tickers = self.source.tickers(base_currency).await?;
        Ok(normalize_all(&tickers))
    }
}
