//! Conversion view model.
//!
//! Composes the catalog query, the per-base rate query and the committed
//! amount into one [`ConversionView`]. Rate state is kept per base currency so
//! a response for a base the user already left never reaches the current view.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::cache::CacheMode;
use crate::data_source::SourceError;
use crate::format::{converted_value, fallback_icon};
use crate::query::QueryClient;
use crate::{CurrencyCode, CurrencySet, NormalizedRate, ValidationError, DEFAULT_CURRENCY};

pub const LOADING_CONVERTER_MESSAGE: &str = "Loading currency converter...";
pub const LOADING_RATES_MESSAGE: &str = "Loading currency rates...";
pub const NO_CURRENCIES_MESSAGE: &str = "No currencies available. Please try again later.";
pub const NO_RATES_MESSAGE: &str = "No conversion rates available for the selected currency.";
pub const RATE_PLACEHOLDER_ROWS: usize = 5;

/// Lifecycle of one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryStatus<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(SourceError),
}

impl<T> QueryStatus<T> {
    pub fn from_result(result: Result<T, SourceError>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(error) => Self::Failed(error),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&SourceError> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }
}

/// Error surfaced to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewError {
    pub code: &'static str,
    pub message: String,
}

impl ViewError {
    /// Alert text shown in place of the converter.
    pub fn alert(&self) -> String {
        format!("Error: {}", self.message)
    }
}

impl From<&SourceError> for ViewError {
    fn from(error: &SourceError) -> Self {
        Self {
            code: error.code(),
            message: error.message().to_owned(),
        }
    }
}

/// One converted entry of the rate list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateRow {
    pub pair: String,
    pub paired_currency: String,
    pub icon: String,
    pub converted_value: String,
    pub ask: String,
    pub bid: String,
}

/// Snapshot consumed by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionView {
    pub amount: String,
    pub base_currency: String,
    pub rates: Vec<NormalizedRate>,
    pub currencies: Vec<String>,
    pub loading_currencies: bool,
    pub loading_rates: bool,
    pub error: Option<ViewError>,
}

impl ConversionView {
    pub fn rows(&self) -> Vec<RateRow> {
        self.rates
            .iter()
            .map(|rate| RateRow {
                pair: rate.pair.clone(),
                paired_currency: rate.paired_currency.clone(),
                icon: fallback_icon(&rate.paired_currency),
                converted_value: converted_value(&self.amount, &rate.ask),
                ask: rate.ask.clone(),
                bid: rate.bid.clone(),
            })
            .collect()
    }

    /// What the converter area should show, in display precedence order.
    pub fn screen(&self) -> Screen {
        if self.loading_currencies {
            return Screen::LoadingConverter;
        }
        if let Some(error) = &self.error {
            return Screen::Failed(error.clone());
        }
        if self.currencies.is_empty() {
            return Screen::NoCurrencies;
        }

        let rates = if self.loading_rates {
            RatesPanel::Loading {
                placeholders: RATE_PLACEHOLDER_ROWS,
            }
        } else if self.rates.is_empty() {
            RatesPanel::Empty
        } else {
            RatesPanel::Rows(self.rows())
        };
        Screen::Converter { rates }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    LoadingConverter,
    Failed(ViewError),
    NoCurrencies,
    Converter { rates: RatesPanel },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RatesPanel {
    Loading { placeholders: usize },
    Empty,
    Rows(Vec<RateRow>),
}

/// Converter state: amount, base currency and the two query results.
pub struct ConversionViewModel {
    client: QueryClient,
    amount: String,
    base_currency: String,
    currencies: QueryStatus<CurrencySet>,
    rates: BTreeMap<String, QueryStatus<Vec<NormalizedRate>>>,
}

impl ConversionViewModel {
    pub fn new(client: QueryClient) -> Self {
        Self {
            client,
            amount: String::new(),
            base_currency: DEFAULT_CURRENCY.to_owned(),
            currencies: QueryStatus::Idle,
            rates: BTreeMap::new(),
        }
    }

    pub fn with_base_currency(mut self, base_currency: CurrencyCode) -> Self {
        self.base_currency = base_currency.into();
        self
    }

    pub fn client(&self) -> &QueryClient {
        &self.client
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn base_currency(&self) -> &str {
        &self.base_currency
    }

    pub fn set_amount(&mut self, amount: impl Into<String>) {
        self.amount = amount.into();
    }

    /// Switch the base currency. Returns `true` when it changed.
    ///
    /// In-flight fetches for the previous base are not cancelled; their
    /// results land in that base's slot.
    pub fn set_base_currency(&mut self, code: &str) -> Result<bool, ValidationError> {
        let code = CurrencyCode::parse(code)?;
        if code.as_str() == self.base_currency {
            return Ok(false);
        }
        tracing::debug!(from = %self.base_currency, to = %code, "switching base currency");
        self.base_currency = code.into();
        Ok(true)
    }

    /// Rates are only requested once a non-empty catalog has loaded.
    pub fn rates_enabled(&self) -> bool {
        self.currencies
            .ready()
            .is_some_and(|currencies| !currencies.is_empty())
    }

    pub async fn load_currencies(&mut self) {
        self.begin_currencies();
        let client = self.client.clone();
        let result = client.available_currencies(CacheMode::Use).await;
        self.apply_currencies(result);
    }

    pub async fn load_rates(&mut self) {
        self.fetch_rates(CacheMode::Use).await;
    }

    /// Catalog first, then rates for the current base.
    pub async fn load(&mut self) {
        self.load_currencies().await;
        self.load_rates().await;
    }

    /// Window-refocus refetch: rates only, and only if the policy asks for it.
    pub async fn refocus(&mut self) {
        if let Some(mode) = self.client.rates_refocus_mode() {
            self.fetch_rates(mode).await;
        }
    }

    async fn fetch_rates(&mut self, mode: CacheMode) {
        let Some(base_currency) = self.begin_rates() else {
            return;
        };
        let client = self.client.clone();
        let result = client.currency_rates(&base_currency, mode).await;
        self.apply_rates(&base_currency, result);
    }

    pub fn begin_currencies(&mut self) {
        self.currencies = QueryStatus::Loading;
    }

    pub fn apply_currencies(&mut self, result: Result<CurrencySet, SourceError>) {
        if let Err(error) = &result {
            tracing::warn!(code = error.code(), error = %error, "currency catalog unavailable");
        }
        self.currencies = QueryStatus::from_result(result);
    }

    /// Mark the current base's rates as loading. Returns the base to fetch, or
    /// `None` while the rate query is disabled.
    pub fn begin_rates(&mut self) -> Option<String> {
        if !self.rates_enabled() {
            return None;
        }
        self.rates
            .insert(self.base_currency.clone(), QueryStatus::Loading);
        Some(self.base_currency.clone())
    }

    /// Record a rate response for `base_currency`, whichever base is current.
    pub fn apply_rates(&mut self, base_currency: &str, result: Result<Vec<NormalizedRate>, SourceError>) {
        if let Err(error) = &result {
            tracing::warn!(base = base_currency, code = error.code(), error = %error, "currency rates unavailable");
        }
        if base_currency != self.base_currency {
            tracing::debug!(base = base_currency, current = %self.base_currency, "late rates response");
        }
        self.rates
            .insert(base_currency.to_owned(), QueryStatus::from_result(result));
    }

    pub fn currencies_status(&self) -> &QueryStatus<CurrencySet> {
        &self.currencies
    }

    pub fn rates_status(&self, base_currency: &str) -> Option<&QueryStatus<Vec<NormalizedRate>>> {
        self.rates.get(base_currency)
    }

    pub fn snapshot(&self) -> ConversionView {
        let current = self.rates.get(&self.base_currency);
        let base_currency = self.base_currency.as_str();

        let rates = current
            .and_then(QueryStatus::ready)
            .map(|rates| {
                rates
                    .iter()
                    .filter(|rate| rate.is_complete() && rate.currency == base_currency)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        let loading_rates = match current {
            Some(status) => status.is_loading(),
            None => self.rates_enabled(),
        };

        let error = self
            .currencies
            .error()
            .or_else(|| current.and_then(QueryStatus::error))
            .map(ViewError::from);

        ConversionView {
            amount: self.amount.clone(),
            base_currency: self.base_currency.clone(),
            rates,
            currencies: self
                .currencies
                .ready()
                .map(CurrencySet::to_vec)
                .unwrap_or_default(),
            loading_currencies: matches!(self.currencies, QueryStatus::Idle | QueryStatus::Loading),
            loading_rates,
            error,
        }
    }
}
