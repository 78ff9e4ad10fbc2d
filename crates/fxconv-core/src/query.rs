//! Cached, retried access to the two converter resources.
//!
//! | Resource | Cache key | Policy |
//! |----------|-----------|--------|
//! | Currency catalog | `availableCurrencies` | [`QueryPolicy::currencies`] |
//! | Rates for a base | `currencyRates:{base}` | [`QueryPolicy::rates`] |

use std::future::Future;

use crate::cache::{CacheKey, CacheMode, CacheStore};
use crate::config::QueryPolicy;
use crate::data_source::SourceError;
use crate::retry::retry_async;
use crate::service::RateService;
use crate::{CurrencySet, NormalizedRate};

pub const CURRENCIES_RESOURCE: &str = "availableCurrencies";
pub const RATES_RESOURCE: &str = "currencyRates";

/// Read-through fetch: serve from `cache` per `mode`, otherwise run `fetch`
/// under the policy's retry budget and store the result for `stale_time`.
pub async fn fetch_cached<V, F, Fut>(
    cache: &CacheStore<V>,
    key: &CacheKey,
    policy: &QueryPolicy,
    mode: CacheMode,
    mut fetch: F,
) -> Result<V, SourceError>
where
    V: Clone,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<V, SourceError>>,
{
    if mode == CacheMode::Use {
        if let Some(value) = cache.get(key).await {
            tracing::trace!(%key, "cache hit");
            return Ok(value);
        }
        tracing::debug!(%key, "cache miss");
    }

    let label = key.to_string();
    let value = retry_async(&policy.retry, &label, |_| fetch()).await?;

    if mode != CacheMode::Bypass {
        cache.put(key.clone(), value.clone(), policy.stale_time).await;
    }
    Ok(value)
}

/// Owns the caches and policies for the catalog and rate queries.
#[derive(Clone)]
pub struct QueryClient {
    service: RateService,
    currencies_policy: QueryPolicy,
    rates_policy: QueryPolicy,
    currencies: CacheStore<CurrencySet>,
    rates: CacheStore<Vec<NormalizedRate>>,
}

impl QueryClient {
    pub fn new(service: RateService) -> Self {
        Self {
            service,
            currencies_policy: QueryPolicy::currencies(),
            rates_policy: QueryPolicy::rates(),
            currencies: CacheStore::new(),
            rates: CacheStore::new(),
        }
    }

    pub fn with_policies(mut self, currencies: QueryPolicy, rates: QueryPolicy) -> Self {
        self.currencies_policy = currencies;
        self.rates_policy = rates;
        self
    }

    pub fn service(&self) -> &RateService {
        &self.service
    }

    pub fn rates_policy(&self) -> &QueryPolicy {
        &self.rates_policy
    }

    pub fn currencies_key() -> CacheKey {
        CacheKey::new(CURRENCIES_RESOURCE)
    }

    pub fn rates_key(base_currency: &str) -> CacheKey {
        CacheKey::new(RATES_RESOURCE).with_param(base_currency)
    }

    pub async fn available_currencies(&self, mode: CacheMode) -> Result<CurrencySet, SourceError> {
        fetch_cached(
            &self.currencies,
            &Self::currencies_key(),
            &self.currencies_policy,
            mode,
            || self.service.all_currencies(),
        )
        .await
    }

    pub async fn currency_rates(
        &self,
        base_currency: &str,
        mode: CacheMode,
    ) -> Result<Vec<NormalizedRate>, SourceError> {
        fetch_cached(
            &self.rates,
            &Self::rates_key(base_currency),
            &self.rates_policy,
            mode,
            || self.service.currency_rates(base_currency),
        )
        .await
    }

    /// Cache mode a window-refocus refetch should use for rates, if any.
    pub fn rates_refocus_mode(&self) -> Option<CacheMode> {
        self.rates_policy
            .refetch_on_focus
            .then_some(CacheMode::Refresh)
    }

    /// Drop every cached entry (catalog and rates).
    pub async fn reset(&self) {
        self.currencies.clear().await;
        self.rates.clear().await;
    }
}
