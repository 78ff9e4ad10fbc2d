use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::ticker::Ticker;

/// Unique currency codes offered as selectable base currencies.
///
/// Membership is what matters; iteration is alphabetical so listings are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencySet(BTreeSet<String>);

impl CurrencySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: impl Into<String>) -> bool {
        let code = code.into();
        if code.is_empty() {
            return false;
        }
        self.0.insert(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.contains(code)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for CurrencySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for code in iter {
            set.insert(code);
        }
        set
    }
}

/// Collect every code referenced by `tickers`, seeded with `default_currency`.
///
/// Each ticker contributes its quote currency and its paired currency.
pub fn build_catalog(tickers: &[Ticker], default_currency: &str) -> CurrencySet {
    let mut catalog = CurrencySet::new();
    catalog.insert(default_currency);

    for ticker in tickers {
        catalog.insert(ticker.currency.as_str());
        catalog.insert(ticker.paired_currency());
    }

    catalog
}
