use serde::{Deserialize, Serialize};

use crate::format::{parse_float, to_fixed};

/// Fractional digits carried by normalized `ask`/`bid` values.
pub const RATE_PRECISION: usize = 6;

/// Raw exchange-rate record for one currency pair, as returned by the ticker API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticker {
    pub pair: String,
    pub ask: String,
    pub bid: String,
    pub currency: String,
}

impl Ticker {
    pub fn new(
        pair: impl Into<String>,
        ask: impl Into<String>,
        bid: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            pair: pair.into(),
            ask: ask.into(),
            bid: bid.into(),
            currency: currency.into(),
        }
    }

    /// Code on the other side of the pair from `currency`.
    pub fn paired_currency(&self) -> &str {
        extract_paired_currency(&self.pair, &self.currency)
    }
}

/// Ticker endpoint body: a pair query yields one object, a currency query an array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TickerPayload {
    Many(Vec<Ticker>),
    One(Ticker),
}

impl TickerPayload {
    pub fn into_vec(self) -> Vec<Ticker> {
        match self {
            Self::Many(tickers) => tickers,
            Self::One(ticker) => vec![ticker],
        }
    }
}

impl From<TickerPayload> for Vec<Ticker> {
    fn from(value: TickerPayload) -> Self {
        value.into_vec()
    }
}

/// Ticker with fixed-precision prices and the derived paired currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRate {
    pub pair: String,
    pub ask: String,
    pub bid: String,
    pub currency: String,
    pub paired_currency: String,
}

impl NormalizedRate {
    /// `false` for rates whose quote side or prices are missing.
    pub fn is_complete(&self) -> bool {
        !self.currency.is_empty() && !self.ask.is_empty() && !self.bid.is_empty()
    }
}

impl From<&Ticker> for NormalizedRate {
    fn from(ticker: &Ticker) -> Self {
        normalize(ticker)
    }
}

/// Normalize one raw ticker.
///
/// Prices that do not parse as a number become the literal `"NaN"`; callers
/// that need a numeric value must check for it.
pub fn normalize(ticker: &Ticker) -> NormalizedRate {
    NormalizedRate {
        pair: ticker.pair.clone(),
        ask: format_fixed(&ticker.ask, RATE_PRECISION),
        bid: format_fixed(&ticker.bid, RATE_PRECISION),
        currency: ticker.currency.clone(),
        paired_currency: ticker.paired_currency().to_owned(),
    }
}

/// Normalize every ticker of a payload, preserving order.
pub fn normalize_all(tickers: &[Ticker]) -> Vec<NormalizedRate> {
    tickers.iter().map(normalize).collect()
}

/// Extract the code in `pair` that is not `currency`.
///
/// Hyphenated pairs (`BTC-USD`) return the side that differs from `currency`,
/// falling back to the second side when both or neither match. Concatenated
/// pairs (`XAUUSD`) strip `currency` from the end first, then from the start;
/// when it matches neither end the pair is returned unchanged.
pub fn extract_paired_currency<'a>(pair: &'a str, currency: &str) -> &'a str {
    if let Some((first, second)) = pair.split_once('-') {
        let second = second.split('-').next().unwrap_or(second);
        return match (first == currency, second == currency) {
            (false, true) => first,
            (true, false) => second,
            _ => second,
        };
    }

    if currency.is_empty() {
        return pair;
    }

    if let Some(prefix) = pair.strip_suffix(currency) {
        return prefix;
    }

    if let Some(suffix) = pair.strip_prefix(currency) {
        return suffix;
    }

    pair
}

/// Parse the numeric prefix of `raw` and render it with exactly `precision`
/// fractional digits.
pub fn format_fixed(raw: &str, precision: usize) -> String {
    to_fixed(parse_float(raw), precision)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hyphenated_pair_returns_side_opposite_quote() {
        assert_eq!(extract_paired_currency("BTC-USD", "USD"), "BTC");
        assert_eq!(extract_paired_currency("USD-BTC", "USD"), "BTC");
    }

    #[test]
    fn hyphenated_pair_falls_back_to_second_side() {
        assert_eq!(extract_paired_currency("USD-USD", "USD"), "USD");
        assert_eq!(extract_paired_currency("BTC-ETH", "USD"), "ETH");
    }

    #[test]
    fn concatenated_pair_strips_quote_from_either_end() {
        assert_eq!(extract_paired_currency("XAUUSD", "USD"), "XAU");
        assert_eq!(extract_paired_currency("USDXAU", "USD"), "XAU");
    }

    #[test]
    fn concatenated_pair_prefers_end_match() {
        assert_eq!(extract_paired_currency("USDUSD", "USD"), "USD");
        assert_eq!(extract_paired_currency("EURUSDEUR", "EUR"), "EURUSD");
    }

    #[test]
    fn unmatched_concatenated_pair_is_returned_unchanged() {
        assert_eq!(extract_paired_currency("XAUGBP", "USD"), "XAUGBP");
        assert_eq!(extract_paired_currency("XAUGBP", ""), "XAUGBP");
    }

    #[test]
    fn formats_prices_to_six_digits() {
        assert_eq!(format_fixed("42000.1", 6), "42000.100000");
        assert_eq!(format_fixed("0.000024", 6), "0.000024");
        assert_eq!(format_fixed("1", 6), "1.000000");
        assert_eq!(format_fixed(" 2.5 ", 6), "2.500000");
    }

    #[test]
    fn unparseable_price_becomes_nan_literal() {
        assert_eq!(format_fixed("n/a", 6), "NaN");
        assert_eq!(format_fixed("", 6), "NaN");
    }

    #[test]
    fn trailing_garbage_after_price_is_ignored() {
        assert_eq!(format_fixed("12abc", 6), "12.000000");
        assert_eq!(format_fixed("1.5e2 USD", 2), "150.00");
    }

    #[test]
    fn exact_tie_rounds_up() {
        assert_eq!(format_fixed("0.0078125", 6), "0.007813");
    }

    #[test]
    fn normalize_adds_paired_currency() {
        let rate = normalize(&Ticker::new("EUR-USD", "1.08", "1.07", "USD"));
        assert_eq!(rate.paired_currency, "EUR");
        assert_eq!(rate.ask, "1.080000");
        assert_eq!(rate.bid, "1.070000");
        assert_eq!(rate.pair, "EUR-USD");
    }

    #[test]
    fn payload_accepts_single_object_and_array() {
        let one: TickerPayload = serde_json::from_str(
            r#"{"pair":"BTC-USD","ask":"1","bid":"2","currency":"USD"}"#,
        )
        .expect("single ticker should decode");
        assert_eq!(one.into_vec().len(), 1);

        let many: TickerPayload = serde_json::from_str(
            r#"[{"pair":"BTC-USD","ask":"1","bid":"2","currency":"USD"},
                {"pair":"XAUUSD","ask":"3","bid":"4","currency":"USD","extra":true}]"#,
        )
        .expect("ticker array should decode");
        assert_eq!(many.into_vec().len(), 2);
    }
}
