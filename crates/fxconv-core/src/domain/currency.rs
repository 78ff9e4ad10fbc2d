use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_CURRENCY_LEN: usize = 10;

/// Reference currency used to seed the catalog and as the initial base.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Normalized currency code as selected by the user (`USD`, `BTC`, `USDT`...).
///
/// Ticker payloads keep their codes as plain strings; this type guards the
/// values a user types in before they reach a request path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parse and normalize a currency code to uppercase.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyCurrency);
        }

        let normalized = trimmed.to_ascii_uppercase();
        let len = normalized.chars().count();
        if len > MAX_CURRENCY_LEN {
            return Err(ValidationError::CurrencyTooLong {
                len,
                max: MAX_CURRENCY_LEN,
            });
        }

        for (index, ch) in normalized.chars().enumerate() {
            if !ch.is_ascii_alphanumeric() {
                return Err(ValidationError::CurrencyInvalidChar { ch, index });
            }
        }

        Ok(Self(normalized))
    }

    pub fn usd() -> Self {
        Self(String::from(DEFAULT_CURRENCY))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::usd()
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for CurrencyCode {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<CurrencyCode> for String {
    fn from(value: CurrencyCode) -> Self {
        value.0
    }
}

impl PartialEq<str> for CurrencyCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_normalizes_code() {
        let parsed = CurrencyCode::parse(" eur ").expect("code should parse");
        assert_eq!(parsed.as_str(), "EUR");
    }

    #[test]
    fn accepts_alphanumeric_tokens() {
        assert_eq!(CurrencyCode::parse("usdt").expect("valid").as_str(), "USDT");
        assert_eq!(CurrencyCode::parse("1inch").expect("valid").as_str(), "1INCH");
    }

    #[test]
    fn rejects_separator_characters() {
        let err = CurrencyCode::parse("BTC-USD").expect_err("must fail");
        assert!(matches!(
            err,
            ValidationError::CurrencyInvalidChar { ch: '-', index: 3 }
        ));
    }

    #[test]
    fn rejects_empty_code() {
        assert_eq!(
            CurrencyCode::parse("   ").expect_err("must fail"),
            ValidationError::EmptyCurrency
        );
    }
}
