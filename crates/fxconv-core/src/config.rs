//! Runtime configuration: API endpoint selection, query policies and input limits.
//!
//! # Environment Variables
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `FXCONV_ENV` | `development` or `production`; selects the default base URL |
//! | `FXCONV_API_BASE_URL` | Overrides the base URL regardless of build mode |

use std::env;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::time::Duration;

use crate::retry::RetryConfig;
use crate::ValidationError;

/// Local proxy path used while developing against the sandbox.
pub const DEV_PROXY_BASE_URL: &str = "http://localhost:5173/api";
/// Remote sandbox host used by release builds.
pub const SANDBOX_BASE_URL: &str = "http://api-sandbox.uphold.com";

/// Build mode deciding which ticker endpoint is targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    Development,
    Production,
}

impl BuildMode {
    /// Mode of the running binary: debug builds are development builds.
    pub const fn current() -> Self {
        if cfg!(debug_assertions) {
            Self::Development
        } else {
            Self::Production
        }
    }

    pub const fn default_base_url(self) -> &'static str {
        match self {
            Self::Development => DEV_PROXY_BASE_URL,
            Self::Production => SANDBOX_BASE_URL,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl Display for BuildMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildMode {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(ValidationError::InvalidBuildMode {
                value: value.to_owned(),
            }),
        }
    }
}

/// Ticker API connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl ApiConfig {
    pub fn for_mode(mode: BuildMode) -> Self {
        Self {
            base_url: mode.default_base_url().to_owned(),
            timeout_ms: 3_000,
            user_agent: concat!("fxconv/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }

    /// Resolve from `FXCONV_ENV` / `FXCONV_API_BASE_URL`, falling back to the
    /// binary's own build mode.
    pub fn from_env() -> Result<Self, ValidationError> {
        let mode = match env::var("FXCONV_ENV") {
            Ok(value) => value.parse()?,
            Err(_) => BuildMode::current(),
        };

        let mut config = Self::for_mode(mode);
        if let Ok(base_url) = env::var("FXCONV_API_BASE_URL") {
            config = config.with_base_url(base_url);
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::for_mode(BuildMode::current())
    }
}

/// Staleness window, retry budget and refocus behavior of one query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPolicy {
    pub stale_time: Duration,
    pub retry: RetryConfig,
    pub refetch_on_focus: bool,
}

impl QueryPolicy {
    /// Currency catalog: fetched rarely, never refetched on refocus.
    pub fn currencies() -> Self {
        Self {
            stale_time: Duration::from_secs(60 * 60),
            retry: RetryConfig::default(),
            refetch_on_focus: false,
        }
    }

    /// Per-base rates: short window, refreshed whenever the window regains focus.
    pub fn rates() -> Self {
        Self {
            stale_time: Duration::from_secs(5 * 60),
            retry: RetryConfig::default(),
            refetch_on_focus: true,
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}

/// Limits applied by the amount input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputConfig {
    pub max_value: u64,
    pub debounce: Duration,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_value: 1_000_000_000,
            debounce: Duration::from_millis(500),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_mode_selects_endpoint() {
        assert_eq!(
            ApiConfig::for_mode(BuildMode::Development).base_url,
            DEV_PROXY_BASE_URL
        );
        assert_eq!(
            ApiConfig::for_mode(BuildMode::Production).base_url,
            SANDBOX_BASE_URL
        );
    }

    #[test]
    fn build_mode_parses_short_and_long_names() {
        assert_eq!("dev".parse::<BuildMode>(), Ok(BuildMode::Development));
        assert_eq!("Production".parse::<BuildMode>(), Ok(BuildMode::Production));
        assert!(matches!(
            "staging".parse::<BuildMode>(),
            Err(ValidationError::InvalidBuildMode { .. })
        ));
    }

    #[test]
    fn base_url_override_drops_trailing_slash() {
        let config = ApiConfig::for_mode(BuildMode::Production).with_base_url("http://proxy.test/");
        assert_eq!(config.base_url, "http://proxy.test");
    }

    #[test]
    fn query_policies_have_independent_windows() {
        let currencies = QueryPolicy::currencies();
        let rates = QueryPolicy::rates();
        assert_eq!(currencies.stale_time, Duration::from_secs(3600));
        assert_eq!(rates.stale_time, Duration::from_secs(300));
        assert!(!currencies.refetch_on_focus);
        assert!(rates.refetch_on_focus);
        assert_eq!(rates.retry.max_retries, 2);
    }
}
