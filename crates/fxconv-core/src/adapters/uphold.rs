use std::sync::Arc;

use crate::config::ApiConfig;
use crate::data_source::{SourceError, TickerFuture, TickerSource};
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::{Ticker, TickerPayload};

/// Ticker source backed by the Uphold public ticker endpoint (`/v0/ticker`).
#[derive(Clone)]
pub struct UpholdTickerSource {
    http_client: Arc<dyn HttpClient>,
    config: ApiConfig,
}

impl UpholdTickerSource {
    pub fn new(config: ApiConfig) -> Self {
        let http_client = Arc::new(ReqwestHttpClient::new(&config.user_agent));
        Self {
            http_client,
            config,
        }
    }

    pub fn with_http_client(http_client: Arc<dyn HttpClient>, config: ApiConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// `{base}/v0/ticker` for the baseline set, `{base}/v0/ticker/{currency}` otherwise.
    pub fn ticker_url(&self, currency: &str) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        let currency = currency.trim();
        if currency.is_empty() {
            format!("{base}/v0/ticker")
        } else {
            format!("{base}/v0/ticker/{}", urlencoding::encode(currency))
        }
    }

    async fn fetch(&self, currency: &str) -> Result<Vec<Ticker>, SourceError> {
        let url = self.ticker_url(currency);
        let request = HttpRequest::get(url.as_str()).with_timeout_ms(self.config.timeout_ms);

        tracing::debug!(%url, "fetching tickers");
        let response = self.http_client.execute(request).await.map_err(|error| {
            if error.retryable() {
                SourceError::unavailable(format!("ticker transport error: {}", error.message()))
            } else {
                SourceError::internal(format!("ticker transport error: {}", error.message()))
            }
        })?;

        if !response.is_success() {
            return Err(status_to_error(response.status));
        }

        let payload: TickerPayload = serde_json::from_str(&response.body).map_err(|error| {
            SourceError::invalid_payload(format!("ticker response is not a ticker list: {error}"))
        })?;
        let tickers = payload.into_vec();
        tracing::debug!(count = tickers.len(), currency, "received tickers");
        Ok(tickers)
    }
}

impl TickerSource for UpholdTickerSource {
    fn name(&self) -> &'static str {
        "uphold"
    }

    fn tickers<'a>(&'a self, currency: &'a str) -> TickerFuture<'a> {
        Box::pin(self.fetch(currency))
    }
}

fn status_to_error(status: u16) -> SourceError {
    match status {
        429 => SourceError::rate_limited("ticker API rate limit reached (status 429)"),
        408 | 500..=599 => {
            SourceError::unavailable(format!("ticker API returned status {status}"))
        }
        _ => SourceError::invalid_request(format!("ticker API rejected request (status {status})")),
    }
}
