use std::future::Future;

use fxconv_tests::{
    block_on, ApiConfig, Arc, BuildMode, HttpClient, HttpError, HttpRequest, HttpResponse,
    SourceErrorKind, StaticHttpClient, TickerSource, UpholdTickerSource,
};

struct SourceCase {
    label: &'static str,
    response: HttpResponse,
    expected: Result<usize, SourceErrorKind>,
}

fn source_with(response: HttpResponse) -> UpholdTickerSource {
    let http_client: Arc<dyn HttpClient> = Arc::new(StaticHttpClient::new(response));
    UpholdTickerSource::with_http_client(http_client, ApiConfig::for_mode(BuildMode::Production))
}

fn cases() -> Vec<SourceCase> {
    vec![
        SourceCase {
            label: "array payload",
            response: HttpResponse::ok_json(
                r#"[{"pair":"BTC-USD","ask":"1","bid":"1","currency":"USD"},
                    {"pair":"XAUUSD","ask":"2","bid":"2","currency":"USD"}]"#,
            ),
            expected: Ok(2),
        },
        SourceCase {
            label: "single object payload",
            response: HttpResponse::ok_json(
                r#"{"pair":"BTC-USD","ask":"1","bid":"1","currency":"USD"}"#,
            ),
            expected: Ok(1),
        },
        SourceCase {
            label: "empty array",
            response: HttpResponse::ok_json("[]"),
            expected: Ok(0),
        },
        SourceCase {
            label: "scalar body",
            response: HttpResponse::ok_json("42"),
            expected: Err(SourceErrorKind::InvalidPayload),
        },
        SourceCase {
            label: "array of non-tickers",
            response: HttpResponse::ok_json(r#"[{"symbol":"BTC"}]"#),
            expected: Err(SourceErrorKind::InvalidPayload),
        },
        SourceCase {
            label: "rate limited",
            response: HttpResponse::with_status(429, ""),
            expected: Err(SourceErrorKind::RateLimited),
        },
        SourceCase {
            label: "server error",
            response: HttpResponse::with_status(502, ""),
            expected: Err(SourceErrorKind::Unavailable),
        },
        SourceCase {
            label: "unknown currency",
            response: HttpResponse::with_status(404, r#"{"code":"not_found"}"#),
            expected: Err(SourceErrorKind::InvalidRequest),
        },
    ]
}

#[test]
fn ticker_source_maps_every_response_shape() {
    for case in cases() {
        let source = source_with(case.response);
        let outcome = block_on(source.tickers("USD"))
            .map(|tickers| tickers.len())
            .map_err(|error| error.kind());

        assert_eq!(outcome, case.expected, "case '{}'", case.label);
    }
}

#[test]
fn ticker_source_errors_carry_stable_codes_and_retry_hints() {
    let rate_limited = block_on(source_with(HttpResponse::with_status(429, "")).tickers("USD"))
        .expect_err("429 must fail");
    assert_eq!(rate_limited.code(), "source.rate_limited");
    assert!(rate_limited.retryable());

    let rejected = block_on(source_with(HttpResponse::with_status(400, "")).tickers("USD"))
        .expect_err("400 must fail");
    assert_eq!(rejected.code(), "source.invalid_request");
    assert!(!rejected.retryable());

    let malformed = block_on(source_with(HttpResponse::ok_json("not json")).tickers("USD"))
        .expect_err("malformed body must fail");
    assert_eq!(malformed.code(), "source.invalid_payload");
    assert!(!malformed.retryable());
}

#[test]
fn ticker_source_urls_follow_build_mode() {
    let production = source_with(HttpResponse::ok_json("[]"));
    assert_eq!(
        production.ticker_url(""),
        "http://api-sandbox.uphold.com/v0/ticker"
    );
    assert_eq!(
        production.ticker_url("EUR"),
        "http://api-sandbox.uphold.com/v0/ticker/EUR"
    );

    let development = UpholdTickerSource::new(ApiConfig::for_mode(BuildMode::Development));
    assert_eq!(
        development.ticker_url("USD"),
        "http://localhost:5173/api/v0/ticker/USD"
    );
    assert_eq!(development.name(), "uphold");
}

#[test]
fn transport_errors_keep_retryability() {
    struct FailingClient(HttpError);

    impl HttpClient for FailingClient {
        fn execute<'a>(
            &'a self,
            _request: HttpRequest,
        ) -> std::pin::Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>>
        {
            let error = self.0.clone();
            Box::pin(async move { Err(error) })
        }
    }

    let transient = UpholdTickerSource::with_http_client(
        Arc::new(FailingClient(HttpError::new("connection reset"))),
        ApiConfig::default(),
    );
    let error = block_on(transient.tickers("USD")).expect_err("transport failure");
    assert_eq!(error.kind(), SourceErrorKind::Unavailable);
    assert!(error.retryable());

    let fatal = UpholdTickerSource::with_http_client(
        Arc::new(FailingClient(HttpError::non_retryable("invalid url"))),
        ApiConfig::default(),
    );
    let error = block_on(fatal.tickers("USD")).expect_err("transport failure");
    assert_eq!(error.kind(), SourceErrorKind::Internal);
    assert!(!error.retryable());
}
