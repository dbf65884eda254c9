//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::domain::{
    ApiKey, AvailableNumbers, AvailableNumbersResponse, BaseUrl, BeginCall, BeginCallResponse,
    ValidationError,
};

const BEGIN_CALL_PATH: &str = "begin_call";
const AVAILABLE_NUMBERS_PATH: &str = "numbers/available";

/// Timeout applied to each request unless overridden on the builder.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Failure message carried by transport-level errors from `begin_call`.
const BEGIN_CALL_FAILURE: &str = "Verimor API request failed";
/// Failure message carried by transport-level errors from `numbers/available`.
const AVAILABLE_NUMBERS_FAILURE: &str = "Failed to get available numbers";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn post_query<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;

    fn get_query<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<HttpResponse, Box<dyn StdError + Send + Sync>> {
        let response = request
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}

impl HttpTransport for ReqwestTransport {
    fn post_query<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move { self.execute(self.client.post(url).query(&params)).await })
    }

    fn get_query<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move { self.execute(self.client.get(url).query(&params)).await })
    }
}

#[derive(Debug, Clone)]
/// Explicit client configuration.
///
/// Construct directly with [`Config::new`], or read the process environment
/// through [`Config::from_env`] at the program boundary.
pub struct Config {
    pub api_key: ApiKey,
    pub base_url: BaseUrl,
}

impl Config {
    /// Environment variable holding the API key (required).
    pub const API_KEY_VAR: &'static str = "VERIMOR_API_KEY";
    /// Environment variable overriding the API base URL (optional).
    pub const BASE_URL_VAR: &'static str = "VERIMOR_BASE_URL";

    /// Configuration pointing at the production base URL.
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: BaseUrl::default(),
        }
    }

    /// Read configuration from `VERIMOR_API_KEY` and `VERIMOR_BASE_URL`.
    ///
    /// A missing key yields [`VerimorError::Config`]; a present but blank key
    /// or an unparseable base URL yields [`VerimorError::Validation`].
    pub fn from_env() -> Result<Self, VerimorError> {
        Self::from_lookup(
            std::env::var(Self::API_KEY_VAR).ok(),
            std::env::var(Self::BASE_URL_VAR).ok(),
        )
    }

    fn from_lookup(
        api_key: Option<String>,
        base_url: Option<String>,
    ) -> Result<Self, VerimorError> {
        let api_key = api_key.ok_or(VerimorError::Config {
            var: Self::API_KEY_VAR,
        })?;
        let api_key = ApiKey::new(api_key)?;

        let base_url = match base_url {
            Some(value) => BaseUrl::parse(value)?,
            None => BaseUrl::default(),
        };

        Ok(Self { api_key, base_url })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`VerimorClient`].
///
/// This error preserves:
/// - configuration failures (missing credential),
/// - HTTP-level failures (non-2xx status or transport failures),
/// - decode/validation failures.
pub enum VerimorError {
    /// Required environment variable is absent.
    #[error("{var} environment variable is required")]
    Config { var: &'static str },

    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("{message}: {source}")]
    Transport {
        message: &'static str,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// Non-successful HTTP status code returned by the server.
    #[error("{message}: unexpected HTTP status {status}")]
    HttpStatus {
        message: &'static str,
        status: u16,
        body: Option<String>,
    },

    /// Response body could not be parsed as the expected format.
    #[error("unexpected error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone)]
/// Builder for [`VerimorClient`].
///
/// Use this when you need to customize the endpoints, timeout, or user-agent.
pub struct VerimorClientBuilder {
    api_key: ApiKey,
    begin_call_endpoint: String,
    available_numbers_endpoint: String,
    timeout: Duration,
    user_agent: Option<String>,
}

impl VerimorClientBuilder {
    /// Create a builder with endpoints derived from the configured base URL.
    pub fn new(config: Config) -> Self {
        Self {
            api_key: config.api_key,
            begin_call_endpoint: config.base_url.endpoint(BEGIN_CALL_PATH),
            available_numbers_endpoint: config.base_url.endpoint(AVAILABLE_NUMBERS_PATH),
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }

    /// Derive both endpoint URLs from a new base URL.
    pub fn base_url(mut self, base_url: BaseUrl) -> Self {
        self.begin_call_endpoint = base_url.endpoint(BEGIN_CALL_PATH);
        self.available_numbers_endpoint = base_url.endpoint(AVAILABLE_NUMBERS_PATH);
        self
    }

    /// Override the `begin_call` endpoint URL.
    pub fn begin_call_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.begin_call_endpoint = endpoint.into();
        self
    }

    /// Override the `numbers/available` endpoint URL.
    pub fn available_numbers_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.available_numbers_endpoint = endpoint.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`VerimorClient`].
    pub fn build(self) -> Result<VerimorClient, VerimorError> {
        let mut builder = reqwest::Client::builder().timeout(self.timeout);
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder.build().map_err(|err| VerimorError::Transport {
            message: "failed to build HTTP client",
            source: Box::new(err),
        })?;

        Ok(VerimorClient {
            api_key: self.api_key,
            begin_call_endpoint: self.begin_call_endpoint,
            available_numbers_endpoint: self.available_numbers_endpoint,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// High-level Bulutsantralim client.
///
/// This type orchestrates query encoding and response decoding. By default it
/// uses:
/// - `https://api.bulutsantralim.com/begin_call` for bridging calls
/// - `https://api.bulutsantralim.com/numbers/available` for listing numbers
///
/// Requests carry the API key as the `key` query parameter, JSON accept and
/// content-type headers, and a 30 second timeout. The client holds no mutable
/// per-call state and is cheap to clone and share.
pub struct VerimorClient {
    api_key: ApiKey,
    begin_call_endpoint: String,
    available_numbers_endpoint: String,
    http: Arc<dyn HttpTransport>,
}

impl VerimorClient {
    /// Create a client from explicit configuration with default settings.
    ///
    /// For more customization, use [`VerimorClient::builder`].
    pub fn new(config: Config) -> Result<Self, VerimorError> {
        Self::builder(config).build()
    }

    /// Create a client configured from the process environment.
    ///
    /// Fails before any network activity when `VERIMOR_API_KEY` is missing.
    pub fn from_env() -> Result<Self, VerimorError> {
        Self::builder(Config::from_env()?).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(config: Config) -> VerimorClientBuilder {
        VerimorClientBuilder::new(config)
    }

    /// Bridge a call between the source and destination numbers.
    ///
    /// The switchboard dials both legs as soon as the request is accepted;
    /// submitting the same request twice places two calls.
    ///
    /// Errors:
    /// - [`VerimorError::Transport`] for network/timeout failures,
    /// - [`VerimorError::HttpStatus`] for non-2xx HTTP responses,
    /// - [`VerimorError::Parse`] when the body is not the expected JSON.
    pub async fn begin_call(&self, request: BeginCall) -> Result<BeginCallResponse, VerimorError> {
        let mut params = vec![(ApiKey::FIELD.to_owned(), self.api_key.as_str().to_owned())];
        params.extend(crate::transport::encode_begin_call_query(&request));

        let response = self
            .http
            .post_query(&self.begin_call_endpoint, params)
            .await
            .map_err(|source| VerimorError::Transport {
                message: BEGIN_CALL_FAILURE,
                source,
            })?;

        let body = check_http_status(response, BEGIN_CALL_FAILURE)?;

        crate::transport::decode_begin_call_json_response(&body)
            .map_err(|err| VerimorError::Parse(Box::new(err)))
    }

    /// List numbers available for purchase in an area code.
    ///
    /// Errors:
    /// - [`VerimorError::Transport`] for network/timeout failures,
    /// - [`VerimorError::HttpStatus`] for non-2xx HTTP responses,
    /// - [`VerimorError::Parse`] when the body is not the expected JSON.
    pub async fn available_numbers(
        &self,
        request: AvailableNumbers,
    ) -> Result<AvailableNumbersResponse, VerimorError> {
        let mut params = vec![(ApiKey::FIELD.to_owned(), self.api_key.as_str().to_owned())];
        params.extend(crate::transport::encode_available_numbers_query(&request));

        let response = self
            .http
            .get_query(&self.available_numbers_endpoint, params)
            .await
            .map_err(|source| VerimorError::Transport {
                message: AVAILABLE_NUMBERS_FAILURE,
                source,
            })?;

        let body = check_http_status(response, AVAILABLE_NUMBERS_FAILURE)?;

        crate::transport::decode_available_numbers_json_response(&body)
            .map_err(|err| VerimorError::Parse(Box::new(err)))
    }
}

fn check_http_status(
    response: HttpResponse,
    message: &'static str,
) -> Result<String, VerimorError> {
    if (200..=299).contains(&response.status) {
        return Ok(response.body);
    }

    let body = if response.body.trim().is_empty() {
        None
    } else {
        Some(response.body)
    };
    Err(VerimorError::HttpStatus {
        message,
        status: response.status,
        body,
    })
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Mutex;

    use crate::domain::{AreaCode, BeginCallOptions, PhoneNumber};

    use super::*;

    #[derive(Debug, Clone)]
    struct FakeTransport {
        state: Arc<Mutex<FakeTransportState>>,
    }

    #[derive(Debug)]
    struct FakeTransportState {
        last_method: Option<&'static str>,
        last_url: Option<String>,
        last_params: Vec<(String, String)>,
        response_status: u16,
        response_body: String,
    }

    impl FakeTransport {
        fn new(response_status: u16, response_body: impl Into<String>) -> Self {
            Self {
                state: Arc::new(Mutex::new(FakeTransportState {
                    last_method: None,
                    last_url: None,
                    last_params: Vec::new(),
                    response_status,
                    response_body: response_body.into(),
                })),
            }
        }

        fn record(
            &self,
            method: &'static str,
            url: &str,
            params: Vec<(String, String)>,
        ) -> HttpResponse {
            let mut state = self.state.lock().unwrap();
            state.last_method = Some(method);
            state.last_url = Some(url.to_owned());
            state.last_params = params;
            HttpResponse {
                status: state.response_status,
                body: state.response_body.clone(),
            }
        }

        fn last_request(&self) -> (Option<&'static str>, Option<String>, Vec<(String, String)>) {
            let state = self.state.lock().unwrap();
            (
                state.last_method,
                state.last_url.clone(),
                state.last_params.clone(),
            )
        }
    }

    impl HttpTransport for FakeTransport {
        fn post_query<'a>(
            &'a self,
            url: &'a str,
            params: Vec<(String, String)>,
        ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
            Box::pin(async move { Ok(self.record("POST", url, params)) })
        }

        fn get_query<'a>(
            &'a self,
            url: &'a str,
            params: Vec<(String, String)>,
        ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
            Box::pin(async move { Ok(self.record("GET", url, params)) })
        }
    }

    #[derive(Debug, Clone)]
    struct FailingTransport;

    impl FailingTransport {
        fn error() -> Box<dyn StdError + Send + Sync> {
            Box::new(io::Error::new(io::ErrorKind::TimedOut, "connection timed out"))
        }
    }

    impl HttpTransport for FailingTransport {
        fn post_query<'a>(
            &'a self,
            _url: &'a str,
            _params: Vec<(String, String)>,
        ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
            Box::pin(async move { Err(Self::error()) })
        }

        fn get_query<'a>(
            &'a self,
            _url: &'a str,
            _params: Vec<(String, String)>,
        ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
            Box::pin(async move { Err(Self::error()) })
        }
    }

    fn assert_param(params: &[(String, String)], key: &str, value: &str) {
        assert!(
            params.iter().any(|(k, v)| k == key && v == value),
            "missing param {key}={value}; got: {params:?}"
        );
    }

    fn make_client(transport: impl HttpTransport + 'static) -> VerimorClient {
        VerimorClient {
            api_key: ApiKey::new("test_key").unwrap(),
            begin_call_endpoint: "https://example.invalid/begin_call".to_owned(),
            available_numbers_endpoint: "https://example.invalid/numbers/available".to_owned(),
            http: Arc::new(transport),
        }
    }

    fn make_begin_call() -> BeginCall {
        BeginCall::new(
            PhoneNumber::normalize("908500001000").unwrap(),
            PhoneNumber::normalize("0555 001 122").unwrap(),
            BeginCallOptions::default(),
        )
    }

    #[tokio::test]
    async fn begin_call_includes_key_and_parses_ok_response() {
        let json = r#"
        {
          "session_id": "abc123",
          "status": "ringing"
        }
        "#;

        let transport = FakeTransport::new(200, json);
        let client = make_client(transport.clone());

        let response = client.begin_call(make_begin_call()).await.unwrap();
        assert_eq!(response.session_id.as_deref(), Some("abc123"));
        assert_eq!(response.status, "ringing");
        assert_eq!(response.raw["session_id"], "abc123");

        let (method, url, params) = transport.last_request();
        assert_eq!(method, Some("POST"));
        assert_eq!(url.as_deref(), Some("https://example.invalid/begin_call"));
        assert_param(&params, "key", "test_key");
        assert_param(&params, "source", "908500001000");
        assert_param(&params, "destination", "90555001122");
        assert_param(&params, "auto_answer", "true");
    }

    #[tokio::test]
    async fn begin_call_defaults_status_to_initiated() {
        let transport = FakeTransport::new(200, r#"{ "session_id": "abc123" }"#);
        let client = make_client(transport);

        let response = client.begin_call(make_begin_call()).await.unwrap();
        assert_eq!(response.session_id.as_deref(), Some("abc123"));
        assert_eq!(response.status, "initiated");
    }

    #[tokio::test]
    async fn begin_call_maps_transport_failure() {
        let client = make_client(FailingTransport);

        let err = client.begin_call(make_begin_call()).await.unwrap_err();
        match &err {
            VerimorError::Transport { message, .. } => {
                assert_eq!(*message, "Verimor API request failed");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().starts_with("Verimor API request failed"));
    }

    #[tokio::test]
    async fn begin_call_maps_non_success_http_status() {
        let transport = FakeTransport::new(500, "oops");
        let client = make_client(transport);

        let err = client.begin_call(make_begin_call()).await.unwrap_err();
        assert!(matches!(
            err,
            VerimorError::HttpStatus {
                message: "Verimor API request failed",
                status: 500,
                body: Some(_),
            }
        ));
    }

    #[tokio::test]
    async fn begin_call_maps_empty_http_body_to_none() {
        let transport = FakeTransport::new(503, "   ");
        let client = make_client(transport);

        let err = client.begin_call(make_begin_call()).await.unwrap_err();
        assert!(matches!(
            err,
            VerimorError::HttpStatus {
                status: 503,
                body: None,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn begin_call_maps_invalid_json_to_parse_error() {
        let transport = FakeTransport::new(200, "{ not json }");
        let client = make_client(transport);

        let err = client.begin_call(make_begin_call()).await.unwrap_err();
        assert!(matches!(err, VerimorError::Parse(_)));
    }

    #[tokio::test]
    async fn available_numbers_uses_get_and_parses_numbers() {
        let json = r#"{ "numbers": ["8505551234"] }"#;
        let transport = FakeTransport::new(200, json);
        let client = make_client(transport.clone());

        let response = client
            .available_numbers(AvailableNumbers::default())
            .await
            .unwrap();
        assert_eq!(response.numbers, vec!["8505551234"]);

        let (method, url, params) = transport.last_request();
        assert_eq!(method, Some("GET"));
        assert_eq!(
            url.as_deref(),
            Some("https://example.invalid/numbers/available")
        );
        assert_param(&params, "key", "test_key");
        assert_param(&params, "area_code", "850");
    }

    #[tokio::test]
    async fn available_numbers_maps_transport_failure() {
        let client = make_client(FailingTransport);

        let err = client
            .available_numbers(AvailableNumbers::default())
            .await
            .unwrap_err();
        match &err {
            VerimorError::Transport { message, .. } => {
                assert_eq!(*message, "Failed to get available numbers");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn available_numbers_maps_non_success_http_status() {
        let transport = FakeTransport::new(403, "denied");
        let client = make_client(transport);

        let err = client
            .available_numbers(AvailableNumbers::new(AreaCode::new("212").unwrap()))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            VerimorError::HttpStatus {
                message: "Failed to get available numbers",
                status: 403,
                body: Some(_),
            }
        ));
    }

    #[tokio::test]
    async fn available_numbers_maps_invalid_json_to_parse_error() {
        let transport = FakeTransport::new(200, "oops");
        let client = make_client(transport);

        let err = client
            .available_numbers(AvailableNumbers::default())
            .await
            .unwrap_err();
        assert!(matches!(err, VerimorError::Parse(_)));
    }

    #[test]
    fn config_requires_api_key() {
        let err = Config::from_lookup(None, None).unwrap_err();
        assert!(matches!(
            err,
            VerimorError::Config {
                var: Config::API_KEY_VAR
            }
        ));
        assert_eq!(
            err.to_string(),
            "VERIMOR_API_KEY environment variable is required"
        );
    }

    #[test]
    fn config_rejects_blank_api_key() {
        let err = Config::from_lookup(Some("   ".to_owned()), None).unwrap_err();
        assert!(matches!(err, VerimorError::Validation(_)));
    }

    #[test]
    fn config_defaults_base_url() {
        let config = Config::from_lookup(Some("secret".to_owned()), None).unwrap();
        assert_eq!(config.api_key.as_str(), "secret");
        assert_eq!(config.base_url.as_str(), BaseUrl::DEFAULT);
    }

    #[test]
    fn config_accepts_base_url_override() {
        let config = Config::from_lookup(
            Some("secret".to_owned()),
            Some("https://example.invalid/api".to_owned()),
        )
        .unwrap();
        assert_eq!(config.base_url.as_str(), "https://example.invalid/api");

        let err =
            Config::from_lookup(Some("secret".to_owned()), Some("not a url".to_owned()))
                .unwrap_err();
        assert!(matches!(err, VerimorError::Validation(_)));
    }

    #[test]
    fn builder_derives_endpoints_from_base_url() {
        let config = Config::new(ApiKey::new("key").unwrap());
        let client = VerimorClient::builder(config.clone()).build().unwrap();
        assert_eq!(
            client.begin_call_endpoint,
            "https://api.bulutsantralim.com/begin_call"
        );
        assert_eq!(
            client.available_numbers_endpoint,
            "https://api.bulutsantralim.com/numbers/available"
        );

        let client = VerimorClient::builder(config)
            .base_url(BaseUrl::parse("https://example.invalid").unwrap())
            .build()
            .unwrap();
        assert_eq!(
            client.begin_call_endpoint,
            "https://example.invalid/begin_call"
        );
        assert_eq!(
            client.available_numbers_endpoint,
            "https://example.invalid/numbers/available"
        );
    }

    #[test]
    fn builder_endpoint_overrides_are_applied() {
        let config = Config::new(ApiKey::new("key").unwrap());
        let client = VerimorClient::builder(config)
            .begin_call_endpoint("https://example.invalid/call")
            .available_numbers_endpoint("https://example.invalid/numbers")
            .timeout(Duration::from_secs(5))
            .user_agent("verimor-tests")
            .build()
            .unwrap();
        assert_eq!(client.begin_call_endpoint, "https://example.invalid/call");
        assert_eq!(
            client.available_numbers_endpoint,
            "https://example.invalid/numbers"
        );
    }
}
