//! Execute GraphQL operations against the reporting endpoint

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use crate::auth::{ClientCredentials, TokenCache};
use crate::clock::{Clock, SystemClock};
use crate::error::Error;

pub const DEFAULT_AUTH_URL: &str = "https://auth.jampp.com/v1/oauth/token";
pub const DEFAULT_API_URL: &str = "https://reporting-api.jampp.com/v1/graphql";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for talking to the reporting API
#[derive(Clone, Debug)]
pub struct ReportingConfig {
    /// The client-credentials pair issued by Jampp
    pub credentials: ClientCredentials,

    /// The OAuth token endpoint
    pub auth_url: Url,

    /// The GraphQL endpoint
    pub api_url: Url,

    /// The HTTP client timeout for each request
    pub timeout: Duration,
}

impl ReportingConfig {
    /// Creates a new `ReportingConfig`, using the public Jampp endpoints unless overridden
    pub fn new(
        client_id: impl Into<String>,
        client_secret: SecretString,
        auth_url: Option<Url>,
        api_url: Option<Url>,
        timeout: Duration,
    ) -> Self {
        Self {
            credentials: ClientCredentials::new(client_id, client_secret),
            #[allow(clippy::expect_used)]
            auth_url: auth_url
                .unwrap_or_else(|| Url::parse(DEFAULT_AUTH_URL).expect("default URL should be valid")),
            #[allow(clippy::expect_used)]
            api_url: api_url
                .unwrap_or_else(|| Url::parse(DEFAULT_API_URL).expect("default URL should be valid")),
            timeout,
        }
    }
}

/// A GraphQL operation and its variables
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct QueryRequest {
    pub query: String,
    pub variables: Map<String, Value>,
}

impl QueryRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: Map::new(),
        }
    }

    /// Add a variable to the request
    pub fn variable(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.variables.insert(name.to_string(), value.into());
        self
    }
}

/// Executes authenticated GraphQL requests.
///
/// Only transport-level failures are reported as errors. A response carrying
/// GraphQL `errors` is returned as-is, so callers must inspect it themselves.
#[derive(Debug)]
pub struct ReportingClient {
    http: reqwest::Client,
    api_url: Url,
    tokens: TokenCache,
}

impl ReportingClient {
    pub fn new(config: ReportingConfig) -> Result<Self, Error> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a client whose token expiry is measured against `clock`
    pub fn with_clock(config: ReportingConfig, clock: Arc<dyn Clock>) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(Error::HttpClient)?;

        Ok(Self {
            tokens: TokenCache::new(http.clone(), config.auth_url, config.credentials, clock),
            http,
            api_url: config.api_url,
        })
    }

    /// Execute a GraphQL operation, returning the parsed response body
    pub async fn execute(&self, request: &QueryRequest) -> Result<Value, Error> {
        let token = self.tokens.obtain_token().await?;

        debug!(url = %self.api_url, "Executing GraphQL request");
        let response = self
            .http
            .post(self.api_url.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .bearer_auth(token.expose_secret())
            .body(serde_json::to_string(request).map_err(|e| Error::ApiRequest(e.to_string()))?)
            .send()
            .await
            .map_err(|e| Error::ApiRequest(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::ApiRequest(status.to_string()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| Error::ApiRequest(format!("invalid response body: {e}")))
    }
}
