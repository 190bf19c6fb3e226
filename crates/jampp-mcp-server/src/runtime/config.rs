use std::time::Duration;

use jampp_mcp_server::errors::ServerError;
use jampp_reporting::ReportingConfig;
use jampp_reporting::client::DEFAULT_TIMEOUT;
use schemars::JsonSchema;
use serde::Deserialize;

use super::{credentials::Credentials, endpoints::Endpoints, logging::Logging};

/// Configuration for the MCP server
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// Jampp API client credentials
    pub credentials: Credentials,

    /// Overrides for the Jampp API endpoints
    pub endpoints: Endpoints,

    /// Logging configuration
    pub logging: Logging,

    /// Timeout for each request made to the Jampp API, e.g. `30s`
    #[serde(with = "humantime_serde")]
    #[schemars(with = "String")]
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credentials: Credentials::default(),
            endpoints: Endpoints::default(),
            logging: Logging::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Config {
    /// Build the reporting client config, failing when credentials are missing
    pub fn reporting_config(&self) -> Result<ReportingConfig, ServerError> {
        Ok(ReportingConfig::new(
            self.credentials.client_id()?,
            self.credentials.client_secret()?,
            self.endpoints.auth_url.clone(),
            self.endpoints.api_url.clone(),
            self.timeout,
        ))
    }
}

#[cfg(test)]
mod test {
    use super::Config;

    #[test]
    fn it_parses_a_minimal_config() {
        let config = serde_json::from_str::<Config>("{}").unwrap();

        assert_eq!(config.timeout, std::time::Duration::from_secs(30));
    }

    #[test]
    fn it_parses_a_humantime_timeout() {
        let config = serde_json::from_str::<Config>(r#"{"timeout": "1m 30s"}"#).unwrap();

        assert_eq!(config.timeout, std::time::Duration::from_secs(90));
    }

    #[test]
    fn it_contains_no_keys_with_double_underscore() {
        // Nested fields are configured from the env by splitting on `__`
        let schema = schemars::schema_for!(Config).to_value().to_string();

        assert!(!schema.contains("__"))
    }
}
