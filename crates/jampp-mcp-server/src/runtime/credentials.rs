use jampp_mcp_server::errors::ServerError;
use jampp_reporting::SecretString;
use schemars::JsonSchema;
use secrecy::ExposeSecret as _;
use serde::Deserialize;

const JAMPP_CLIENT_ID_ENV: &str = "JAMPP_CLIENT_ID";
const JAMPP_CLIENT_SECRET_ENV: &str = "JAMPP_CLIENT_SECRET";

/// Client credentials issued by Jampp
#[derive(Debug, Deserialize, Default, JsonSchema)]
#[serde(default)]
pub struct Credentials {
    /// The client ID
    client_id: Option<String>,

    /// The client secret
    #[schemars(with = "Option<String>")]
    client_secret: Option<SecretString>,
}

impl Credentials {
    /// Extract the client ID from the config or from the current env
    pub fn client_id(&self) -> Result<String, ServerError> {
        self.client_id
            .clone()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ServerError::EnvironmentVariable(JAMPP_CLIENT_ID_ENV.to_string()))
    }

    /// Extract the client secret from the config or from the current env
    pub fn client_secret(&self) -> Result<SecretString, ServerError> {
        self.client_secret
            .clone()
            .filter(|secret| !secret.expose_secret().is_empty())
            .ok_or_else(|| ServerError::EnvironmentVariable(JAMPP_CLIENT_SECRET_ENV.to_string()))
    }
}
