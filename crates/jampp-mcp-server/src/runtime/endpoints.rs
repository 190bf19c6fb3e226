//! Jampp API endpoint overrides
//!
//! Either endpoint falls back to the public Jampp URL when left unset.

use schemars::JsonSchema;
use serde::Deserialize;
use url::Url;

/// The Jampp API endpoints to use
#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Endpoints {
    /// The OAuth token endpoint
    /// [default: https://auth.jampp.com/v1/oauth/token]
    pub auth_url: Option<Url>,

    /// The reporting GraphQL endpoint
    /// [default: https://reporting-api.jampp.com/v1/graphql]
    pub api_url: Option<Url>,
}
