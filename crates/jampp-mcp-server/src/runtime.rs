//! Runtime utilites
//!
//! This module is only used by the main binary and provides helper code
//! related to runtime configuration.

mod config;
mod credentials;
mod endpoints;
mod logging;

use std::path::Path;

pub use config::Config;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
pub use logging::setup_logging;

/// Separator to use when drilling down into nested options in the env figment
const ENV_NESTED_SEPARATOR: &str = "__";

/// Read configuration from environment variables only (when no config file is provided)
#[allow(clippy::result_large_err)]
pub fn read_config_from_env() -> Result<Config, figment::Error> {
    Figment::new()
        .join(jampp_common_env())
        .join(Env::prefixed("JAMPP_MCP_").split(ENV_NESTED_SEPARATOR))
        .extract()
}

/// Read in a config from a YAML file, filling in any missing values from the environment
#[allow(clippy::result_large_err)]
pub fn read_config(yaml_path: impl AsRef<Path>) -> Result<Config, figment::Error> {
    Figment::new()
        .join(jampp_common_env())
        .join(Env::prefixed("JAMPP_MCP_").split(ENV_NESTED_SEPARATOR))
        .join(Yaml::file(yaml_path))
        .extract()
}

/// Figment provider that maps the standard Jampp credential variables into
/// the nested structure needed by the config
fn jampp_common_env() -> Env {
    Env::prefixed("JAMPP_")
        .only(&["client_id", "client_secret"])
        .map(|key| match key.to_string().to_lowercase().as_str() {
            "client_id" => "CREDENTIALS:CLIENT_ID".into(),
            "client_secret" => "CREDENTIALS:CLIENT_SECRET".into(),

            // Filtered out by `only` above, so passed through as is
            other => other.to_string().into(),
        })
        .split(":")
}
