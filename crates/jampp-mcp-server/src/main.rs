use std::path::PathBuf;

use clap::Parser;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use jampp_mcp_server::server::Server;
use tracing::{error, info};

mod runtime;

/// Clap styling
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// Arguments to the MCP server
#[derive(Debug, clap::Parser)]
#[command(
    version,
    styles = STYLES,
    about = "Jampp MCP Server - query Jampp campaign reporting from an AI agent",
)]
struct Args {
    /// Path to a YAML config file. Without one, config is read from the
    /// `JAMPP_CLIENT_ID`, `JAMPP_CLIENT_SECRET` and `JAMPP_MCP_*` env vars
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match Args::parse().config {
        Some(path) => runtime::read_config(path)?,
        None => runtime::read_config_from_env()?,
    };

    // WorkerGuard is not used but needed to be held to flush file logs
    let _guard = runtime::setup_logging(&config.logging)?;

    info!(
        "Jampp MCP Server v{} // Licensed under MIT",
        env!("CARGO_PKG_VERSION")
    );

    let reporting = config
        .reporting_config()
        .inspect_err(|e| error!("Refusing to start: {e}"))?;

    Ok(Server::builder()
        .reporting(reporting)
        .build()
        .start()
        .await?)
}
