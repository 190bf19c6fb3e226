use std::sync::Arc;

use bon::bon;
use jampp_reporting::{ReportingClient, ReportingConfig};
use rmcp::ServiceExt as _;
use rmcp::transport::stdio;
use tracing::{error, info};

use crate::errors::ServerError;
use crate::server_handler::JamppMcpServerHandler;

/// A Jampp MCP Server
pub struct Server {
    reporting: ReportingConfig,
}

#[bon]
impl Server {
    #[builder]
    pub fn new(reporting: ReportingConfig) -> Self {
        Self { reporting }
    }

    /// Serve the reporting tools over stdio until the client disconnects
    pub async fn start(self) -> Result<(), ServerError> {
        let client = ReportingClient::new(self.reporting)?;
        let handler = JamppMcpServerHandler::new(Arc::new(client));

        info!("Starting MCP server in stdio mode");
        let service = handler
            .serve(stdio())
            .await
            .inspect_err(|e| {
                error!("serving error: {:?}", e);
            })
            .map_err(|e| ServerError::McpInitializeError(Box::new(e)))?;
        service.waiting().await.map_err(ServerError::StartupError)?;

        Ok(())
    }
}
