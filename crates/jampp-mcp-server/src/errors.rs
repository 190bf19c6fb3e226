use rmcp::service::ServerInitializeError;
use tokio::task::JoinError;

/// An error in server initialization
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Missing environment variable: {0}")]
    EnvironmentVariable(String),

    #[error("Could not create reporting client: {0}")]
    ReportingClient(#[from] jampp_reporting::Error),

    #[error("Failed to initialize MCP server: {0}")]
    McpInitializeError(Box<ServerInitializeError<std::io::Error>>),

    #[error("Failed to start server")]
    StartupError(#[from] JoinError),
}

/// An error while running a reporting tool, reported back to the client as a
/// failed tool result rather than a protocol error
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error(transparent)]
    Reporting(#[from] jampp_reporting::Error),

    #[error("GraphQL errors: {0}")]
    GraphQL(String),

    #[error("Unexpected response: missing `{0}`")]
    MissingField(String),

    #[error("Could not render response: {0}")]
    Render(#[from] serde_json::Error),
}

/// An MCP tool error
pub type McpError = rmcp::model::ErrorData;
