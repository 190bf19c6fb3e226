use jampp_reporting::QueryRequest;
use rmcp::model::{CallToolResult, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use super::{ReportingTool, field, render};
use crate::errors::ToolError;
use crate::schema_from_type;

/// The name of the tool to get the status of an asynchronous report
pub const REPORT_STATUS_TOOL_NAME: &str = "get_async_report_status";

const REPORT_STATUS_QUERY: &str = "query reportStatus($id: ID!) {
  report(id: $id) {
    id
    status
    createdAt
    completedAt
  }
}";

#[derive(Clone)]
pub struct ReportStatus {
    pub tool: Tool,
}

/// Input for the report status tool
#[derive(JsonSchema, Deserialize)]
pub struct Input {
    /// The report ID
    report_id: String,
}

impl ReportStatus {
    pub fn new() -> Self {
        Self {
            tool: Tool::new(
                REPORT_STATUS_TOOL_NAME,
                "Get the status of an asynchronous report",
                schema_from_type!(Input),
            ),
        }
    }
}

impl Default for ReportStatus {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportingTool for ReportStatus {
    type Input = Input;

    const ACTION: &'static str = "getting async report status";

    fn request(&self, input: Input) -> QueryRequest {
        QueryRequest::new(REPORT_STATUS_QUERY).variable("id", input.report_id)
    }

    fn respond(&self, data: &Value) -> Result<CallToolResult, ToolError> {
        render(field(data, &["report"])?)
    }
}
