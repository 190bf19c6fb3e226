use jampp_reporting::QueryRequest;
use rmcp::model::{CallToolResult, Content, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use super::{ReportingTool, field, render};
use crate::errors::ToolError;
use crate::schema_from_type;

/// The name of the tool to fetch the results of an asynchronous report
pub const REPORT_RESULTS_TOOL_NAME: &str = "get_async_report_results";

const REPORT_RESULTS_QUERY: &str = "query reportResults($id: ID!) {
  report(id: $id) {
    id
    status
    results
  }
}";

const COMPLETED: &str = "COMPLETED";

#[derive(Clone)]
pub struct ReportResults {
    pub tool: Tool,
}

/// Input for the report results tool
#[derive(JsonSchema, Deserialize)]
pub struct Input {
    /// The report ID
    report_id: String,
}

impl ReportResults {
    pub fn new() -> Self {
        Self {
            tool: Tool::new(
                REPORT_RESULTS_TOOL_NAME,
                "Get the results of a completed asynchronous report",
                schema_from_type!(Input),
            ),
        }
    }
}

impl Default for ReportResults {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportingTool for ReportResults {
    type Input = Input;

    const ACTION: &'static str = "getting async report results";

    fn request(&self, input: Input) -> QueryRequest {
        QueryRequest::new(REPORT_RESULTS_QUERY).variable("id", input.report_id)
    }

    fn respond(&self, data: &Value) -> Result<CallToolResult, ToolError> {
        let status = field(data, &["report", "status"])?;
        if status.as_str() != Some(COMPLETED) {
            let status = status
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| status.to_string());
            return Ok(CallToolResult {
                content: vec![Content::text(format!(
                    "Report is not completed yet, current status: {status}"
                ))],
                is_error: None,
            });
        }

        render(field(data, &["report", "results"])?)
    }
}
