use jampp_reporting::QueryRequest;
use rmcp::model::{CallToolResult, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{ReportingTool, field, render};
use crate::errors::ToolError;
use crate::schema_from_type;

/// The name of the tool to list the metrics and dimensions reports can use
pub const AVAILABLE_FIELDS_TOOL_NAME: &str = "get_available_metrics_and_dimensions";

const AVAILABLE_FIELDS_QUERY: &str = "query {
  availableMetrics
  availableDimensions
}";

#[derive(Clone)]
pub struct AvailableFields {
    pub tool: Tool,
}

/// Input for the available metrics and dimensions tool, which takes no arguments
#[derive(JsonSchema, Deserialize)]
pub struct Input {}

impl AvailableFields {
    pub fn new() -> Self {
        Self {
            tool: Tool::new(
                AVAILABLE_FIELDS_TOOL_NAME,
                "List the metrics and dimensions available for reports",
                schema_from_type!(Input),
            ),
        }
    }
}

impl Default for AvailableFields {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportingTool for AvailableFields {
    type Input = Input;

    const ACTION: &'static str = "getting available metrics and dimensions";

    fn request(&self, _input: Input) -> QueryRequest {
        QueryRequest::new(AVAILABLE_FIELDS_QUERY)
    }

    fn respond(&self, data: &Value) -> Result<CallToolResult, ToolError> {
        let metrics = field(data, &["availableMetrics"])?;
        let dimensions = field(data, &["availableDimensions"])?;
        render(&json!({
            "metrics": metrics,
            "dimensions": dimensions,
        }))
    }
}
