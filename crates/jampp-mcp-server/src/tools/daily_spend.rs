use jampp_reporting::QueryRequest;
use rmcp::model::{CallToolResult, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use super::pivot::Pivot;
use super::{ReportingTool, field, render};
use crate::errors::ToolError;
use crate::schema_from_type;

/// The name of the tool to get the daily spend of a campaign
pub const DAILY_SPEND_TOOL_NAME: &str = "get_campaign_daily_spend";

const PIVOT: Pivot = Pivot {
    operation: "dailySpend",
    alias: "dailySpend",
    fields: &["date", "spend"],
    group_by: Some("date"),
};

#[derive(Clone)]
pub struct DailySpend {
    pub tool: Tool,
}

/// Input for the daily spend tool
#[derive(JsonSchema, Deserialize)]
pub struct Input {
    /// The campaign ID
    campaign_id: i64,

    /// Start date, formatted as YYYY-MM-DD
    from_date: String,

    /// End date, formatted as YYYY-MM-DD
    to_date: String,
}

impl DailySpend {
    pub fn new() -> Self {
        Self {
            tool: Tool::new(
                DAILY_SPEND_TOOL_NAME,
                "Get the spend of a campaign for each day of a date range",
                schema_from_type!(Input),
            ),
        }
    }
}

impl Default for DailySpend {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportingTool for DailySpend {
    type Input = Input;

    const ACTION: &'static str = "getting campaign daily spend";

    fn request(&self, input: Input) -> QueryRequest {
        PIVOT.request(input.from_date, input.to_date, Some(input.campaign_id))
    }

    fn respond(&self, data: &Value) -> Result<CallToolResult, ToolError> {
        render(field(data, &PIVOT.results_path())?)
    }
}
