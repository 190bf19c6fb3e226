use jampp_reporting::QueryRequest;
use rmcp::model::{CallToolResult, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use super::pivot::Pivot;
use super::{ReportingTool, field, render};
use crate::errors::ToolError;
use crate::schema_from_type;

/// The name of the tool to get spend per campaign
pub const CAMPAIGN_SPEND_TOOL_NAME: &str = "get_campaign_spend";

const PIVOT: Pivot = Pivot {
    operation: "spendPerCampaign",
    alias: "spendPerCampaign",
    fields: &["campaignId", "campaign", "spend"],
    group_by: None,
};

#[derive(Clone)]
pub struct CampaignSpend {
    pub tool: Tool,
}

/// Input for the campaign spend tool
#[derive(JsonSchema, Deserialize)]
pub struct Input {
    /// Start date, formatted as YYYY-MM-DD
    from_date: String,

    /// End date, formatted as YYYY-MM-DD
    to_date: String,

    /// Optional campaign ID to restrict the results to
    campaign_id: Option<i64>,
}

impl CampaignSpend {
    pub fn new() -> Self {
        Self {
            tool: Tool::new(
                CAMPAIGN_SPEND_TOOL_NAME,
                "Get the spend of each campaign over a date range",
                schema_from_type!(Input),
            ),
        }
    }
}

impl Default for CampaignSpend {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportingTool for CampaignSpend {
    type Input = Input;

    const ACTION: &'static str = "getting campaign spend";

    fn request(&self, input: Input) -> QueryRequest {
        PIVOT.request(input.from_date, input.to_date, input.campaign_id)
    }

    fn respond(&self, data: &Value) -> Result<CallToolResult, ToolError> {
        render(field(data, &PIVOT.results_path())?)
    }
}
