use jampp_reporting::QueryRequest;
use rmcp::model::{CallToolResult, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use super::pivot::Pivot;
use super::{ReportingTool, field, render};
use crate::errors::ToolError;
use crate::schema_from_type;

/// The name of the tool to get campaign performance metrics
pub const CAMPAIGN_PERFORMANCE_TOOL_NAME: &str = "get_campaign_performance";

const PIVOT: Pivot = Pivot {
    operation: "campaignPerformance",
    alias: "performance",
    fields: &[
        "campaignId",
        "campaign",
        "spend",
        "impressions",
        "clicks",
        "installs",
        "ctr",
        "cpi",
        "cvr",
    ],
    group_by: None,
};

#[derive(Clone)]
pub struct CampaignPerformance {
    pub tool: Tool,
}

/// Input for the campaign performance tool
#[derive(JsonSchema, Deserialize)]
pub struct Input {
    /// Start date, formatted as YYYY-MM-DD
    from_date: String,

    /// End date, formatted as YYYY-MM-DD
    to_date: String,

    /// Optional campaign ID to restrict the results to
    campaign_id: Option<i64>,
}

impl CampaignPerformance {
    pub fn new() -> Self {
        Self {
            tool: Tool::new(
                CAMPAIGN_PERFORMANCE_TOOL_NAME,
                "Get performance metrics (spend, impressions, clicks, installs, CTR, CPI, CVR) of each campaign over a date range",
                schema_from_type!(Input),
            ),
        }
    }
}

impl Default for CampaignPerformance {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportingTool for CampaignPerformance {
    type Input = Input;

    const ACTION: &'static str = "getting campaign performance";

    fn request(&self, input: Input) -> QueryRequest {
        PIVOT.request(input.from_date, input.to_date, input.campaign_id)
    }

    fn respond(&self, data: &Value) -> Result<CallToolResult, ToolError> {
        render(field(data, &PIVOT.results_path())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::text;
    use serde_json::json;

    #[test]
    fn omits_the_campaign_filter_when_not_given() {
        let input: Input = serde_json::from_value(json!({
            "from_date": "2024-01-01",
            "to_date": "2024-01-31"
        }))
        .unwrap();

        let request = CampaignPerformance::new().request(input);

        assert!(!request.query.contains("$campaignId"));
        assert!(request.query.contains("performance: pivot("));
        assert!(!request.variables.contains_key("campaignId"));
    }

    #[test]
    fn renders_results() {
        let result = CampaignPerformance::new()
            .respond(&json!({"performance": {"results": [{"campaignId": 1, "ctr": 0.5}]}}))
            .unwrap();

        assert_eq!(
            serde_json::from_str::<Value>(text(&result)).unwrap(),
            json!([{"campaignId": 1, "ctr": 0.5}])
        );
    }
}
