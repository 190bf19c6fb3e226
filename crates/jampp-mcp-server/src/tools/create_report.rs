use jampp_reporting::QueryRequest;
use rmcp::model::{CallToolResult, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use super::{ReportingTool, field, render};
use crate::errors::ToolError;
use crate::schema_from_type;

/// The name of the tool to create an asynchronous report
pub const CREATE_REPORT_TOOL_NAME: &str = "create_async_report";

const CREATE_REPORT_MUTATION: &str = "mutation createReport($input: CreateReportInput!) {
  createReport(input: $input) {
    id
    status
  }
}";

#[derive(Clone)]
pub struct CreateReport {
    pub tool: Tool,
}

/// Input for the create report tool
#[derive(JsonSchema, Deserialize)]
pub struct Input {
    /// Start date, formatted as YYYY-MM-DD
    from_date: String,

    /// End date, formatted as YYYY-MM-DD
    to_date: String,

    /// Metrics to include in the report
    metrics: Vec<String>,

    /// Dimensions to include in the report
    dimensions: Vec<String>,

    /// Optional filters to apply
    #[serde(default)]
    filters: Option<Map<String, Value>>,
}

impl CreateReport {
    pub fn new() -> Self {
        Self {
            tool: Tool::new(
                CREATE_REPORT_TOOL_NAME,
                "Create an asynchronous report. Use `get_async_report_status` to follow its progress and `get_async_report_results` to fetch it once completed.",
                schema_from_type!(Input),
            ),
        }
    }
}

impl Default for CreateReport {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportingTool for CreateReport {
    type Input = Input;

    const ACTION: &'static str = "creating async report";

    fn request(&self, input: Input) -> QueryRequest {
        QueryRequest::new(CREATE_REPORT_MUTATION).variable(
            "input",
            json!({
                "from": input.from_date,
                "to": input.to_date,
                "metrics": input.metrics,
                "dimensions": input.dimensions,
                "filters": input.filters.unwrap_or_default(),
            }),
        )
    }

    fn respond(&self, data: &Value) -> Result<CallToolResult, ToolError> {
        render(field(data, &["createReport"])?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{GRAPHQL_PATH, client, mock_token, text};
    use mockito::Matcher;

    #[test]
    fn defaults_filters_to_an_empty_object() {
        let input: Input = serde_json::from_value(json!({
            "from_date": "2024-01-01",
            "to_date": "2024-01-31",
            "metrics": ["spend"],
            "dimensions": ["campaignId"]
        }))
        .unwrap();

        let request = CreateReport::new().request(input);

        assert_eq!(
            request.variables.get("input"),
            Some(&json!({
                "from": "2024-01-01",
                "to": "2024-01-31",
                "metrics": ["spend"],
                "dimensions": ["campaignId"],
                "filters": {}
            }))
        );
    }

    #[tokio::test]
    async fn returns_the_created_report() {
        let mut server = mockito::Server::new_async().await;
        let _token = mock_token(&mut server).await;
        let mutation = server
            .mock("POST", GRAPHQL_PATH)
            .match_body(Matcher::PartialJson(json!({
                "variables": {"input": {"filters": {"country": "AR"}}}
            })))
            .with_body(r#"{"data": {"createReport": {"id": "r-1"}}}"#)
            .expect(1)
            .create_async()
            .await;

        let input: Input = serde_json::from_value(json!({
            "from_date": "2024-01-01",
            "to_date": "2024-01-31",
            "metrics": ["spend", "installs"],
            "dimensions": ["date"],
            "filters": {"country": "AR"}
        }))
        .unwrap();
        let result = CreateReport::new().execute(&client(&server), input).await;

        mutation.assert_async().await;
        insta::assert_snapshot!(text(&result), @r#"
        {
          "id": "r-1"
        }
        "#);
    }
}
