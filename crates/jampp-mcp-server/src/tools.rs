//! MCP tools backed by the reporting API
//!
//! Each tool turns its input into a [`QueryRequest`], runs it through the
//! [`ReportingClient`] and renders the interesting part of the `data` object
//! as pretty-printed JSON. Failures of any kind become a tool result flagged
//! as an error, with a message describing what the tool was doing.

pub mod available_fields;
pub mod campaign_performance;
pub mod campaign_spend;
pub mod create_report;
pub mod daily_spend;
mod pivot;
pub mod report_results;
pub mod report_status;

use jampp_reporting::{QueryRequest, ReportingClient};
use rmcp::model::{CallToolResult, Content};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::errors::ToolError;

/// A tool that runs a single reporting query
pub(crate) trait ReportingTool {
    type Input: DeserializeOwned;

    /// What the tool does, used in failure messages ("Error getting campaign spend: ...")
    const ACTION: &'static str;

    /// Build the GraphQL request for the given input
    fn request(&self, input: Self::Input) -> QueryRequest;

    /// Render the `data` object of a successful response
    fn respond(&self, data: &Value) -> Result<CallToolResult, ToolError>;

    async fn execute(&self, client: &ReportingClient, input: Self::Input) -> CallToolResult {
        let request = self.request(input);
        let result = match query_data(client, &request).await {
            // A missing field next to GraphQL errors is explained by those errors
            Ok((data, errors)) => self.respond(&data).map_err(|error| match (error, errors) {
                (ToolError::MissingField(_), Some(messages)) => ToolError::GraphQL(messages),
                (error, _) => error,
            }),
            Err(error) => Err(error),
        };

        result.unwrap_or_else(|error| {
            warn!(action = Self::ACTION, %error, "Reporting tool failed");
            failure(Self::ACTION, &error)
        })
    }
}

/// Execute a request and extract its `data` object, along with the joined
/// messages of any GraphQL errors reported next to it.
///
/// GraphQL errors fail the call outright when no data came back with them.
pub(crate) async fn query_data(
    client: &ReportingClient,
    request: &QueryRequest,
) -> Result<(Value, Option<String>), ToolError> {
    let mut body = client.execute(request).await?;

    let data = body
        .get_mut("data")
        .map(Value::take)
        .filter(|data| !data.is_null());
    let errors = body
        .get("errors")
        .filter(|errors| !errors.is_null())
        .map(error_messages);

    match (data, errors) {
        (Some(data), errors) => Ok((data, errors)),
        (None, Some(messages)) => Err(ToolError::GraphQL(messages)),
        (None, None) => Err(ToolError::MissingField("data".to_string())),
    }
}

/// Look up a nested field in the response data
pub(crate) fn field<'a>(data: &'a Value, path: &[&str]) -> Result<&'a Value, ToolError> {
    path.iter()
        .try_fold(data, |value, key| value.get(key))
        .ok_or_else(|| ToolError::MissingField(path.join(".")))
}

/// Render a value as pretty-printed JSON text
pub(crate) fn render(value: &Value) -> Result<CallToolResult, ToolError> {
    Ok(CallToolResult {
        content: vec![Content::text(serde_json::to_string_pretty(value)?)],
        is_error: None,
    })
}

fn failure(action: &str, error: &ToolError) -> CallToolResult {
    CallToolResult {
        content: vec![Content::text(format!("Error {action}: {error}"))],
        is_error: Some(true),
    }
}

fn error_messages(errors: &Value) -> String {
    match errors.as_array() {
        Some(errors) if !errors.is_empty() => errors
            .iter()
            .map(|error| {
                error
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| error.to_string())
            })
            .collect::<Vec<_>>()
            .join("; "),
        _ => errors.to_string(),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::time::Duration;

    use jampp_reporting::{ReportingClient, ReportingConfig, SecretString};
    use mockito::{Mock, ServerGuard};
    use rmcp::model::{CallToolResult, RawContent};
    use url::Url;

    pub(crate) const TOKEN_PATH: &str = "/v1/oauth/token";
    pub(crate) const GRAPHQL_PATH: &str = "/v1/graphql";

    /// A reporting client whose endpoints both live on the given mock server
    pub(crate) fn client(server: &ServerGuard) -> ReportingClient {
        ReportingClient::new(ReportingConfig::new(
            "abc",
            SecretString::from("xyz"),
            Some(Url::parse(&format!("{}{TOKEN_PATH}", server.url())).unwrap()),
            Some(Url::parse(&format!("{}{GRAPHQL_PATH}", server.url())).unwrap()),
            Duration::from_secs(5),
        ))
        .unwrap()
    }

    pub(crate) async fn mock_token(server: &mut ServerGuard) -> Mock {
        server
            .mock("POST", TOKEN_PATH)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token": "T1", "expires_in": 3600}"#)
            .create_async()
            .await
    }

    /// The text of the first content item of a tool result
    pub(crate) fn text(result: &CallToolResult) -> &str {
        match result.content.first().map(|content| &content.raw) {
            Some(RawContent::Text(text)) => text.text.as_str(),
            _ => panic!("expected text content"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{GRAPHQL_PATH, client, mock_token, text};
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!({"data": {"a": 1}}), Ok((json!({"a": 1}), None)))]
    #[case(json!({"data": {"a": 1}, "errors": [{"message": "partial"}]}), Ok((json!({"a": 1}), Some("partial".to_string()))))]
    #[case(json!({"data": null, "errors": [{"message": "bad field"}, {"message": "worse field"}]}), Err("GraphQL errors: bad field; worse field".to_string()))]
    #[case(json!({"errors": [{"extensions": {"code": "X"}}]}), Err(r#"GraphQL errors: {"extensions":{"code":"X"}}"#.to_string()))]
    #[case(json!({}), Err("Unexpected response: missing `data`".to_string()))]
    #[tokio::test]
    async fn extracts_data(
        #[case] body: Value,
        #[case] expected: Result<(Value, Option<String>), String>,
    ) {
        let mut server = mockito::Server::new_async().await;
        let _token = mock_token(&mut server).await;
        let _query = server
            .mock("POST", GRAPHQL_PATH)
            .with_body(body.to_string())
            .create_async()
            .await;

        let result = query_data(&client(&server), &QueryRequest::new("{ a }"))
            .await
            .map_err(|e| e.to_string());

        assert_eq!(result, expected);
    }

    #[test]
    fn finds_nested_fields() {
        let data = json!({"report": {"status": "RUNNING"}});

        assert_eq!(field(&data, &["report", "status"]).unwrap(), "RUNNING");
        assert_eq!(
            field(&data, &["report", "results"]).unwrap_err().to_string(),
            "Unexpected response: missing `report.results`"
        );
    }

    #[test]
    fn renders_failures_as_error_results() {
        let result = failure(
            "getting campaign spend",
            &ToolError::GraphQL("bad field".to_string()),
        );

        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            text(&result),
            "Error getting campaign spend: GraphQL errors: bad field"
        );
    }
}
