use std::sync::Arc;

use jampp_reporting::ReportingClient;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, ErrorCode, Implementation, ListToolsResult,
    PaginatedRequestParam, ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{RoleServer, ServerHandler};
use serde_json::Value;
use tracing::debug;

use crate::errors::McpError;
use crate::tools::ReportingTool;
use crate::tools::available_fields::{AVAILABLE_FIELDS_TOOL_NAME, AvailableFields};
use crate::tools::campaign_performance::{CAMPAIGN_PERFORMANCE_TOOL_NAME, CampaignPerformance};
use crate::tools::campaign_spend::{CAMPAIGN_SPEND_TOOL_NAME, CampaignSpend};
use crate::tools::create_report::{CREATE_REPORT_TOOL_NAME, CreateReport};
use crate::tools::daily_spend::{DAILY_SPEND_TOOL_NAME, DailySpend};
use crate::tools::report_results::{REPORT_RESULTS_TOOL_NAME, ReportResults};
use crate::tools::report_status::{REPORT_STATUS_TOOL_NAME, ReportStatus};

const SERVER_NAME: &str = "Jampp MCP Server";

/// Serves the reporting tools over MCP
#[derive(Clone)]
pub struct JamppMcpServerHandler {
    client: Arc<ReportingClient>,
    campaign_spend: CampaignSpend,
    daily_spend: DailySpend,
    campaign_performance: CampaignPerformance,
    create_report: CreateReport,
    report_status: ReportStatus,
    report_results: ReportResults,
    available_fields: AvailableFields,
}

impl JamppMcpServerHandler {
    pub fn new(client: Arc<ReportingClient>) -> Self {
        Self {
            client,
            campaign_spend: CampaignSpend::new(),
            daily_spend: DailySpend::new(),
            campaign_performance: CampaignPerformance::new(),
            create_report: CreateReport::new(),
            report_status: ReportStatus::new(),
            report_results: ReportResults::new(),
            available_fields: AvailableFields::new(),
        }
    }

    pub(crate) async fn call_tool_impl(
        &self,
        request: CallToolRequestParam,
    ) -> Result<CallToolResult, McpError> {
        debug!(tool = %request.name, "Calling tool");
        let client = self.client.as_ref();
        let result = match request.name.as_ref() {
            CAMPAIGN_SPEND_TOOL_NAME => {
                self.campaign_spend
                    .execute(client, convert_arguments(request)?)
                    .await
            }
            DAILY_SPEND_TOOL_NAME => {
                self.daily_spend
                    .execute(client, convert_arguments(request)?)
                    .await
            }
            CAMPAIGN_PERFORMANCE_TOOL_NAME => {
                self.campaign_performance
                    .execute(client, convert_arguments(request)?)
                    .await
            }
            CREATE_REPORT_TOOL_NAME => {
                self.create_report
                    .execute(client, convert_arguments(request)?)
                    .await
            }
            REPORT_STATUS_TOOL_NAME => {
                self.report_status
                    .execute(client, convert_arguments(request)?)
                    .await
            }
            REPORT_RESULTS_TOOL_NAME => {
                self.report_results
                    .execute(client, convert_arguments(request)?)
                    .await
            }
            AVAILABLE_FIELDS_TOOL_NAME => {
                self.available_fields
                    .execute(client, convert_arguments(request)?)
                    .await
            }
            _ => return Err(tool_not_found(&request.name)),
        };

        Ok(result)
    }

    pub(crate) fn tools(&self) -> ListToolsResult {
        ListToolsResult {
            next_cursor: None,
            tools: vec![
                self.campaign_spend.tool.clone(),
                self.daily_spend.tool.clone(),
                self.campaign_performance.tool.clone(),
                self.create_report.tool.clone(),
                self.report_status.tool.clone(),
                self.report_results.tool.clone(),
                self.available_fields.tool.clone(),
            ],
        }
    }
}

impl ServerHandler for JamppMcpServerHandler {
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.call_tool_impl(request).await
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(self.tools())
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "Query Jampp campaign spend, performance and asynchronous reports. Dates use the YYYY-MM-DD format."
                    .to_string(),
            ),
            ..Default::default()
        }
    }
}

fn tool_not_found(name: &str) -> McpError {
    McpError::new(
        ErrorCode::METHOD_NOT_FOUND,
        format!("Tool {name} not found"),
        None,
    )
}

fn convert_arguments<T: serde::de::DeserializeOwned>(
    arguments: CallToolRequestParam,
) -> Result<T, McpError> {
    serde_json::from_value(Value::Object(arguments.arguments.unwrap_or_default()))
        .map_err(|e| McpError::new(ErrorCode::INVALID_PARAMS, format!("Invalid input: {e}"), None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{GRAPHQL_PATH, TOKEN_PATH, client, text};
    use rstest::rstest;
    use serde_json::json;

    fn call(name: &'static str, arguments: Value) -> CallToolRequestParam {
        CallToolRequestParam {
            name: name.into(),
            arguments: arguments.as_object().cloned(),
        }
    }

    #[tokio::test]
    async fn lists_every_reporting_tool() {
        let server = mockito::Server::new_async().await;
        let handler = JamppMcpServerHandler::new(Arc::new(client(&server)));

        let names: Vec<_> = handler
            .tools()
            .tools
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();

        assert_eq!(
            names,
            vec![
                "get_campaign_spend",
                "get_campaign_daily_spend",
                "get_campaign_performance",
                "create_async_report",
                "get_async_report_status",
                "get_async_report_results",
                "get_available_metrics_and_dimensions",
            ]
        );
    }

    #[tokio::test]
    async fn rejects_unknown_tools() {
        let server = mockito::Server::new_async().await;
        let handler = JamppMcpServerHandler::new(Arc::new(client(&server)));

        let error = handler
            .call_tool_impl(call("get_everything", json!({})))
            .await
            .unwrap_err();

        assert_eq!(error.code, ErrorCode::METHOD_NOT_FOUND);
    }

    #[rstest]
    #[case(CAMPAIGN_SPEND_TOOL_NAME, json!({"from_date": "2024-01-01"}))]
    #[case(DAILY_SPEND_TOOL_NAME, json!({"campaign_id": "seven", "from_date": "2024-01-01", "to_date": "2024-01-02"}))]
    #[case(REPORT_STATUS_TOOL_NAME, json!({}))]
    #[tokio::test]
    async fn rejects_invalid_arguments(#[case] name: &'static str, #[case] arguments: Value) {
        let server = mockito::Server::new_async().await;
        let handler = JamppMcpServerHandler::new(Arc::new(client(&server)));

        let error = handler
            .call_tool_impl(call(name, arguments))
            .await
            .unwrap_err();

        assert_eq!(error.code, ErrorCode::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn shares_one_token_between_tools() {
        let mut server = mockito::Server::new_async().await;
        let token = server
            .mock("POST", TOKEN_PATH)
            .with_body(r#"{"access_token": "T1", "expires_in": 3600}"#)
            .expect(1)
            .create_async()
            .await;
        let _query = server
            .mock("POST", GRAPHQL_PATH)
            .with_body(
                json!({"data": {
                    "availableMetrics": ["spend"],
                    "availableDimensions": ["date"],
                    "report": {"id": "r-1", "status": "PENDING"}
                }})
                .to_string(),
            )
            .expect(2)
            .create_async()
            .await;
        let handler = JamppMcpServerHandler::new(Arc::new(client(&server)));

        let fields = handler
            .call_tool_impl(call(AVAILABLE_FIELDS_TOOL_NAME, json!({})))
            .await
            .unwrap();
        let status = handler
            .call_tool_impl(call(REPORT_STATUS_TOOL_NAME, json!({"report_id": "r-1"})))
            .await
            .unwrap();

        token.assert_async().await;
        assert_eq!(fields.is_error, None);
        assert_eq!(
            serde_json::from_str::<Value>(text(&status)).unwrap(),
            json!({"id": "r-1", "status": "PENDING"})
        );
    }

    #[test]
    fn advertises_tools() {
        let server = mockito::Server::new();
        let handler = JamppMcpServerHandler::new(Arc::new(client(&server)));

        let info = handler.get_info();

        assert_eq!(info.server_info.name, SERVER_NAME);
        assert!(info.capabilities.tools.is_some());
    }
}
