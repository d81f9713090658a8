//! Feedly stream collection tool.
//!
//! Fetches articles from a Feedly stream (team feed, board, category),
//! wrapping `GET /streams/contents`.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use super::common::{
    default_collect_count, error_result, json_result, validate_count, validate_non_empty,
};
use crate::domains::tools::error::ToolError;
use crate::feedly::{FeedlyClient, StreamRequest};

/// Parameters for the stream collection tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CollectParams {
    /// Stream identifier to read from.
    #[schemars(description = "Stream id, e.g. 'enterprise/acme/category/f74cc0...'")]
    pub stream_id: String,

    /// Maximum number of items (default: 20, max: 100).
    #[schemars(description = "Maximum number of items (1-100, default: 20)")]
    #[serde(default = "default_collect_count")]
    pub count: u32,

    /// Only return items crawled after this timestamp (epoch milliseconds).
    #[schemars(description = "Only items crawled after this epoch-ms timestamp")]
    #[serde(default)]
    pub newer_than: Option<i64>,

    /// Only return items crawled before this timestamp (epoch milliseconds).
    #[schemars(description = "Only items crawled before this epoch-ms timestamp")]
    #[serde(default)]
    pub older_than: Option<i64>,

    /// Restrict results to unread items.
    #[schemars(description = "Restrict results to unread items")]
    #[serde(default)]
    pub unread_only: Option<bool>,

    /// Sort order.
    #[schemars(description = "Sort order: 'newest' or 'oldest'")]
    #[serde(default)]
    pub ranked: Option<String>,

    /// Continuation token from a previous page of results.
    #[schemars(description = "Opaque continuation token from a previous result page")]
    #[serde(default)]
    pub continuation: Option<String>,
}

impl CollectParams {
    /// Validate arguments before any upstream request is issued.
    pub fn validate(&self) -> Result<(), ToolError> {
        validate_non_empty(&self.stream_id, "stream_id")?;
        validate_count(self.count)?;

        if let Some(ranked) = self.ranked.as_deref() {
            if ranked != "newest" && ranked != "oldest" {
                return Err(ToolError::invalid_arguments(format!(
                    "ranked must be 'newest' or 'oldest', got '{}'",
                    ranked
                )));
            }
        }

        Ok(())
    }

    fn to_request(&self) -> StreamRequest {
        StreamRequest {
            stream_id: self.stream_id.clone(),
            count: self.count,
            newer_than: self.newer_than,
            older_than: self.older_than,
            unread_only: self.unread_only,
            ranked: self.ranked.clone(),
            continuation: self.continuation.clone(),
        }
    }
}

/// Feedly stream collection tool implementation.
#[derive(Debug, Clone)]
pub struct CollectTool;

impl CollectTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "feedly_collect";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Fetch articles from a Feedly stream id (team feed, board, category). Supports time bounds, unread filtering, sort order and continuation-token pagination. Returns the stream items as JSON.";

    /// Execute the tool: one upstream call, result or upstream error text.
    pub async fn execute(client: &FeedlyClient, params: &CollectParams) -> CallToolResult {
        info!(stream_id = %params.stream_id, count = params.count, "Collecting stream contents");

        match client.stream_contents(&params.to_request()).await {
            Ok(value) => json_result(&value),
            Err(e) => error_result(&e.to_string()),
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<CollectParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for the STDIO transport.
    pub fn create_route<S>(client: Arc<FeedlyClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let client = client.clone();
            async move {
                let params: CollectParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                params
                    .validate()
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

                Ok(Self::execute(&client, &params).await)
            }
            .boxed()
        })
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        client: Arc<FeedlyClient>,
    ) -> Result<serde_json::Value, String> {
        let params: CollectParams =
            serde_json::from_value(arguments).map_err(|e| e.to_string())?;
        params.validate().map_err(|e| e.to_string())?;

        let result = Self::execute(&client, &params).await;

        Ok(serde_json::json!({
            "content": result.content,
            "isError": result.is_error.unwrap_or(false)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_params_default_count() {
        let json = r#"{"stream_id": "feed/http://example.com/rss"}"#;
        let params: CollectParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.count, 20);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_collect_params_missing_stream_id_fails_deserialization() {
        let json = r#"{"count": 20}"#;
        let result: Result<CollectParams, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_collect_params_empty_stream_id_rejected() {
        let json = r#"{"stream_id": ""}"#;
        let params: CollectParams = serde_json::from_str(json).unwrap();
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_collect_params_count_out_of_range_rejected() {
        let json = r#"{"stream_id": "feed/x", "count": 0}"#;
        let params: CollectParams = serde_json::from_str(json).unwrap();
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_collect_params_bad_ranked_rejected() {
        let json = r#"{"stream_id": "feed/x", "ranked": "shuffled"}"#;
        let params: CollectParams = serde_json::from_str(json).unwrap();
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_continuation_forwarded_into_request() {
        let json = r#"{"stream_id": "feed/x", "continuation": "c9f7a"}"#;
        let params: CollectParams = serde_json::from_str(json).unwrap();
        let req = params.to_request();
        assert_eq!(req.continuation.as_deref(), Some("c9f7a"));
    }
}
