//! Feedly entity autocomplete tool.
//!
//! Suggests NLP entity ids matching a text prefix, wrapping
//! `GET /entities/autocomplete`. Typical use: a caller types "Nvid" and gets
//! back the entity id for Nvidia Corporation.

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

use super::common::{default_search_count, error_result, json_result, validate_count, validate_non_empty};
use crate::domains::tools::error::ToolError;
use crate::feedly::FeedlyClient;

/// Parameters for the autocomplete tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AutocompleteParams {
    /// Text prefix to complete.
    #[schemars(description = "Text prefix to match entities against, e.g. 'Nvid'")]
    pub query: String,

    /// Maximum number of suggestions (default: 10, max: 100).
    #[schemars(description = "Maximum number of suggestions (1-100, default: 10)")]
    #[serde(default = "default_search_count")]
    pub count: u32,
}

impl AutocompleteParams {
    /// Validate arguments before any upstream request is issued.
    pub fn validate(&self) -> Result<(), ToolError> {
        validate_non_empty(&self.query, "query")?;
        validate_count(self.count)
    }
}

/// Feedly entity autocomplete tool implementation.
#[derive(Debug, Clone)]
pub struct AutocompleteTool;

impl AutocompleteTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "feedly_autocomplete";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Suggest Feedly NLP entity ids that match a text prefix. Returns the matching entity suggestions as JSON.";

    /// Execute the tool: one upstream call, result or upstream error text.
    pub async fn execute(client: &FeedlyClient, params: &AutocompleteParams) -> CallToolResult {
        info!(query = %params.query, "Autocompleting entities");

        match client.autocomplete(&params.query, params.count).await {
            Ok(value) => json_result(&value),
            Err(e) => error_result(&e.to_string()),
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<AutocompleteParams>(),
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
                let params: AutocompleteParams =
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
        let params: AutocompleteParams =
            serde_json::from_value(arguments).map_err(|e| e.to_string())?;
        params.validate().map_err(|e| e.to_string())?;

        let result = Self::execute(&client, &params).await;

        Ok(serde_json::json!({
            "content": result.content,
            "isError": result.is_error.unwrap_or(false)
        }))
    }
}
