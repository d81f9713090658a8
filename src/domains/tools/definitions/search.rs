//! Feedly content search tool.
//!
//! Full-text or NLP-entity search against the Feedly workspace, wrapping
//! `POST /search/contents`.

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

use super::common::{default_search_count, error_result, json_result, validate_count};
use crate::domains::tools::error::ToolError;
use crate::feedly::{FeedlyClient, SearchRequest};

/// Parameters for the search tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchParams {
    /// Free-text search query.
    #[schemars(description = "Free-text search query")]
    #[serde(default)]
    pub query: Option<String>,

    /// NLP entity id to filter by.
    #[schemars(description = "NLP entity id filter, e.g. 'nlp/f/entity/gz:org:apple'")]
    #[serde(default)]
    pub entity_id: Option<String>,

    /// Relevance mode for the entity filter.
    #[schemars(description = "Entity relevance mode: 'mention' (passing mention) or 'about' (primary topic)")]
    #[serde(default)]
    pub salience: Option<String>,

    /// NLP layer filters.
    #[schemars(description = "NLP layer filters, e.g. ['security']")]
    #[serde(default)]
    pub layers: Option<Vec<String>>,

    /// Maximum number of results (default: 10, max: 100).
    #[schemars(description = "Maximum number of results (1-100, default: 10)")]
    #[serde(default = "default_search_count")]
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

    /// Continuation token from a previous page of results.
    #[schemars(description = "Opaque continuation token from a previous result page")]
    #[serde(default)]
    pub continuation: Option<String>,
}

impl SearchParams {
    /// Validate arguments before any upstream request is issued.
    pub fn validate(&self) -> Result<(), ToolError> {
        validate_count(self.count)?;

        let has_criterion = self.query.as_deref().is_some_and(|q| !q.trim().is_empty())
            || self
                .entity_id
                .as_deref()
                .is_some_and(|id| !id.trim().is_empty())
            || self.layers.as_ref().is_some_and(|l| !l.is_empty());
        if !has_criterion {
            return Err(ToolError::invalid_arguments(
                "at least one of 'query', 'entity_id' or 'layers' is required",
            ));
        }

        if let Some(salience) = self.salience.as_deref() {
            if salience != "mention" && salience != "about" {
                return Err(ToolError::invalid_arguments(format!(
                    "salience must be 'mention' or 'about', got '{}'",
                    salience
                )));
            }
        }

        Ok(())
    }

    fn to_request(&self) -> SearchRequest {
        SearchRequest {
            query: self.query.clone(),
            entity_id: self.entity_id.clone(),
            salience: self.salience.clone(),
            layers: self.layers.clone(),
            count: self.count,
            newer_than: self.newer_than,
            older_than: self.older_than,
            unread_only: self.unread_only,
            continuation: self.continuation.clone(),
        }
    }
}

/// Feedly content search tool implementation.
#[derive(Debug, Clone)]
pub struct SearchTool;

impl SearchTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "feedly_search";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Full-text or NLP-entity search across the Feedly workspace. Accepts a free-text query and/or structured entity/layer filters, with optional time bounds, unread flag and continuation token. Returns the matching articles as JSON.";

    /// Execute the tool: one upstream call, result or upstream error text.
    pub async fn execute(client: &FeedlyClient, params: &SearchParams) -> CallToolResult {
        info!(count = params.count, "Searching Feedly contents");

        match client.search_contents(&params.to_request()).await {
            Ok(value) => json_result(&value),
            Err(e) => error_result(&e.to_string()),
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SearchParams>(),
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
                let params: SearchParams = serde_json::from_value(serde_json::Value::Object(args))
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
        let params: SearchParams =
            serde_json::from_value(arguments).map_err(|e| e.to_string())?;
        params.validate().map_err(|e| e.to_string())?;

        let result = Self::execute(&client, &params).await;

        Ok(serde_json::json!({
            "content": result.content,
            "isError": result.is_error.unwrap_or(false)
        }))
    }
}
