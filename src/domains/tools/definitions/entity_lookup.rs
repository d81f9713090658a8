//! Feedly entity lookup tool.
//!
//! Returns metadata about a single NLP entity id, wrapping
//! `GET /entities/{id}`. The id is percent-encoded by the client.

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

use super::common::{error_result, json_result, validate_non_empty};
use crate::domains::tools::error::ToolError;
use crate::feedly::FeedlyClient;

/// Parameters for the entity lookup tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct EntityLookupParams {
    /// NLP entity id to look up.
    #[schemars(description = "NLP entity id, e.g. 'nlp/f/entity/gz:org:apple'")]
    pub entity_id: String,
}

impl EntityLookupParams {
    /// Validate arguments before any upstream request is issued.
    pub fn validate(&self) -> Result<(), ToolError> {
        validate_non_empty(&self.entity_id, "entity_id")
    }
}

/// Feedly entity lookup tool implementation.
#[derive(Debug, Clone)]
pub struct EntityLookupTool;

impl EntityLookupTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "feedly_entity_lookup";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Return metadata about a single Feedly NLP entity id (topic, organization, person). The id is URL-encoded automatically, so ids containing '/' are safe to pass as-is.";

    /// Execute the tool: one upstream call, result or upstream error text.
    pub async fn execute(client: &FeedlyClient, params: &EntityLookupParams) -> CallToolResult {
        info!(entity_id = %params.entity_id, "Looking up entity");

        match client.entity(&params.entity_id).await {
            Ok(value) => json_result(&value),
            Err(e) => error_result(&e.to_string()),
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<EntityLookupParams>(),
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
                let params: EntityLookupParams =
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
        let params: EntityLookupParams =
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
    fn test_entity_lookup_params() {
        let json = r#"{"entity_id": "nlp/f/entity/gz:org:apple"}"#;
        let params: EntityLookupParams = serde_json::from_str(json).unwrap();
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_entity_lookup_empty_id_rejected() {
        let json = r#"{"entity_id": ""}"#;
        let params: EntityLookupParams = serde_json::from_str(json).unwrap();
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_entity_lookup_missing_id_fails_deserialization() {
        let result: Result<EntityLookupParams, _> = serde_json::from_str("{}");
        assert!(result.is_err());
    }
}
