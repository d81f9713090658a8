//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - HTTP dispatch for tool calls (when the http feature is enabled)

use std::sync::Arc;

#[cfg(feature = "http")]
use tracing::warn;

use super::definitions::{AutocompleteTool, CollectTool, EntityLookupTool, SearchTool};
use crate::feedly::FeedlyClient;

/// Tool registry - manages all available tools.
pub struct ToolRegistry {
    client: Arc<FeedlyClient>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(client: Arc<FeedlyClient>) -> Self {
        Self { client }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            SearchTool::NAME,
            CollectTool::NAME,
            EntityLookupTool::NAME,
            AutocompleteTool::NAME,
        ]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        match name {
            SearchTool::NAME => SearchTool::http_handler(arguments, self.client.clone()).await,
            CollectTool::NAME => CollectTool::http_handler(arguments, self.client.clone()).await,
            EntityLookupTool::NAME => {
                EntityLookupTool::http_handler(arguments, self.client.clone()).await
            }
            AutocompleteTool::NAME => {
                AutocompleteTool::http_handler(arguments, self.client.clone()).await
            }
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(format!("Unknown tool: {}", name))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::FeedlyConfig;

    fn test_client() -> Arc<FeedlyClient> {
        Arc::new(FeedlyClient::new(&FeedlyConfig::default()).unwrap())
    }

    #[test]
    fn test_registry_tool_names() {
        let registry = ToolRegistry::new(test_client());
        let names = registry.tool_names();
        assert_eq!(names.len(), 4);
        assert!(names.contains(&"feedly_search"));
        assert!(names.contains(&"feedly_collect"));
        assert!(names.contains(&"feedly_entity_lookup"));
        assert!(names.contains(&"feedly_autocomplete"));
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_registry_call_unknown() {
        let registry = ToolRegistry::new(test_client());
        let result = registry.call_tool("unknown", serde_json::json!({})).await;
        assert!(result.is_err());
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_registry_call_rejects_invalid_arguments() {
        // count over max must be rejected before any network activity
        let registry = ToolRegistry::new(test_client());
        let result = registry
            .call_tool(
                "feedly_search",
                serde_json::json!({ "query": "ai", "count": 150 }),
            )
            .await;
        assert!(result.is_err());
    }
}
