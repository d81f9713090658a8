//! Tool Router - builds the rmcp ToolRouter from the tool definitions.
//!
//! Each tool knows how to create its own route; this module only wires them
//! together for the STDIO transport.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::{AutocompleteTool, CollectTool, EntityLookupTool, SearchTool};
use crate::feedly::FeedlyClient;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(client: Arc<FeedlyClient>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(SearchTool::create_route(client.clone()))
        .with_route(CollectTool::create_route(client.clone()))
        .with_route(EntityLookupTool::create_route(client.clone()))
        .with_route(AutocompleteTool::create_route(client))
}
