//! Feedly MCP Server Library
//!
//! This crate exposes a small set of Feedly content-discovery API endpoints
//! (search, stream collection, entity lookup, entity autocomplete) as tools
//! under a Model Context Protocol server.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the main server handler, and
//!   the transport layer (stdio by default, HTTP behind the `http` feature)
//! - **feedly**: The upstream REST client - one outbound HTTP call per tool
//!   invocation, no caching, no retries
//! - **domains::tools**: Tool definitions (one file per tool), the rmcp
//!   ToolRouter builder, and the HTTP dispatch registry
//!
//! # Example
//!
//! ```rust,no_run
//! use feedly_mcp_server::core::{Config, McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;
pub mod feedly;

// Re-export commonly used types for convenience
pub use crate::core::{Config, Error, McpServer};
pub use crate::feedly::{FeedlyClient, FeedlyError};
