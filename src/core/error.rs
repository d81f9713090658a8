//! Error types and handling for the MCP server.
//!
//! Startup is the only place these errors are fatal; everything that happens
//! during a tool invocation is reported in-band as a tool result or a
//! protocol error envelope.

use thiserror::Error;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error from the upstream Feedly API client.
    #[error("Feedly error: {0}")]
    Feedly(#[from] crate::feedly::FeedlyError),
}
