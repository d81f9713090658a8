//! Domain modules organized by bounded context.
//!
//! - **tools**: MCP tools that can be executed by clients

pub mod tools;
