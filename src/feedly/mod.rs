//! Upstream Feedly API client.
//!
//! One outbound HTTP call per tool invocation, no caching, no retries.
//! Responses are returned as parsed `serde_json::Value` - no field filtering
//! or schema enforcement on the response side.

mod client;
mod error;

pub use client::{FeedlyClient, SearchRequest, StreamRequest};
pub use error::FeedlyError;
