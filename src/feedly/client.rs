//! HTTP client for the Feedly REST API.
//!
//! Thin translation layer: each method builds exactly one request from its
//! inputs and returns the parsed JSON response. Only explicitly provided
//! optional fields are sent as query parameters.

use std::time::Duration;

use reqwest::RequestBuilder;
use serde_json::{Value, json};
use tracing::{debug, warn};

use super::error::FeedlyError;
use crate::core::config::FeedlyConfig;

/// Default request timeout. Timeouts surface as [`FeedlyError::Network`].
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the Feedly content-discovery endpoints.
///
/// Stateless aside from the shared base URL and bearer token; safe to share
/// across concurrent tool invocations behind an `Arc`.
pub struct FeedlyClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

/// Inputs for a content search (`POST /search/contents`).
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    /// Free-text query, sent in the JSON body.
    pub query: Option<String>,
    /// NLP entity id filter, sent in the JSON body.
    pub entity_id: Option<String>,
    /// Relevance mode for the entity filter ("mention" or "about").
    pub salience: Option<String>,
    /// NLP layer filters, sent in the JSON body.
    pub layers: Option<Vec<String>>,
    /// Maximum number of results.
    pub count: u32,
    /// Only items crawled after this epoch-ms timestamp.
    pub newer_than: Option<i64>,
    /// Only items crawled before this epoch-ms timestamp.
    pub older_than: Option<i64>,
    /// Restrict to unread items.
    pub unread_only: Option<bool>,
    /// Opaque pagination cursor, forwarded unchanged.
    pub continuation: Option<String>,
}

/// Inputs for a stream collection (`GET /streams/contents`).
#[derive(Debug, Clone, Default)]
pub struct StreamRequest {
    /// Stream identifier (feed, category, or board).
    pub stream_id: String,
    /// Maximum number of items.
    pub count: u32,
    /// Only items crawled after this epoch-ms timestamp.
    pub newer_than: Option<i64>,
    /// Only items crawled before this epoch-ms timestamp.
    pub older_than: Option<i64>,
    /// Restrict to unread items.
    pub unread_only: Option<bool>,
    /// Sort order: "newest" or "oldest".
    pub ranked: Option<String>,
    /// Opaque pagination cursor, forwarded unchanged.
    pub continuation: Option<String>,
}

impl FeedlyClient {
    /// Create a client from the upstream configuration.
    pub fn new(config: &FeedlyConfig) -> Result<Self, FeedlyError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// The configured base URL (no trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full-text / entity search against `/search/contents`.
    ///
    /// Paging and filter toggles go in the query string; the search criteria
    /// themselves travel in the JSON body.
    pub async fn search_contents(&self, req: &SearchRequest) -> Result<Value, FeedlyError> {
        let url = format!("{}/search/contents", self.base_url);

        let mut query: Vec<(&str, String)> = vec![("count", req.count.to_string())];
        if let Some(newer_than) = req.newer_than {
            query.push(("newerThan", newer_than.to_string()));
        }
        if let Some(older_than) = req.older_than {
            query.push(("olderThan", older_than.to_string()));
        }
        if let Some(unread_only) = req.unread_only {
            query.push(("unreadOnly", unread_only.to_string()));
        }
        if let Some(continuation) = &req.continuation {
            query.push(("continuation", continuation.clone()));
        }

        let mut body = serde_json::Map::new();
        if let Some(q) = &req.query {
            body.insert("query".to_string(), json!(q));
        }
        if let Some(layers) = &req.layers {
            body.insert("layers".to_string(), json!(layers));
        }
        if let Some(entity_id) = &req.entity_id {
            let mut entity = serde_json::Map::new();
            entity.insert("id".to_string(), json!(entity_id));
            if let Some(salience) = &req.salience {
                entity.insert("salience".to_string(), json!(salience));
            }
            body.insert("entities".to_string(), json!([entity]));
        }

        self.execute(
            self.http
                .post(&url)
                .query(&query)
                .json(&Value::Object(body)),
        )
        .await
    }

    /// Fetch items from a stream via `/streams/contents`.
    pub async fn stream_contents(&self, req: &StreamRequest) -> Result<Value, FeedlyError> {
        let url = format!("{}/streams/contents", self.base_url);

        let mut query: Vec<(&str, String)> = vec![
            ("streamId", req.stream_id.clone()),
            ("count", req.count.to_string()),
        ];
        if let Some(newer_than) = req.newer_than {
            query.push(("newerThan", newer_than.to_string()));
        }
        if let Some(older_than) = req.older_than {
            query.push(("olderThan", older_than.to_string()));
        }
        if let Some(unread_only) = req.unread_only {
            query.push(("unreadOnly", unread_only.to_string()));
        }
        if let Some(ranked) = &req.ranked {
            query.push(("ranked", ranked.clone()));
        }
        if let Some(continuation) = &req.continuation {
            query.push(("continuation", continuation.clone()));
        }

        self.execute(self.http.get(&url).query(&query)).await
    }

    /// Look up a single NLP entity via `/entities/{id}`.
    ///
    /// The id is percent-encoded so embedded `/` (common in entity ids like
    /// `nlp/f/entity/gz:org:apple`) round-trips as a single path segment.
    pub async fn entity(&self, entity_id: &str) -> Result<Value, FeedlyError> {
        let url = format!(
            "{}/entities/{}",
            self.base_url,
            urlencoding::encode(entity_id)
        );

        self.execute(self.http.get(&url)).await
    }

    /// Suggest entity ids matching a text prefix via `/entities/autocomplete`.
    pub async fn autocomplete(&self, query: &str, count: u32) -> Result<Value, FeedlyError> {
        let url = format!("{}/entities/autocomplete", self.base_url);

        self.execute(
            self.http
                .get(&url)
                .query(&[("query", query), ("count", &count.to_string())]),
        )
        .await
    }

    /// Send a request and translate the response.
    ///
    /// Non-success statuses become [`FeedlyError::Upstream`] carrying the raw
    /// body text; success bodies are parsed as JSON and returned as-is.
    async fn execute(&self, request: RequestBuilder) -> Result<Value, FeedlyError> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.header("accept", "application/json").send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "Upstream request failed");
            return Err(FeedlyError::Upstream { status, body });
        }

        debug!(%status, "Upstream request succeeded");
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> FeedlyClient {
        FeedlyClient::new(&FeedlyConfig {
            base_url: "https://example.com/v3/".to_string(),
            token: None,
        })
        .unwrap()
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        assert_eq!(test_client().base_url(), "https://example.com/v3");
    }

    #[test]
    fn test_entity_id_percent_encoding() {
        // Embedded '/' must survive as %2F so the server sees one segment
        assert_eq!(
            urlencoding::encode("nlp/f/entity/gz:org:apple"),
            "nlp%2Ff%2Fentity%2Fgz%3Aorg%3Aapple"
        );
    }
}
