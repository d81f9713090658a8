//! Integration tests for the Feedly API client.
//!
//! Behavioral contracts, verified against a mock upstream:
//! - only explicitly provided optional arguments appear as query parameters
//! - continuation tokens are forwarded unchanged
//! - entity ids containing '/' are percent-encoded on the wire
//! - non-success upstream responses surface the body text verbatim
//! - requests carry the bearer token when configured, and nothing when not

use std::collections::HashMap;

use feedly_mcp_server::core::config::FeedlyConfig;
use feedly_mcp_server::feedly::{FeedlyClient, SearchRequest, StreamRequest};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, token: Option<&str>) -> FeedlyClient {
    FeedlyClient::new(&FeedlyConfig {
        base_url: server.uri(),
        token: token.map(String::from),
    })
    .unwrap()
}

fn search_request(count: u32) -> SearchRequest {
    SearchRequest {
        query: Some("quantum computing".to_string()),
        count,
        ..Default::default()
    }
}

async fn query_pairs_of_last_request(server: &MockServer) -> HashMap<String, String> {
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    requests[0]
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

#[tokio::test]
async fn search_omitted_optional_fields_never_appear_as_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search/contents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"items": []})))
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    client.search_contents(&search_request(10)).await.unwrap();

    let pairs = query_pairs_of_last_request(&server).await;
    assert_eq!(pairs.get("count").map(String::as_str), Some("10"));
    assert!(!pairs.contains_key("newerThan"));
    assert!(!pairs.contains_key("olderThan"));
    assert!(!pairs.contains_key("unreadOnly"));
    assert!(!pairs.contains_key("continuation"));
}

#[tokio::test]
async fn search_provided_optional_fields_are_reflected_exactly() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search/contents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"items": []})))
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let request = SearchRequest {
        query: Some("ai".to_string()),
        count: 25,
        newer_than: Some(1700000000000),
        unread_only: Some(true),
        continuation: Some("16a9a3f1c2b:0:abc==".to_string()),
        ..Default::default()
    };
    client.search_contents(&request).await.unwrap();

    let pairs = query_pairs_of_last_request(&server).await;
    assert_eq!(pairs.get("count").map(String::as_str), Some("25"));
    assert_eq!(
        pairs.get("newerThan").map(String::as_str),
        Some("1700000000000")
    );
    assert_eq!(pairs.get("unreadOnly").map(String::as_str), Some("true"));
    // Continuation token forwarded unchanged
    assert_eq!(
        pairs.get("continuation").map(String::as_str),
        Some("16a9a3f1c2b:0:abc==")
    );
    assert!(!pairs.contains_key("olderThan"));
}

#[tokio::test]
async fn search_body_carries_entity_filter_and_query() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search/contents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"items": []})))
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let request = SearchRequest {
        query: Some("chips".to_string()),
        entity_id: Some("nlp/f/entity/gz:org:nvidia".to_string()),
        salience: Some("about".to_string()),
        count: 10,
        ..Default::default()
    };
    client.search_contents(&request).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["query"], "chips");
    assert_eq!(body["entities"][0]["id"], "nlp/f/entity/gz:org:nvidia");
    assert_eq!(body["entities"][0]["salience"], "about");
}

#[tokio::test]
async fn collect_forwards_continuation_token_unchanged() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/streams/contents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"items": []})))
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let request = StreamRequest {
        stream_id: "enterprise/acme/category/f74cc0".to_string(),
        count: 20,
        continuation: Some("opaque-cursor-1234".to_string()),
        ..Default::default()
    };
    client.stream_contents(&request).await.unwrap();

    let pairs = query_pairs_of_last_request(&server).await;
    assert_eq!(
        pairs.get("streamId").map(String::as_str),
        Some("enterprise/acme/category/f74cc0")
    );
    assert_eq!(
        pairs.get("continuation").map(String::as_str),
        Some("opaque-cursor-1234")
    );
    assert!(!pairs.contains_key("newerThan"));
    assert!(!pairs.contains_key("ranked"));
}

#[tokio::test]
async fn entity_id_with_slashes_is_percent_encoded_in_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "x"})))
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    client.entity("nlp/f/entity/gz:org:apple").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    // '/' inside the id must arrive as %2F: one path segment server-side
    assert_eq!(
        requests[0].url.path(),
        "/entities/nlp%2Ff%2Fentity%2Fgz%3Aorg%3Aapple"
    );
}

#[tokio::test]
async fn autocomplete_sends_query_and_count() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/entities/autocomplete"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"entities": []})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    client.autocomplete("Nvid", 10).await.unwrap();

    let pairs = query_pairs_of_last_request(&server).await;
    assert_eq!(pairs.get("query").map(String::as_str), Some("Nvid"));
    assert_eq!(pairs.get("count").map(String::as_str), Some("10"));
}

#[tokio::test]
async fn upstream_404_surfaces_body_text_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let err = client.entity("nlp/f/entity/gz:org:missing").await.unwrap_err();

    assert_eq!(err.to_string(), "not found");
    assert_eq!(err.status(), Some(reqwest::StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn configured_token_is_sent_as_bearer_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/streams/contents"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"items": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("test-token"));
    let request = StreamRequest {
        stream_id: "feed/http://example.com/rss".to_string(),
        count: 20,
        ..Default::default()
    };
    client.stream_contents(&request).await.unwrap();
}

#[tokio::test]
async fn missing_token_sends_no_auth_header_and_forwards_401() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("must provide authorization"))
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let request = StreamRequest {
        stream_id: "feed/http://example.com/rss".to_string(),
        count: 20,
        ..Default::default()
    };
    let err = client.stream_contents(&request).await.unwrap_err();

    // Upstream failure forwarded unmodified
    assert_eq!(err.to_string(), "must provide authorization");

    let requests = server.received_requests().await.unwrap();
    assert!(!requests[0].headers.contains_key("authorization"));
}
