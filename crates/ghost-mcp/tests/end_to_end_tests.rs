//! End-to-end tests: MCP requests through the posts tools and the real
//! AdminClient to a mock Ghost Admin API.

use std::sync::Arc;

use ghost_admin::{AdminClient, ClientConfig};
use ghost_mcp::{GhostMcpServer, register_post_tools};
use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "6489a7c1d2e3f4a5b6c7d8e9:a1b2c3d4e5f60718293a4b5c6d7e8f90";

fn server_for(ghost: &MockServer) -> GhostMcpServer {
    let client = AdminClient::new(ClientConfig::new(&ghost.uri(), KEY).unwrap()).unwrap();
    let mut server = GhostMcpServer::new();
    register_post_tools(&mut server, Arc::new(client));
    server
}

async fn call(server: &GhostMcpServer, name: &str, arguments: Value) -> Value {
    let request = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "tools/call",
        "params": {"name": name, "arguments": arguments}
    });
    let response = server.handle_message(&request.to_string()).await.unwrap();
    let response: Value = serde_json::from_str(&response).unwrap();
    response["result"].clone()
}

fn text(result: &Value) -> &str {
    result["content"][0]["text"].as_str().unwrap()
}

#[tokio::test]
async fn test_browse_round_trip() {
    let ghost = MockServer::start().await;
    let envelope = json!({
        "posts": [{"id": "1", "title": "First"}],
        "meta": {"pagination": {"page": 1, "limit": 2, "pages": 1, "total": 1, "next": null, "prev": null}}
    });
    Mock::given(method("GET"))
        .and(path("/ghost/api/admin/posts/"))
        .and(query_param("limit", "2"))
        .and(query_param("filter", "status:draft"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope.clone()))
        .expect(1)
        .mount(&ghost)
        .await;

    let result = call(
        &server_for(&ghost),
        "posts_browse",
        json!({"limit": 2, "filter": "status:draft"}),
    )
    .await;

    assert!(result.get("isError").is_none());
    let parsed: Value = serde_json::from_str(text(&result)).unwrap();
    assert_eq!(parsed, envelope);
}

#[tokio::test]
async fn test_add_with_html_sends_source_html() {
    let ghost = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ghost/api/admin/posts/"))
        .and(query_param("source", "html"))
        .and(body_json(json!({"posts": [{
            "title": "Hello",
            "html": "<p>Hi</p>",
            "authors": [{"email": "editor@example.com"}]
        }]})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"posts": [{
            "id": "65f0", "title": "Hello", "slug": "hello", "status": "draft"
        }]})))
        .expect(1)
        .mount(&ghost)
        .await;

    let result = call(
        &server_for(&ghost),
        "posts_add",
        json!({
            "title": "Hello",
            "html": "<p>Hi</p>",
            "authors": [{"email": "editor@example.com"}]
        }),
    )
    .await;

    let created: Value = serde_json::from_str(text(&result)).unwrap();
    assert_eq!(created["slug"], "hello");
}

#[tokio::test]
async fn test_edit_conflict_reaches_caller() {
    let ghost = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/ghost/api/admin/posts/abc123/"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "errors": [{
                "message": "Saving failed! Someone else is editing this post.",
                "type": "UpdateCollisionError"
            }]
        })))
        .expect(1)
        .mount(&ghost)
        .await;

    let result = call(
        &server_for(&ghost),
        "posts_edit",
        json!({"id": "abc123", "updated_at": "2020-01-01T00:00:00.000Z", "title": "x"}),
    )
    .await;

    assert_eq!(result["isError"], true);
    assert_eq!(
        text(&result),
        "Ghost API error (409): Saving failed! Someone else is editing this post."
    );
}

#[tokio::test]
async fn test_delete_round_trip() {
    let ghost = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/ghost/api/admin/posts/abc123/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&ghost)
        .await;

    let result = call(&server_for(&ghost), "posts_delete", json!({"id": "abc123"})).await;

    assert_eq!(text(&result), "Post with id abc123 deleted.");
}

#[tokio::test]
async fn test_read_without_identifier_is_reported() {
    let ghost = MockServer::start().await;

    let result = call(&server_for(&ghost), "posts_read", json!({})).await;

    assert_eq!(result["isError"], true);
    assert!(text(&result).contains("id or slug"));
    assert!(ghost.received_requests().await.unwrap().is_empty());
}
