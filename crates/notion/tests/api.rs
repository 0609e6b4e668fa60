//! Integration tests for the Notion API client against a mock server.

use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use notion::blocks::ContentBlock;
use notion::client::NotionClient;
use notion::error::NotionError;
use notion::page::PageSummary;

const TOKEN: &str = "secret_test_token";

fn client_for(server: &MockServer) -> NotionClient {
    NotionClient::with_base_url(TOKEN, server.uri()).unwrap()
}

fn page_json(id: &str, title: &str) -> serde_json::Value {
    json!({
        "object": "page",
        "id": id,
        "url": format!("https://www.notion.so/{id}"),
        "last_edited_time": "2024-01-15T10:30:00.000Z",
        "properties": {
            "Name": {
                "id": "title",
                "type": "title",
                "title": [{"type": "text", "plain_text": title}]
            }
        }
    })
}

#[tokio::test]
async fn retrieve_page_sends_auth_and_version_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/pages/page-1"))
        .and(header("Authorization", format!("Bearer {TOKEN}").as_str()))
        .and(header("Notion-Version", "2022-06-28"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json("page-1", "Roadmap")))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server).retrieve_page("page-1").await.unwrap();
    let summary = PageSummary::from(&page);
    assert_eq!(summary.title, "Roadmap");
    assert_eq!(summary.id, "page-1");
    assert_eq!(summary.url, "https://www.notion.so/page-1");
}

#[tokio::test]
async fn untitled_page_falls_back() {
    let server = MockServer::start().await;
    let body = json!({
        "id": "page-2",
        "url": "https://www.notion.so/page-2",
        "last_edited_time": "2024-01-15T10:30:00.000Z",
        "properties": {}
    });
    Mock::given(method("GET"))
        .and(path("/v1/pages/page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let page = client_for(&server).retrieve_page("page-2").await.unwrap();
    assert_eq!(PageSummary::from(&page).title, "Untitled");
}

#[tokio::test]
async fn list_blocks_requests_single_page() {
    let server = MockServer::start().await;
    let body = json!({
        "results": [
            {"id": "b1", "type": "heading_2",
             "heading_2": {"rich_text": [{"plain_text": "Overview"}]}},
            {"id": "b2", "type": "unsupported_widget", "unsupported_widget": {}}
        ]
    });
    Mock::given(method("GET"))
        .and(path("/v1/blocks/page-1/children"))
        .and(query_param("page_size", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .list_blocks("page-1", 100)
        .await
        .unwrap();
    let blocks: Vec<ContentBlock> = response
        .results
        .iter()
        .map(ContentBlock::from_wire)
        .collect();
    let lines: Vec<String> = notion::decode(&blocks).collect();
    assert_eq!(lines, vec!["## Overview"]);
}

#[tokio::test]
async fn append_paragraph_payload_is_self_consistent() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/v1/blocks/page-1/children"))
        .and(body_json(json!({
            "children": [{
                "object": "block",
                "type": "paragraph",
                "paragraph": {
                    "rich_text": [{"type": "text", "text": {"content": "New paragraph text"}}]
                }
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&server)
        .await;

    let block = ContentBlock::paragraph("New paragraph text").to_wire().unwrap();
    client_for(&server)
        .append_blocks("page-1", vec![block])
        .await
        .unwrap();
}

#[tokio::test]
async fn append_todo_carries_checked_flag() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/v1/blocks/page-1/children"))
        .and(body_partial_json(json!({
            "children": [{
                "type": "to_do",
                "to_do": {"checked": true}
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&server)
        .await;

    let block = ContentBlock::todo("review PR", true).to_wire().unwrap();
    client_for(&server)
        .append_blocks("page-1", vec![block])
        .await
        .unwrap();
}

#[tokio::test]
async fn create_page_builds_title_property_and_children() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/pages"))
        .and(body_partial_json(json!({
            "parent": {"database_id": "db-1"},
            "properties": {
                "Name": {"title": [{"text": {"content": "My New Page"}}]}
            },
            "children": [
                {"type": "heading_2"},
                {"type": "paragraph"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json("page-9", "My New Page")))
        .expect(1)
        .mount(&server)
        .await;

    let children = vec![
        ContentBlock::heading("Overview", 2).to_wire().unwrap(),
        ContentBlock::paragraph("Add content here...").to_wire().unwrap(),
    ];
    let page = client_for(&server)
        .create_page("db-1", "My New Page", children)
        .await
        .unwrap();
    assert_eq!(page.id, "page-9");
}

#[tokio::test]
async fn search_omits_query_when_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/search"))
        .and(body_json(json!({
            "filter": {"property": "object", "value": "page"},
            "sort": {"direction": "descending", "timestamp": "last_edited_time"},
            "page_size": 5
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [page_json("page-1", "Recent")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server).search(None, 5).await.unwrap();
    assert_eq!(response.results.len(), 1);
    assert_eq!(PageSummary::from(&response.results[0]).title, "Recent");
}

#[tokio::test]
async fn search_forwards_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/search"))
        .and(body_partial_json(json!({"query": "Meeting Notes", "page_size": 20})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .search(Some("Meeting Notes"), 20)
        .await
        .unwrap();
    assert!(response.results.is_empty());
}

#[tokio::test]
async fn retrieve_database_parses_title() {
    let server = MockServer::start().await;
    let body = json!({
        "id": "db-1",
        "title": [{"plain_text": "Updates"}]
    });
    Mock::given(method("GET"))
        .and(path("/v1/databases/db-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let db = client_for(&server)
        .retrieve_database("db-1")
        .await
        .unwrap();
    assert_eq!(db.title[0].plain_text, "Updates");
}

#[tokio::test]
async fn unauthorized_maps_to_credential_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "code": "unauthorized",
            "message": "API token is invalid."
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).search(None, 5).await.unwrap_err();
    match &err {
        NotionError::Unauthorized(message) => assert_eq!(message, "API token is invalid."),
        other => panic!("expected Unauthorized, got {other:?}"),
    }
    assert!(err.hint().unwrap().contains("NOTION_API_KEY"));
}

#[tokio::test]
async fn not_found_maps_to_sharing_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/databases/db-hidden"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "object_not_found",
            "message": "Could not find database."
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .retrieve_database("db-hidden")
        .await
        .unwrap_err();
    match &err {
        NotionError::NotFound(message) => assert_eq!(message, "Could not find database."),
        other => panic!("expected NotFound, got {other:?}"),
    }
    assert!(err.hint().unwrap().contains("shared"));
}

#[tokio::test]
async fn other_failures_carry_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/pages/page-1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .retrieve_page("page-1")
        .await
        .unwrap_err();
    match err {
        NotionError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "internal error");
        }
        other => panic!("expected Api, got {other:?}"),
    }
}
