//! Shared helpers for the mock-server tests.

#![allow(dead_code)]

use notion_automation::config::Config;
use serde_json::{json, Value};
use wiremock::MockServer;

pub const TOKEN: &str = "secret_test_token";
pub const DATABASE_ID: &str = "db-123";

/// Config pointing at the mock server instead of api.notion.com.
pub fn mock_config(server: &MockServer) -> Config {
    Config::new(TOKEN, DATABASE_ID).with_base_url(server.uri())
}

/// Run blocking client code off the async test runtime. The reqwest
/// blocking client must be created and dropped outside of it.
pub async fn blocking<T, F>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .expect("blocking task panicked")
}

/// A page object as the query endpoint returns it.
pub fn page_json(id: &str, title: &str, url: &str, published: &str) -> Value {
    json!({
        "object": "page",
        "id": id,
        "archived": false,
        "properties": {
            "URL": {
                "id": "title",
                "type": "title",
                "title": [{"type": "text", "text": {"content": url, "link": null}, "plain_text": url}]
            },
            "Title": {
                "id": "t1",
                "type": "rich_text",
                "rich_text": [{"type": "text", "text": {"content": title, "link": null}, "plain_text": title}]
            },
            "Published": {
                "id": "p1",
                "type": "date",
                "date": {"start": published, "end": null, "time_zone": null}
            }
        }
    })
}

/// `count` numbered pages starting at `first`.
pub fn pages(first: usize, count: usize) -> Vec<Value> {
    (first..first + count)
        .map(|i| {
            page_json(
                &format!("page-{}", i),
                &format!("Title {}", i),
                &format!("https://example.com/{}", i),
                "2023-01-15T00:00:00.000+00:00",
            )
        })
        .collect()
}

pub fn query_body(results: Vec<Value>, next_cursor: Option<&str>) -> Value {
    json!({
        "object": "list",
        "results": results,
        "next_cursor": next_cursor,
        "has_more": next_cursor.is_some()
    })
}
