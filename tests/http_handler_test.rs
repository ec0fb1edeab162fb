use httpmock::prelude::*;
use reaction_etl::adapters::http::{handle_request, ApiRequest};
use reaction_etl::core::Storage;
use reaction_etl::{EtlError, PostsFetcher, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone, Default)]
struct MockStorage {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    fail_writes: bool,
}

impl MockStorage {
    async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
        self.files.lock().await.get(path).cloned()
    }
}

impl Storage for MockStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let files = self.files.lock().await;
        files.get(path).cloned().ok_or_else(|| EtlError::StorageError {
            message: format!("File not found: {}", path),
        })
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        if self.fail_writes {
            return Err(EtlError::StorageError {
                message: "access denied".to_string(),
            });
        }
        self.files
            .lock()
            .await
            .insert(path.to_string(), data.to_vec());
        Ok(())
    }
}

fn posts_server(status: u16, body: serde_json::Value) -> MockServer {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/posts/user/5");
        then.status(status).json_body(body);
    });
    server
}

#[tokio::test]
async fn test_get_stores_and_returns_document() {
    let server = posts_server(
        200,
        serde_json::json!({"posts": [
            {"reactions": {"likes": 1, "dislikes": 2}, "views": 3},
            {"reactions": {"likes": 4, "dislikes": 5}, "views": 6}
        ]}),
    );
    let fetcher = PostsFetcher::new(server.url("/posts/user/{id}"));
    let storage = MockStorage::default();

    let response = handle_request(&ApiRequest::get("5"), &fetcher, &storage).await;

    assert_eq!(response.status_code, 200);
    assert_eq!(
        response.body_json().unwrap(),
        serde_json::json!({"Likes": [1, 4], "Dislikes": [2, 5], "Views": [3, 6]})
    );
    assert!(storage.get_file("5_posts_data.json").await.is_some());
}

#[tokio::test]
async fn test_empty_posts_is_not_found() {
    let server = posts_server(200, serde_json::json!({"posts": []}));
    let fetcher = PostsFetcher::new(server.url("/posts/user/{id}"));
    let storage = MockStorage::default();

    let response = handle_request(&ApiRequest::get("5"), &fetcher, &storage).await;

    assert_eq!(response.status_code, 404);
    assert!(storage.get_file("5_posts_data.json").await.is_none());
}

#[tokio::test]
async fn test_upstream_failure_is_bad_gateway() {
    let server = posts_server(503, serde_json::json!({"message": "unavailable"}));
    let fetcher = PostsFetcher::new(server.url("/posts/user/{id}"));

    let response = handle_request(&ApiRequest::get("5"), &fetcher, &MockStorage::default()).await;

    assert_eq!(response.status_code, 502);
    let message = response.body_json().unwrap()["message"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(message.starts_with("Error fetching data:"));
}

#[tokio::test]
async fn test_request_validation() {
    let fetcher = PostsFetcher::new("http://127.0.0.1:9/posts/user/{id}");
    let storage = MockStorage::default();

    let post = ApiRequest {
        http_method: Some("POST".to_string()),
        ..ApiRequest::get("5")
    };
    let response = handle_request(&post, &fetcher, &storage).await;
    assert_eq!(response.status_code, 400);
    assert_eq!(
        response.body_json().unwrap()["message"],
        "Bad request: Only GET method is supported"
    );

    let missing_id = ApiRequest {
        http_method: Some("GET".to_string()),
        path_parameters: None,
    };
    let response = handle_request(&missing_id, &fetcher, &storage).await;
    assert_eq!(response.status_code, 400);
    assert_eq!(
        response.body_json().unwrap()["message"],
        "Bad request: Missing user id"
    );
}

#[tokio::test]
async fn test_storage_failure_is_internal_error() {
    let server = posts_server(
        200,
        serde_json::json!({"posts": [{"reactions": {"likes": 1}, "views": 1}]}),
    );
    let fetcher = PostsFetcher::new(server.url("/posts/user/{id}"));
    let storage = MockStorage {
        fail_writes: true,
        ..MockStorage::default()
    };

    let response = handle_request(&ApiRequest::get("5"), &fetcher, &storage).await;

    assert_eq!(response.status_code, 500);
    assert!(response.body.contains("access denied"));
}
