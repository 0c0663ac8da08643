//! Shared helpers for the HTTP integration tests.

#![allow(dead_code)]

use mentorlink_api::{create_router, AppState};
use mentorlink_store::Store;
use serde_json::{json, Value};
use tempfile::TempDir;

/// A server bound to an ephemeral port over a throwaway database.
pub struct TestServer {
    /// Base URL, e.g. `http://127.0.0.1:54321`.
    pub base: String,
    /// Store shared with the server, for direct inspection.
    pub store: Store,
    pub client: reqwest::Client,
    _dir: TempDir,
    handle: tokio::task::JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Spawns the test server and returns a handle to it.
pub async fn spawn_test_server() -> TestServer {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = Store::open_local(dir.path().join("integration.db"))
        .await
        .expect("Failed to open store");

    let router = create_router(AppState::new(store.clone()));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get local addr");

    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Server failed");
    });

    TestServer {
        base: format!("http://{addr}"),
        store,
        client: reqwest::Client::new(),
        _dir: dir,
        handle,
    }
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    /// `GET` a path, returning the status code and JSON body.
    pub async fn get(&self, path: &str) -> (u16, Value) {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Request failed");
        let status = response.status().as_u16();
        (status, response.json().await.expect("Body is not JSON"))
    }

    /// `POST` a path with an optional JSON body.
    pub async fn post(&self, path: &str, body: Option<Value>) -> (u16, Value) {
        let mut request = self.client.post(self.url(path));
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request.send().await.expect("Request failed");
        let status = response.status().as_u16();
        (status, response.json().await.expect("Body is not JSON"))
    }

    /// `PUT` a path without a body.
    pub async fn put(&self, path: &str) -> (u16, Value) {
        let response = self
            .client
            .put(self.url(path))
            .send()
            .await
            .expect("Request failed");
        let status = response.status().as_u16();
        (status, response.json().await.expect("Body is not JSON"))
    }

    /// Creates a mentor or student and returns its id.
    pub async fn create(&self, collection: &str, name: &str) -> String {
        let (status, body) = self
            .post(&format!("/{collection}"), Some(json!({ "name": name })))
            .await;
        assert_eq!(status, 201, "create {collection} failed: {body}");
        body["id"].as_str().expect("id missing").to_string()
    }
}
