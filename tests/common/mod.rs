//! Shared helpers for the Web API integration tests.
//!
//! Builds the full router over an in-memory database and a temporary
//! content directory.

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use serde_json::{json, Value};
use tempfile::TempDir;

use smb_explorer::share::{SessionRegistry, SqliteShareStore};
use smb_explorer::tree::SqliteEntryStore;
use smb_explorer::web::middleware::AccessTokens;
use smb_explorer::web::{create_router, AppState};
use smb_explorer::{ContentStorage, Database, ShareService, VirtualTree};

pub const ADMIN_TOKEN: &str = "admin-secret";
pub const MANAGER_TOKEN: &str = "manager-secret";

/// A running test application.
pub struct TestApp {
    pub server: TestServer,
    pub db: Database,
    /// Keeps the content directory alive for the test.
    pub content_dir: TempDir,
}

/// Build a test server with open guards.
pub async fn create_test_app() -> TestApp {
    build(AccessTokens::open(), None).await
}

/// Build a test server that requires the admin and manager tokens.
pub async fn create_guarded_test_app() -> TestApp {
    build(AccessTokens::new(ADMIN_TOKEN, MANAGER_TOKEN), None).await
}

/// Build a test server with a custom upload limit in bytes.
pub async fn create_test_app_with_upload_limit(bytes: usize) -> TestApp {
    build(AccessTokens::open(), Some(bytes)).await
}

async fn build(tokens: AccessTokens, upload_limit: Option<usize>) -> TestApp {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    let content_dir = tempfile::tempdir().expect("Failed to create content directory");

    let shares = Arc::new(SqliteShareStore::new(db.pool().clone()));
    let entries = Arc::new(SqliteEntryStore::new(db.pool().clone()));
    let service = ShareService::new(
        shares.clone(),
        entries.clone(),
        Arc::new(SessionRegistry::new()),
    );
    let tree = VirtualTree::new(shares, entries);
    let content = ContentStorage::open(content_dir.path())
        .await
        .expect("Failed to open content storage");

    let mut state = AppState::new(tree, service, content).with_tokens(tokens);
    if let Some(bytes) = upload_limit {
        state = state.with_max_upload_size(bytes);
    }

    let router = create_router(Arc::new(state), &[]);
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp {
        server,
        db,
        content_dir,
    }
}

/// Create a share and return its JSON.
pub async fn create_share(server: &TestServer, name: &str, path: &str) -> Value {
    let response = server
        .post("/api/shares")
        .json(&json!({ "name": name, "path": path }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["data"].clone()
}

/// Create and connect a share, returning its ID.
pub async fn create_connected_share(server: &TestServer) -> i64 {
    let share = create_share(server, "Office", "//files.local/office").await;
    let id = share["id"].as_i64().unwrap();
    server
        .post(&format!("/api/shares/{id}/connect"))
        .await
        .assert_status_ok();
    id
}

/// Create a folder under `parent`.
pub async fn create_folder(server: &TestServer, share_id: i64, parent: &str, name: &str) {
    server
        .post(&format!("/api/shares/{share_id}/folder"))
        .json(&json!({ "name": name, "path": parent }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);
}

/// Names of the entries in a `{data: [...]}` listing.
pub fn names(listing: &Value) -> Vec<String> {
    listing["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap().to_string())
        .collect()
}
