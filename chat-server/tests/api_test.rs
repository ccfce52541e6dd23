//! Integration tests for the HTTP API.
//!
//! These tests spin up a real HTTP server on a random port backed by an in-memory
//! SQLite database, a scripted LLM and a fixed retriever.

use async_trait::async_trait;
use chat_router::{ContextRouter, LongMemoryService};
use chat_server::{create_router, AppState};
use llm_client::LlmClient;
use memory_retriever::{RetrievedDocument, SimilarityRetriever};
use prompt::ChatMessage;
use std::sync::Arc;
use storage::{
    ChatTurnRepository, LongMemoryRepository, SqlitePoolManager, UserRepository,
};

struct CannedLlm;

#[async_trait]
impl LlmClient for CannedLlm {
    async fn complete(&self, _messages: Vec<ChatMessage>) -> anyhow::Result<String> {
        Ok("Namaste! Rust is a systems language.".to_string())
    }
}

struct OneDocRetriever;

#[async_trait]
impl SimilarityRetriever for OneDocRetriever {
    async fn retrieve(&self, _query: &str, _k: usize) -> anyhow::Result<Vec<RetrievedDocument>> {
        Ok(vec![RetrievedDocument::new("Rust was first released in 2015.")])
    }
}

/// Spin up a test server on a random port and return the base URL.
async fn start_test_server() -> String {
    let pool = SqlitePoolManager::new("sqlite::memory:").await.unwrap();
    let users = Arc::new(UserRepository::new(pool.clone()));
    let turns = Arc::new(ChatTurnRepository::new(pool.clone()));
    let memories = Arc::new(LongMemoryRepository::new(pool));

    let router = ContextRouter::new(turns.clone(), Arc::new(CannedLlm), Arc::new(OneDocRetriever));
    let state = Arc::new(AppState::new(
        Arc::new(router),
        LongMemoryService::new(memories),
        users,
        turns,
    ));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

/// Helper to GET a URL and return (status, body_string).
async fn get(base: &str, path: &str) -> (u16, String) {
    let resp = reqwest::Client::new()
        .get(format!("{}{}", base, path))
        .send()
        .await
        .unwrap();
    let status = resp.status().as_u16();
    (status, resp.text().await.unwrap())
}

/// Helper to send JSON with the given method and return (status, body_string).
async fn send_json(method: reqwest::Method, base: &str, path: &str, json: &str) -> (u16, String) {
    let resp = reqwest::Client::new()
        .request(method, format!("{}{}", base, path))
        .header("content-type", "application/json")
        .body(json.to_string())
        .send()
        .await
        .unwrap();
    let status = resp.status().as_u16();
    (status, resp.text().await.unwrap())
}

async fn post_json(base: &str, path: &str, json: &str) -> (u16, String) {
    send_json(reqwest::Method::POST, base, path, json).await
}

async fn patch_json(base: &str, path: &str, json: &str) -> (u16, String) {
    send_json(reqwest::Method::PATCH, base, path, json).await
}

async fn delete(base: &str, path: &str) -> (u16, String) {
    let resp = reqwest::Client::new()
        .delete(format!("{}{}", base, path))
        .send()
        .await
        .unwrap();
    let status = resp.status().as_u16();
    (status, resp.text().await.unwrap())
}

fn json(body: &str) -> serde_json::Value {
    serde_json::from_str(body).unwrap()
}

async fn create_user(base: &str, email: &str) -> String {
    let (status, body) = post_json(
        base,
        "/api/v1/users",
        &format!(r#"{{"name": "Test User", "email": "{}"}}"#, email),
    )
    .await;
    assert_eq!(status, 201, "{}", body);
    json(&body)["id"].as_str().unwrap().to_string()
}

async fn create_memory(base: &str, user_id: &str, content: &str, importance: f64) -> String {
    let (status, body) = post_json(
        base,
        &format!("/api/v1/users/{}/memories", user_id),
        &format!(
            r#"{{"content": "{}", "role": "human", "memory_type": "fact", "importance_score": {}}}"#,
            content, importance
        ),
    )
    .await;
    assert_eq!(status, 201, "{}", body);
    json(&body)["id"].as_str().unwrap().to_string()
}

// ============================================================================
// Health and users
// ============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let base = start_test_server().await;
    let (status, body) = get(&base, "/health").await;
    assert_eq!(status, 200);
    assert!(body.contains("healthy"));
}

/// **Test: Users can be created, listed and fetched; duplicate email is a 400.**
#[tokio::test]
async fn test_user_routes() {
    let base = start_test_server().await;
    let user_id = create_user(&base, "meera@example.com").await;

    let (status, body) = get(&base, &format!("/api/v1/users/{}", user_id)).await;
    assert_eq!(status, 200);
    assert_eq!(json(&body)["email"], "meera@example.com");

    let (status, body) = get(&base, "/api/v1/users").await;
    assert_eq!(status, 200);
    assert_eq!(json(&body).as_array().unwrap().len(), 1);

    let (status, body) = post_json(
        &base,
        "/api/v1/users",
        r#"{"name": "Again", "email": "meera@example.com"}"#,
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(json(&body)["code"], "validation_error");

    let (status, body) = get(&base, "/api/v1/users/nobody").await;
    assert_eq!(status, 404);
    assert_eq!(json(&body)["code"], "not_found");
}

// ============================================================================
// Chat
// ============================================================================

/// **Test: Chat answers with {answer, context, path} and the turn shows up in history.**
#[tokio::test]
async fn test_chat_and_history() {
    let base = start_test_server().await;
    let user_id = create_user(&base, "dev@example.com").await;

    let (status, body) = post_json(
        &base,
        "/api/v1/chat",
        &format!(r#"{{"user_id": "{}", "message": "what is rust?"}}"#, user_id),
    )
    .await;
    assert_eq!(status, 200, "{}", body);
    let result = json(&body);
    assert_eq!(result["answer"], "Namaste! Rust is a systems language.");
    assert_eq!(result["path"], "vectorstore");
    assert_eq!(result["context"][0]["content"], "Rust was first released in 2015.");

    let (status, body) = get(&base, &format!("/api/v1/chat/history/{}?limit=5", user_id)).await;
    assert_eq!(status, 200);
    let turns = json(&body);
    assert_eq!(turns.as_array().unwrap().len(), 1);
    assert_eq!(turns[0]["question"], "what is rust?");
}

/// **Test: Date questions take the system_time path over HTTP too.**
#[tokio::test]
async fn test_chat_date_path() {
    let base = start_test_server().await;
    let user_id = create_user(&base, "clock@example.com").await;

    let (status, body) = post_json(
        &base,
        "/api/v1/chat",
        &format!(r#"{{"user_id": "{}", "message": "what time is it"}}"#, user_id),
    )
    .await;
    assert_eq!(status, 200);
    let result = json(&body);
    assert_eq!(result["path"], "system_time");
    assert!(result["answer"].as_str().unwrap().starts_with("Today is "));
}

/// **Test: Blank message is a 400, unknown user a 404.**
#[tokio::test]
async fn test_chat_errors() {
    let base = start_test_server().await;
    let user_id = create_user(&base, "err@example.com").await;

    let (status, _) = post_json(
        &base,
        "/api/v1/chat",
        &format!(r#"{{"user_id": "{}", "message": "   "}}"#, user_id),
    )
    .await;
    assert_eq!(status, 400);

    let (status, body) = post_json(
        &base,
        "/api/v1/chat",
        r#"{"user_id": "ghost", "message": "hello"}"#,
    )
    .await;
    assert_eq!(status, 404);
    assert_eq!(json(&body)["code"], "not_found");
}

// ============================================================================
// Long-term memories
// ============================================================================

/// **Test: Memory creation validates role and type.**
#[tokio::test]
async fn test_memory_create_validation() {
    let base = start_test_server().await;
    let user_id = create_user(&base, "mem@example.com").await;
    let path = format!("/api/v1/users/{}/memories", user_id);

    let (status, body) = post_json(
        &base,
        &path,
        r#"{"content": "x", "role": "bot", "memory_type": "fact"}"#,
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(json(&body)["code"], "validation_error");

    let (status, _) = post_json(
        &base,
        &path,
        r#"{"content": "x", "role": "human", "memory_type": "unknown"}"#,
    )
    .await;
    assert_eq!(status, 400);

    let id = create_memory(&base, &user_id, "Likes chai", 0.9).await;
    let (status, body) = get(&base, &format!("{}/{}", path, id)).await;
    assert_eq!(status, 200);
    assert_eq!(json(&body)["content"], "Likes chai");
}

/// **Test: Views (recent, all, type, important, search, stats) over HTTP.**
#[tokio::test]
async fn test_memory_views() {
    let base = start_test_server().await;
    let user_id = create_user(&base, "views@example.com").await;
    let path = format!("/api/v1/users/{}/memories", user_id);
    create_memory(&base, &user_id, "Plays cricket on Sundays", 0.9).await;
    create_memory(&base, &user_id, "Asked about cricket rules", 0.4).await;

    let (status, body) = get(&base, &format!("{}?limit=1", path)).await;
    assert_eq!(status, 200);
    assert_eq!(json(&body).as_array().unwrap().len(), 1);

    let (_, body) = get(&base, &format!("{}/all", path)).await;
    assert_eq!(json(&body).as_array().unwrap().len(), 2);

    let (_, body) = get(&base, &format!("{}/type/fact", path)).await;
    assert_eq!(json(&body).as_array().unwrap().len(), 2);
    let (status, _) = get(&base, &format!("{}/type/poem", path)).await;
    assert_eq!(status, 400);

    let (_, body) = get(&base, &format!("{}/important", path)).await;
    let important = json(&body);
    assert_eq!(important.as_array().unwrap().len(), 1);
    assert_eq!(important[0]["content"], "Plays cricket on Sundays");

    let (_, body) = get(&base, &format!("{}/search?q=CRICKET", path)).await;
    assert_eq!(json(&body).as_array().unwrap().len(), 2);

    let (_, body) = get(&base, &format!("{}/stats", path)).await;
    let stats = json(&body);
    assert_eq!(stats["total_memories"], 2);
    assert_eq!(stats["memory_types"]["fact"], 2);
}

/// **Test: Update, clamped importance, delete twice, and ownership across users.**
#[tokio::test]
async fn test_memory_mutations() {
    let base = start_test_server().await;
    let owner = create_user(&base, "owner@example.com").await;
    let other = create_user(&base, "other@example.com").await;
    let id = create_memory(&base, &owner, "Draft note", 0.5).await;
    let path = format!("/api/v1/users/{}/memories/{}", owner, id);

    let (status, body) = patch_json(&base, &path, r#"{"content": "Final note"}"#).await;
    assert_eq!(status, 200);
    assert_eq!(json(&body)["content"], "Final note");

    let (status, body) = patch_json(
        &base,
        &format!("{}/importance", path),
        r#"{"importance_score": 5.0}"#,
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(json(&body)["importance_score"], 1.0);

    let foreign = format!("/api/v1/users/{}/memories/{}", other, id);
    let (status, _) = get(&base, &foreign).await;
    assert_eq!(status, 404);
    let (status, _) = delete(&base, &foreign).await;
    assert_eq!(status, 404);

    let (status, _) = delete(&base, &path).await;
    assert_eq!(status, 200);
    let (status, body) = delete(&base, &path).await;
    assert_eq!(status, 404);
    assert_eq!(json(&body)["code"], "not_found");
}

/// **Test: Bulk deletes: cleanup counts, delete-all needs confirm=true.**
#[tokio::test]
async fn test_memory_bulk_deletes() {
    let base = start_test_server().await;
    let user_id = create_user(&base, "bulk@example.com").await;
    let path = format!("/api/v1/users/{}/memories", user_id);
    create_memory(&base, &user_id, "one", 0.1).await;
    create_memory(&base, &user_id, "two", 0.9).await;

    // Nothing is 90 days old yet.
    let (status, body) = delete(&base, &format!("{}/cleanup", path)).await;
    assert_eq!(status, 200);
    assert_eq!(json(&body)["deleted"], 0);

    let (status, _) = delete(&base, &format!("{}/cleanup?days_old=-1", path)).await;
    assert_eq!(status, 400);

    let (status, body) = delete(&base, &format!("{}/cleanup?days_old=100000000", path)).await;
    assert_eq!(status, 400);
    assert_eq!(json(&body)["code"], "validation_error");

    let (status, _) = delete(&base, &path).await;
    assert_eq!(status, 400);

    let (status, body) = delete(&base, &format!("{}?confirm=true", path)).await;
    assert_eq!(status, 200);
    assert_eq!(json(&body)["deleted"], 2);
}
