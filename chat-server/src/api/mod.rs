//! REST API over the context router, users and long-term memories.
//!
//! # Endpoints
//!
//! - `GET /health`
//! - `POST /api/v1/chat`, `GET /api/v1/chat/history/{user_id}`
//! - `POST|GET /api/v1/users`, `GET /api/v1/users/{user_id}`
//! - `/api/v1/users/{user_id}/memories/...`: long-term memory CRUD and derived views

mod chat;
mod error;
mod memories;
mod users;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use chat_router::{ContextRouter, LongMemoryService};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use storage::{ChatTurnStore, UserStore};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use error::{ApiError, ErrorResponse};

use crate::components::AppComponents;

/// Shared handler state.
pub struct AppState {
    pub router: Arc<ContextRouter>,
    pub memories: LongMemoryService,
    pub users: Arc<dyn UserStore>,
    pub turns: Arc<dyn ChatTurnStore>,
    started_at: Instant,
}

impl AppState {
    pub fn new(
        router: Arc<ContextRouter>,
        memories: LongMemoryService,
        users: Arc<dyn UserStore>,
        turns: Arc<dyn ChatTurnStore>,
    ) -> Self {
        Self {
            router,
            memories,
            users,
            turns,
            started_at: Instant::now(),
        }
    }

    pub fn from_components(components: &AppComponents) -> Self {
        Self::new(
            components.router.clone(),
            components.memories.clone(),
            components.users.clone(),
            components.turns.clone(),
        )
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    /// `NotFound` unless the user exists.
    pub(crate) async fn require_user(&self, user_id: &str) -> Result<(), ApiError> {
        match self.users.get_user(user_id).await? {
            Some(_) => Ok(()),
            None => Err(ApiError::not_found(format!("user {}", user_id))),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
}

async fn health(
    axum::extract::State(state): axum::extract::State<Arc<AppState>>,
) -> axum::Json<HealthResponse> {
    axum::Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.uptime_seconds(),
    })
}

/// Create the API router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    const MEMORIES: &str = "/api/v1/users/{user_id}/memories";

    Router::new()
        .route("/health", get(health))
        // Chat
        .route("/api/v1/chat", post(chat::chat))
        .route("/api/v1/chat/history/{user_id}", get(chat::history))
        // Users
        .route("/api/v1/users", post(users::create_user).get(users::list_users))
        .route("/api/v1/users/{user_id}", get(users::get_user))
        // Long-term memories
        .route(
            MEMORIES,
            post(memories::create)
                .get(memories::recent)
                .delete(memories::delete_all),
        )
        .route(&format!("{MEMORIES}/all"), get(memories::all))
        .route(&format!("{MEMORIES}/type/{{memory_type}}"), get(memories::by_type))
        .route(&format!("{MEMORIES}/important"), get(memories::important))
        .route(&format!("{MEMORIES}/search"), get(memories::search))
        .route(&format!("{MEMORIES}/stats"), get(memories::stats))
        .route(&format!("{MEMORIES}/cleanup"), delete(memories::cleanup))
        .route(
            &format!("{MEMORIES}/{{memory_id}}"),
            get(memories::get_one)
                .patch(memories::update)
                .delete(memories::delete_one),
        )
        .route(
            &format!("{MEMORIES}/{{memory_id}}/importance"),
            patch(memories::update_importance),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the API server on the given address.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> anyhow::Result<()> {
    let router = create_router(state);

    info!(%addr, "Starting chat API server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
