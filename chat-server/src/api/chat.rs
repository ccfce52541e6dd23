//! Chat endpoint and turn history.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chat_core::ChatResult;
use serde::Deserialize;
use std::sync::Arc;
use storage::ChatTurn;
use tracing::info;

use super::{ApiError, AppState};

const DEFAULT_HISTORY_LIMIT: i64 = 20;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub user_id: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<i64>,
}

/// `POST /api/v1/chat`: always answers with `{answer, context, path}` once the input is valid.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResult>, ApiError> {
    info!(
        user_id = %request.user_id,
        message_preview = %request.message.chars().take(50).collect::<String>(),
        "Received chat message"
    );
    if request.user_id.trim().is_empty() || request.message.trim().is_empty() {
        return Err(ApiError::validation("user_id and message are required"));
    }
    state.require_user(&request.user_id).await?;

    let result = state.router.respond(&request.user_id, &request.message).await?;
    Ok(Json(result))
}

/// `GET /api/v1/chat/history/{user_id}`: most recent turns first.
pub async fn history(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<ChatTurn>>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    if limit <= 0 {
        return Err(ApiError::validation("limit must be greater than 0"));
    }
    state.require_user(&user_id).await?;
    Ok(Json(state.turns.recent_turns(&user_id, limit).await?))
}
