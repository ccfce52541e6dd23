//! Long-term memory routes under `/api/v1/users/{user_id}/memories`.
//!
//! Every route checks that the user exists; routes addressing one memory go through
//! [`chat_router::LongMemoryService::owned`] so other users' entries read as 404.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chat_router::{DeleteOutcome, MemoryPatch, NewMemory};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use storage::{LongMemoryRecord, MemoryStats};

use super::{ApiError, AppState};

const DEFAULT_RECENT_LIMIT: i64 = 10;

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ImportantQuery {
    pub min_importance: Option<f64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CleanupQuery {
    pub days_old: Option<i64>,
    pub min_importance: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct ConfirmQuery {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Deserialize)]
pub struct ImportanceRequest {
    pub importance_score: f64,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: u64,
}

#[derive(Debug, Serialize)]
pub struct DeleteOneResponse {
    pub deleted: bool,
    pub memory_id: String,
}

type Records = Result<Json<Vec<LongMemoryRecord>>, ApiError>;

pub async fn create(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(input): Json<NewMemory>,
) -> Result<(StatusCode, Json<LongMemoryRecord>), ApiError> {
    state.require_user(&user_id).await?;
    let record = state.memories.create(&user_id, input).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn recent(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(query): Query<LimitQuery>,
) -> Records {
    state.require_user(&user_id).await?;
    let limit = query.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    Ok(Json(state.memories.recent(&user_id, limit).await?))
}

pub async fn all(State(state): State<Arc<AppState>>, Path(user_id): Path<String>) -> Records {
    state.require_user(&user_id).await?;
    Ok(Json(state.memories.all(&user_id).await?))
}

pub async fn by_type(
    State(state): State<Arc<AppState>>,
    Path((user_id, memory_type)): Path<(String, String)>,
    Query(query): Query<LimitQuery>,
) -> Records {
    state.require_user(&user_id).await?;
    Ok(Json(
        state
            .memories
            .by_type(&user_id, &memory_type, query.limit)
            .await?,
    ))
}

pub async fn important(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(query): Query<ImportantQuery>,
) -> Records {
    state.require_user(&user_id).await?;
    Ok(Json(
        state
            .memories
            .important(&user_id, query.min_importance, query.limit)
            .await?,
    ))
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(query): Query<SearchQuery>,
) -> Records {
    state.require_user(&user_id).await?;
    Ok(Json(
        state.memories.search(&user_id, &query.q, query.limit).await?,
    ))
}

pub async fn stats(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<MemoryStats>, ApiError> {
    state.require_user(&user_id).await?;
    Ok(Json(state.memories.stats(&user_id).await?))
}

pub async fn get_one(
    State(state): State<Arc<AppState>>,
    Path((user_id, memory_id)): Path<(String, String)>,
) -> Result<Json<LongMemoryRecord>, ApiError> {
    state.require_user(&user_id).await?;
    Ok(Json(state.memories.get(&user_id, &memory_id).await?))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path((user_id, memory_id)): Path<(String, String)>,
    Json(patch): Json<MemoryPatch>,
) -> Result<Json<LongMemoryRecord>, ApiError> {
    state.require_user(&user_id).await?;
    Ok(Json(state.memories.update(&user_id, &memory_id, patch).await?))
}

pub async fn update_importance(
    State(state): State<Arc<AppState>>,
    Path((user_id, memory_id)): Path<(String, String)>,
    Json(request): Json<ImportanceRequest>,
) -> Result<Json<LongMemoryRecord>, ApiError> {
    state.require_user(&user_id).await?;
    Ok(Json(
        state
            .memories
            .update_importance(&user_id, &memory_id, request.importance_score)
            .await?,
    ))
}

pub async fn delete_one(
    State(state): State<Arc<AppState>>,
    Path((user_id, memory_id)): Path<(String, String)>,
) -> Result<Json<DeleteOneResponse>, ApiError> {
    state.require_user(&user_id).await?;
    match state.memories.delete(&user_id, &memory_id).await? {
        DeleteOutcome::Deleted => Ok(Json(DeleteOneResponse {
            deleted: true,
            memory_id,
        })),
        DeleteOutcome::NotFound => Err(ApiError::not_found(format!("memory {}", memory_id))),
    }
}

pub async fn cleanup(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(query): Query<CleanupQuery>,
) -> Result<Json<DeletedResponse>, ApiError> {
    state.require_user(&user_id).await?;
    let deleted = state
        .memories
        .delete_old(&user_id, query.days_old, query.min_importance)
        .await?;
    Ok(Json(DeletedResponse { deleted }))
}

pub async fn delete_all(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(query): Query<ConfirmQuery>,
) -> Result<Json<DeletedResponse>, ApiError> {
    state.require_user(&user_id).await?;
    let deleted = state.memories.delete_all(&user_id, query.confirm).await?;
    Ok(Json(DeletedResponse { deleted }))
}
