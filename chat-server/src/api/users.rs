//! User registration and lookup.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use storage::UserRecord;

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserRecord>), ApiError> {
    let name = request.name.trim();
    let email = request.email.trim();
    if name.is_empty() {
        return Err(ApiError::validation("name must not be empty"));
    }
    if !email.contains('@') {
        return Err(ApiError::validation("email must be a valid address"));
    }
    let user = UserRecord::new(name, email);
    state.users.create_user(&user).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserRecord>>, ApiError> {
    Ok(Json(state.users.list_users().await?))
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<UserRecord>, ApiError> {
    state
        .users
        .get_user(&user_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("user {}", user_id)))
}
