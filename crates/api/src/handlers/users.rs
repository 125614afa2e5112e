//! Handlers for the `/users` resource (operator credentials).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use finflow_core::error::CoreError;
use finflow_core::types::DbId;
use finflow_db::models::user::Credential;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::query::SpaceParams;
use crate::response::MessageResponse;
use crate::services::credentials;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub space: String,
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// GET /api/users?space=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<SpaceParams>,
) -> AppResult<Json<Vec<Credential>>> {
    let users = credentials::list(&state.pool, params.space.as_deref()).await?;
    Ok(Json(users))
}

/// POST /api/users
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<Credential>)> {
    let credential = credentials::add(
        &state.pool,
        &state.hasher,
        &input.space,
        &input.login,
        &input.password,
        input.name.as_deref().unwrap_or(""),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(credential)))
}

/// DELETE /api/users/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if credentials::delete(&state.pool, id).await? {
        Ok(Json(MessageResponse::new(format!("Record {id} deleted."))))
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Credential",
            id,
        }))
    }
}
