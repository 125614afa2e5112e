//! Handler for credential-triple login.

use axum::extract::State;
use axum::Json;
use finflow_core::error::CoreError;
use finflow_core::types::DbId;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::services::credentials;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub space: String,
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginUser {
    pub id: DbId,
    pub space: String,
    pub login: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub user: LoginUser,
}

/// POST /api/login
///
/// Matches the full `(space, login, password)` triple. Any mismatch gets
/// the same 401 so callers cannot tell which field was wrong.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    if [&input.space, &input.login, &input.password]
        .iter()
        .any(|v| v.trim().is_empty())
    {
        return Err(AppError::BadRequest(
            "All fields (space, login, password) are required.".into(),
        ));
    }

    let credential = credentials::authenticate(
        &state.pool,
        &state.hasher,
        &input.space,
        &input.login,
        &input.password,
    )
    .await?
    .ok_or_else(|| {
        tracing::info!(space = %input.space.trim(), "Login rejected");
        AppError::Core(CoreError::Unauthorized(
            "Invalid space, login, or password.".into(),
        ))
    })?;

    tracing::info!(credential_id = credential.id, space = %credential.space, "Login succeeded");
    Ok(Json(LoginResponse {
        success: true,
        message: format!("Welcome, {}!", credential.login),
        user: LoginUser {
            id: credential.id,
            space: credential.space,
            login: credential.login,
            name: credential.name,
        },
    }))
}
