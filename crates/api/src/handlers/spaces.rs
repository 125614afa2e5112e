//! Handlers for the `/spaces` resource and per-space settings.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use finflow_core::space::normalize_space_name;
use finflow_db::models::space::{CreateSpace, Space};
use finflow_db::models::space_settings::{SpaceSettings, UpsertSpaceSettings};

use crate::error::{space_not_found, AppResult};
use crate::response::MessageResponse;
use crate::services::{settings, spaces};
use crate::state::AppState;

/// GET /api/spaces
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Space>>> {
    Ok(Json(spaces::list(&state.pool).await?))
}

/// POST /api/spaces
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateSpace>,
) -> AppResult<(StatusCode, Json<Space>)> {
    let space = spaces::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(space)))
}

/// GET /api/spaces/{name}
pub async fn get_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<Space>> {
    let space = spaces::get(&state.pool, &name)
        .await?
        .ok_or_else(|| space_not_found(&name))?;
    Ok(Json(space))
}

/// DELETE /api/spaces/{name}
///
/// Removes the registry entry only; records already filed under the space
/// are left in place.
pub async fn delete(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    if spaces::delete(&state.pool, &name).await? {
        Ok(Json(MessageResponse::new(format!(
            "Space '{}' deleted.",
            normalize_space_name(&name)
        ))))
    } else {
        Err(space_not_found(&name))
    }
}

/// GET /api/spaces/{name}/settings
pub async fn get_settings(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<SpaceSettings>> {
    let space = spaces::require(&state.pool, &name).await?;
    Ok(Json(settings::get(&state.pool, &space).await?))
}

/// PUT /api/spaces/{name}/settings
pub async fn put_settings(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(input): Json<UpsertSpaceSettings>,
) -> AppResult<Json<SpaceSettings>> {
    let space = spaces::require(&state.pool, &name).await?;
    Ok(Json(settings::upsert(&state.pool, &space, &input).await?))
}
