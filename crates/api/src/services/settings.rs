//! Per-space settings (tax-agent identifiers).

use chrono::Utc;
use finflow_core::error::CoreError;
use finflow_db::models::space_settings::{SpaceSettings, UpsertSpaceSettings};
use finflow_db::repositories::SpaceSettingsRepo;
use sqlx::PgPool;

use crate::error::AppResult;

/// Stored settings for `space`, or the zero-value record. Never inserts.
pub async fn get(pool: &PgPool, space: &str) -> AppResult<SpaceSettings> {
    Ok(SpaceSettingsRepo::find(pool, space)
        .await?
        .unwrap_or_else(|| SpaceSettings::empty(space)))
}

/// Create or update `space`'s settings with the provided (trimmed) fields.
pub async fn upsert(
    pool: &PgPool,
    space: &str,
    input: &UpsertSpaceSettings,
) -> AppResult<SpaceSettings> {
    if input.is_empty() {
        return Err(CoreError::Validation("Provide at least one of tain or ros_id.".into()).into());
    }
    let settings = SpaceSettingsRepo::upsert(pool, space, &input.trimmed(), Utc::now()).await?;
    tracing::info!(space, "Space settings saved");
    Ok(settings)
}
