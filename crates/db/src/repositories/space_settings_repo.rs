//! Repository for the `space_settings` table.

use finflow_core::types::Timestamp;
use sqlx::PgPool;

use crate::models::space_settings::{SpaceSettings, UpsertSpaceSettings};

/// Column list for `space_settings` queries.
const COLUMNS: &str = "space, tain, ros_id, updated_at";

/// Provides data access for per-space settings.
pub struct SpaceSettingsRepo;

impl SpaceSettingsRepo {
    /// Get the settings row for a space.
    ///
    /// Returns `None` if the space has never saved settings.
    pub async fn find(pool: &PgPool, space: &str) -> Result<Option<SpaceSettings>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM space_settings WHERE space = $1");
        sqlx::query_as::<_, SpaceSettings>(&query)
            .bind(space)
            .fetch_optional(pool)
            .await
    }

    /// Insert or update a space's settings in one statement.
    ///
    /// Uses `ON CONFLICT (space) DO UPDATE` so only provided fields are
    /// changed (falls back to existing values via `COALESCE`). `updated_at`
    /// is always set to `now`.
    pub async fn upsert(
        pool: &PgPool,
        space: &str,
        dto: &UpsertSpaceSettings,
        now: Timestamp,
    ) -> Result<SpaceSettings, sqlx::Error> {
        let query = format!(
            "INSERT INTO space_settings (space, tain, ros_id, updated_at) \
             VALUES ($1, COALESCE($2, ''), COALESCE($3, ''), $4) \
             ON CONFLICT (space) DO UPDATE SET \
                 tain = COALESCE($2, space_settings.tain), \
                 ros_id = COALESCE($3, space_settings.ros_id), \
                 updated_at = $4 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SpaceSettings>(&query)
            .bind(space)
            .bind(&dto.tain)
            .bind(&dto.ros_id)
            .bind(now)
            .fetch_one(pool)
            .await
    }
}
