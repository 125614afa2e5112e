//! Repository for the `spaces` table.

use sqlx::PgPool;

use crate::models::space::Space;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, code, created_at";

/// Provides CRUD operations for spaces. Names and codes passed in must
/// already be normalized.
pub struct SpaceRepo;

impl SpaceRepo {
    /// Insert a new space, returning the created row.
    pub async fn create(pool: &PgPool, name: &str, code: &str) -> Result<Space, sqlx::Error> {
        let query = format!("INSERT INTO spaces (name, code) VALUES ($1, $2) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Space>(&query)
            .bind(name)
            .bind(code)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Space>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM spaces WHERE name = $1");
        sqlx::query_as::<_, Space>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<Space>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM spaces WHERE code = $1");
        sqlx::query_as::<_, Space>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, name: &str) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM spaces WHERE name = $1)")
            .bind(name)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// List all spaces ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Space>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM spaces ORDER BY name");
        sqlx::query_as::<_, Space>(&query).fetch_all(pool).await
    }

    /// Delete a space by name. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, name: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM spaces WHERE name = $1")
            .bind(name)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
