//! Repository for the `users` table (operator credentials).

use finflow_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateCredential, Credential};

/// Public columns. `password_hash` is deliberately absent.
const COLUMNS: &str = "id, space, login, name, created_at";

/// Provides data access for credential triples.
pub struct UserRepo;

impl UserRepo {
    /// Insert a credential, returning the stored row without its hash.
    ///
    /// An identical `(space, login, password_hash)` triple violates
    /// `uq_users_space_login_password_hash`.
    pub async fn create(pool: &PgPool, input: &CreateCredential) -> Result<Credential, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (space, login, password_hash, name)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Credential>(&query)
            .bind(&input.space)
            .bind(&input.login)
            .bind(&input.password_hash)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find the credential matching the full triple.
    pub async fn find_by_triple(
        pool: &PgPool,
        space: &str,
        login: &str,
        password_hash: &str,
    ) -> Result<Option<Credential>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE space = $1 AND login = $2 AND password_hash = $3"
        );
        sqlx::query_as::<_, Credential>(&query)
            .bind(space)
            .bind(login)
            .bind(password_hash)
            .fetch_optional(pool)
            .await
    }

    /// List credentials ordered by space then login, optionally for one space.
    pub async fn list(pool: &PgPool, space: Option<&str>) -> Result<Vec<Credential>, sqlx::Error> {
        match space {
            Some(space) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM users WHERE space = $1 ORDER BY space, login, id"
                );
                sqlx::query_as::<_, Credential>(&query)
                    .bind(space)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!("SELECT {COLUMNS} FROM users ORDER BY space, login, id");
                sqlx::query_as::<_, Credential>(&query).fetch_all(pool).await
            }
        }
    }

    /// Delete a credential by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
