//! Credential (operator login) model and DTOs.

use finflow_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Credential record without its password hash.
///
/// The `users` table also holds `password_hash`; no query feeding an API
/// response ever selects it.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Credential {
    pub id: DbId,
    pub space: String,
    pub login: String,
    pub name: String,
    pub created_at: Timestamp,
}

/// DTO for inserting a credential. `space` and `login` must already be
/// normalized and `password_hash` computed.
#[derive(Debug, Clone)]
pub struct CreateCredential {
    pub space: String,
    pub login: String,
    pub password_hash: String,
    pub name: String,
}
