//! Space (tenant) entity model and DTOs.

use finflow_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A space row from the `spaces` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Space {
    pub id: DbId,
    pub name: String,
    pub code: String,
    pub created_at: Timestamp,
}

/// DTO for registering a new space. Values are normalized by the registry
/// before insert; a missing field deserializes as empty and fails validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateSpace {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
}
