//! Per-space settings model and DTOs.

use finflow_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `space_settings` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct SpaceSettings {
    pub space: String,
    /// Tax Advisor Identification Number.
    pub tain: String,
    /// Revenue Online Service identifier.
    pub ros_id: String,
    /// `None` only for the zero-value record of a space with no saved settings.
    pub updated_at: Option<Timestamp>,
}

impl SpaceSettings {
    /// Settings for a space that has never saved any.
    pub fn empty(space: &str) -> Self {
        Self {
            space: space.to_string(),
            tain: String::new(),
            ros_id: String::new(),
            updated_at: None,
        }
    }
}

/// DTO for `PUT /spaces/{name}/settings`. Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpsertSpaceSettings {
    pub tain: Option<String>,
    pub ros_id: Option<String>,
}

impl UpsertSpaceSettings {
    pub fn is_empty(&self) -> bool {
        self.tain.is_none() && self.ros_id.is_none()
    }

    /// Copy with every provided value trimmed.
    pub fn trimmed(&self) -> Self {
        Self {
            tain: self.tain.as_deref().map(|v| v.trim().to_string()),
            ros_id: self.ros_id.as_deref().map(|v| v.trim().to_string()),
        }
    }
}
