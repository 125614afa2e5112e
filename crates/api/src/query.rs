//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// `?space=` selector used by tenant-scoped endpoints.
#[derive(Debug, Deserialize)]
pub struct SpaceParams {
    pub space: Option<String>,
}

impl SpaceParams {
    /// The raw `space` value, or `""` when absent.
    pub fn raw(&self) -> &str {
        self.space.as_deref().unwrap_or("")
    }
}
