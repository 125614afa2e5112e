//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create or patch DTO for writes
//! - Where the row holds secrets or derived fields, a `Serialize` response type

pub mod client;
pub mod space;
pub mod space_settings;
pub mod user;
