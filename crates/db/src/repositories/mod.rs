//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Tenant-scoped tables take
//! the (already normalized) space name on every read, update and delete.

pub mod client_repo;
pub mod space_repo;
pub mod space_settings_repo;
pub mod user_repo;

pub use client_repo::ClientRepo;
pub use space_repo::SpaceRepo;
pub use space_settings_repo::SpaceSettingsRepo;
pub use user_repo::UserRepo;
