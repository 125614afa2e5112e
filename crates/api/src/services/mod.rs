//! Domain operations shared by the HTTP handlers.
//!
//! Each service is a set of free functions over `&PgPool` that validate and
//! normalize input, enforce the space boundary and call the repositories.
//! Handlers stay thin adapters between HTTP shapes and these functions.

pub mod clients;
pub mod credentials;
pub mod settings;
pub mod spaces;
