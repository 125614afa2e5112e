pub mod auth;
pub mod clients;
pub mod refunds;
pub mod spaces;
pub mod users;
