//! Domain logic for the FinFlow backend.
//!
//! Everything in this crate is storage- and transport-agnostic: tenant
//! naming rules, record-number derivation, credential hashing, the client
//! CSV codec and the refund-check pipeline.

pub mod client_csv;
pub mod credentials;
pub mod error;
pub mod identity;
pub mod refund;
pub mod space;
pub mod types;
