use std::sync::Arc;

use finflow_core::credentials::CredentialHasher;
use finflow_core::refund::RefundRunner;
use finflow_db::refund_source::PgRefundSource;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: finflow_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Password hasher keyed with the configured secret.
    pub hasher: CredentialHasher,
    /// Refund-check runner wired to the database and the configured check.
    pub refunds: RefundRunner,
}

impl AppState {
    pub fn new(pool: finflow_db::DbPool, config: ServerConfig) -> Self {
        let hasher = CredentialHasher::new(config.app_secret.clone());
        let refunds = RefundRunner::new(
            Arc::new(PgRefundSource::new(pool.clone())),
            config.refund_check.strategy(),
        );
        Self {
            pool,
            config: Arc::new(config),
            hasher,
            refunds,
        }
    }
}
