//! PostgreSQL-backed [`RefundDataSource`].

use async_trait::async_trait;
use finflow_core::error::CoreError;
use finflow_core::refund::{RefundClient, RefundDataSource};
use finflow_core::types::DbId;

use crate::repositories::{ClientRepo, SpaceSettingsRepo};
use crate::DbPool;

/// Reads refund-run inputs through the client and settings repositories.
#[derive(Clone)]
pub struct PgRefundSource {
    pool: DbPool,
}

impl PgRefundSource {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn store_error(err: sqlx::Error) -> CoreError {
    CoreError::Internal(format!("Record store error: {err}"))
}

#[async_trait]
impl RefundDataSource for PgRefundSource {
    async fn find_client(
        &self,
        client_id: DbId,
        space: &str,
    ) -> Result<Option<RefundClient>, CoreError> {
        let client = ClientRepo::find_by_id(&self.pool, client_id, space)
            .await
            .map_err(store_error)?;

        Ok(client.map(|c| RefundClient {
            id: c.id,
            space: c.space,
            name: c.name,
            pps_number: c.pps_number,
        }))
    }

    async fn agent_tain(&self, space: &str) -> Result<Option<String>, CoreError> {
        let settings = SpaceSettingsRepo::find(&self.pool, space)
            .await
            .map_err(store_error)?;
        Ok(settings.map(|s| s.tain))
    }
}
