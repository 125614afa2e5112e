//! Liveness check for load balancers and operators, mounted at `/health`
//! outside the `/api` tree.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::config::RefundCheckMode;
use crate::state::AppState;

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseState {
    Up,
    Down,
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    /// `ok` when the record store answers, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub database: DatabaseState,
    /// Refund check strategy this instance runs with.
    pub refund_check: RefundCheckMode,
}

impl HealthReport {
    fn new(database: DatabaseState, refund_check: RefundCheckMode) -> Self {
        let status = match database {
            DatabaseState::Up => "ok",
            DatabaseState::Down => "degraded",
        };
        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            database,
            refund_check,
        }
    }

    /// 503 while the record store is unreachable so a balancer can drain the
    /// instance.
    fn status_code(&self) -> StatusCode {
        match self.database {
            DatabaseState::Up => StatusCode::OK,
            DatabaseState::Down => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let database = match finflow_db::health_check(&state.pool).await {
        Ok(()) => DatabaseState::Up,
        Err(err) => {
            tracing::warn!(error = %err, "Health check could not reach the database");
            DatabaseState::Down
        }
    };

    let report = HealthReport::new(database, state.config.refund_check);
    (report.status_code(), Json(report))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_database_is_degraded_and_unavailable() {
        let report = HealthReport::new(DatabaseState::Down, RefundCheckMode::Pending);
        assert_eq!(report.status, "degraded");
        assert_eq!(report.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn report_serializes_lowercase_states() {
        let report = HealthReport::new(DatabaseState::Up, RefundCheckMode::Simulated);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["database"], "up");
        assert_eq!(json["refund_check"], "simulated");
    }
}
