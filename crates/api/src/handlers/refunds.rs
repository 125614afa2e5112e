//! Handlers for the refund-check process.

use axum::extract::State;
use axum::Json;
use finflow_core::error::CoreError;
use finflow_core::refund::RefundResult;
use finflow_core::types::DbId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppResult;
use crate::services::spaces;
use crate::state::AppState;

/// Ids arrive as raw JSON values so a non-integer entry is reported as a
/// 400 with the offending value rather than a generic body rejection.
#[derive(Debug, Deserialize)]
pub struct RunRefundsRequest {
    #[serde(default)]
    pub space: String,
    #[serde(default)]
    pub client_ids: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct CheckRefundRequest {
    #[serde(default)]
    pub space: String,
    #[serde(default)]
    pub client_id: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct RefundRunResponse {
    pub results: Vec<RefundResult>,
}

/// Validate a `client_ids` value: a non-empty array of integers.
fn parse_client_ids(value: Option<&Value>) -> Result<Vec<DbId>, CoreError> {
    let items = match value {
        Some(Value::Array(items)) if !items.is_empty() => items,
        _ => {
            return Err(CoreError::Validation(
                "client_ids must be a non-empty list.".into(),
            ))
        }
    };
    items.iter().map(parse_client_id).collect()
}

fn parse_client_id(value: &Value) -> Result<DbId, CoreError> {
    value
        .as_i64()
        .ok_or_else(|| CoreError::Validation(format!("Invalid client id: {value}")))
}

/// POST /api/processes/refunds
///
/// Runs the refund check over every listed client, in order. Per-client
/// failures come back as `error` results; the request itself succeeds.
pub async fn run(
    State(state): State<AppState>,
    Json(input): Json<RunRefundsRequest>,
) -> AppResult<Json<RefundRunResponse>> {
    let client_ids = parse_client_ids(input.client_ids.as_ref())?;
    let space = spaces::require(&state.pool, &input.space).await?;

    let results = state.refunds.run(&client_ids, &space).await;
    Ok(Json(RefundRunResponse { results }))
}

/// POST /api/processes/refunds/check
///
/// Checks one client after confirming the space has a TAIN and the client
/// has a PPS number.
pub async fn check(
    State(state): State<AppState>,
    Json(input): Json<CheckRefundRequest>,
) -> AppResult<Json<RefundResult>> {
    let client_id = match input.client_id.as_ref() {
        Some(value) => parse_client_id(value)?,
        None => return Err(CoreError::Validation("client_id is required.".into()).into()),
    };
    let space = spaces::require(&state.pool, &input.space).await?;

    Ok(Json(state.refunds.check_client(client_id, &space).await))
}
