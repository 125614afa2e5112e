//! Refund-check pipeline.
//!
//! [`RefundRunner`] walks an ordered list of client ids for one space and
//! produces exactly one [`RefundResult`] per id, in input order. Each item
//! is looked up, checked through a pluggable [`RefundCheck`] strategy and
//! assembled into a fixed-schema result. A failure on one item becomes an
//! `error` result for that item only; the batch itself never fails.
//!
//! Items are processed strictly sequentially. A panic inside a check or a
//! data source is caught per item and reported like any other failure.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::CoreError;
use crate::identity::finflow_number;
use crate::types::{DbId, Timestamp};

/// Placeholder shown for identity fields of a client that could not be read.
pub const MISSING_FIELD: &str = "—";

/// Message returned by [`PendingRefundCheck`].
pub const PENDING_MESSAGE: &str = "Refund check not yet implemented.";

/// Reported when a client has a blank PPS number.
pub const NO_PPS_MESSAGE: &str = "Client has no PPS number.";

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Terminal state of one refund-check item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefundStatus {
    Success,
    Error,
    Pending,
    NoData,
}

/// What a [`RefundCheck`] reports for a single client.
#[derive(Debug, Clone, PartialEq)]
pub struct RefundOutcome {
    pub status: RefundStatus,
    pub message: String,
    /// Check-specific payload. Always a JSON object.
    pub detail: Map<String, Value>,
}

impl RefundOutcome {
    /// `error` outcome with an empty detail object.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: RefundStatus::Error,
            message: message.into(),
            detail: Map::new(),
        }
    }
}

/// One entry of a refund-check run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefundResult {
    pub client_id: DbId,
    pub finflow_number: String,
    pub name: String,
    pub pps_number: String,
    pub status: RefundStatus,
    pub message: String,
    pub detail: Map<String, Value>,
    pub ran_at: Timestamp,
}

impl RefundResult {
    /// Error result for an id whose client record could not be read.
    fn unresolved(client_id: DbId, message: String) -> Self {
        Self {
            client_id,
            finflow_number: MISSING_FIELD.to_string(),
            name: format!("(ID {client_id})"),
            pps_number: MISSING_FIELD.to_string(),
            status: RefundStatus::Error,
            message,
            detail: Map::new(),
            ran_at: Utc::now(),
        }
    }

    /// Combine a client's identity fields with a check outcome.
    fn assemble(client: &RefundClient, outcome: RefundOutcome) -> Self {
        Self {
            client_id: client.id,
            finflow_number: client.finflow_number(),
            name: client.name.clone(),
            pps_number: display_or_missing(client.pps_number.trim()),
            status: outcome.status,
            message: outcome.message,
            detail: outcome.detail,
            ran_at: Utc::now(),
        }
    }
}

fn display_or_missing(value: &str) -> String {
    if value.is_empty() {
        MISSING_FIELD.to_string()
    } else {
        value.to_string()
    }
}

// ---------------------------------------------------------------------------
// Collaborators
// ---------------------------------------------------------------------------

/// The slice of a client record the pipeline needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefundClient {
    pub id: DbId,
    pub space: String,
    pub name: String,
    pub pps_number: String,
}

impl RefundClient {
    pub fn finflow_number(&self) -> String {
        finflow_number(self.id, &self.space)
    }
}

/// Everything a check gets to look at for one client.
#[derive(Debug, Clone)]
pub struct RefundCheckRequest<'a> {
    pub client: &'a RefundClient,
    /// The space's tax-agent identification number, when it has been looked up.
    pub agent_tain: Option<&'a str>,
}

/// Per-client refund check strategy.
///
/// Implementations may call out to external services; any error they return
/// is turned into an `error` result by the runner.
#[async_trait]
pub trait RefundCheck: Send + Sync {
    async fn check(&self, request: RefundCheckRequest<'_>) -> Result<RefundOutcome, CoreError>;
}

/// Record-store access used by the runner.
#[async_trait]
pub trait RefundDataSource: Send + Sync {
    /// Fetch a client by id, scoped to `space`. A client in another space is
    /// reported as `None`.
    async fn find_client(
        &self,
        client_id: DbId,
        space: &str,
    ) -> Result<Option<RefundClient>, CoreError>;

    /// The space's configured TAIN, `None` when settings were never saved.
    async fn agent_tain(&self, space: &str) -> Result<Option<String>, CoreError>;
}

// ---------------------------------------------------------------------------
// Check strategies
// ---------------------------------------------------------------------------

/// Default check: reports every client as `pending` with no detail.
#[derive(Debug, Default, Clone, Copy)]
pub struct PendingRefundCheck;

#[async_trait]
impl RefundCheck for PendingRefundCheck {
    async fn check(&self, _request: RefundCheckRequest<'_>) -> Result<RefundOutcome, CoreError> {
        Ok(RefundOutcome {
            status: RefundStatus::Pending,
            message: PENDING_MESSAGE.to_string(),
            detail: Map::new(),
        })
    }
}

/// Offline stand-in for the Revenue refund lookup.
///
/// Builds the request payload the real integration would send and reports
/// success with a zero refund, echoing the payload under `payload_sent`.
/// A request without a TAIN or without a PPS number is an `error` outcome;
/// no payload is built for it.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimulatedRevenueCheck;

impl SimulatedRevenueCheck {
    /// Request body for a PAYE refund lookup in the current tax year.
    pub fn payload(pps_number: &str, agent_tain: &str, tax_year: i32) -> Value {
        let pps = pps_number.trim();
        json!({
            "clientPPS": pps,
            "taxType": "PAYE",
            "taxYear": tax_year,
            "clientRegistrationRef": pps,
            "agentTAIN": agent_tain,
        })
    }
}

#[async_trait]
impl RefundCheck for SimulatedRevenueCheck {
    async fn check(&self, request: RefundCheckRequest<'_>) -> Result<RefundOutcome, CoreError> {
        let Some(agent_tain) = request.agent_tain.map(str::trim).filter(|t| !t.is_empty())
        else {
            return Ok(RefundOutcome::error(
                "No TAIN configured for this space. Please update Space Setup.",
            ));
        };
        if request.client.pps_number.trim().is_empty() {
            return Ok(RefundOutcome::error(NO_PPS_MESSAGE));
        }

        let tax_year = Utc::now().year();
        let payload = Self::payload(&request.client.pps_number, agent_tain, tax_year);

        let mut detail = Map::new();
        detail.insert("payload_sent".into(), payload);
        detail.insert("refund_amount".into(), json!("€0.00"));
        detail.insert("tax_year".into(), json!(tax_year));

        Ok(RefundOutcome {
            status: RefundStatus::Success,
            message: "Simulated refund check completed.".to_string(),
            detail,
        })
    }
}

// ---------------------------------------------------------------------------
// Runner
// ---------------------------------------------------------------------------

/// Sequential, order-preserving refund-check runner.
#[derive(Clone)]
pub struct RefundRunner {
    source: Arc<dyn RefundDataSource>,
    check: Arc<dyn RefundCheck>,
}

impl RefundRunner {
    pub fn new(source: Arc<dyn RefundDataSource>, check: Arc<dyn RefundCheck>) -> Self {
        Self { source, check }
    }

    /// Run the check over `client_ids` in `space`.
    ///
    /// Returns one result per input id, in input order. Repeated ids are
    /// processed again; an empty list yields an empty result. The space's
    /// TAIN is looked up once and handed to every check but not enforced.
    pub async fn run(&self, client_ids: &[DbId], space: &str) -> Vec<RefundResult> {
        tracing::info!(space, count = client_ids.len(), "Starting refund run");

        let agent_tain = if client_ids.is_empty() {
            None
        } else {
            self.batch_tain(space).await
        };

        let mut results = Vec::with_capacity(client_ids.len());
        for &client_id in client_ids {
            let mode = Mode::Batch {
                agent_tain: agent_tain.as_deref(),
            };
            results.push(self.run_guarded(client_id, space, mode).await);
        }

        let errors = results
            .iter()
            .filter(|r| r.status == RefundStatus::Error)
            .count();
        tracing::info!(space, count = results.len(), errors, "Refund run finished");
        results
    }

    /// Check a single client, first verifying that the space has a TAIN
    /// configured and the client has a PPS number.
    pub async fn check_client(&self, client_id: DbId, space: &str) -> RefundResult {
        self.run_guarded(client_id, space, Mode::Single).await
    }

    /// TAIN shared by every item of a batch. A failed lookup is logged and
    /// the batch carries on without one.
    async fn batch_tain(&self, space: &str) -> Option<String> {
        match AssertUnwindSafe(self.source.agent_tain(space))
            .catch_unwind()
            .await
        {
            Ok(Ok(tain)) => tain.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()),
            Ok(Err(err)) => {
                tracing::warn!(space, error = %err, "TAIN lookup failed for refund run");
                None
            }
            Err(panic) => {
                tracing::error!(space, reason = %panic_reason(&*panic), "TAIN lookup panicked");
                None
            }
        }
    }

    async fn run_guarded(&self, client_id: DbId, space: &str, mode: Mode<'_>) -> RefundResult {
        match AssertUnwindSafe(self.run_item(client_id, space, mode))
            .catch_unwind()
            .await
        {
            Ok(result) => result,
            Err(panic) => {
                let reason = panic_reason(&*panic);
                tracing::error!(client_id, space, reason = %reason, "Refund check panicked");
                RefundResult::unresolved(
                    client_id,
                    format!("Refund check for client {client_id} panicked: {reason}"),
                )
            }
        }
    }

    async fn run_item(&self, client_id: DbId, space: &str, mode: Mode<'_>) -> RefundResult {
        let client = match self.source.find_client(client_id, space).await {
            Ok(Some(client)) => client,
            Ok(None) => {
                return RefundResult::unresolved(
                    client_id,
                    format!("Client ID {client_id} not found in space '{space}'."),
                );
            }
            Err(err) => {
                tracing::warn!(client_id, space, error = %err, "Refund client lookup failed");
                return RefundResult::unresolved(client_id, err.to_string());
            }
        };

        match self.check_resolved(&client, space, mode).await {
            Ok(outcome) => RefundResult::assemble(&client, outcome),
            Err(err) => {
                tracing::warn!(client_id, space, error = %err, "Refund check failed");
                RefundResult::assemble(&client, RefundOutcome::error(err.to_string()))
            }
        }
    }

    async fn check_resolved(
        &self,
        client: &RefundClient,
        space: &str,
        mode: Mode<'_>,
    ) -> Result<RefundOutcome, CoreError> {
        let agent_tain = match mode {
            Mode::Batch { agent_tain } => agent_tain.map(str::to_string),
            Mode::Single => {
                let tain = self
                    .source
                    .agent_tain(space)
                    .await?
                    .map(|t| t.trim().to_string())
                    .unwrap_or_default();
                if tain.is_empty() {
                    return Ok(RefundOutcome::error(format!(
                        "No TAIN configured for space '{space}'. Please update Space Setup."
                    )));
                }
                if client.pps_number.trim().is_empty() {
                    return Ok(RefundOutcome::error(NO_PPS_MESSAGE));
                }
                Some(tain)
            }
        };

        self.check
            .check(RefundCheckRequest {
                client,
                agent_tain: agent_tain.as_deref(),
            })
            .await
    }
}

/// How an item is checked.
#[derive(Debug, Clone, Copy)]
enum Mode<'a> {
    /// Part of a batch: the TAIN was fetched up front and nothing is enforced.
    Batch { agent_tain: Option<&'a str> },
    /// Single-client check: TAIN and PPS number are required.
    Single,
}

fn panic_reason(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
