use std::sync::Arc;

use serde::Serialize;

use finflow_core::refund::{PendingRefundCheck, RefundCheck, SimulatedRevenueCheck};

/// Secret used when `APP_SECRET` is not set. Only suitable for local
/// development: credentials hashed with it are portable to any install.
pub const DEV_APP_SECRET: &str = "finflow-dev-secret";

/// Which per-client refund check the runner plugs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RefundCheckMode {
    /// Every client reports `pending`.
    Pending,
    /// Builds the revenue request payload and reports a zero refund.
    Simulated,
}

impl RefundCheckMode {
    /// Parse a `REFUND_CHECK` value (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "simulated" => Some(Self::Simulated),
            _ => None,
        }
    }

    /// Build the check strategy for this mode.
    pub fn strategy(self) -> Arc<dyn RefundCheck> {
        match self {
            Self::Pending => Arc::new(PendingRefundCheck),
            Self::Simulated => Arc::new(SimulatedRevenueCheck),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Secret appended to passwords before hashing. Never logged.
    pub app_secret: String,
    /// Refund check strategy (default: `pending`).
    pub refund_check: RefundCheckMode,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("cors_origins", &self.cors_origins)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("app_secret", &"<redacted>")
            .field("refund_check", &self.refund_check)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `APP_SECRET`           | development secret         |
    /// | `REFUND_CHECK`         | `pending`                  |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let app_secret = match std::env::var("APP_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!("APP_SECRET is not set; using the development secret");
                DEV_APP_SECRET.to_string()
            }
        };

        let refund_check = std::env::var("REFUND_CHECK")
            .map(|v| {
                RefundCheckMode::parse(&v)
                    .expect("REFUND_CHECK must be either 'pending' or 'simulated'")
            })
            .unwrap_or(RefundCheckMode::Pending);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            app_secret,
            refund_check,
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
