use axum::routing::post;
use axum::Router;

use crate::handlers::refunds;
use crate::state::AppState;

/// Routes mounted at `/processes`.
///
/// ```text
/// POST   /refunds         -> run
/// POST   /refunds/check   -> check
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/refunds", post(refunds::run))
        .route("/refunds/check", post(refunds::check))
}
