use axum::routing::{get, post};
use axum::Router;

use crate::handlers::clients;
use crate::state::AppState;

/// Routes mounted at `/clients`. The static CSV paths take precedence over
/// `/{id}`.
///
/// ```text
/// GET    /              -> list (?space=)
/// POST   /              -> create
/// GET    /export.csv    -> export_csv (?space=)
/// POST   /import.csv    -> import_csv (?space=, multipart)
/// GET    /{id}          -> get_by_id (?space=)
/// PUT    /{id}          -> update
/// DELETE /{id}          -> delete (?space=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(clients::list).post(clients::create))
        .route("/export.csv", get(clients::export_csv))
        .route("/import.csv", post(clients::import_csv))
        .route(
            "/{id}",
            get(clients::get_by_id)
                .put(clients::update)
                .delete(clients::delete),
        )
}
