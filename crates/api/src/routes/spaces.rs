use axum::routing::get;
use axum::Router;

use crate::handlers::spaces;
use crate::state::AppState;

/// Routes mounted at `/spaces`.
///
/// ```text
/// GET    /                  -> list
/// POST   /                  -> create
/// GET    /{name}            -> get_by_name
/// DELETE /{name}            -> delete
/// GET    /{name}/settings   -> get_settings
/// PUT    /{name}/settings   -> put_settings
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(spaces::list).post(spaces::create))
        .route("/{name}", get(spaces::get_by_name).delete(spaces::delete))
        .route(
            "/{name}/settings",
            get(spaces::get_settings).put(spaces::put_settings),
        )
}
