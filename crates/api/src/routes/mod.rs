pub mod auth;
pub mod clients;
pub mod health;
pub mod processes;
pub mod spaces;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /login                                 credential-triple login (POST)
///
/// /users                                 list, create
/// /users/{id}                            delete
///
/// /spaces                                list, create
/// /spaces/{name}                         get, delete
/// /spaces/{name}/settings                get, upsert (PUT)
///
/// /clients                               list, create (space-scoped)
/// /clients/export.csv                    CSV export (GET)
/// /clients/import.csv                    CSV import (POST, multipart)
/// /clients/{id}                          get, update, delete
///
/// /processes/refunds                     batch refund check (POST)
/// /processes/refunds/check               single-client refund check (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/users", users::router())
        .nest("/spaces", spaces::router())
        .nest("/clients", clients::router())
        .nest("/processes", processes::router())
}
