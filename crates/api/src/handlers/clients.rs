//! Handlers for the `/clients` resource.
//!
//! Every endpoint resolves the space first: an unregistered space is a 404
//! before any client lookup happens.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use finflow_core::client_csv::export_filename;
use finflow_core::error::CoreError;
use finflow_core::types::DbId;
use finflow_db::models::client::{ClientPatch, ClientResponse};
use finflow_db::repositories::ClientRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::query::SpaceParams;
use crate::response::MessageResponse;
use crate::services::clients::{self, ImportSummary};
use crate::services::spaces;
use crate::state::AppState;

/// Accepted upload extension for client imports.
const IMPORT_EXTENSION: &str = "csv";

/// Body of `POST /clients` and `PUT /clients/{id}`: the owning space plus
/// whitelisted client fields. Other keys are dropped.
#[derive(Debug, Deserialize)]
pub struct ClientBody {
    #[serde(default)]
    pub space: String,
    #[serde(flatten)]
    pub fields: ClientPatch,
}

fn client_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Client",
        id,
    })
}

/// GET /api/clients?space=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<SpaceParams>,
) -> AppResult<Json<Vec<ClientResponse>>> {
    let space = spaces::require(&state.pool, params.raw()).await?;
    let clients = ClientRepo::list(&state.pool, &space).await?;
    Ok(Json(clients.into_iter().map(ClientResponse::from).collect()))
}

/// POST /api/clients
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<ClientBody>,
) -> AppResult<(StatusCode, Json<ClientResponse>)> {
    let space = spaces::require(&state.pool, &input.space).await?;
    let client = clients::add(&state.pool, &space, &input.fields).await?;
    Ok((StatusCode::CREATED, Json(client.into())))
}

/// GET /api/clients/{id}?space=
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<SpaceParams>,
) -> AppResult<Json<ClientResponse>> {
    let space = spaces::require(&state.pool, params.raw()).await?;
    let client = ClientRepo::find_by_id(&state.pool, id, &space)
        .await?
        .ok_or_else(|| client_not_found(id))?;
    Ok(Json(client.into()))
}

/// PUT /api/clients/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ClientBody>,
) -> AppResult<Json<ClientResponse>> {
    let space = spaces::require(&state.pool, &input.space).await?;
    let client = clients::update(&state.pool, id, &space, &input.fields)
        .await?
        .ok_or_else(|| client_not_found(id))?;
    Ok(Json(client.into()))
}

/// DELETE /api/clients/{id}?space=
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<SpaceParams>,
) -> AppResult<Json<MessageResponse>> {
    let space = spaces::require(&state.pool, params.raw()).await?;
    if ClientRepo::delete(&state.pool, id, &space).await? {
        tracing::info!(client_id = id, space = %space, "Client deleted");
        Ok(Json(MessageResponse::new(format!("Client {id} deleted."))))
    } else {
        Err(client_not_found(id))
    }
}

/// GET /api/clients/export.csv?space=
///
/// Spreadsheet-friendly download of every client in the space.
pub async fn export_csv(
    State(state): State<AppState>,
    Query(params): Query<SpaceParams>,
) -> AppResult<impl IntoResponse> {
    let space = spaces::require(&state.pool, params.raw()).await?;
    let csv = clients::export_csv(&state.pool, &space).await?;

    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export_filename(&space)),
            ),
        ],
        csv,
    ))
}

/// POST /api/clients/import.csv?space=
///
/// Accepts a multipart form with a required `file` field holding a `.csv`
/// upload. Other fields are ignored.
pub async fn import_csv(
    State(state): State<AppState>,
    Query(params): Query<SpaceParams>,
    mut multipart: Multipart,
) -> AppResult<Json<ImportSummary>> {
    let space = spaces::require(&state.pool, params.raw()).await?;
    let mut file_data: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        file_data = Some((filename, data.to_vec()));
    }

    let (filename, data) =
        file_data.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;

    if !has_import_extension(&filename) {
        return Err(AppError::BadRequest(
            "Only .csv files are accepted.".into(),
        ));
    }

    let summary = clients::import_csv(&state.pool, &space, &data).await?;
    Ok(Json(summary))
}

fn has_import_extension(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case(IMPORT_EXTENSION))
}
