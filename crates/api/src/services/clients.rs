//! Client records: CRUD plus CSV export and bulk import.

use finflow_core::client_csv::{build_export_csv, parse_import_csv};
use finflow_core::error::CoreError;
use finflow_core::types::DbId;
use finflow_db::models::client::{Client, ClientPatch};
use finflow_db::repositories::ClientRepo;
use serde::Serialize;
use sqlx::PgPool;

use crate::error::AppResult;

/// Insert a client into an already verified space. `name` is required.
pub async fn add(pool: &PgPool, space: &str, input: &ClientPatch) -> AppResult<Client> {
    let input = input.trimmed();
    if input.name.as_deref().unwrap_or("").is_empty() {
        return Err(CoreError::Validation("Client name is required.".into()).into());
    }
    let client = ClientRepo::create(pool, space, &input).await?;
    tracing::info!(client_id = client.id, space, "Client created");
    Ok(client)
}

/// Apply a partial update. An explicitly empty `name` is rejected.
pub async fn update(
    pool: &PgPool,
    id: DbId,
    space: &str,
    input: &ClientPatch,
) -> AppResult<Option<Client>> {
    let input = input.trimmed();
    if input.name.as_deref() == Some("") {
        return Err(CoreError::Validation("Client name cannot be empty.".into()).into());
    }
    Ok(ClientRepo::update(pool, id, space, &input).await?)
}

/// Render every client of `space` as an export CSV document.
pub async fn export_csv(pool: &PgPool, space: &str) -> AppResult<String> {
    let clients = ClientRepo::list_for_export(pool, space).await?;
    tracing::info!(space, count = clients.len(), "Exporting clients");
    Ok(build_export_csv(clients.iter().map(Client::export_row)))
}

/// A row that could not be imported.
#[derive(Debug, Clone, Serialize)]
pub struct ImportError {
    pub row: usize,
    pub name: String,
    pub error: String,
}

/// Outcome of a bulk import.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportSummary {
    pub added: usize,
    pub skipped: usize,
    pub errors: Vec<ImportError>,
}

/// Import clients from an uploaded CSV into `space`.
///
/// Rows without a name are skipped and counted. Each remaining row is
/// inserted on its own; a failed insert is reported with its row number and
/// does not stop the import.
pub async fn import_csv(pool: &PgPool, space: &str, data: &[u8]) -> AppResult<ImportSummary> {
    let rows = parse_import_csv(data)?;
    let mut summary = ImportSummary::default();

    for row in &rows {
        if row.name().is_empty() {
            summary.skipped += 1;
            continue;
        }

        match ClientRepo::create(pool, space, &ClientPatch::from_import_row(row)).await {
            Ok(_) => summary.added += 1,
            Err(err) => {
                tracing::warn!(space, row = row.row, error = %err, "Client import row failed");
                summary.errors.push(ImportError {
                    row: row.row,
                    name: row.name().to_string(),
                    error: err.to_string(),
                });
            }
        }
    }

    tracing::info!(
        space,
        added = summary.added,
        skipped = summary.skipped,
        errors = summary.errors.len(),
        "Client import finished"
    );
    Ok(summary)
}
