//! Space registry: the set of valid tenants.

use finflow_core::error::CoreError;
use finflow_core::space::{normalize_space_name, validate_space_code, validate_space_name};
use finflow_db::models::space::{CreateSpace, Space};
use finflow_db::repositories::SpaceRepo;
use sqlx::PgPool;

use crate::error::{space_not_found, AppResult};

/// Register a new space.
///
/// Name and code are normalized first. A taken name or code is reported as
/// a conflict naming whichever one clashed; the unique indexes cover the
/// race between this check and the insert.
pub async fn create(pool: &PgPool, input: &CreateSpace) -> AppResult<Space> {
    let name = validate_space_name(&input.name)?;
    let code = validate_space_code(&input.code)?;

    if SpaceRepo::find_by_name(pool, &name).await?.is_some() {
        return Err(CoreError::Conflict(format!("Space '{name}' already exists.")).into());
    }
    if let Some(other) = SpaceRepo::find_by_code(pool, &code).await? {
        return Err(CoreError::Conflict(format!(
            "Space code '{code}' is already used by '{}'.",
            other.name
        ))
        .into());
    }

    let space = SpaceRepo::create(pool, &name, &code).await?;
    tracing::info!(space = %space.name, code = %space.code, "Space registered");
    Ok(space)
}

pub async fn get(pool: &PgPool, name: &str) -> AppResult<Option<Space>> {
    Ok(SpaceRepo::find_by_name(pool, &normalize_space_name(name)).await?)
}

pub async fn list(pool: &PgPool) -> AppResult<Vec<Space>> {
    Ok(SpaceRepo::list(pool).await?)
}

pub async fn delete(pool: &PgPool, name: &str) -> AppResult<bool> {
    let name = normalize_space_name(name);
    let deleted = SpaceRepo::delete(pool, &name).await?;
    if deleted {
        tracing::info!(space = %name, "Space deleted");
    }
    Ok(deleted)
}

/// Normalize `raw` and confirm it names a registered space.
///
/// Returns the normalized name. An empty value is a validation error; an
/// unknown one is a 404.
pub async fn require(pool: &PgPool, raw: &str) -> AppResult<String> {
    let name = normalize_space_name(raw);
    if name.is_empty() {
        return Err(CoreError::Validation("space is required.".into()).into());
    }
    if !SpaceRepo::exists(pool, &name).await? {
        return Err(space_not_found(&name));
    }
    Ok(name)
}
