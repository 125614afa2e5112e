//! Credential service: operator login triples.

use finflow_core::credentials::{normalize_credential_field, CredentialHasher};
use finflow_core::error::CoreError;
use finflow_core::types::DbId;
use finflow_db::models::user::{CreateCredential, Credential};
use finflow_db::repositories::UserRepo;
use sqlx::PgPool;

use crate::error::AppResult;
use crate::services::spaces;

/// Register a credential for a space.
///
/// `space` and `login` are normalized and the password trimmed; `space` must
/// be registered. The same
/// login may hold several passwords, but an identical triple is a conflict.
pub async fn add(
    pool: &PgPool,
    hasher: &CredentialHasher,
    space: &str,
    login: &str,
    password: &str,
    name: &str,
) -> AppResult<Credential> {
    let login = normalize_credential_field(login);
    let password = password.trim();
    if normalize_credential_field(space).is_empty() || login.is_empty() || password.is_empty() {
        return Err(CoreError::Validation("space, login and password are required.".into()).into());
    }
    let space = spaces::require(pool, space).await?;

    let password_hash = hasher.hash(password);
    if UserRepo::find_by_triple(pool, &space, &login, &password_hash)
        .await?
        .is_some()
    {
        return Err(CoreError::Conflict(
            "This space, login and password combination already exists.".into(),
        )
        .into());
    }

    let credential = UserRepo::create(
        pool,
        &CreateCredential {
            space,
            login,
            password_hash,
            name: name.trim().to_string(),
        },
    )
    .await?;
    tracing::info!(
        credential_id = credential.id,
        space = %credential.space,
        login = %credential.login,
        "Credential created"
    );
    Ok(credential)
}

/// Look a credential up by its full normalized triple.
///
/// `None` covers every mismatch; the caller cannot tell which field was wrong.
pub async fn authenticate(
    pool: &PgPool,
    hasher: &CredentialHasher,
    space: &str,
    login: &str,
    password: &str,
) -> AppResult<Option<Credential>> {
    let space = normalize_credential_field(space);
    let login = normalize_credential_field(login);
    let password_hash = hasher.hash(password.trim());
    Ok(UserRepo::find_by_triple(pool, &space, &login, &password_hash).await?)
}

pub async fn list(pool: &PgPool, space: Option<&str>) -> AppResult<Vec<Credential>> {
    let space = space
        .map(normalize_credential_field)
        .filter(|s| !s.is_empty());
    Ok(UserRepo::list(pool, space.as_deref()).await?)
}

pub async fn delete(pool: &PgPool, id: DbId) -> AppResult<bool> {
    Ok(UserRepo::delete(pool, id).await?)
}
