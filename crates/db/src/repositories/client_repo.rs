//! Repository for the `clients` table.
//!
//! Every query is filtered by `space`: an id that exists in another space
//! behaves exactly like an id that does not exist.

use finflow_core::types::DbId;
use sqlx::PgPool;

use crate::models::client::{Client, ClientPatch};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, space, name, civil_status, pps_number, date_of_birth, \
    revenue_password, email, mobile, other_phone, address_line1, address_line2, \
    address_line3, city_county, eir_code, bank_holder_name, bank_iban, bank_bic, \
    legacy_phone, created_at";

/// Provides tenant-scoped CRUD operations for clients.
pub struct ClientRepo;

impl ClientRepo {
    /// Insert a new client into `space`, returning the stored row.
    ///
    /// Fields left `None` in `input` take the column default (empty string).
    /// The caller is responsible for rejecting a missing `name`.
    pub async fn create(
        pool: &PgPool,
        space: &str,
        input: &ClientPatch,
    ) -> Result<Client, sqlx::Error> {
        let query = format!(
            "INSERT INTO clients (
                space, name, civil_status, pps_number, date_of_birth, revenue_password,
                email, mobile, other_phone, address_line1, address_line2, address_line3,
                city_county, eir_code, bank_holder_name, bank_iban, bank_bic
             ) VALUES (
                $1, COALESCE($2, ''), COALESCE($3, ''), COALESCE($4, ''), COALESCE($5, ''),
                COALESCE($6, ''), COALESCE($7, ''), COALESCE($8, ''), COALESCE($9, ''),
                COALESCE($10, ''), COALESCE($11, ''), COALESCE($12, ''), COALESCE($13, ''),
                COALESCE($14, ''), COALESCE($15, ''), COALESCE($16, ''), COALESCE($17, '')
             )
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(space)
            .bind(&input.name)
            .bind(&input.civil_status)
            .bind(&input.pps_number)
            .bind(&input.date_of_birth)
            .bind(&input.revenue_password)
            .bind(&input.email)
            .bind(&input.mobile)
            .bind(&input.other_phone)
            .bind(&input.address_line1)
            .bind(&input.address_line2)
            .bind(&input.address_line3)
            .bind(&input.city_county)
            .bind(&input.eir_code)
            .bind(&input.bank_holder_name)
            .bind(&input.bank_iban)
            .bind(&input.bank_bic)
            .fetch_one(pool)
            .await
    }

    /// Find a client by id within `space`.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        space: &str,
    ) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE id = $1 AND space = $2");
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .bind(space)
            .fetch_optional(pool)
            .await
    }

    /// List a space's clients, most recently added first.
    pub async fn list(pool: &PgPool, space: &str) -> Result<Vec<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE space = $1 ORDER BY id DESC");
        sqlx::query_as::<_, Client>(&query)
            .bind(space)
            .fetch_all(pool)
            .await
    }

    /// List a space's clients in record-number order, for CSV export.
    pub async fn list_for_export(pool: &PgPool, space: &str) -> Result<Vec<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE space = $1 ORDER BY id ASC");
        sqlx::query_as::<_, Client>(&query)
            .bind(space)
            .fetch_all(pool)
            .await
    }

    /// Update a client. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists in `space`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        space: &str,
        input: &ClientPatch,
    ) -> Result<Option<Client>, sqlx::Error> {
        let query = format!(
            "UPDATE clients SET
                name = COALESCE($3, name),
                civil_status = COALESCE($4, civil_status),
                pps_number = COALESCE($5, pps_number),
                date_of_birth = COALESCE($6, date_of_birth),
                revenue_password = COALESCE($7, revenue_password),
                email = COALESCE($8, email),
                mobile = COALESCE($9, mobile),
                other_phone = COALESCE($10, other_phone),
                address_line1 = COALESCE($11, address_line1),
                address_line2 = COALESCE($12, address_line2),
                address_line3 = COALESCE($13, address_line3),
                city_county = COALESCE($14, city_county),
                eir_code = COALESCE($15, eir_code),
                bank_holder_name = COALESCE($16, bank_holder_name),
                bank_iban = COALESCE($17, bank_iban),
                bank_bic = COALESCE($18, bank_bic)
             WHERE id = $1 AND space = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .bind(space)
            .bind(&input.name)
            .bind(&input.civil_status)
            .bind(&input.pps_number)
            .bind(&input.date_of_birth)
            .bind(&input.revenue_password)
            .bind(&input.email)
            .bind(&input.mobile)
            .bind(&input.other_phone)
            .bind(&input.address_line1)
            .bind(&input.address_line2)
            .bind(&input.address_line3)
            .bind(&input.city_county)
            .bind(&input.eir_code)
            .bind(&input.bank_holder_name)
            .bind(&input.bank_iban)
            .bind(&input.bank_bic)
            .fetch_optional(pool)
            .await
    }

    /// Delete a client by id within `space`. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId, space: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1 AND space = $2")
            .bind(id)
            .bind(space)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
