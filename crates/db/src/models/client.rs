//! Client entity model and DTOs.

use finflow_core::client_csv::ImportRow;
use finflow_core::identity::finflow_number;
use finflow_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A client row from the `clients` table.
#[derive(Debug, Clone, FromRow)]
pub struct Client {
    pub id: DbId,
    pub space: String,
    pub name: String,
    pub civil_status: String,
    pub pps_number: String,
    pub date_of_birth: String,
    pub revenue_password: String,
    pub email: String,
    pub mobile: String,
    pub other_phone: String,
    pub address_line1: String,
    pub address_line2: String,
    pub address_line3: String,
    pub city_county: String,
    pub eir_code: String,
    pub bank_holder_name: String,
    pub bank_iban: String,
    pub bank_bic: String,
    pub legacy_phone: String,
    pub created_at: Timestamp,
}

impl Client {
    /// Derived record number, e.g. `GE-0007`. Never stored.
    pub fn finflow_number(&self) -> String {
        finflow_number(self.id, &self.space)
    }

    /// Values in [`finflow_core::client_csv::EXPORT_COLUMNS`] order.
    pub fn export_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.finflow_number(),
            self.name.clone(),
            self.civil_status.clone(),
            self.pps_number.clone(),
            self.date_of_birth.clone(),
            self.email.clone(),
            self.mobile.clone(),
            self.other_phone.clone(),
            self.address_line1.clone(),
            self.address_line2.clone(),
            self.address_line3.clone(),
            self.city_county.clone(),
            self.eir_code.clone(),
            self.bank_holder_name.clone(),
            self.bank_iban.clone(),
            self.bank_bic.clone(),
            self.created_at.to_rfc3339(),
        ]
    }
}

/// Client representation for API responses, with the derived record number
/// and without the legacy phone column.
#[derive(Debug, Clone, Serialize)]
pub struct ClientResponse {
    pub id: DbId,
    pub finflow_number: String,
    pub space: String,
    pub name: String,
    pub civil_status: String,
    pub pps_number: String,
    pub date_of_birth: String,
    pub revenue_password: String,
    pub email: String,
    pub mobile: String,
    pub other_phone: String,
    pub address_line1: String,
    pub address_line2: String,
    pub address_line3: String,
    pub city_county: String,
    pub eir_code: String,
    pub bank_holder_name: String,
    pub bank_iban: String,
    pub bank_bic: String,
    pub created_at: Timestamp,
}

impl From<Client> for ClientResponse {
    fn from(c: Client) -> Self {
        Self {
            finflow_number: c.finflow_number(),
            id: c.id,
            space: c.space,
            name: c.name,
            civil_status: c.civil_status,
            pps_number: c.pps_number,
            date_of_birth: c.date_of_birth,
            revenue_password: c.revenue_password,
            email: c.email,
            mobile: c.mobile,
            other_phone: c.other_phone,
            address_line1: c.address_line1,
            address_line2: c.address_line2,
            address_line3: c.address_line3,
            city_county: c.city_county,
            eir_code: c.eir_code,
            bank_holder_name: c.bank_holder_name,
            bank_iban: c.bank_iban,
            bank_bic: c.bank_bic,
            created_at: c.created_at,
        }
    }
}

/// Writable client fields.
///
/// `None` means "not provided": on insert the column takes its default, on
/// update it is left untouched. `Some("")` clears the column. Any other key
/// in the request body is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub civil_status: Option<String>,
    pub pps_number: Option<String>,
    pub date_of_birth: Option<String>,
    pub revenue_password: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub other_phone: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub address_line3: Option<String>,
    pub city_county: Option<String>,
    pub eir_code: Option<String>,
    pub bank_holder_name: Option<String>,
    pub bank_iban: Option<String>,
    pub bank_bic: Option<String>,
}

impl ClientPatch {
    /// Copy with every provided value trimmed.
    pub fn trimmed(&self) -> Self {
        let t = |v: &Option<String>| v.as_deref().map(|s| s.trim().to_string());
        Self {
            name: t(&self.name),
            civil_status: t(&self.civil_status),
            pps_number: t(&self.pps_number),
            date_of_birth: t(&self.date_of_birth),
            revenue_password: t(&self.revenue_password),
            email: t(&self.email),
            mobile: t(&self.mobile),
            other_phone: t(&self.other_phone),
            address_line1: t(&self.address_line1),
            address_line2: t(&self.address_line2),
            address_line3: t(&self.address_line3),
            city_county: t(&self.city_county),
            eir_code: t(&self.eir_code),
            bank_holder_name: t(&self.bank_holder_name),
            bank_iban: t(&self.bank_iban),
            bank_bic: t(&self.bank_bic),
        }
    }

    /// Build a patch from one imported CSV row. Columns missing from the
    /// file stay `None`.
    pub fn from_import_row(row: &ImportRow) -> Self {
        Self {
            name: row.field("name"),
            civil_status: row.field("civil_status"),
            pps_number: row.field("pps_number"),
            date_of_birth: row.field("date_of_birth"),
            revenue_password: row.field("revenue_password"),
            email: row.field("email"),
            mobile: row.field("mobile"),
            other_phone: row.field("other_phone"),
            address_line1: row.field("address_line1"),
            address_line2: row.field("address_line2"),
            address_line3: row.field("address_line3"),
            city_county: row.field("city_county"),
            eir_code: row.field("eir_code"),
            bank_holder_name: row.field("bank_holder_name"),
            bank_iban: row.field("bank_iban"),
            bank_bic: row.field("bank_bic"),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use finflow_core::client_csv::{parse_import_csv, EXPORT_COLUMNS};

    use super::*;

    fn sample_client() -> Client {
        Client {
            id: 7,
            space: "ge-souza-tax".into(),
            name: "Ann Murphy".into(),
            civil_status: "single".into(),
            pps_number: "1234567T".into(),
            date_of_birth: "1990-01-01".into(),
            revenue_password: "hunter2".into(),
            email: "ann@example.ie".into(),
            mobile: "087".into(),
            other_phone: String::new(),
            address_line1: "1 Main St".into(),
            address_line2: String::new(),
            address_line3: String::new(),
            city_county: "Cork".into(),
            eir_code: "T12 AB34".into(),
            bank_holder_name: "Ann Murphy".into(),
            bank_iban: "IE00".into(),
            bank_bic: "BOFIIE2D".into(),
            legacy_phone: "021".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn response_carries_derived_number() {
        let response = ClientResponse::from(sample_client());
        assert_eq!(response.finflow_number, "GE-0007");
    }

    #[test]
    fn export_row_matches_columns_and_hides_secrets() {
        let row = sample_client().export_row();
        assert_eq!(row.len(), EXPORT_COLUMNS.len());
        assert_eq!(row[1], "GE-0007");
        assert!(!row.contains(&"hunter2".to_string()));
        assert!(!row.contains(&"021".to_string()));
    }

    #[test]
    fn patch_distinguishes_absent_from_empty() {
        let patch: ClientPatch =
            serde_json::from_str(r#"{"email": "", "unknown_field": "x"}"#).unwrap();
        assert_eq!(patch.email.as_deref(), Some(""));
        assert!(patch.name.is_none());
        assert!(patch.mobile.is_none());
    }

    #[test]
    fn patch_from_import_row() {
        let rows = parse_import_csv(b"name,eir_code\n Ann , T12 \n").unwrap();
        let patch = ClientPatch::from_import_row(&rows[0]);
        assert_eq!(patch.name.as_deref(), Some("Ann"));
        assert_eq!(patch.eir_code.as_deref(), Some("T12"));
        assert!(patch.email.is_none());
    }

    #[test]
    fn trimmed_trims_present_values_only() {
        let patch = ClientPatch {
            name: Some("  Ann ".into()),
            ..Default::default()
        }
        .trimmed();
        assert_eq!(patch.name.as_deref(), Some("Ann"));
        assert!(patch.email.is_none());
    }
}
