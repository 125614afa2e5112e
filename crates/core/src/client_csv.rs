//! CSV builder/parser for client export and bulk import.
//!
//! Exports are spreadsheet-friendly: UTF-8 with a byte-order mark and CRLF
//! line endings. Imports accept the same format (BOM optional, LF or CRLF)
//! and keep only whitelisted client columns.

use std::collections::BTreeMap;

use crate::error::CoreError;
use crate::identity::space_code;

/// UTF-8 byte-order mark written at the start of every export.
pub const UTF8_BOM: &str = "\u{feff}";

/// Line terminator used in exports.
pub const CRLF: &str = "\r\n";

/// Export column set, in output order.
///
/// `revenue_password`, `legacy_phone` and `space` are never exported.
pub const EXPORT_COLUMNS: &[&str] = &[
    "id",
    "finflow_number",
    "name",
    "civil_status",
    "pps_number",
    "date_of_birth",
    "email",
    "mobile",
    "other_phone",
    "address_line1",
    "address_line2",
    "address_line3",
    "city_county",
    "eir_code",
    "bank_holder_name",
    "bank_iban",
    "bank_bic",
    "created_at",
];

/// Client columns that may be written through an import.
pub const IMPORT_COLUMNS: &[&str] = &[
    "name",
    "civil_status",
    "pps_number",
    "date_of_birth",
    "revenue_password",
    "email",
    "mobile",
    "other_phone",
    "address_line1",
    "address_line2",
    "address_line3",
    "city_county",
    "eir_code",
    "bank_holder_name",
    "bank_iban",
    "bank_bic",
];

/// Download filename for a space's client export, e.g.
/// `finflowai_ge_clients.csv`.
pub fn export_filename(space_name: &str) -> String {
    format!("finflowai_{}_clients.csv", space_code(space_name).to_lowercase())
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Escape a value for CSV: wrap in quotes if it contains a comma, quote or
/// line break.
fn csv_escape(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Build an export document from rows already laid out in
/// [`EXPORT_COLUMNS`] order.
///
/// The header is always emitted, so zero rows still yields a valid file.
pub fn build_export_csv<I>(rows: I) -> String
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut out = String::from(UTF8_BOM);
    out.push_str(&EXPORT_COLUMNS.join(","));
    out.push_str(CRLF);

    for row in rows {
        let line: Vec<String> = row.iter().map(|v| csv_escape(v)).collect();
        out.push_str(&line.join(","));
        out.push_str(CRLF);
    }

    out
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

/// One data row from an uploaded CSV, restricted to [`IMPORT_COLUMNS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRow {
    /// 1-based record number in the file; the header is row 1.
    pub row: usize,
    /// Whitelisted column values, trimmed. Columns absent from the file are
    /// absent here.
    pub fields: BTreeMap<String, String>,
}

impl ImportRow {
    /// Trimmed `name` value, or `""` when the column is missing.
    pub fn name(&self) -> &str {
        self.fields.get("name").map(String::as_str).unwrap_or("")
    }

    pub fn field(&self, column: &str) -> Option<String> {
        self.fields.get(column).cloned()
    }
}

/// Parse an uploaded client CSV.
///
/// Header names are matched case-insensitively; unknown columns are
/// dropped. Blank records are skipped entirely and do not appear in the
/// output.
pub fn parse_import_csv(data: &[u8]) -> Result<Vec<ImportRow>, CoreError> {
    let text = std::str::from_utf8(data)
        .map_err(|e| CoreError::Validation(format!("CSV is not valid UTF-8: {e}")))?;
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);

    let mut records = split_records(text)?.into_iter();

    let headers: Vec<String> = records
        .next()
        .ok_or_else(|| CoreError::Validation("CSV is empty".into()))?
        .into_iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(CoreError::Validation("CSV header row is empty".into()));
    }

    let mut rows = Vec::new();
    for (index, values) in records.enumerate() {
        if values.iter().all(|v| v.trim().is_empty()) {
            continue;
        }

        let mut fields = BTreeMap::new();
        for (header, value) in headers.iter().zip(values) {
            if IMPORT_COLUMNS.contains(&header.as_str()) {
                fields.insert(header.clone(), value.trim().to_string());
            }
        }

        rows.push(ImportRow {
            row: index + 2,
            fields,
        });
    }

    Ok(rows)
}

/// Split CSV text into records of raw field values.
///
/// Handles quoted fields containing commas, escaped quotes and line breaks.
fn split_records(text: &str) -> Result<Vec<Vec<String>>, CoreError> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
            continue;
        }

        match ch {
            '"' => in_quotes = true,
            ',' => record.push(std::mem::take(&mut current)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                record.push(std::mem::take(&mut current));
                records.push(std::mem::take(&mut record));
            }
            _ => current.push(ch),
        }
    }

    if in_quotes {
        return Err(CoreError::Validation(
            "CSV has an unterminated quoted field".into(),
        ));
    }

    if !current.is_empty() || !record.is_empty() {
        record.push(current);
        records.push(record);
    }

    Ok(records)
}
