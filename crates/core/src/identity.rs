//! Human-facing record numbers.
//!
//! A client's record number (the "finflow number") is never stored. It is
//! derived from the owning space's name and the client's database id every
//! time a client leaves the storage layer.

use crate::types::DbId;

/// Code used when the space name is empty.
pub const FALLBACK_SPACE_CODE: &str = "FF";

/// Derive the two-letter code used in record numbers from a space name.
///
/// Takes the first two characters (after trimming) and uppercases each one.
/// A character whose uppercase form is several characters (`ß` -> `SS`)
/// keeps only the first, so the code never grows. A one-character name
/// yields a one-character code, an empty name yields [`FALLBACK_SPACE_CODE`].
///
/// ```
/// use finflow_core::identity::space_code;
///
/// assert_eq!(space_code("ge-souza-tax"), "GE");
/// assert_eq!(space_code("a"), "A");
/// assert_eq!(space_code(""), "FF");
/// ```
pub fn space_code(space_name: &str) -> String {
    let code: String = space_name
        .trim()
        .chars()
        .take(2)
        .map(|c| c.to_uppercase().next().unwrap_or(c))
        .collect();
    if code.is_empty() {
        return FALLBACK_SPACE_CODE.to_string();
    }
    code
}

/// Format a record number as `{code}-{id}` with the id zero-padded to 4 digits.
///
/// Ids wider than four digits are printed in full.
pub fn record_number(id: DbId, code: &str) -> String {
    format!("{code}-{id:04}")
}

/// Record number for a client id within the named space.
pub fn finflow_number(id: DbId, space_name: &str) -> String {
    record_number(id, &space_code(space_name))
}
