//! Space (tenant) naming rules.
//!
//! Space names are compared case-insensitively: every read and write goes
//! through [`normalize_space_name`] first. Codes are exactly two ASCII
//! letters, stored uppercase.

use crate::error::CoreError;

/// Required length of a space code.
pub const SPACE_CODE_LEN: usize = 2;

/// Trim and lowercase a space name. Used for lookups as well as writes.
pub fn normalize_space_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Normalize a space name for creation, rejecting empty names.
pub fn validate_space_name(name: &str) -> Result<String, CoreError> {
    let name = normalize_space_name(name);
    if name.is_empty() {
        return Err(CoreError::Validation("Space name is required.".into()));
    }
    Ok(name)
}

/// Normalize a space code (trim + uppercase) and check it is two letters.
pub fn validate_space_code(code: &str) -> Result<String, CoreError> {
    let code = code.trim().to_uppercase();
    let is_valid =
        code.chars().count() == SPACE_CODE_LEN && code.chars().all(|c| c.is_ascii_alphabetic());
    if !is_valid {
        return Err(CoreError::Validation(
            "Space code must be exactly 2 letters (e.g. GE).".into(),
        ));
    }
    Ok(code)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn name_is_trimmed_and_lowercased() {
        assert_eq!(normalize_space_name("  GE-Souza-Tax "), "ge-souza-tax");
    }

    #[test]
    fn empty_name_rejected() {
        assert_matches!(validate_space_name("   "), Err(CoreError::Validation(_)));
    }

    #[test]
    fn code_is_uppercased() {
        assert_eq!(validate_space_code(" ge ").unwrap(), "GE");
    }

    #[test]
    fn code_wrong_length_rejected() {
        assert_matches!(validate_space_code("G"), Err(CoreError::Validation(_)));
        assert_matches!(validate_space_code("GES"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn code_non_alpha_rejected() {
        assert_matches!(validate_space_code("G1"), Err(CoreError::Validation(_)));
        assert_matches!(validate_space_code("--"), Err(CoreError::Validation(_)));
    }
}
