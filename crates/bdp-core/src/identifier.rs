//! SQL identifier validation.
//!
//! Schema and table names are interpolated into SQL text (the database does
//! not accept identifiers as bound parameters), so every name that reaches a
//! statement must pass [`is_valid_identifier`] first.

use crate::error::{CoreError, CoreResult};
use std::path::Path;

/// Check that `value` matches `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_valid_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Validate an identifier read from `path`, labelling the error with `label`.
pub(crate) fn validate_identifier(value: &str, label: &str, path: &Path) -> CoreResult<()> {
    if is_valid_identifier(value) {
        Ok(())
    } else {
        Err(CoreError::InvalidIdentifier {
            path: path.display().to_string(),
            label: label.to_string(),
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identifiers() {
        for ident in ["a", "_", "raw", "base_numbers", "_private", "t1", "ABC_def_09"] {
            assert!(is_valid_identifier(ident), "{ident} should be valid");
        }
    }

    #[test]
    fn test_invalid_identifiers() {
        for ident in ["", "1abc", "a-b", "a.b", "a b", "drop;table", "é", "a\"b"] {
            assert!(!is_valid_identifier(ident), "{ident} should be invalid");
        }
    }

    #[test]
    fn test_validate_identifier_error_names_file_and_label() {
        let err = validate_identifier("9lives", "schema", Path::new("datasets/x.sql")).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("schema"));
        assert!(msg.contains("9lives"));
        assert!(msg.contains("datasets/x.sql"));
    }
}
