//! # Field Validators
//!
//! Synchronous predicate checks shared by the server's save step and the
//! form's live feedback.
//!
//! - **Codes** (`attribute_code`, `vendor_attribute_code`): valid iff the
//!   whole value matches `^[a-z0-9_]+$`. On violation every distinct
//!   offending character is reported once, in first-occurrence order.
//! - **UPC**: valid iff exactly 12 ASCII digits after trimming whitespace.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Hint shown under a code field while it is empty.
pub const CODE_HINT: &str =
    "Only lowercase letters (a-z), numbers (0-9), and underscores (_) are allowed";

fn is_code_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'
}

/// Distinct characters of `code` outside `[a-z0-9_]`, first occurrence first.
pub fn invalid_code_chars(code: &str) -> Vec<char> {
    let mut found = Vec::new();
    for c in code.chars() {
        if !is_code_char(c) && !found.contains(&c) {
            found.push(c);
        }
    }
    found
}

/// Validate an attribute or vendor-attribute code.
///
/// # Errors
///
/// - [`ValidationError::EmptyCode`] for an empty value.
/// - [`ValidationError::InvalidCode`] listing the offending characters.
pub fn validate_code(code: &str) -> Result<(), ValidationError> {
    if code.is_empty() {
        return Err(ValidationError::EmptyCode);
    }
    let invalid_chars = invalid_code_chars(code);
    if invalid_chars.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::InvalidCode {
            code: code.to_string(),
            invalid_chars,
        })
    }
}

/// Live feedback state for a validated form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FieldFeedback {
    /// Field is empty; show the format hint.
    Hint { message: String },
    /// Value is well-formed.
    Valid,
    /// Value is malformed; show the message inline.
    Invalid { message: String },
}

impl FieldFeedback {
    /// Whether the field currently blocks a save.
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid { .. })
    }
}

/// Feedback for a code field as the user types.
///
/// An empty field is not an error here; required-ness is enforced by the
/// save step.
pub fn code_feedback(code: &str) -> FieldFeedback {
    match validate_code(code) {
        Ok(()) => FieldFeedback::Valid,
        Err(ValidationError::EmptyCode) => FieldFeedback::Hint {
            message: CODE_HINT.to_string(),
        },
        Err(e) => FieldFeedback::Invalid {
            message: e.to_string(),
        },
    }
}

/// A validated 12-digit UPC, stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Upc(String);

impl Upc {
    /// Access the digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Upc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validate a UPC.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidUpc`] with the raw input and the
/// trimmed character count when the value is not exactly 12 digits.
pub fn validate_upc(raw: &str) -> Result<Upc, ValidationError> {
    let trimmed = raw.trim();
    let length = trimmed.chars().count();
    if length == 12 && trimmed.chars().all(|c| c.is_ascii_digit()) {
        Ok(Upc(trimmed.to_string()))
    } else {
        Err(ValidationError::InvalidUpc {
            raw: raw.to_string(),
            length,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn lowercase_digits_underscore_is_valid() {
        assert!(validate_code("abc_123").is_ok());
    }

    #[test]
    fn uppercase_and_dash_are_reported_once_in_order() {
        match validate_code("ABC-123") {
            Err(ValidationError::InvalidCode { invalid_chars, .. }) => {
                assert_eq!(invalid_chars, vec!['A', 'B', 'C', '-']);
            }
            other => panic!("expected InvalidCode, got: {other:?}"),
        }
    }

    #[test]
    fn repeated_invalid_chars_are_deduplicated() {
        assert_eq!(invalid_code_chars("a b c-d-e"), vec![' ', '-']);
    }

    #[test]
    fn empty_code_is_rejected() {
        assert_eq!(validate_code(""), Err(ValidationError::EmptyCode));
    }

    #[test]
    fn code_feedback_states() {
        assert_eq!(
            code_feedback(""),
            FieldFeedback::Hint {
                message: CODE_HINT.to_string()
            }
        );
        assert_eq!(code_feedback("color"), FieldFeedback::Valid);
        assert!(code_feedback("Color").is_invalid());
    }

    #[test]
    fn twelve_digit_upc_is_valid() {
        assert_eq!(validate_upc("123456789012").unwrap().as_str(), "123456789012");
    }

    #[test]
    fn upc_is_trimmed() {
        assert_eq!(validate_upc("  123456789012\n").unwrap().as_str(), "123456789012");
    }

    #[test]
    fn short_upc_reports_length() {
        match validate_upc("12345") {
            Err(ValidationError::InvalidUpc { raw, length }) => {
                assert_eq!(raw, "12345");
                assert_eq!(length, 5);
            }
            other => panic!("expected InvalidUpc, got: {other:?}"),
        }
    }

    #[test]
    fn upc_with_letter_is_invalid() {
        assert!(validate_upc("12345678901a").is_err());
    }

    #[test]
    fn non_ascii_digits_are_rejected() {
        // Arabic-Indic digits are Unicode digits but not UPC digits.
        assert!(validate_upc("١٢٣٤٥٦٧٨٩٠١٢").is_err());
    }

    proptest! {
        #[test]
        fn code_is_valid_iff_no_invalid_chars(code in "\\PC{1,24}") {
            let valid = validate_code(&code).is_ok();
            prop_assert_eq!(valid, invalid_code_chars(&code).is_empty());
        }

        #[test]
        fn invalid_chars_are_distinct_and_present(code in "\\PC{0,24}") {
            let chars = invalid_code_chars(&code);
            for (i, c) in chars.iter().enumerate() {
                prop_assert!(code.contains(*c));
                prop_assert!(!chars[..i].contains(c));
                prop_assert!(!is_code_char(*c));
            }
        }

        #[test]
        fn generated_codes_are_valid(code in "[a-z0-9_]{1,32}") {
            prop_assert!(validate_code(&code).is_ok());
        }
    }
}
