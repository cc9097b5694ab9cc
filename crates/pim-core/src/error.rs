//! # Validation Errors
//!
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations. Validation messages are user-facing: they are shown
//! inline next to the offending field and returned verbatim by the server.

use thiserror::Error;

/// Field-level validation failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A record name was empty or whitespace.
    #[error("{kind} must not be empty")]
    EmptyIdentifier {
        /// Kind of record the name identifies.
        kind: &'static str,
    },

    /// An attribute code was empty.
    #[error("Attribute Code is required")]
    EmptyCode,

    /// An attribute code contains characters outside `[a-z0-9_]`.
    #[error("{}", code_violation_message(.code, .invalid_chars))]
    InvalidCode {
        /// The rejected code.
        code: String,
        /// Distinct offending characters, in first-occurrence order.
        invalid_chars: Vec<char>,
    },

    /// A UPC is not exactly 12 decimal digits after trimming.
    #[error("UPC must be exactly 12 digits. Got: '{raw}' ({length} characters)")]
    InvalidUpc {
        /// The value as entered, before trimming.
        raw: String,
        /// Character count after trimming.
        length: usize,
    },

    /// A generated code could not be built because a source field is blank.
    #[error("{0}")]
    MissingCodeSource(String),
}

/// Builds the invalid-code message, listing each offending character once.
pub(crate) fn code_violation_message(code: &str, invalid_chars: &[char]) -> String {
    let mut msg = format!(
        "Attribute Code '{code}' contains invalid characters. \
         Only lowercase letters (a-z), numbers (0-9), and underscores (_) are allowed."
    );
    match invalid_chars {
        [] => {}
        [single] => msg.push_str(&format!(" Invalid character found: '{single}'")),
        many => {
            let list: Vec<String> = many.iter().map(|c| format!("'{c}'")).collect();
            msg.push_str(&format!(" Invalid characters found: {}", list.join(", ")));
        }
    }
    msg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_code_message_single_char() {
        let err = ValidationError::InvalidCode {
            code: "color-name".into(),
            invalid_chars: vec!['-'],
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Attribute Code 'color-name' contains invalid characters."));
        assert!(msg.ends_with("Invalid character found: '-'"));
    }

    #[test]
    fn invalid_code_message_many_chars() {
        let err = ValidationError::InvalidCode {
            code: "ABC-123".into(),
            invalid_chars: vec!['A', 'B', 'C', '-'],
        };
        assert!(err
            .to_string()
            .ends_with("Invalid characters found: 'A', 'B', 'C', '-'"));
    }

    #[test]
    fn upc_message_reports_trimmed_length() {
        let err = ValidationError::InvalidUpc {
            raw: " 12345 ".into(),
            length: 5,
        };
        assert_eq!(
            err.to_string(),
            "UPC must be exactly 12 digits. Got: ' 12345 ' (5 characters)"
        );
    }
}
