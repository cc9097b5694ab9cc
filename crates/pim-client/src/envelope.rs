//! # RPC Envelope
//!
//! Whitelisted methods answer with one of two JSON shapes:
//!
//! | Outcome | Body |
//! |---------|------|
//! | Success | `{"message": <payload>}`, or `{}` when the method returned nothing |
//! | Exception | `{"exc": <traceback>, "exc_type": "<Kind>"}` with a non-2xx status |
//!
//! The traceback is often a JSON-encoded list of strings. Only the final
//! non-empty line is surfaced, with a leading `module.Kind: ` prefix
//! removed when it repeats `exc_type`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::PimApiError;

/// Exception body as written by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionBody {
    pub exc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exc_type: Option<String>,
}

/// Success body as written by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageBody<T> {
    pub message: T,
}

#[derive(Deserialize)]
struct RawEnvelope {
    #[serde(default)]
    message: serde_json::Value,
    #[serde(default)]
    exc: Option<serde_json::Value>,
    #[serde(default)]
    exc_type: Option<String>,
}

/// Decode a method response body into its payload.
///
/// # Errors
///
/// - [`PimApiError::Remote`] when the body carries `exc`.
/// - [`PimApiError::ApiError`] for a non-2xx status without `exc`.
/// - [`PimApiError::Deserialization`] when a 2xx body or its `message`
///   does not match `T`.
pub fn decode_envelope<T: DeserializeOwned>(
    method: &str,
    status: u16,
    body: &str,
) -> Result<T, PimApiError> {
    let success = (200..300).contains(&status);
    let raw: RawEnvelope = match serde_json::from_str(body) {
        Ok(raw) => raw,
        Err(source) if success => {
            return Err(PimApiError::Deserialization {
                method: method.to_string(),
                source,
            })
        }
        Err(_) => {
            return Err(PimApiError::ApiError {
                method: method.to_string(),
                status,
                body: body.to_string(),
            })
        }
    };

    if let Some(exc) = raw.exc.filter(|v| !v.is_null()) {
        let exc_type = raw.exc_type.unwrap_or_else(|| "Exception".to_string());
        let message = exception_summary(&exc, &exc_type);
        return Err(PimApiError::Remote {
            method: method.to_string(),
            exc_type,
            message,
        });
    }

    if !success {
        return Err(PimApiError::ApiError {
            method: method.to_string(),
            status,
            body: body.to_string(),
        });
    }

    serde_json::from_value(raw.message).map_err(|source| PimApiError::Deserialization {
        method: method.to_string(),
        source,
    })
}

/// Reduce an `exc` value to the line a user should see.
fn exception_summary(exc: &serde_json::Value, exc_type: &str) -> String {
    let text = match exc {
        serde_json::Value::String(s) => match serde_json::from_str::<Vec<String>>(s) {
            Ok(frames) => frames.last().cloned().unwrap_or_default(),
            Err(_) => s.clone(),
        },
        serde_json::Value::Array(frames) => frames
            .last()
            .and_then(|f| f.as_str())
            .unwrap_or_default()
            .to_string(),
        other => other.to_string(),
    };

    let line = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .last()
        .unwrap_or(exc_type);

    match line.split_once(": ") {
        Some((head, tail)) if head.rsplit('.').next() == Some(exc_type) => tail.to_string(),
        _ => line.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_payload_is_decoded() {
        let v: Vec<u32> = decode_envelope("m", 200, r#"{"message":[1,2,3]}"#).unwrap();
        assert_eq!(v, vec![1, 2, 3]);
    }

    #[test]
    fn missing_message_decodes_as_null() {
        let v: Option<String> = decode_envelope("m", 200, "{}").unwrap();
        assert!(v.is_none());
        let _: () = decode_envelope("m", 200, "{}").unwrap();
    }

    #[test]
    fn plain_exception_is_surfaced() {
        let body = json!({"exc": "Vendor 'X' not found", "exc_type": "DoesNotExistError"});
        let err = decode_envelope::<()>("m", 404, &body.to_string()).unwrap_err();
        match err {
            PimApiError::Remote {
                exc_type, message, ..
            } => {
                assert_eq!(exc_type, "DoesNotExistError");
                assert_eq!(message, "Vendor 'X' not found");
            }
            other => panic!("expected Remote, got: {other:?}"),
        }
    }

    #[test]
    fn traceback_list_uses_last_line_without_prefix() {
        let tb = "Traceback (most recent call last):\n  File \"x.py\", line 1\nfrappe.exceptions.ValidationError: UPC must be exactly 12 digits. Got: '1' (1 characters)\n";
        let exc = serde_json::to_string(&vec![tb]).unwrap();
        let body = json!({"exc": exc, "exc_type": "ValidationError"});
        let err = decode_envelope::<()>("m", 417, &body.to_string()).unwrap_err();
        assert_eq!(
            err.user_message(),
            "UPC must be exactly 12 digits. Got: '1' (1 characters)"
        );
    }

    #[test]
    fn exception_wins_even_on_success_status() {
        let body = json!({"exc": "boom"});
        let err = decode_envelope::<()>("m", 200, &body.to_string()).unwrap_err();
        assert!(matches!(err, PimApiError::Remote { ref exc_type, .. } if exc_type == "Exception"));
    }

    #[test]
    fn non_json_error_body_is_api_error() {
        let err = decode_envelope::<()>("m", 502, "<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, PimApiError::ApiError { status: 502, .. }));
    }

    #[test]
    fn non_json_success_body_is_deserialization_error() {
        let err = decode_envelope::<()>("m", 200, "not json").unwrap_err();
        assert!(matches!(err, PimApiError::Deserialization { .. }));
    }

    #[test]
    fn mismatched_payload_is_deserialization_error() {
        let err = decode_envelope::<Vec<u32>>("m", 200, r#"{"message":"text"}"#).unwrap_err();
        assert!(matches!(err, PimApiError::Deserialization { .. }));
    }
}
