//! PIM API client error types.

/// Errors from PIM API calls.
#[derive(Debug, thiserror::Error)]
pub enum PimApiError {
    /// HTTP transport error.
    #[error("HTTP error calling {method}: {source}")]
    Http {
        method: String,
        source: reqwest::Error,
    },
    /// Non-2xx response without an exception envelope.
    #[error("{method} returned {status}: {body}")]
    ApiError {
        method: String,
        status: u16,
        body: String,
    },
    /// The server raised an exception (`{"exc": ...}` envelope).
    #[error("{method} raised {exc_type}: {message}")]
    Remote {
        method: String,
        exc_type: String,
        message: String,
    },
    /// The call completed but the payload reported `success: false`.
    #[error("{message}")]
    Rejected { method: String, message: String },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {method}: {source}")]
    Deserialization {
        method: String,
        source: serde_json::Error,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

impl PimApiError {
    /// Text suitable for a user-facing notification.
    ///
    /// Server-provided messages are shown as-is; transport and decoding
    /// failures fall back to the full error description.
    pub fn user_message(&self) -> String {
        match self {
            Self::Remote { message, .. } | Self::Rejected { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Whether the failure happened before any response arrived.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_server_text() {
        let err = PimApiError::Rejected {
            method: "update_attribute_mapping".into(),
            message: "Error updating mapping: boom".into(),
        };
        assert_eq!(err.user_message(), "Error updating mapping: boom");

        let err = PimApiError::ApiError {
            method: "ping".into(),
            status: 502,
            body: "bad gateway".into(),
        };
        assert_eq!(err.user_message(), "ping returned 502: bad gateway");
        assert!(!err.is_transport());
    }
}
