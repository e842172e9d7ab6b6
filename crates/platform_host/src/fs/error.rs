//! Gateway error taxonomy.

use thiserror::Error;

/// User-facing text for requests that never reached the backend.
pub const CONNECTION_FAILED_MESSAGE: &str =
    "Could not connect to the server. Check your connection and try again.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Failure of a remote file-manager operation.
pub enum GatewayError {
    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {}", message.as_deref().unwrap_or("no message"))]
    Remote {
        /// HTTP status code.
        status: u16,
        /// The response's `error` field, when present.
        message: Option<String>,
    },
    /// The backend could not be reached.
    #[error("network error: {0}")]
    Network(String),
    /// The backend answered but the body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
    /// The active host has no implementation for the operation.
    #[error("operation unavailable: {0}")]
    Unsupported(&'static str),
}

impl GatewayError {
    /// Builds a remote error carrying the server message verbatim.
    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        Self::Remote {
            status,
            message: Some(message.into()),
        }
    }

    /// Returns the text shown to the user for this failure.
    ///
    /// Server-provided messages are passed through unchanged, unreachable-backend failures get
    /// the fixed connection wording, and everything else falls back to `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Remote {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            Self::Network(_) => CONNECTION_FAILED_MESSAGE.to_string(),
            _ => fallback.to_string(),
        }
    }

    /// Returns `true` when the request never reached the backend.
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_server_text() {
        let err = GatewayError::remote(409, "File or directory already exists");
        assert_eq!(
            err.user_message("Failed to create file."),
            "File or directory already exists"
        );
    }

    #[test]
    fn user_message_distinguishes_network_from_fallback() {
        let network = GatewayError::Network("fetch failed".to_string());
        let bare = GatewayError::Remote {
            status: 500,
            message: None,
        };

        assert_eq!(network.user_message("Failed."), CONNECTION_FAILED_MESSAGE);
        assert_eq!(bare.user_message("Failed."), "Failed.");
        assert!(network.is_network());
    }
}
