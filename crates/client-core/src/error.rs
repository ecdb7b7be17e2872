//! Error types for the client engine.
//!
//! Errors surface only on operations the caller explicitly invoked. Event
//! routing never produces errors for notifications it does not own; it
//! reports non-consumption instead, so one malformed or unknown notification
//! can never poison the stream for everything behind it.

use thiserror::Error;

use commlink_hypermedia_core::ModelError;

use crate::transport::TransportError;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors returned by client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The communication resource does not advertise the requested operation.
    ///
    /// Raised before any network interaction takes place.
    #[error("Capability not available: {capability}")]
    CapabilityUnavailable {
        /// The capability that was requested.
        capability: String,
    },

    /// An operation with this correlation id is already in flight.
    #[error("Operation {operation_id} is already registered")]
    DuplicateOperation {
        /// The colliding correlation id.
        operation_id: String,
    },

    /// No confirming event arrived inside the configured window.
    ///
    /// The outbound request is neither cancelled nor retried; a confirming
    /// event that arrives later is discarded.
    #[error("Operation {operation_id} timed out after {seconds} seconds")]
    OperationTimeout {
        /// The correlation id of the operation that timed out.
        operation_id: String,
        /// The wait window that elapsed.
        seconds: u64,
    },

    /// The service confirmed the operation with the wrong resource kind.
    #[error("Operation {operation_id} expected an invitation of kind {expected} but the service delivered {actual}")]
    ProtocolMismatch {
        /// The correlation id of the operation.
        operation_id: String,
        /// The invitation kind the operation was started for.
        expected: String,
        /// The invitation kind the service actually delivered.
        actual: String,
    },

    /// A hypermedia reference could not be resolved.
    #[error("Invalid link: {message}")]
    InvalidLink {
        /// What went wrong.
        message: String,
    },

    /// The transport collaborator failed to deliver a request.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// A programming or serialization error inside the engine.
    #[error("Internal error: {message}")]
    Internal {
        /// What went wrong.
        message: String,
    },
}

impl ClientError {
    /// Create a capability-unavailable error.
    pub fn capability_unavailable(capability: impl Into<String>) -> Self {
        Self::CapabilityUnavailable {
            capability: capability.into(),
        }
    }

    /// Create a duplicate-operation error.
    pub fn duplicate_operation(operation_id: impl Into<String>) -> Self {
        Self::DuplicateOperation {
            operation_id: operation_id.into(),
        }
    }

    /// Create an invalid-link error.
    pub fn invalid_link(message: impl Into<String>) -> Self {
        Self::InvalidLink {
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether this error is the bounded-wait expiring.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::OperationTimeout { .. })
    }
}

impl From<ModelError> for ClientError {
    fn from(error: ModelError) -> Self {
        match error {
            ModelError::InvalidUri(e) => Self::InvalidLink {
                message: e.to_string(),
            },
            ModelError::Decode(e) => Self::Internal {
                message: format!("Resource decode failed: {}", e),
            },
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(error: serde_json::Error) -> Self {
        Self::Internal {
            message: format!("Serialization failed: {}", error),
        }
    }
}

impl From<url::ParseError> for ClientError {
    fn from(error: url::ParseError) -> Self {
        Self::InvalidLink {
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formats() {
        let err = ClientError::capability_unavailable("startAudioVideo");
        assert_eq!(err.to_string(), "Capability not available: startAudioVideo");

        let err = ClientError::OperationTimeout {
            operation_id: "op-9".to_string(),
            seconds: 30,
        };
        assert_eq!(err.to_string(), "Operation op-9 timed out after 30 seconds");
        assert!(err.is_timeout());

        let err = ClientError::ProtocolMismatch {
            operation_id: "op-9".to_string(),
            expected: "audio/video".to_string(),
            actual: "messaging".to_string(),
        };
        assert!(err.to_string().contains("expected an invitation of kind audio/video"));
    }

    #[test]
    fn transport_errors_surface_unchanged() {
        let transport = TransportError::rejected(503, "throttled");
        let err = ClientError::from(transport);
        assert!(matches!(err, ClientError::Transport(_)));
        assert!(err.to_string().contains("throttled"));
    }

    #[test]
    fn model_errors_map_by_variant() {
        let bad_uri = url::Url::parse("not a url").unwrap_err();
        let err = ClientError::from(ModelError::InvalidUri(bad_uri));
        assert!(matches!(err, ClientError::InvalidLink { .. }));

        let bad_doc = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ClientError::from(ModelError::Decode(bad_doc));
        assert!(matches!(err, ClientError::Internal { .. }));
    }
}
