//! Transport seam.
//!
//! The engine never talks to the network itself. Outbound creation requests
//! go through [`PlatformTransport`], implemented by whatever HTTP stack the
//! embedding application uses; inbound notifications come back through
//! [`crate::CommunicationClient::process_event_batch`]. The two channels are
//! deliberately independent: the transport only reports that the service
//! accepted a request, never its outcome.

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

/// Errors a transport implementation can report.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The request could not be delivered.
    #[error("Request to {target} failed: {message}")]
    RequestFailed {
        /// Where the request was headed.
        target: String,
        /// What went wrong.
        message: String,
    },

    /// The service received the request and refused it.
    #[error("Service rejected the request with status {status}: {message}")]
    Rejected {
        /// Status code the service answered with.
        status: u16,
        /// What the service said.
        message: String,
    },

    /// The transport has no usable connection.
    #[error("Transport not connected: {message}")]
    NotConnected {
        /// What went wrong.
        message: String,
    },
}

impl TransportError {
    /// Create a request-failed error.
    pub fn request_failed(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RequestFailed {
            target: target.into(),
            message: message.into(),
        }
    }

    /// Create a rejected error.
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Create a not-connected error.
    pub fn not_connected(message: impl Into<String>) -> Self {
        Self::NotConnected {
            message: message.into(),
        }
    }
}

/// Outbound side of the hypermedia service.
///
/// `post_create` submits a resource-creation request and returns once the
/// service has *accepted* it. The result of the operation arrives later as a
/// pushed event carrying the same `correlation_id`, or never arrives at all.
#[async_trait]
pub trait PlatformTransport: Send + Sync {
    /// POST a creation request to `target`.
    ///
    /// `correlation_id` duplicates the correlation context embedded in the
    /// body so transports can carry it in whatever diagnostic headers they
    /// use.
    async fn post_create(
        &self,
        target: Url,
        body: serde_json::Value,
        correlation_id: &str,
    ) -> Result<(), TransportError>;
}
