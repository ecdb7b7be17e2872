//! Error type for wire model conversions.

use thiserror::Error;

/// Errors produced while decoding wire documents or resolving references.
#[derive(Error, Debug)]
pub enum ModelError {
    /// An embedded resource document did not match the expected shape.
    #[error("Failed to decode embedded resource: {0}")]
    Decode(#[from] serde_json::Error),

    /// A link could not be resolved into an absolute URL.
    #[error("Invalid URI reference: {0}")]
    InvalidUri(#[from] url::ParseError),
}
