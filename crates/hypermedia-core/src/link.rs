//! Hypermedia references.
//!
//! Two shapes appear on the wire: [`Link`] carries its own relationship token
//! (event frames name the affected resource this way), while [`Href`] is a
//! bare reference whose token is the key of the `_links` map holding it.

use serde::{Deserialize, Serialize};

use crate::kind::ResourceKind;

/// A hypermedia link with an explicit relationship token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Relationship token naming what the target is.
    pub rel: String,
    /// Target reference, absolute or relative to the service base.
    pub href: String,
}

impl Link {
    /// Create a link from a token and a reference.
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
        }
    }

    /// The resource kind this link points at.
    pub fn kind(&self) -> ResourceKind {
        ResourceKind::from_token(&self.rel)
    }
}

/// A bare hypermedia reference, used as a `_links` map value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Href {
    /// Target reference, absolute or relative to the service base.
    pub href: String,
}

impl Href {
    /// Create a reference.
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }
}
