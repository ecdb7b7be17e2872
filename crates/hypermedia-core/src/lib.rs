//! # Commlink Hypermedia Core
//!
//! Wire-level model for the commlink stack. The remote service is hypermedia
//! driven: every resource names the operations it currently supports through
//! links, and change notifications arrive as event frames grouped under the
//! resource that observed them. This crate defines those shapes plus the URI
//! handling the engine layer needs, and nothing else. No transport, no
//! routing, no state.
//!
//! ## What lives here
//!
//! - [`Link`] / [`Href`] - hypermedia references as they appear on the wire
//! - [`ResourceKind`] - the closed set of resource tokens the stack routes on
//! - [`EventNotification`] / [`EventBatch`] - pushed change notifications
//! - Typed resource documents ([`CommunicationResource`],
//!   [`ConversationResource`], [`InvitationResource`]) and the outbound
//!   request inputs that start new operations
//! - [`normalize_uri`] / [`absolute_url`] - canonical resource identity

#![warn(missing_docs)]

pub mod error;
pub mod event;
pub mod inputs;
pub mod kind;
pub mod link;
pub mod resources;
pub mod uri;

pub use error::ModelError;
pub use event::{Direction, EventBatch, EventNotification, EventOperation};
pub use inputs::{AudioVideoInvitationInput, MediaHostType, MessagingInvitationInput};
pub use kind::ResourceKind;
pub use link::{Href, Link};
pub use resources::{
    decode_embedded, CommunicationLinks, CommunicationResource, ConversationLinks,
    ConversationResource, ConversationState, InvitationLinks, InvitationResource,
    InvitationState,
};
pub use uri::{absolute_url, normalize_uri};
