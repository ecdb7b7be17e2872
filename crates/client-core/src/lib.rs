//! # Commlink Client Core - Event Correlation and Resource Tracking
//!
//! This crate is the client-side engine for a hypermedia-driven communication
//! service. The service owns every resource (the communication hub,
//! conversations, invitations) and pushes change notifications to the client;
//! this crate mirrors the subset the client cares about and keeps the mirror
//! consistent:
//!
//! - **Resource tracking**: one shared entity per conversation or invitation,
//!   created on first reference and retired on its terminal event
//! - **Operation correlation**: start operations suspend until the service
//!   confirms them through the event channel, with deterministic cleanup on
//!   timeout or failure
//! - **Event routing**: pushed batches fan out to the entities they describe,
//!   and externally originated activity surfaces through a handler trait
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use async_trait::async_trait;
//! use url::Url;
//!
//! use commlink_client_core::{
//!     ClientConfig, CommunicationCapability, CommunicationClient, PlatformTransport,
//!     TransportError,
//! };
//!
//! struct HttpTransport;
//!
//! #[async_trait]
//! impl PlatformTransport for HttpTransport {
//!     async fn post_create(
//!         &self,
//!         target: Url,
//!         body: serde_json::Value,
//!         correlation_id: &str,
//!     ) -> Result<(), TransportError> {
//!         // Hand the request to your HTTP stack here.
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let base = Url::parse("https://service.example.com/comm/v1/")?;
//!     let client = CommunicationClient::new(ClientConfig::new(base), Arc::new(HttpTransport));
//!
//!     // Install the bootstrap hub document, then feed pushed batches into
//!     // client.process_event_batch(..) from your notification channel.
//!
//!     if client.supports(CommunicationCapability::StartMessaging).await {
//!         let invitation = client
//!             .start_messaging("hello", "sip:bob@example.com", "https://app.example.com/cb")
//!             .await?;
//!         println!("confirmed invitation {}", invitation.operation_id());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//!   start_* operations                     pushed event batches
//!         |                                        |
//!         v                                        v
//!   CommunicationClient --- register ---> OperationCorrelator
//!         |                                        ^
//!         | post_create                            | resolve
//!         v                                        |
//!   PlatformTransport                        EventRouter
//!                                                  |
//!                                    conversation and invitation caches,
//!                                    CommunicationEventHandler callbacks
//! ```
//!
//! The service never answers a start request with the created resource; the
//! confirming state arrives later as an event carrying the operation id the
//! client chose. [`OperationCorrelator`] is the rendezvous between the two.

pub mod cache;
pub mod client;
pub mod conversation;
pub mod correlation;
pub mod error;
pub mod events;
pub mod invitation;
pub mod router;
pub mod transport;

pub use cache::ResourceCache;
pub use client::{ClientConfig, ClientStats, CommunicationCapability, CommunicationClient};
pub use conversation::Conversation;
pub use correlation::{OperationCorrelator, PendingOperation};
pub use error::{ClientError, ClientResult};
pub use events::CommunicationEventHandler;
pub use invitation::{Invitation, InvitationKind};
pub use router::EventRouter;
pub use transport::{PlatformTransport, TransportError};

// Re-export the wire model so applications can depend on this crate alone.
pub use commlink_hypermedia_core as hypermedia;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
