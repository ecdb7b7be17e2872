//! Event handler seam for application callbacks.
//!
//! Externally originated activity surfaces through a single injected
//! handler: whoever constructs the client decides who hears about incoming
//! invitations, instead of the engine walking up some chain of parent
//! objects looking for one.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::conversation::Conversation;
use crate::invitation::Invitation;

/// Shared, swappable handler slot.
pub(crate) type SharedEventHandler = Arc<RwLock<Option<Arc<dyn CommunicationEventHandler>>>>;

/// Callbacks for activity the local application did not initiate.
///
/// `on_incoming_invitation` is the only path by which remote-initiated
/// operations surface; locally initiated operations come back through the
/// future returned by the start call instead. The conversation callbacks are
/// bookkeeping notifications with no-op defaults.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use async_trait::async_trait;
/// use commlink_client_core::{CommunicationEventHandler, Invitation};
///
/// struct AcceptanceLogger;
///
/// #[async_trait]
/// impl CommunicationEventHandler for AcceptanceLogger {
///     async fn on_incoming_invitation(&self, invitation: Arc<Invitation>) {
///         println!(
///             "incoming {} invitation {}",
///             invitation.kind(),
///             invitation.operation_id()
///         );
///     }
/// }
/// ```
#[async_trait]
pub trait CommunicationEventHandler: Send + Sync {
    /// A remote party started a new invitation aimed at this endpoint.
    ///
    /// Fired exactly once per invitation, on the notification that reports
    /// it started. An invitation first observed in its end state never
    /// fires this.
    async fn on_incoming_invitation(&self, invitation: Arc<Invitation>);

    /// A conversation entered the local resource graph.
    async fn on_conversation_added(&self, _conversation: Arc<Conversation>) {
        // Default: do nothing
    }

    /// A conversation was deleted by the service and left the graph.
    async fn on_conversation_removed(&self, _conversation: Arc<Conversation>) {
        // Default: do nothing
    }
}
