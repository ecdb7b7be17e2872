//! Conversation entities tracked by the client.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use commlink_hypermedia_core::{
    decode_embedded, ConversationResource, ConversationState, EventNotification, EventOperation,
};

/// A conversation the client currently mirrors.
///
/// Identified by its normalized URI for as long as the service considers it
/// alive. The entity holds the latest document snapshot pushed for the
/// resource; it is the unit conversation-scoped event batches are forwarded
/// to.
#[derive(Debug)]
pub struct Conversation {
    uri: String,
    created_at: DateTime<Utc>,
    resource: RwLock<ConversationResource>,
    ended: AtomicBool,
}

impl Conversation {
    pub(crate) fn new(uri: String, resource: ConversationResource) -> Self {
        Self {
            uri,
            created_at: Utc::now(),
            resource: RwLock::new(resource),
            ended: AtomicBool::new(false),
        }
    }

    /// Normalized URI identifying this conversation.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// When the client started tracking this conversation.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether the service has deleted this conversation.
    ///
    /// An ended entity is no longer tracked; a later notification for the
    /// same URI produces a fresh instance instead of reviving this one.
    pub fn is_ended(&self) -> bool {
        self.ended.load(Ordering::SeqCst)
    }

    /// Current lifecycle state, if the service has reported one.
    pub async fn state(&self) -> Option<ConversationState> {
        self.resource.read().await.state.clone()
    }

    /// Subject line, if the service has reported one.
    pub async fn subject(&self) -> Option<String> {
        self.resource.read().await.subject.clone()
    }

    /// Copy of the latest document snapshot.
    pub async fn snapshot(&self) -> ConversationResource {
        self.resource.read().await.clone()
    }

    /// Apply one notification to this entity.
    pub(crate) async fn apply_event(&self, event: &EventNotification) {
        if let Some(document) = event.embedded.as_ref() {
            match decode_embedded::<ConversationResource>(document) {
                Ok(resource) => {
                    *self.resource.write().await = resource;
                }
                Err(e) => {
                    warn!("Conversation {} kept stale snapshot: {}", self.uri, e);
                }
            }
        }

        if event.relationship == EventOperation::Deleted {
            self.ended.store(true, Ordering::SeqCst);
            debug!("Conversation {} marked ended", self.uri);
        } else {
            debug!("Conversation {} applied {} event", self.uri, event.relationship);
        }
    }
}
