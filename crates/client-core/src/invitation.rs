//! Invitation entities tracked by the client.

use std::fmt;
use std::sync::{Arc, OnceLock};

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use commlink_hypermedia_core::{
    decode_embedded, Direction, EventNotification, EventOperation, InvitationResource,
    InvitationState, ResourceKind,
};

use crate::conversation::Conversation;

/// The invitation families the service can push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvitationKind {
    /// Instant-messaging invitation.
    Messaging,
    /// Audio/video call invitation.
    AudioVideo,
    /// Online meeting join invitation.
    OnlineMeeting,
    /// Participant join invitation.
    Participant,
}

impl InvitationKind {
    /// Narrow a resource kind down to an invitation family.
    pub fn from_resource_kind(kind: &ResourceKind) -> Option<Self> {
        match kind {
            ResourceKind::MessagingInvitation => Some(Self::Messaging),
            ResourceKind::AudioVideoInvitation => Some(Self::AudioVideo),
            ResourceKind::OnlineMeetingInvitation => Some(Self::OnlineMeeting),
            ResourceKind::ParticipantInvitation => Some(Self::Participant),
            _ => None,
        }
    }
}

impl fmt::Display for InvitationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Messaging => "messaging",
            Self::AudioVideo => "audio/video",
            Self::OnlineMeeting => "online meeting",
            Self::Participant => "participant",
        };
        f.write_str(name)
    }
}

/// An invitation the client currently mirrors.
///
/// Identified by the operation id (correlation context) that created it.
/// Outgoing invitations are handed to the caller that started the operation;
/// incoming ones surface through the registered event handler.
#[derive(Debug)]
pub struct Invitation {
    kind: InvitationKind,
    operation_id: String,
    created_at: DateTime<Utc>,
    resource: RwLock<InvitationResource>,
    related_conversation: OnceLock<Arc<Conversation>>,
}

impl Invitation {
    pub(crate) fn new(kind: InvitationKind, operation_id: String, resource: InvitationResource) -> Self {
        Self {
            kind,
            operation_id,
            created_at: Utc::now(),
            resource: RwLock::new(resource),
            related_conversation: OnceLock::new(),
        }
    }

    /// Which invitation family this is.
    pub fn kind(&self) -> InvitationKind {
        self.kind
    }

    /// The operation id this invitation is correlated under.
    pub fn operation_id(&self) -> &str {
        &self.operation_id
    }

    /// When the client started tracking this invitation.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The conversation this invitation belongs to, once known.
    ///
    /// Set from the first notification that carries a conversation link and
    /// never reassigned afterwards. This is a back-reference: the
    /// conversation's lifetime is governed by its own cache entry, not by
    /// this invitation.
    pub fn related_conversation(&self) -> Option<Arc<Conversation>> {
        self.related_conversation.get().cloned()
    }

    /// Which side originated the invitation, if reported.
    pub async fn direction(&self) -> Option<Direction> {
        self.resource.read().await.direction
    }

    /// Current lifecycle state, if reported.
    pub async fn state(&self) -> Option<InvitationState> {
        self.resource.read().await.state.clone()
    }

    /// Invited party, if reported.
    pub async fn to(&self) -> Option<String> {
        self.resource.read().await.to.clone()
    }

    /// Copy of the latest document snapshot.
    pub async fn snapshot(&self) -> InvitationResource {
        self.resource.read().await.clone()
    }

    /// Bind the related conversation. Returns `false` when already bound.
    pub(crate) fn set_related_conversation(&self, conversation: Arc<Conversation>) -> bool {
        self.related_conversation.set(conversation).is_ok()
    }

    /// Apply one notification to this entity.
    pub(crate) async fn apply_event(&self, event: &EventNotification) {
        if let Some(document) = event.embedded.as_ref() {
            match decode_embedded::<InvitationResource>(document) {
                Ok(resource) => {
                    *self.resource.write().await = resource;
                }
                Err(e) => {
                    warn!("Invitation {} kept stale snapshot: {}", self.operation_id, e);
                }
            }
        }

        if event.relationship == EventOperation::Completed {
            debug!("Invitation {} reached its end state", self.operation_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commlink_hypermedia_core::ConversationResource;

    fn invitation() -> Invitation {
        Invitation::new(
            InvitationKind::Messaging,
            "op-1".to_string(),
            InvitationResource::default(),
        )
    }

    fn conversation(uri: &str) -> Arc<Conversation> {
        Arc::new(Conversation::new(uri.to_string(), ConversationResource::default()))
    }

    #[test]
    fn related_conversation_binds_exactly_once() {
        let invitation = invitation();
        assert!(invitation.related_conversation().is_none());

        let first = conversation("https://service.example.com/conv/1");
        let second = conversation("https://service.example.com/conv/2");

        assert!(invitation.set_related_conversation(Arc::clone(&first)));
        assert!(!invitation.set_related_conversation(second));

        let bound = invitation.related_conversation().expect("bound");
        assert!(Arc::ptr_eq(&bound, &first));
    }

    #[test]
    fn kind_narrowing_covers_all_invitation_tokens() {
        assert_eq!(
            InvitationKind::from_resource_kind(&ResourceKind::MessagingInvitation),
            Some(InvitationKind::Messaging)
        );
        assert_eq!(
            InvitationKind::from_resource_kind(&ResourceKind::AudioVideoInvitation),
            Some(InvitationKind::AudioVideo)
        );
        assert_eq!(
            InvitationKind::from_resource_kind(&ResourceKind::OnlineMeetingInvitation),
            Some(InvitationKind::OnlineMeeting)
        );
        assert_eq!(
            InvitationKind::from_resource_kind(&ResourceKind::ParticipantInvitation),
            Some(InvitationKind::Participant)
        );
        assert_eq!(InvitationKind::from_resource_kind(&ResourceKind::Conversation), None);
    }

    #[tokio::test]
    async fn apply_event_refreshes_the_snapshot() {
        let invitation = invitation();
        let event = EventNotification::new(
            commlink_hypermedia_core::Link::new("messagingInvitation", "/inv/901"),
            EventOperation::Updated,
        )
        .with_embedded(serde_json::json!({
            "operationContext": "op-1",
            "direction": "Outgoing",
            "state": "Connected"
        }));

        invitation.apply_event(&event).await;

        assert_eq!(invitation.direction().await, Some(Direction::Outgoing));
        assert_eq!(invitation.state().await, Some(InvitationState::Connected));
    }
}
