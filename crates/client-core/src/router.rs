//! Event routing.
//!
//! Every pushed notification names a resource through a link; the router
//! turns that into mutations of the local resource graph. Notifications from
//! the communication hub are dispatched one by one in arrival order:
//! conversation events create, update, or retire conversation entities,
//! invitation events drive the invitation procedure, and hub events refresh
//! the capability snapshot. Batches observed by a conversation are forwarded
//! wholesale to that conversation when it is tracked, and dropped when it is
//! not. An entity retired by a terminal notification is never revived; the
//! next notification for the same key starts a fresh one.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use url::Url;

use commlink_hypermedia_core::{
    decode_embedded, normalize_uri, CommunicationResource, ConversationResource, Direction,
    EventBatch, EventNotification, EventOperation, InvitationResource, ResourceKind,
};

use crate::cache::ResourceCache;
use crate::conversation::Conversation;
use crate::correlation::OperationCorrelator;
use crate::events::{CommunicationEventHandler, SharedEventHandler};
use crate::invitation::{Invitation, InvitationKind};

/// Routes pushed notifications into the local resource graph.
pub struct EventRouter {
    conversations: Arc<ResourceCache<String, Conversation>>,
    invitations: Arc<ResourceCache<String, Invitation>>,
    correlator: Arc<OperationCorrelator<Arc<Invitation>>>,
    resource: Arc<RwLock<Option<CommunicationResource>>>,
    handler: SharedEventHandler,
}

impl EventRouter {
    pub(crate) fn new(
        conversations: Arc<ResourceCache<String, Conversation>>,
        invitations: Arc<ResourceCache<String, Invitation>>,
        correlator: Arc<OperationCorrelator<Arc<Invitation>>>,
        resource: Arc<RwLock<Option<CommunicationResource>>>,
        handler: SharedEventHandler,
    ) -> Self {
        Self {
            conversations,
            invitations,
            correlator,
            resource,
            handler,
        }
    }

    /// Dispatch a batch, classified by the resource that observed it.
    ///
    /// Returns how many of its notifications were consumed. Unconsumed
    /// notifications are not errors; they are events this engine does not
    /// own.
    pub async fn dispatch_batch(&self, batch: &EventBatch) -> usize {
        match batch.sender.kind() {
            ResourceKind::Communication => {
                let mut consumed = 0;
                for event in &batch.events {
                    if self.dispatch_event(&batch.base_url, event).await {
                        consumed += 1;
                    }
                }
                consumed
            }
            ResourceKind::Conversation => self.forward_to_conversation(batch).await,
            other => {
                debug!(
                    "Ignoring batch of {} event(s) from unhandled sender kind {}",
                    batch.events.len(),
                    other
                );
                0
            }
        }
    }

    /// Dispatch one hub-observed notification. Returns whether it was consumed.
    pub async fn dispatch_event(&self, base_url: &Url, event: &EventNotification) -> bool {
        match event.kind() {
            ResourceKind::Conversation => self.handle_conversation_event(base_url, event).await,
            ResourceKind::Communication => self.handle_communication_event(event).await,
            ResourceKind::MessagingInvitation => {
                self.handle_invitation_event(base_url, event, InvitationKind::Messaging)
                    .await
            }
            ResourceKind::AudioVideoInvitation => {
                self.handle_invitation_event(base_url, event, InvitationKind::AudioVideo)
                    .await
            }
            ResourceKind::OnlineMeetingInvitation => {
                self.handle_invitation_event(base_url, event, InvitationKind::OnlineMeeting)
                    .await
            }
            ResourceKind::ParticipantInvitation => {
                self.handle_invitation_event(base_url, event, InvitationKind::Participant)
                    .await
            }
            other => {
                debug!("Leaving {} event for {} unconsumed", event.relationship, other);
                false
            }
        }
    }

    /// Forward a conversation-observed batch to the conversation it names.
    async fn forward_to_conversation(&self, batch: &EventBatch) -> usize {
        let uri = match normalize_uri(&batch.base_url, &batch.sender.href) {
            Ok(uri) => uri,
            Err(e) => {
                warn!(
                    "Dropping conversation batch with unresolvable sender {}: {}",
                    batch.sender.href, e
                );
                return 0;
            }
        };

        match self.conversations.get(&uri) {
            Some(conversation) => {
                for event in &batch.events {
                    conversation.apply_event(event).await;
                }
                batch.events.len()
            }
            None => {
                // Batches for conversations we no longer (or never) track are
                // dropped without resurrecting the entity.
                debug!(
                    "Dropping {} event(s) for untracked conversation {}",
                    batch.events.len(),
                    uri
                );
                0
            }
        }
    }

    async fn handle_conversation_event(&self, base_url: &Url, event: &EventNotification) -> bool {
        let uri = match normalize_uri(base_url, &event.link.href) {
            Ok(uri) => uri,
            Err(e) => {
                warn!("Conversation event with unresolvable link {}: {}", event.link.href, e);
                return false;
            }
        };

        let conversation = self.conversations.get_or_create(uri.clone(), || {
            let resource = event
                .embedded
                .as_ref()
                .and_then(|document| decode_embedded::<ConversationResource>(document).ok())
                .unwrap_or_default();
            Conversation::new(uri.clone(), resource)
        });

        // Retire the entity before delivering its final event so a racing
        // notification for the same URI starts over instead of reviving it.
        let deleted = event.relationship == EventOperation::Deleted;
        if deleted {
            self.conversations.remove(&uri);
        }

        conversation.apply_event(event).await;

        match event.relationship {
            EventOperation::Added => {
                info!("Conversation {} added", uri);
                if let Some(handler) = self.current_handler().await {
                    handler.on_conversation_added(Arc::clone(&conversation)).await;
                }
            }
            EventOperation::Deleted => {
                info!("Conversation {} removed", uri);
                if let Some(handler) = self.current_handler().await {
                    handler.on_conversation_removed(Arc::clone(&conversation)).await;
                }
            }
            _ => {}
        }

        true
    }

    async fn handle_communication_event(&self, event: &EventNotification) -> bool {
        let document = match event.embedded.as_ref() {
            Some(document) => document,
            None => {
                debug!("Communication {} event without a document", event.relationship);
                return false;
            }
        };
        match decode_embedded::<CommunicationResource>(document) {
            Ok(updated) => {
                *self.resource.write().await = Some(updated);
                debug!("Communication resource refreshed from {} event", event.relationship);
                true
            }
            Err(e) => {
                warn!("Failed to decode communication resource update: {}", e);
                false
            }
        }
    }

    /// The invitation procedure.
    ///
    /// Create-or-fetch by operation id, bind the related conversation once,
    /// retire on the end-state notification, update the entity, surface
    /// incoming starts to the handler, and finally try to wake a waiting
    /// caller. The resolution attempt runs for every invitation
    /// notification; when nobody is waiting it reports false and that is
    /// fine.
    async fn handle_invitation_event(
        &self,
        base_url: &Url,
        event: &EventNotification,
        kind: InvitationKind,
    ) -> bool {
        let document = match event.embedded.as_ref() {
            Some(document) => document,
            None => {
                warn!("Invitation event for {} carries no document", event.link.href);
                return false;
            }
        };
        let resource = match decode_embedded::<InvitationResource>(document) {
            Ok(resource) => resource,
            Err(e) => {
                warn!("Failed to decode invitation event for {}: {}", event.link.href, e);
                return false;
            }
        };
        let operation_id = match resource.operation_context.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                warn!("Invitation event for {} carries no operation context", event.link.href);
                return false;
            }
        };

        let invitation = self.invitations.get_or_create(operation_id.clone(), || {
            Invitation::new(kind, operation_id.clone(), resource.clone())
        });
        if invitation.kind() != kind {
            debug!(
                "Operation {} tracked as {} but event arrived as {}",
                operation_id,
                invitation.kind(),
                kind
            );
        }

        if invitation.related_conversation().is_none() {
            if let Some(conversation_link) = resource.links.conversation.as_ref() {
                match normalize_uri(base_url, &conversation_link.href) {
                    Ok(conversation_uri) => {
                        let conversation =
                            self.conversations.get_or_create(conversation_uri.clone(), || {
                                Conversation::new(
                                    conversation_uri.clone(),
                                    ConversationResource::default(),
                                )
                            });
                        if invitation.set_related_conversation(conversation) {
                            debug!(
                                "Invitation {} bound to conversation {}",
                                operation_id, conversation_uri
                            );
                        }
                    }
                    Err(e) => {
                        warn!(
                            "Invitation {} carries unresolvable conversation link: {}",
                            operation_id, e
                        );
                    }
                }
            }
        }

        // End state frees the id for a logically new operation.
        if event.relationship == EventOperation::Completed {
            self.invitations.remove(&operation_id);
            info!("Invitation {} completed", operation_id);
        }

        invitation.apply_event(event).await;

        if event.relationship == EventOperation::Started
            && resource.direction == Some(Direction::Incoming)
        {
            info!("Incoming {} invitation {} started", kind, operation_id);
            match self.current_handler().await {
                Some(handler) => handler.on_incoming_invitation(Arc::clone(&invitation)).await,
                None => debug!("No handler registered for incoming invitation {}", operation_id),
            }
        }

        if self.correlator.resolve(&operation_id, Arc::clone(&invitation)) {
            debug!("Operation {} confirmed, waiter resolved", operation_id);
        } else {
            debug!("No waiter for invitation notification {}", operation_id);
        }

        true
    }

    /// Snapshot of the current handler without holding the slot across
    /// callback awaits.
    async fn current_handler(&self) -> Option<Arc<dyn CommunicationEventHandler>> {
        self.handler.read().await.clone()
    }
}
