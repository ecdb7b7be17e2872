//! Start operations.
//!
//! Every start operation follows the same arc: check that the hub currently
//! advertises the action, register a correlation slot, post the typed input,
//! then suspend until the confirming invitation event arrives or the wait
//! window elapses. A failed capability check costs no network interaction.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use commlink_hypermedia_core::{
    absolute_url, AudioVideoInvitationInput, CommunicationResource, MediaHostType,
    MessagingInvitationInput,
};

use crate::client::manager::CommunicationClient;
use crate::client::types::CommunicationCapability;
use crate::error::{ClientError, ClientResult};
use crate::invitation::{Invitation, InvitationKind};

impl CommunicationClient {
    /// Whether the hub currently advertises `capability`.
    ///
    /// Answers from the tracked hub document alone, without touching the
    /// network. Returns `false` while no document is installed.
    pub async fn supports(&self, capability: CommunicationCapability) -> bool {
        let guard = self.resource.read().await;
        match guard.as_ref() {
            Some(resource) => action_href(resource, capability).is_some(),
            None => false,
        }
    }

    /// Start an instant-messaging conversation with `to`.
    ///
    /// Resolves to the tracked invitation once the service confirms the
    /// operation through the event channel.
    pub async fn start_messaging(
        &self,
        subject: impl Into<String>,
        to: impl Into<String>,
        callback_url: impl Into<String>,
    ) -> ClientResult<Arc<Invitation>> {
        let operation_id = new_operation_id();
        let input = MessagingInvitationInput {
            operation_context: operation_id.clone(),
            to: to.into(),
            subject: Some(subject.into()),
            callback_url: Some(callback_url.into()),
            local_user_display_name: None,
            local_user_uri: None,
        };
        self.start_invitation(
            CommunicationCapability::StartMessaging,
            InvitationKind::Messaging,
            operation_id,
            serde_json::to_value(&input)?,
        )
        .await
    }

    /// Start an instant-messaging conversation presenting an overridden local
    /// identity.
    pub async fn start_messaging_with_identity(
        &self,
        subject: impl Into<String>,
        to: impl Into<String>,
        callback_url: impl Into<String>,
        local_user_display_name: impl Into<String>,
        local_user_uri: impl Into<String>,
    ) -> ClientResult<Arc<Invitation>> {
        let operation_id = new_operation_id();
        let input = MessagingInvitationInput {
            operation_context: operation_id.clone(),
            to: to.into(),
            subject: Some(subject.into()),
            callback_url: Some(callback_url.into()),
            local_user_display_name: Some(local_user_display_name.into()),
            local_user_uri: Some(local_user_uri.into()),
        };
        self.start_invitation(
            CommunicationCapability::StartMessagingWithIdentity,
            InvitationKind::Messaging,
            operation_id,
            serde_json::to_value(&input)?,
        )
        .await
    }

    /// Start an audio/video call with `to`.
    pub async fn start_audio_video(
        &self,
        subject: impl Into<String>,
        to: impl Into<String>,
        callback_url: impl Into<String>,
    ) -> ClientResult<Arc<Invitation>> {
        let operation_id = new_operation_id();
        let input = AudioVideoInvitationInput {
            operation_context: operation_id.clone(),
            to: to.into(),
            subject: Some(subject.into()),
            callback_url: Some(callback_url.into()),
            media_host: MediaHostType::default(),
        };
        self.start_invitation(
            CommunicationCapability::StartAudioVideo,
            InvitationKind::AudioVideo,
            operation_id,
            serde_json::to_value(&input)?,
        )
        .await
    }

    /// Start an audio-only call with `to`.
    ///
    /// The service confirms audio-only starts with an audio/video invitation.
    pub async fn start_audio(
        &self,
        subject: impl Into<String>,
        to: impl Into<String>,
        callback_url: impl Into<String>,
    ) -> ClientResult<Arc<Invitation>> {
        let operation_id = new_operation_id();
        let input = AudioVideoInvitationInput {
            operation_context: operation_id.clone(),
            to: to.into(),
            subject: Some(subject.into()),
            callback_url: Some(callback_url.into()),
            media_host: MediaHostType::default(),
        };
        self.start_invitation(
            CommunicationCapability::StartAudio,
            InvitationKind::AudioVideo,
            operation_id,
            serde_json::to_value(&input)?,
        )
        .await
    }

    /// Shared arc of the four start operations.
    async fn start_invitation(
        &self,
        capability: CommunicationCapability,
        expected: InvitationKind,
        operation_id: String,
        body: serde_json::Value,
    ) -> ClientResult<Arc<Invitation>> {
        let href = {
            let guard = self.resource.read().await;
            guard
                .as_ref()
                .and_then(|resource| action_href(resource, capability))
        };
        let href = match href {
            Some(href) => href,
            None => {
                warn!("Rejecting {}: capability not advertised", capability);
                return Err(ClientError::capability_unavailable(capability.to_string()));
            }
        };

        let target = absolute_url(&self.config.base_url, &href)?;
        let pending = self.correlator.register(operation_id.clone())?;

        info!("Posting {} request as operation {}", capability, operation_id);
        self.transport
            .post_create(target, body, &operation_id)
            .await?;

        let invitation = match pending.wait(self.config.event_wait_timeout).await {
            Ok(invitation) => invitation,
            Err(e) => {
                warn!("Operation {} failed while waiting: {}", operation_id, e);
                return Err(e);
            }
        };

        if invitation.kind() != expected {
            warn!(
                "Operation {} confirmed with {} invitation, expected {}",
                operation_id,
                invitation.kind(),
                expected
            );
            return Err(ClientError::ProtocolMismatch {
                operation_id,
                expected: expected.to_string(),
                actual: invitation.kind().to_string(),
            });
        }

        info!("Operation {} confirmed", operation_id);
        Ok(invitation)
    }
}

fn new_operation_id() -> String {
    Uuid::new_v4().to_string()
}

fn action_href(
    resource: &CommunicationResource,
    capability: CommunicationCapability,
) -> Option<String> {
    let link = match capability {
        CommunicationCapability::StartMessaging => resource.links.start_messaging.as_ref(),
        CommunicationCapability::StartMessagingWithIdentity => {
            resource.links.start_messaging_with_identity.as_ref()
        }
        CommunicationCapability::StartAudioVideo => resource.links.start_audio_video.as_ref(),
        CommunicationCapability::StartAudio => resource.links.start_audio.as_ref(),
    };
    // A link with a blank href advertises nothing the client can post to.
    link.map(|href| href.href.clone())
        .filter(|href| !href.trim().is_empty())
}
