//! Typed resource documents.
//!
//! The service describes resources as JSON documents whose `_links` map names
//! the operations currently available on them. Documents are decoded out of
//! the `_embedded` member of event notifications. Fields outside the model
//! are ignored rather than rejected, so the client keeps working when the
//! service grows its documents.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::event::Direction;
use crate::link::Href;

/// Decode an embedded resource document into its typed form.
pub fn decode_embedded<T: DeserializeOwned>(document: &serde_json::Value) -> Result<T, ModelError> {
    Ok(serde_json::from_value(document.clone())?)
}

/// Links advertised by the communication resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationLinks {
    /// The resource itself.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_ref: Option<Href>,
    /// Start an instant-messaging conversation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_messaging: Option<Href>,
    /// Start an instant-messaging conversation under an overridden local identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_messaging_with_identity: Option<Href>,
    /// Start an audio/video call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_audio_video: Option<Href>,
    /// Start an audio-only call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_audio: Option<Href>,
}

/// The application's communication hub document.
///
/// Which start links are present depends on what the service currently
/// permits; the set changes whenever the service pushes an update for this
/// resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationResource {
    /// Operations currently advertised.
    #[serde(rename = "_links", default)]
    pub links: CommunicationLinks,
    /// Modalities the service will accept from this endpoint.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supported_modalities: Vec<String>,
}

/// Lifecycle of a conversation as reported by the service.
///
/// State tokens arrive in the service's PascalCase spelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConversationState {
    /// Being established.
    Connecting,
    /// Established.
    Connected,
    /// Tearing down.
    Disconnecting,
    /// Over.
    Disconnected,
    /// A state outside the known set, preserved verbatim.
    #[serde(untagged)]
    Other(String),
}

/// Links advertised by a conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationLinks {
    /// The resource itself.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_ref: Option<Href>,
}

/// A conversation document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationResource {
    /// Links advertised on the conversation.
    #[serde(rename = "_links", default)]
    pub links: ConversationLinks,
    /// Current lifecycle state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<ConversationState>,
    /// Human-readable subject line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Modalities currently active in the conversation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub active_modalities: Vec<String>,
}

/// Lifecycle of an invitation as reported by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvitationState {
    /// Working towards acceptance.
    Connecting,
    /// Accepted; the operation it started is live.
    Connected,
    /// Rejected or failed.
    Failed,
    /// A state outside the known set, preserved verbatim.
    #[serde(untagged)]
    Other(String),
}

/// Links advertised by an invitation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationLinks {
    /// The resource itself.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_ref: Option<Href>,
    /// The conversation this invitation belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation: Option<Href>,
}

/// An invitation document.
///
/// `operation_context` echoes the correlation id the originator supplied and
/// is how a pushed invitation is matched back to the local request that
/// created it. Incoming invitations carry a context chosen by the remote
/// side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationResource {
    /// Correlation id supplied when the operation was started.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_context: Option<String>,
    /// Which side originated the invitation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    /// Current lifecycle state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<InvitationState>,
    /// Invited party.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// Inviting party.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Subject carried over to the conversation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Links advertised on the invitation.
    #[serde(rename = "_links", default)]
    pub links: InvitationLinks,
}
