//! Outbound request payloads for start operations.
//!
//! Each input carries the caller-generated `operation_context`; the service
//! echoes it on the invitation it later pushes back, which is what ties the
//! push to the request that triggered it.

use serde::{Deserialize, Serialize};

/// Body of a start-messaging request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagingInvitationInput {
    /// Caller-generated correlation id.
    pub operation_context: String,
    /// Party to invite.
    pub to: String,
    /// Subject line for the conversation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Where the service should deliver callbacks for this operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    /// Display name override for the local side of the invitation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_user_display_name: Option<String>,
    /// URI override for the local side of the invitation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_user_uri: Option<String>,
}

/// Where media for an audio/video invitation is terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaHostType {
    /// Media rides with the remote service.
    Remote,
    /// Media terminates at the local endpoint.
    Local,
}

impl Default for MediaHostType {
    fn default() -> Self {
        Self::Remote
    }
}

/// Body of a start-audio-video or start-audio request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioVideoInvitationInput {
    /// Caller-generated correlation id.
    pub operation_context: String,
    /// Party to invite.
    pub to: String,
    /// Subject line for the conversation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Where the service should deliver callbacks for this operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    /// Media termination point.
    #[serde(default)]
    pub media_host: MediaHostType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messaging_input_serializes_camel_case() {
        let input = MessagingInvitationInput {
            operation_context: "op-1".to_string(),
            to: "sip:bob@example.com".to_string(),
            subject: Some("hello".to_string()),
            callback_url: Some("https://app.example.com/callback".to_string()),
            local_user_display_name: None,
            local_user_uri: None,
        };
        let value = serde_json::to_value(&input).expect("input should serialize");
        assert_eq!(value["operationContext"], "op-1");
        assert_eq!(value["callbackUrl"], "https://app.example.com/callback");
        assert!(value.get("localUserDisplayName").is_none());
    }

    #[test]
    fn audio_video_input_defaults_to_remote_media() {
        let input = AudioVideoInvitationInput {
            operation_context: "op-2".to_string(),
            to: "sip:carol@example.com".to_string(),
            subject: None,
            callback_url: None,
            media_host: MediaHostType::default(),
        };
        let value = serde_json::to_value(&input).expect("input should serialize");
        assert_eq!(value["mediaHost"], "Remote");
        assert!(value.get("subject").is_none());
    }
}
