//! Client-facing value types.

use std::fmt;

use serde::Serialize;

/// The start operations a communication hub can advertise.
///
/// Each capability maps to one hypermedia action link; the hub grants and
/// revokes them as the user's provisioning changes, so callers check
/// [`supports`](crate::CommunicationClient::supports) instead of assuming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommunicationCapability {
    /// Start an instant-messaging conversation.
    StartMessaging,
    /// Start an instant-messaging conversation under an overridden identity.
    StartMessagingWithIdentity,
    /// Start an audio/video call.
    StartAudioVideo,
    /// Start an audio-only call.
    StartAudio,
}

impl fmt::Display for CommunicationCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Self::StartMessaging => "startMessaging",
            Self::StartMessagingWithIdentity => "startMessagingWithIdentity",
            Self::StartAudioVideo => "startAudioVideo",
            Self::StartAudio => "startAudio",
        };
        f.write_str(token)
    }
}

/// Point-in-time counters describing what the client is tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientStats {
    /// Conversations currently mirrored from the service.
    pub tracked_conversations: usize,
    /// Invitations currently mirrored from the service.
    pub tracked_invitations: usize,
    /// Start operations still waiting for their confirming event.
    pub pending_operations: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_tokens_match_link_relations() {
        assert_eq!(CommunicationCapability::StartMessaging.to_string(), "startMessaging");
        assert_eq!(
            CommunicationCapability::StartMessagingWithIdentity.to_string(),
            "startMessagingWithIdentity"
        );
        assert_eq!(CommunicationCapability::StartAudioVideo.to_string(), "startAudioVideo");
        assert_eq!(CommunicationCapability::StartAudio.to_string(), "startAudio");
    }

    #[test]
    fn stats_serialize_as_counters() {
        let stats = ClientStats {
            tracked_conversations: 2,
            tracked_invitations: 1,
            pending_operations: 0,
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["tracked_conversations"], 2);
        assert_eq!(json["pending_operations"], 0);
    }
}
