//! Resource kind tokens.

use std::fmt;

/// The resource kinds the stack knows how to route.
///
/// Tokens arrive as link relationship strings. Everything outside the known
/// set is preserved in [`ResourceKind::Unknown`] so callers can log and skip
/// it; dispatch matches exhaustively and treats unknown kinds as unhandled
/// rather than failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// The application's communication hub resource.
    Communication,
    /// A conversation between the local endpoint and remote parties.
    Conversation,
    /// An instant-messaging invitation.
    MessagingInvitation,
    /// An audio/video call invitation.
    AudioVideoInvitation,
    /// An invitation to join a scheduled online meeting.
    OnlineMeetingInvitation,
    /// An invitation for a participant to join an existing conversation.
    ParticipantInvitation,
    /// A token outside the known set, preserved verbatim.
    Unknown(String),
}

impl ResourceKind {
    /// Map a wire token onto a kind.
    pub fn from_token(token: &str) -> Self {
        match token {
            "communication" => Self::Communication,
            "conversation" => Self::Conversation,
            "messagingInvitation" => Self::MessagingInvitation,
            "audioVideoInvitation" => Self::AudioVideoInvitation,
            "onlineMeetingInvitation" => Self::OnlineMeetingInvitation,
            "participantInvitation" => Self::ParticipantInvitation,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// The wire token for this kind.
    pub fn token(&self) -> &str {
        match self {
            Self::Communication => "communication",
            Self::Conversation => "conversation",
            Self::MessagingInvitation => "messagingInvitation",
            Self::AudioVideoInvitation => "audioVideoInvitation",
            Self::OnlineMeetingInvitation => "onlineMeetingInvitation",
            Self::ParticipantInvitation => "participantInvitation",
            Self::Unknown(token) => token,
        }
    }

    /// Whether this kind belongs to one of the invitation families.
    pub fn is_invitation(&self) -> bool {
        matches!(
            self,
            Self::MessagingInvitation
                | Self::AudioVideoInvitation
                | Self::OnlineMeetingInvitation
                | Self::ParticipantInvitation
        )
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tokens_round_trip() {
        let tokens = [
            "communication",
            "conversation",
            "messagingInvitation",
            "audioVideoInvitation",
            "onlineMeetingInvitation",
            "participantInvitation",
        ];
        for token in tokens {
            let kind = ResourceKind::from_token(token);
            assert!(!matches!(kind, ResourceKind::Unknown(_)), "{} should be known", token);
            assert_eq!(kind.token(), token);
        }
    }

    #[test]
    fn unknown_token_is_preserved() {
        let kind = ResourceKind::from_token("phoneAudioInvitation");
        assert_eq!(kind, ResourceKind::Unknown("phoneAudioInvitation".to_string()));
        assert_eq!(kind.token(), "phoneAudioInvitation");
        assert!(!kind.is_invitation());
    }

    #[test]
    fn invitation_kinds_are_grouped() {
        assert!(ResourceKind::MessagingInvitation.is_invitation());
        assert!(ResourceKind::AudioVideoInvitation.is_invitation());
        assert!(ResourceKind::OnlineMeetingInvitation.is_invitation());
        assert!(ResourceKind::ParticipantInvitation.is_invitation());
        assert!(!ResourceKind::Communication.is_invitation());
        assert!(!ResourceKind::Conversation.is_invitation());
    }
}
