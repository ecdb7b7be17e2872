//! Event frames pushed by the service.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::kind::ResourceKind;
use crate::link::Link;

/// What happened to the resource a notification names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventOperation {
    /// The resource entered the sender's scope.
    Added,
    /// The resource changed.
    Updated,
    /// The resource left the sender's scope for good.
    Deleted,
    /// An operation resource began (invitations surface this way).
    Started,
    /// An operation resource reached its end state.
    Completed,
}

impl EventOperation {
    /// Whether this operation retires the resource it names.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Deleted | Self::Completed)
    }
}

impl fmt::Display for EventOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Self::Added => "added",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
            Self::Started => "started",
            Self::Completed => "completed",
        };
        f.write_str(token)
    }
}

/// Which side originated an operation.
///
/// Serialized in the service's PascalCase spelling (`"Incoming"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// A remote party started it.
    Incoming,
    /// The local endpoint started it.
    Outgoing,
}

/// A single pushed notification about one resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventNotification {
    /// The affected resource; its kind comes from the link token.
    pub link: Link,
    /// What happened to it.
    pub relationship: EventOperation,
    /// Embedded resource document, when the service chose to inline one.
    #[serde(rename = "_embedded", default, skip_serializing_if = "Option::is_none")]
    pub embedded: Option<serde_json::Value>,
}

impl EventNotification {
    /// Create a notification without an embedded document.
    pub fn new(link: Link, relationship: EventOperation) -> Self {
        Self {
            link,
            relationship,
            embedded: None,
        }
    }

    /// Attach an embedded resource document.
    pub fn with_embedded(mut self, embedded: serde_json::Value) -> Self {
        self.embedded = Some(embedded);
        self
    }

    /// The kind of the affected resource.
    pub fn kind(&self) -> ResourceKind {
        self.link.kind()
    }
}

/// An ordered group of notifications observed by a single sender resource.
///
/// Order within a batch is the service's order and must be honored. Separate
/// batches carry no ordering relationship to each other.
#[derive(Debug, Clone)]
pub struct EventBatch {
    /// The resource that observed these events.
    pub sender: Link,
    /// Base URL every relative href in the batch resolves against.
    pub base_url: Url,
    /// The notifications, in arrival order.
    pub events: Vec<EventNotification>,
}

impl EventBatch {
    /// Create a batch.
    pub fn new(sender: Link, base_url: Url, events: Vec<EventNotification>) -> Self {
        Self {
            sender,
            base_url,
            events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_operations() {
        assert!(EventOperation::Deleted.is_terminal());
        assert!(EventOperation::Completed.is_terminal());
        assert!(!EventOperation::Added.is_terminal());
        assert!(!EventOperation::Updated.is_terminal());
        assert!(!EventOperation::Started.is_terminal());
    }

    #[test]
    fn notification_deserializes_from_wire_shape() {
        let json = r#"{
            "link": { "rel": "conversation", "href": "/comm/v1/conversations/137" },
            "relationship": "added",
            "_embedded": { "subject": "quarterly review" }
        }"#;
        let event: EventNotification = serde_json::from_str(json).expect("frame should parse");
        assert_eq!(event.kind(), ResourceKind::Conversation);
        assert_eq!(event.relationship, EventOperation::Added);
        assert!(event.embedded.is_some());
    }

    #[test]
    fn notification_without_embedded_document() {
        let json = r#"{
            "link": { "rel": "conversation", "href": "/comm/v1/conversations/137" },
            "relationship": "deleted"
        }"#;
        let event: EventNotification = serde_json::from_str(json).expect("frame should parse");
        assert!(event.embedded.is_none());
        assert!(event.relationship.is_terminal());
    }
}
