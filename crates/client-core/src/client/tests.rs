//! Unit tests for the client orchestration layer.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use commlink_hypermedia_core::{
    normalize_uri, CommunicationLinks, CommunicationResource, ConversationResource, Href,
};

use crate::client::{ClientConfig, ClientStats, CommunicationCapability, CommunicationClient};
use crate::conversation::Conversation;
use crate::error::ClientError;
use crate::transport::{PlatformTransport, TransportError};

struct CountingTransport {
    posts: AtomicUsize,
}

impl CountingTransport {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            posts: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl PlatformTransport for CountingTransport {
    async fn post_create(
        &self,
        _target: Url,
        _body: serde_json::Value,
        _correlation_id: &str,
    ) -> Result<(), TransportError> {
        self.posts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn base_url() -> Url {
    Url::parse("https://service.example.com/comm/v1/").unwrap()
}

fn client_with(transport: Arc<CountingTransport>) -> CommunicationClient {
    let config = ClientConfig::new(base_url()).with_event_wait_timeout(Duration::from_millis(50));
    CommunicationClient::new(config, transport)
}

fn messaging_only_resource() -> CommunicationResource {
    CommunicationResource {
        links: CommunicationLinks {
            start_messaging: Some(Href::new("communication/startMessaging")),
            ..Default::default()
        },
        supported_modalities: vec!["Messaging".to_string()],
    }
}

#[tokio::test]
async fn supports_is_false_without_hub_document() {
    let client = client_with(CountingTransport::new());
    assert!(!client.supports(CommunicationCapability::StartMessaging).await);
}

#[tokio::test]
async fn supports_tracks_advertised_links() {
    let client = client_with(CountingTransport::new());
    client.set_resource(messaging_only_resource()).await;

    assert!(client.supports(CommunicationCapability::StartMessaging).await);
    assert!(!client.supports(CommunicationCapability::StartAudioVideo).await);
    assert!(!client.supports(CommunicationCapability::StartAudio).await);
}

#[tokio::test]
async fn blank_action_href_is_not_an_advertised_capability() {
    let transport = CountingTransport::new();
    let client = client_with(Arc::clone(&transport));
    client
        .set_resource(CommunicationResource {
            links: CommunicationLinks {
                start_messaging: Some(Href::new("")),
                start_audio_video: Some(Href::new("   ")),
                ..Default::default()
            },
            supported_modalities: vec!["Messaging".to_string()],
        })
        .await;

    assert!(!client.supports(CommunicationCapability::StartMessaging).await);
    assert!(!client.supports(CommunicationCapability::StartAudioVideo).await);

    let result = client
        .start_messaging("hello", "sip:bob@example.com", "https://app.example.com/cb")
        .await;

    assert!(matches!(
        result,
        Err(ClientError::CapabilityUnavailable { .. })
    ));
    assert_eq!(transport.posts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn missing_capability_fails_before_any_request() {
    let transport = CountingTransport::new();
    let client = client_with(Arc::clone(&transport));
    client.set_resource(messaging_only_resource()).await;

    let result = client
        .start_audio_video("standup", "sip:bob@example.com", "https://app.example.com/cb")
        .await;

    assert!(matches!(
        result,
        Err(ClientError::CapabilityUnavailable { .. })
    ));
    assert_eq!(transport.posts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unconfirmed_operation_times_out_and_releases_its_slot() {
    let transport = CountingTransport::new();
    let client = client_with(Arc::clone(&transport));
    client.set_resource(messaging_only_resource()).await;

    let result = client
        .start_messaging("hello", "sip:bob@example.com", "https://app.example.com/cb")
        .await;

    assert!(matches!(&result, Err(e) if e.is_timeout()));
    assert_eq!(transport.posts.load(Ordering::SeqCst), 1);
    assert_eq!(client.stats().pending_operations, 0);
}

#[tokio::test]
async fn conversation_lookup_normalizes_the_reference() {
    let client = client_with(CountingTransport::new());

    let key = normalize_uri(&base_url(), "conversations/c1").unwrap();
    let uri = key.clone();
    client
        .conversations
        .get_or_create(key, move || {
            Conversation::new(uri, ConversationResource::default())
        });

    assert!(client.conversation("conversations/c1").is_some());
    assert!(client
        .conversation("https://service.example.com/comm/v1/conversations/c1#latest")
        .is_some());
    assert!(client.conversation("conversations/other").is_none());
}

#[tokio::test]
async fn stats_report_tracked_state() {
    let client = client_with(CountingTransport::new());
    assert_eq!(
        client.stats(),
        ClientStats {
            tracked_conversations: 0,
            tracked_invitations: 0,
            pending_operations: 0,
        }
    );

    let _pending = client.correlator.register("op-1").unwrap();
    assert_eq!(client.stats().pending_operations, 1);
}
