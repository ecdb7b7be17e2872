//! Start Messaging Example
//!
//! Demonstrates the full client loop against a loopback transport: the
//! transport accepts each start request and immediately pushes the confirming
//! invitation event back through the event channel, the way a real service
//! confirms over its notification stream.
//!
//! Run with: cargo run --example start_messaging

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::mpsc;
use url::Url;

use commlink_client_core::hypermedia::{
    CommunicationLinks, CommunicationResource, EventBatch, EventNotification, EventOperation,
    Href, Link,
};
use commlink_client_core::{
    ClientConfig, CommunicationClient, CommunicationEventHandler, Conversation, Invitation,
    PlatformTransport, TransportError,
};

/// Accepts requests and loops the confirming event straight back.
struct LoopbackTransport {
    events: mpsc::Sender<EventBatch>,
    base: Url,
}

#[async_trait]
impl PlatformTransport for LoopbackTransport {
    async fn post_create(
        &self,
        target: Url,
        body: serde_json::Value,
        correlation_id: &str,
    ) -> Result<(), TransportError> {
        println!("POST {} (operation {})", target, correlation_id);

        let rel = if target.as_str().contains("Messaging") {
            "messagingInvitation"
        } else {
            "audioVideoInvitation"
        };
        let document = json!({
            "operationContext": correlation_id,
            "direction": "Outgoing",
            "state": "Connecting",
            "to": body.get("to").cloned().unwrap_or(json!(null)),
            "_links": {
                "self": { "href": format!("invitations/{}", correlation_id) },
                "conversation": { "href": format!("conversations/{}", correlation_id) }
            }
        });
        let event = EventNotification::new(
            Link::new(rel, format!("invitations/{}", correlation_id)),
            EventOperation::Started,
        )
        .with_embedded(document);
        let batch = EventBatch::new(
            Link::new("communication", "communication"),
            self.base.clone(),
            vec![event],
        );

        self.events
            .send(batch)
            .await
            .map_err(|_| TransportError::not_connected("event pump has shut down"))
    }
}

/// Prints everything the service pushes at us.
struct PrintingHandler;

#[async_trait]
impl CommunicationEventHandler for PrintingHandler {
    async fn on_incoming_invitation(&self, invitation: Arc<Invitation>) {
        let from = invitation.snapshot().await.from;
        println!(
            "Incoming {} invitation {} from {:?}",
            invitation.kind(),
            invitation.operation_id(),
            from
        );
    }

    async fn on_conversation_added(&self, conversation: Arc<Conversation>) {
        println!("Conversation added: {}", conversation.uri());
    }

    async fn on_conversation_removed(&self, conversation: Arc<Conversation>) {
        println!("Conversation removed: {}", conversation.uri());
    }
}

fn hub_resource() -> CommunicationResource {
    CommunicationResource {
        links: CommunicationLinks {
            start_messaging: Some(Href::new("communication/startMessaging")),
            start_audio_video: Some(Href::new("communication/startAudioVideo")),
            ..Default::default()
        },
        supported_modalities: vec!["Messaging".to_string(), "Audio".to_string()],
    }
}

fn remote_invitation(base: &Url) -> EventBatch {
    let document = json!({
        "operationContext": "remote-op-7",
        "direction": "Incoming",
        "state": "Connecting",
        "from": "sip:carol@example.com",
        "to": "sip:me@example.com",
        "subject": "Quick question",
        "_links": {
            "self": { "href": "invitations/remote-op-7" },
            "conversation": { "href": "conversations/remote-7" }
        }
    });
    let event = EventNotification::new(
        Link::new("messagingInvitation", "invitations/remote-op-7"),
        EventOperation::Started,
    )
    .with_embedded(document);
    EventBatch::new(
        Link::new("communication", "communication"),
        base.clone(),
        vec![event],
    )
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let base = Url::parse("https://service.example.com/comm/v1/")?;
    let (tx, rx) = mpsc::channel(16);

    let transport = Arc::new(LoopbackTransport {
        events: tx.clone(),
        base: base.clone(),
    });
    let client = Arc::new(CommunicationClient::new(
        ClientConfig::new(base.clone()).with_event_wait_timeout(Duration::from_secs(5)),
        transport,
    ));

    client.set_resource(hub_resource()).await;
    client.set_event_handler(Arc::new(PrintingHandler)).await;
    let pump = client.attach_event_stream(rx);

    // Start a conversation and wait for the service to confirm it.
    let invitation = client
        .start_messaging(
            "Team sync",
            "sip:bob@example.com",
            "https://app.example.com/notify",
        )
        .await?;
    println!(
        "Confirmed {} invitation {}",
        invitation.kind(),
        invitation.operation_id()
    );
    if let Some(conversation) = invitation.related_conversation() {
        println!("Related conversation: {}", conversation.uri());
    }

    // A remote party invites us; the handler above reports it.
    tx.send(remote_invitation(&base)).await?;
    tokio::time::sleep(Duration::from_millis(100)).await;

    println!("Tracking: {:?}", client.stats());

    // Dropping every sender closes the pump.
    drop(tx);
    drop(client);
    pump.await?;

    Ok(())
}
