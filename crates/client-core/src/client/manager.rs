//! Client construction and lifecycle.

use std::sync::Arc;

use tokio::sync::{mpsc, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use commlink_hypermedia_core::{normalize_uri, CommunicationResource, EventBatch};

use crate::cache::ResourceCache;
use crate::client::config::ClientConfig;
use crate::client::types::ClientStats;
use crate::conversation::Conversation;
use crate::correlation::OperationCorrelator;
use crate::events::{CommunicationEventHandler, SharedEventHandler};
use crate::invitation::Invitation;
use crate::router::EventRouter;
use crate::transport::PlatformTransport;

/// The client engine: a local mirror of the service's resource graph, the
/// correlation table for in-flight operations, and the event router that
/// keeps both current.
///
/// All state lives behind shared handles, so a client wrapped in `Arc` can be
/// driven from any number of tasks at once. Start operations, event
/// ingestion, and queries never serialize behind a single lock.
pub struct CommunicationClient {
    pub(crate) config: ClientConfig,
    pub(crate) transport: Arc<dyn PlatformTransport>,
    pub(crate) resource: Arc<RwLock<Option<CommunicationResource>>>,
    pub(crate) conversations: Arc<ResourceCache<String, Conversation>>,
    pub(crate) invitations: Arc<ResourceCache<String, Invitation>>,
    pub(crate) correlator: Arc<OperationCorrelator<Arc<Invitation>>>,
    pub(crate) handler: SharedEventHandler,
    pub(crate) router: Arc<EventRouter>,
}

impl CommunicationClient {
    /// Create a client that issues its requests over the given transport.
    ///
    /// The client starts with no communication hub document; install one with
    /// [`set_resource`](Self::set_resource) before starting operations.
    pub fn new(config: ClientConfig, transport: Arc<dyn PlatformTransport>) -> Self {
        let resource = Arc::new(RwLock::new(None));
        let conversations = Arc::new(ResourceCache::new());
        let invitations = Arc::new(ResourceCache::new());
        let correlator = Arc::new(OperationCorrelator::new());
        let handler: SharedEventHandler = Arc::new(RwLock::new(None));

        let router = Arc::new(EventRouter::new(
            Arc::clone(&conversations),
            Arc::clone(&invitations),
            Arc::clone(&correlator),
            Arc::clone(&resource),
            Arc::clone(&handler),
        ));

        info!(
            "Created communication client {} for {}",
            config.user_agent, config.base_url
        );

        Self {
            config,
            transport,
            resource,
            conversations,
            invitations,
            correlator,
            handler,
            router,
        }
    }

    /// Install or replace the communication hub document.
    ///
    /// Applications fetch the document once when they bootstrap; afterwards
    /// the router keeps it fresh from pushed hub events.
    pub async fn set_resource(&self, resource: CommunicationResource) {
        *self.resource.write().await = Some(resource);
        debug!("Communication resource installed");
    }

    /// Copy of the current communication hub document, if one is installed.
    pub async fn resource(&self) -> Option<CommunicationResource> {
        self.resource.read().await.clone()
    }

    /// Register the handler notified of externally originated activity.
    ///
    /// Replaces any previous handler. Callbacks already in flight finish
    /// against the handler that was installed when their event arrived.
    pub async fn set_event_handler(&self, handler: Arc<dyn CommunicationEventHandler>) {
        *self.handler.write().await = Some(handler);
        info!("Event handler registered");
    }

    /// Ingest one pushed event batch, returning how many notifications were
    /// consumed by tracked resources.
    ///
    /// Batches may be ingested concurrently from independent tasks. Ordering
    /// is honored within a batch, not across batches.
    pub async fn process_event_batch(&self, batch: &EventBatch) -> usize {
        self.router.dispatch_batch(batch).await
    }

    /// Spawn a task that pumps batches from `events` until the channel
    /// closes.
    pub fn attach_event_stream(&self, mut events: mpsc::Receiver<EventBatch>) -> JoinHandle<()> {
        let router = Arc::clone(&self.router);
        tokio::spawn(async move {
            while let Some(batch) = events.recv().await {
                let consumed = router.dispatch_batch(&batch).await;
                debug!(
                    "Consumed {}/{} notification(s) from event stream",
                    consumed,
                    batch.events.len()
                );
            }
            info!("Event stream closed");
        })
    }

    /// The conversation tracked under `uri`, if any.
    ///
    /// Accepts any spelling of the reference; it is normalized against the
    /// configured base URL before lookup.
    pub fn conversation(&self, uri: &str) -> Option<Arc<Conversation>> {
        let key = normalize_uri(&self.config.base_url, uri).ok()?;
        self.conversations.get(&key)
    }

    /// Snapshot of every tracked conversation, in no particular order.
    pub fn conversations(&self) -> Vec<Arc<Conversation>> {
        self.conversations.values()
    }

    /// The invitation tracked under `operation_id`, if any.
    pub fn invitation(&self, operation_id: &str) -> Option<Arc<Invitation>> {
        self.invitations.get(&operation_id.to_string())
    }

    /// Point-in-time counters for what the client is tracking.
    pub fn stats(&self) -> ClientStats {
        ClientStats {
            tracked_conversations: self.conversations.len(),
            tracked_invitations: self.invitations.len(),
            pending_operations: self.correlator.pending_count(),
        }
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}
