//! Correlation of client-initiated operations with pushed confirmations.
//!
//! A start operation travels over two independent channels: the POST that
//! triggers it (acknowledged with nothing but "accepted") and the event that
//! later confirms it, carrying the same caller-generated correlation id. The
//! [`OperationCorrelator`] is the rendezvous point: callers register the id
//! before posting, the event router resolves it when the confirming event
//! shows up, and whichever of resolution and timeout loses the race finds the
//! slot already gone and backs off silently.

use std::sync::Arc;
use std::time::Duration;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::oneshot;

use crate::error::{ClientError, ClientResult};

type SlotMap<T> = Arc<DashMap<String, oneshot::Sender<T>>>;

/// Table of in-flight operations keyed by correlation id.
pub struct OperationCorrelator<T> {
    pending: SlotMap<T>,
}

impl<T> OperationCorrelator<T> {
    /// Create an empty correlator.
    pub fn new() -> Self {
        Self {
            pending: Arc::new(DashMap::new()),
        }
    }

    /// Register a new in-flight operation.
    ///
    /// Fails with [`ClientError::DuplicateOperation`] when the id is already
    /// registered; ids stay taken until resolved, timed out, or dropped.
    pub fn register(&self, operation_id: impl Into<String>) -> ClientResult<PendingOperation<T>> {
        let operation_id = operation_id.into();
        if operation_id.is_empty() {
            return Err(ClientError::internal("Operation id must not be empty"));
        }

        let (tx, rx) = oneshot::channel();
        match self.pending.entry(operation_id.clone()) {
            Entry::Occupied(_) => Err(ClientError::duplicate_operation(operation_id)),
            Entry::Vacant(slot) => {
                slot.insert(tx);
                Ok(PendingOperation {
                    operation_id,
                    rx,
                    pending: Arc::clone(&self.pending),
                    settled: false,
                })
            }
        }
    }

    /// Hand `value` to whoever is waiting on `operation_id`.
    ///
    /// Returns `true` only when a live waiter received the value. Unknown
    /// ids and ids whose waiter already gave up return `false`; the value is
    /// dropped either way. Resolving consumes the slot, so at most one
    /// resolution per registration can ever succeed.
    pub fn resolve(&self, operation_id: &str, value: T) -> bool {
        match self.pending.remove(operation_id) {
            Some((_, tx)) => tx.send(value).is_ok(),
            None => false,
        }
    }

    /// Number of operations currently awaiting confirmation.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Whether `operation_id` is currently awaiting confirmation.
    pub fn is_pending(&self, operation_id: &str) -> bool {
        self.pending.contains_key(operation_id)
    }
}

impl<T> Default for OperationCorrelator<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A registered operation waiting for its confirming event.
///
/// The slot it holds in the correlator is cleaned up deterministically: by
/// the resolver on success, by `wait` on timeout, or by `Drop` when the
/// caller bails out between registering and waiting.
#[derive(Debug)]
pub struct PendingOperation<T> {
    operation_id: String,
    rx: oneshot::Receiver<T>,
    pending: SlotMap<T>,
    settled: bool,
}

impl<T> PendingOperation<T> {
    /// The correlation id this operation registered.
    pub fn operation_id(&self) -> &str {
        &self.operation_id
    }

    /// Suspend until the confirming event arrives or `timeout` elapses.
    ///
    /// Only this operation is suspended; everything else keeps flowing. On
    /// timeout the slot is withdrawn, so a confirmation that arrives later
    /// resolves nothing.
    pub async fn wait(mut self, timeout: Duration) -> ClientResult<T> {
        let outcome = tokio::time::timeout(timeout, &mut self.rx).await;
        self.settled = true;
        match outcome {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(_closed)) => Err(ClientError::internal(format!(
                "Completion channel closed for operation {}",
                self.operation_id
            ))),
            Err(_elapsed) => {
                self.pending.remove(&self.operation_id);
                Err(ClientError::OperationTimeout {
                    operation_id: self.operation_id.clone(),
                    seconds: timeout.as_secs(),
                })
            }
        }
    }
}

impl<T> Drop for PendingOperation<T> {
    fn drop(&mut self) {
        // Covers callers that error out between register and wait. A settled
        // wait must not touch the map again: the id may have been reused.
        if !self.settled {
            self.pending.remove(&self.operation_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolve_wakes_the_waiter() {
        let correlator = OperationCorrelator::new();
        let pending = correlator.register("op-1").expect("fresh id");
        assert!(correlator.is_pending("op-1"));

        assert!(correlator.resolve("op-1", 42u32));
        let value = pending.wait(Duration::from_secs(1)).await.expect("resolved");
        assert_eq!(value, 42);
        assert_eq!(correlator.pending_count(), 0);
    }

    #[tokio::test]
    async fn second_resolution_is_a_silent_no_op() {
        let correlator = OperationCorrelator::new();
        let pending = correlator.register("op-1").expect("fresh id");

        assert!(correlator.resolve("op-1", 1u32));
        assert!(!correlator.resolve("op-1", 2u32));

        let value = pending.wait(Duration::from_secs(1)).await.expect("resolved");
        assert_eq!(value, 1);
    }

    #[tokio::test]
    async fn duplicate_registration_is_rejected() {
        let correlator = OperationCorrelator::<u32>::new();
        let _pending = correlator.register("op-1").expect("fresh id");
        let err = correlator.register("op-1").expect_err("id is taken");
        assert!(matches!(err, ClientError::DuplicateOperation { .. }));
    }

    #[tokio::test]
    async fn empty_id_is_rejected() {
        let correlator = OperationCorrelator::<u32>::new();
        assert!(correlator.register("").is_err());
    }

    #[tokio::test]
    async fn timeout_withdraws_the_slot() {
        let correlator = OperationCorrelator::new();
        let pending = correlator.register("op-1").expect("fresh id");

        let err = pending
            .wait(Duration::from_millis(20))
            .await
            .expect_err("nothing resolves this");
        assert!(err.is_timeout());

        // The late confirmation finds no slot and reports so.
        assert!(!correlator.resolve("op-1", 9u32));
        assert_eq!(correlator.pending_count(), 0);
    }

    #[tokio::test]
    async fn dropping_a_pending_operation_frees_its_id() {
        let correlator = OperationCorrelator::<u32>::new();
        let pending = correlator.register("op-1").expect("fresh id");
        drop(pending);
        assert!(!correlator.is_pending("op-1"));
        // The id is reusable after cleanup.
        let _pending = correlator.register("op-1").expect("id was freed");
    }

    #[tokio::test]
    async fn unknown_id_resolution_reports_false() {
        let correlator = OperationCorrelator::new();
        assert!(!correlator.resolve("never-registered", 0u32));
    }

    #[tokio::test]
    async fn wait_parks_until_the_confirmation_arrives() {
        let correlator = OperationCorrelator::new();
        let pending = correlator.register("op-1").expect("fresh id");

        let mut wait = tokio_test::task::spawn(pending.wait(Duration::from_secs(5)));
        tokio_test::assert_pending!(wait.poll());

        assert!(correlator.resolve("op-1", 7u32));
        assert!(wait.is_woken());
        let value = tokio_test::assert_ready!(wait.poll()).expect("resolved");
        assert_eq!(value, 7);
    }
}
