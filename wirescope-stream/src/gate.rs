use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::task::{Context, Poll};

use futures_util::Stream;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::trace;

use wirescope_core::{DecodeError, Snapshot};

use crate::error::TransportError;

/// One delivery on a snapshot subscription.
#[derive(Debug, Clone)]
pub enum StreamEvent {
    Snapshot(Snapshot),
    /// Non-terminal: the offending frame was dropped, later frames still flow.
    DecodeFailure(DecodeError),
    /// Terminal: the transport is gone and this stream instance is finished.
    Closed(TransportError),
}

/// Fan-out hub between the connection's read loop and any number of
/// subscribers. Delivery order is decode order for every subscriber. While
/// paused, frame-derived events are discarded before fan-out; nothing is
/// buffered and `play` never redelivers. Gating is a delivery filter only,
/// the connection is not touched.
#[derive(Debug, Clone, Default)]
pub struct GatedStream {
    inner: Arc<GateInner>,
}

#[derive(Debug, Default)]
struct GateInner {
    paused: AtomicBool,
    next_id: AtomicU64,
    registry: Mutex<Registry>,
}

#[derive(Debug, Default)]
struct Registry {
    subscribers: Vec<SubscriberSlot>,
    closed: bool,
}

#[derive(Debug)]
struct SubscriberSlot {
    id: u64,
    sender: mpsc::UnboundedSender<StreamEvent>,
}

fn lock_registry(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl GatedStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new subscriber. A subscription taken after the stream has
    /// ended yields nothing.
    pub fn subscribe(&self) -> Subscription {
        let (sender, receiver) = mpsc::unbounded_channel();
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let mut registry = lock_registry(&self.inner.registry);
        if !registry.closed {
            registry.subscribers.push(SubscriberSlot { id, sender });
        }
        drop(registry);
        Subscription {
            id,
            gate: Arc::clone(&self.inner),
            events: UnboundedReceiverStream::new(receiver),
        }
    }

    pub fn pause(&self) {
        self.inner.paused.store(true, Ordering::SeqCst);
    }

    pub fn play(&self) {
        self.inner.paused.store(false, Ordering::SeqCst);
    }

    pub fn is_paused(&self) -> bool {
        self.inner.paused.load(Ordering::SeqCst)
    }

    pub fn publish_snapshot(&self, snapshot: Snapshot) {
        if self.is_paused() {
            trace!(id = %snapshot.id, "dropping snapshot while paused");
            return;
        }
        self.fan_out(StreamEvent::Snapshot(snapshot));
    }

    pub fn publish_decode_failure(&self, error: DecodeError) {
        if self.is_paused() {
            trace!("dropping decode failure while paused");
            return;
        }
        self.fan_out(StreamEvent::DecodeFailure(error));
    }

    /// Ends the stream for every subscriber, paused or not, and drops the
    /// registry. Later publishes are no-ops.
    pub fn publish_closed(&self, error: TransportError) {
        let mut registry = lock_registry(&self.inner.registry);
        if registry.closed {
            return;
        }
        registry.closed = true;
        for slot in registry.subscribers.drain(..) {
            let _ = slot.sender.send(StreamEvent::Closed(error.clone()));
        }
    }

    /// Releases every subscriber without a terminal event; their streams
    /// simply end. Used on dispose.
    pub fn shutdown(&self) {
        let mut registry = lock_registry(&self.inner.registry);
        registry.closed = true;
        registry.subscribers.clear();
    }

    pub fn subscriber_count(&self) -> usize {
        lock_registry(&self.inner.registry).subscribers.len()
    }

    fn fan_out(&self, event: StreamEvent) {
        let mut registry = lock_registry(&self.inner.registry);
        if registry.closed {
            return;
        }
        registry
            .subscribers
            .retain(|slot| slot.sender.send(event.clone()).is_ok());
    }
}

/// A live subscription; unsubscribe by dropping it. Dropping stops delivery
/// to this subscriber only.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    gate: Arc<GateInner>,
    events: UnboundedReceiverStream<StreamEvent>,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Stream for Subscription {
    type Item = StreamEvent;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.get_mut().events).poll_next(cx)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let mut registry = lock_registry(&self.gate.registry);
        registry.subscribers.retain(|slot| slot.id != self.id);
    }
}
