use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use tokio::sync::mpsc;

struct Tracker {
    prefix: String,
    tx: mpsc::UnboundedSender<String>,
}

#[derive(Default)]
struct BusInner {
    next_id: u64,
    trackers: HashMap<u64, Tracker>,
}

fn lock(inner: &Mutex<BusInner>) -> MutexGuard<'_, BusInner> {
    inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Process-wide deep-link bus. Paths like `group-forum/open/5` are fanned out
/// to every live subscription whose prefix matches.
#[derive(Clone, Default)]
pub struct LinkEventBus {
    inner: Arc<Mutex<BusInner>>,
}

impl LinkEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for paths starting with `prefix`. The listener
    /// lives exactly as long as the returned guard.
    pub fn subscribe(&self, prefix: impl Into<String>) -> LinkSubscription {
        let (tx, receiver) = mpsc::unbounded_channel();
        let mut inner = lock(&self.inner);
        let id = inner.next_id;
        inner.next_id += 1;
        inner.trackers.insert(id, Tracker { prefix: prefix.into(), tx });
        tracing::debug!("Link tracker {} registered", id);
        LinkSubscription {
            id,
            bus: Arc::downgrade(&self.inner),
            receiver,
        }
    }

    /// Deliver `path` to matching listeners; returns how many received it.
    pub fn dispatch(&self, path: &str) -> usize {
        let mut inner = lock(&self.inner);
        let mut delivered = 0;
        inner.trackers.retain(|_, tracker| {
            if !path.starts_with(tracker.prefix.as_str()) {
                return true;
            }
            match tracker.tx.send(path.to_string()) {
                Ok(()) => {
                    delivered += 1;
                    true
                }
                Err(_) => false,
            }
        });
        delivered
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.inner).trackers.len()
    }
}

/// Scoped link listener. Dropping it deregisters from the bus.
pub struct LinkSubscription {
    id: u64,
    bus: Weak<Mutex<BusInner>>,
    receiver: mpsc::UnboundedReceiver<String>,
}

impl LinkSubscription {
    pub async fn recv(&mut self) -> Option<String> {
        self.receiver.recv().await
    }

    pub fn try_recv(&mut self) -> Option<String> {
        self.receiver.try_recv().ok()
    }
}

impl Drop for LinkSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.bus.upgrade() {
            lock(&inner).trackers.remove(&self.id);
            tracing::debug!("Link tracker {} removed", self.id);
        }
    }
}
