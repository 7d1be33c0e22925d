use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tracing::{debug, warn};

/// A single persisted key changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    pub key: String,
    pub old_value: Option<String>,
    /// `None` when the key was removed
    pub new_value: Option<String>,
}

/// Fan-out of storage changes to every open view
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    sender: broadcast::Sender<StorageEvent>,
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new(64)
    }
}

impl ChangeNotifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Returns how many subscribers were notified
    pub fn publish(&self, event: StorageEvent) -> usize {
        debug!("Storage change on {}", event.key);
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> Subscription {
        Subscription {
            receiver: self.sender.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// A view's registration for change events. Dropping it unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    receiver: broadcast::Receiver<StorageEvent>,
}

impl Subscription {
    /// Next event, or `None` if nothing is queued. Overflowed events are
    /// skipped with a warning.
    pub fn try_recv(&mut self) -> Option<StorageEvent> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => return Some(event),
                Err(TryRecvError::Lagged(missed)) => {
                    warn!("Subscriber lagged, {} storage events dropped", missed);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return None,
            }
        }
    }

    /// Drain queued events and report whether `key` may have changed.
    /// A lagged receiver cannot rule it out, so lag counts as a change.
    pub fn poll_changed(&mut self, key: &str) -> bool {
        let mut changed = false;
        loop {
            match self.receiver.try_recv() {
                Ok(event) => changed |= event.key == key,
                Err(TryRecvError::Lagged(_)) => changed = true,
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return changed,
            }
        }
    }

    /// Wait until `key` changes. Returns `false` once the store is gone.
    pub async fn changed(&mut self, key: &str) -> bool {
        loop {
            match self.receiver.recv().await {
                Ok(event) if event.key == key => return true,
                Ok(_) => continue,
                Err(RecvError::Lagged(_)) => return true,
                Err(RecvError::Closed) => return false,
            }
        }
    }
}
