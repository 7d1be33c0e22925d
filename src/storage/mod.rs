//! Durable per-device key-value storage shared by every view, with change
//! notification after each successful write.

use crate::error::Result;
use std::sync::Arc;

pub mod directory;
pub mod memory;
pub mod notify;

pub use directory::DirectoryStore;
pub use memory::MemoryStore;
pub use notify::{ChangeNotifier, StorageEvent, Subscription};

/// Backend for persisted state. Each call is atomic for its single key.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Returns whether the key existed
    fn remove(&self, key: &str) -> Result<bool>;

    /// All keys, sorted
    fn keys(&self) -> Result<Vec<String>>;
}

/// A backend plus the notifier every write is published on
#[derive(Clone)]
pub struct SharedStore {
    backend: Arc<dyn KeyValueStore>,
    notifier: ChangeNotifier,
}

impl SharedStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            notifier: ChangeNotifier::default(),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        self.backend.get(key)
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let old_value = self.backend.get(key).ok().flatten();
        self.backend.set(key, value)?;
        self.notifier.publish(StorageEvent {
            key: key.to_string(),
            old_value,
            new_value: Some(value.to_string()),
        });
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<bool> {
        let old_value = self.backend.get(key).ok().flatten();
        let removed = self.backend.remove(key)?;
        if removed {
            self.notifier.publish(StorageEvent {
                key: key.to_string(),
                old_value,
                new_value: None,
            });
        }
        Ok(removed)
    }

    pub fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        Ok(self
            .backend
            .keys()?
            .into_iter()
            .filter(|k| k.starts_with(prefix))
            .collect())
    }

    pub fn subscribe(&self) -> Subscription {
        self.notifier.subscribe()
    }

    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }
}
