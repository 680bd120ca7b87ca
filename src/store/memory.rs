use parking_lot::RwLock;
use std::collections::HashMap;

use super::{KvStore, StoreFuture};

/// Process-local key-value store backed by a `HashMap`.
///
/// Nothing survives a restart. Used by the test suite and by `STORE_BACKEND=memory`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl KvStore for MemoryStore {
    fn get<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<String>> {
        let value = self.entries.read().get(key).cloned();
        tracing::debug!("Memory store read for key {:?}: found={}", key, value.is_some());
        Box::pin(std::future::ready(Ok::<_, anyhow::Error>(value)))
    }

    fn put<'a>(&'a self, key: &'a str, value: String) -> StoreFuture<'a, ()> {
        let count = {
            let mut entries = self.entries.write();
            entries.insert(key.to_string(), value);
            entries.len()
        };
        tracing::debug!("Memory store wrote key {:?} ({} records)", key, count);
        Box::pin(std::future::ready(Ok::<_, anyhow::Error>(())))
    }
}
