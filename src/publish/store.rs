use crate::error::StoreError;
use ahash::AHashMap;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A key-value store the router reads compiled configs from.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[async_trait]
impl<S: ConfigStore + ?Sized> ConfigStore for Arc<S> {
    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).put(key, value).await
    }
}

/// In-process store. Useful for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<AHashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }

    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.entries.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl ConfigStore for MemoryStore {
    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
