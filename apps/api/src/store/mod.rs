//! Key-value persistence for drafts and saved results.
//!
//! `AppState` holds an `Arc<dyn KeyValueStore>`: Redis when `REDIS_URL` is set,
//! otherwise an in-process map. Typed, versioned access lives in `drafts`.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

pub mod drafts;
pub mod handlers;
pub mod redis_store;

pub use drafts::DraftStore;
pub use redis_store::RedisStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("stored value under `{key}` is corrupt: {reason}")]
    Corrupt { key: String, reason: String },

    #[error("stored value under `{key}` has unsupported schema version {version}")]
    UnsupportedVersion { key: String, version: u64 },
}

impl From<redis::RedisError> for StoreError {
    fn from(e: redis::RedisError) -> Self {
        StoreError::Unavailable(e.to_string())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Raw string storage. Values are opaque JSON text.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}

// ────────────────────────────────────────────────────────────────────────────
// MemoryStore
// ────────────────────────────────────────────────────────────────────────────

/// In-process store. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
