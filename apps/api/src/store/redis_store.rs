use async_trait::async_trait;
use redis::AsyncCommands;

use crate::store::{KeyValueStore, StoreError};

/// Namespace prepended to every key.
const KEY_PREFIX: &str = "recruitai:";

pub struct RedisStore {
    client: redis::Client,
}

impl RedisStore {
    pub fn open(url: &str) -> Result<Self, StoreError> {
        Ok(Self {
            client: redis::Client::open(url)?,
        })
    }

    fn namespaced(key: &str) -> String {
        format!("{KEY_PREFIX}{key}")
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection, StoreError> {
        Ok(self.client.get_multiplexed_async_connection().await?)
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.connection().await?;
        Ok(conn.get::<_, Option<String>>(Self::namespaced(key)).await?)
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut conn = self.connection().await?;
        conn.set::<_, _, ()>(Self::namespaced(key), value).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.connection().await?;
        conn.del::<_, ()>(Self::namespaced(key)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_namespaced() {
        assert_eq!(RedisStore::namespaced("recruitAI_state"), "recruitai:recruitAI_state");
    }

    #[test]
    fn test_open_rejects_malformed_url() {
        assert!(matches!(
            RedisStore::open("not a url"),
            Err(StoreError::Unavailable(_))
        ));
    }
}
