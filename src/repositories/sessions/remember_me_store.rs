//! # remember-me 토큰 저장소
//!
//! 토큰 원문이 아닌 SHA-256 다이제스트를 키로 항목을 저장합니다.
//! Redis 구현체는 TTL로 만료를 처리하고, 메모리 구현체는 조회 시 만료를 검사하며
//! 저장 시 만료된 항목을 제거합니다.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use async_trait::async_trait;
use chrono::Utc;
use crate::caching::redis::RedisClient;
use crate::domain::models::session::RememberMeEntry;
use crate::errors::errors::StorageError;

#[async_trait]
pub trait RememberMeStore: Send + Sync {
    async fn save(&self, digest: &str, entry: &RememberMeEntry, ttl_seconds: u64) -> Result<(), StorageError>;

    async fn load(&self, digest: &str) -> Result<Option<RememberMeEntry>, StorageError>;

    async fn revoke(&self, digest: &str) -> Result<(), StorageError>;
}

pub struct RedisRememberMeStore {
    redis: Arc<RedisClient>,
}

impl RedisRememberMeStore {
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }

    fn key(digest: &str) -> String {
        format!("remember_me:{}", digest)
    }
}

fn redis_error(e: redis::RedisError) -> StorageError {
    if e.is_io_error() || e.is_connection_refusal() || e.is_timeout() {
        StorageError::Unavailable(e.to_string())
    } else {
        StorageError::Query(e.to_string())
    }
}

#[async_trait]
impl RememberMeStore for RedisRememberMeStore {
    async fn save(&self, digest: &str, entry: &RememberMeEntry, ttl_seconds: u64) -> Result<(), StorageError> {
        self.redis
            .set_with_expiry(&Self::key(digest), entry, ttl_seconds)
            .await
            .map_err(redis_error)
    }

    async fn load(&self, digest: &str) -> Result<Option<RememberMeEntry>, StorageError> {
        self.redis
            .get::<RememberMeEntry>(&Self::key(digest))
            .await
            .map_err(redis_error)
    }

    async fn revoke(&self, digest: &str) -> Result<(), StorageError> {
        self.redis.del(&Self::key(digest)).await.map_err(redis_error)
    }
}

#[derive(Default)]
pub struct InMemoryRememberMeStore {
    entries: RwLock<HashMap<String, RememberMeEntry>>,
}

impl InMemoryRememberMeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn poisoned() -> StorageError {
        StorageError::Unavailable("in-memory session store lock poisoned".to_string())
    }
}

#[async_trait]
impl RememberMeStore for InMemoryRememberMeStore {
    /// 저장할 때마다 만료된 항목을 정리합니다. 만료 시각은 `entry.expires_at`을 따릅니다.
    async fn save(&self, digest: &str, entry: &RememberMeEntry, _ttl_seconds: u64) -> Result<(), StorageError> {
        let now = Utc::now();
        let mut entries = self.entries.write().map_err(|_| Self::poisoned())?;
        entries.retain(|_, existing| existing.expires_at > now);
        entries.insert(digest.to_string(), entry.clone());
        Ok(())
    }

    async fn load(&self, digest: &str) -> Result<Option<RememberMeEntry>, StorageError> {
        let entries = self.entries.read().map_err(|_| Self::poisoned())?;
        Ok(entries
            .get(digest)
            .filter(|entry| entry.expires_at > Utc::now())
            .cloned())
    }

    async fn revoke(&self, digest: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| Self::poisoned())?;
        entries.remove(digest);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn entry(expires_in: Duration) -> RememberMeEntry {
        let now = Utc::now();
        RememberMeEntry {
            user_identifier: "a@x.com".to_string(),
            user_id: "u1".to_string(),
            issued_at: now,
            expires_at: now + expires_in,
        }
    }

    #[actix_web::test]
    async fn test_save_load_revoke() {
        let store = InMemoryRememberMeStore::new();
        let saved = entry(Duration::days(30));

        store.save("digest", &saved, 60).await.unwrap();
        assert_eq!(store.load("digest").await.unwrap(), Some(saved));

        store.revoke("digest").await.unwrap();
        assert!(store.load("digest").await.unwrap().is_none());
        assert!(store.is_empty());
    }

    #[actix_web::test]
    async fn test_expired_entry_is_not_returned() {
        let store = InMemoryRememberMeStore::new();
        store.save("old", &entry(Duration::seconds(-1)), 60).await.unwrap();

        assert!(store.load("old").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_save_purges_expired_entries() {
        let store = InMemoryRememberMeStore::new();
        for i in 0..100 {
            store.save(&format!("old-{}", i), &entry(Duration::seconds(-1)), 60).await.unwrap();
        }
        assert!(store.len() <= 1);

        store.save("fresh", &entry(Duration::days(30)), 60).await.unwrap();

        assert_eq!(store.len(), 1);
        assert!(store.load("fresh").await.unwrap().is_some());
    }
}
