//! # 메모리 사용자 저장소
//!
//! 개발 환경(`STORAGE_BACKEND=memory`)과 테스트에서 사용하는 저장소입니다.
//! 단일 쓰기 락 안에서 유니크 검사와 삽입을 수행하므로 MongoDB 유니크 인덱스와
//! 같은 제약을 원자적으로 보장합니다.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::config::AuthProvider;
use crate::domain::entities::users::{NewUser, User};
use crate::errors::errors::StorageError;
use super::user_store::UserStore;

#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, User>>,
    writes: AtomicUsize,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 기존 레코드로 채워진 저장소 (테스트용 시드)
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let store = Self::new();
        if let Ok(mut map) = store.users.write() {
            for user in users {
                map.insert(user.id.clone(), user);
            }
        }
        store
    }

    pub fn len(&self) -> usize {
        self.users.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 성공한 쓰기 연산 수 (create, attach, touch)
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn poisoned() -> StorageError {
        StorageError::Unavailable("in-memory store lock poisoned".to_string())
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_external_id(
        &self,
        provider: AuthProvider,
        external_id: &str,
    ) -> Result<Option<User>, StorageError> {
        let users = self.users.read().map_err(|_| Self::poisoned())?;
        Ok(users.values().find(|u| u.is_bound_to(provider, external_id)).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        let users = self.users.read().map_err(|_| Self::poisoned())?;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, StorageError> {
        let mut users = self.users.write().map_err(|_| Self::poisoned())?;

        if users.values().any(|u| u.email == user.email) {
            return Err(StorageError::UniqueViolation(format!("email {}", user.email)));
        }

        if users.values().any(|u| u.is_bound_to(user.provider, &user.client_id)) {
            return Err(StorageError::UniqueViolation(format!(
                "{} client_id {}",
                user.provider, user.client_id
            )));
        }

        let created = user.into_user(Uuid::new_v4().to_string());
        users.insert(created.id.clone(), created.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);

        Ok(created)
    }

    async fn attach_external_id(
        &self,
        user_id: &str,
        external_id: &str,
    ) -> Result<Option<User>, StorageError> {
        let mut users = self.users.write().map_err(|_| Self::poisoned())?;

        let provider = match users.get(user_id) {
            Some(user) if user.client_id.is_none() => user.provider,
            _ => return Ok(None),
        };

        if users.values().any(|u| u.is_bound_to(provider, external_id)) {
            return Err(StorageError::UniqueViolation(format!(
                "{} client_id {}",
                provider, external_id
            )));
        }

        let Some(user) = users.get_mut(user_id) else {
            return Ok(None);
        };
        user.client_id = Some(external_id.to_string());
        user.updated_at = Utc::now();
        self.writes.fetch_add(1, Ordering::SeqCst);

        Ok(Some(user.clone()))
    }

    async fn touch_last_login(
        &self,
        user_id: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<User>, StorageError> {
        let mut users = self.users.write().map_err(|_| Self::poisoned())?;
        let Some(user) = users.get_mut(user_id) else {
            return Ok(None);
        };
        user.last_login = at;
        user.updated_at = Utc::now();
        self.writes.fetch_add(1, Ordering::SeqCst);

        Ok(Some(user.clone()))
    }
}
