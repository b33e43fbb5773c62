//! # 사용자 저장소 계약
//!
//! 신원 매핑 서비스가 의존하는 저장소 인터페이스입니다.
//! 구현체는 `email`과 (`provider`, `client_id`)에 대한 유니크 제약을 반드시 강제해야 하며,
//! 위반 시 [`StorageError::UniqueViolation`]을 반환해야 합니다.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use crate::config::AuthProvider;
use crate::domain::entities::users::{NewUser, User};
use crate::errors::errors::StorageError;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// (provider, 외부 id)로 조회
    async fn find_by_external_id(
        &self,
        provider: AuthProvider,
        external_id: &str,
    ) -> Result<Option<User>, StorageError>;

    /// 정규화된 이메일로 조회
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StorageError>;

    /// 새 레코드 저장 (id 할당)
    async fn create(&self, user: NewUser) -> Result<User, StorageError>;

    /// `client_id`가 비어있는 레코드에 외부 id를 연결합니다.
    ///
    /// 이미 다른 값이 연결되어 있으면 변경하지 않고 `Ok(None)`을 반환합니다.
    async fn attach_external_id(
        &self,
        user_id: &str,
        external_id: &str,
    ) -> Result<Option<User>, StorageError>;

    /// 마지막 로그인 시각 갱신
    async fn touch_last_login(
        &self,
        user_id: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<User>, StorageError>;
}
