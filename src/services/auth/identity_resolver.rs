//! # 외부 신원 → 로컬 계정 매핑
//!
//! 검증된 외부 신원이 어떤 로컬 사용자에 묶일지 결정합니다.
//!
//! ## 매핑 순서 (첫 일치 우선)
//!
//! ```text
//! 1. (provider, external_id) 일치 ──► 그대로 반환           (쓰기 없음)
//! 2. email 일치                   ──► 그대로 반환           (쓰기 없음, 연동 정책이 켜져 있으면 외부 id 연결)
//! 3. 일치 없음                    ──► 새 레코드 생성 1회    (유니크 충돌 시 1회 재조회)
//! ```
//!
//! 조회 실패는 재시도 없이 [`IdentityResolutionError`]로 전파되며,
//! 실패 상황에서 사용자를 임의로 만들어내지 않습니다.

use std::sync::Arc;
use crate::{
    config::AccountLinkPolicy,
    domain::{
        entities::users::{NewUser, User},
        models::oauth::ExternalIdentity,
    },
    errors::errors::IdentityResolutionError,
    repositories::users::UserStore,
};
use super::password_hasher::{placeholder_password, CredentialHasher};

/// 어떤 경로로 사용자가 결정되었는지
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionOutcome {
    ExternalIdMatch,
    EmailMatch,
    /// 이메일 일치 레코드에 외부 id를 연결함
    Linked,
    Provisioned,
    /// 생성 중 유니크 충돌, 다른 요청이 만든 레코드를 재조회함
    ConcurrentlyProvisioned,
}

#[derive(Debug, Clone)]
pub struct Resolution {
    pub user: User,
    pub outcome: ResolutionOutcome,
}

impl Resolution {
    fn new(user: User, outcome: ResolutionOutcome) -> Self {
        Self { user, outcome }
    }
}

pub struct IdentityResolver {
    users: Arc<dyn UserStore>,
    hasher: Arc<dyn CredentialHasher>,
    link_policy: AccountLinkPolicy,
}

impl IdentityResolver {
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<dyn CredentialHasher>,
        link_policy: AccountLinkPolicy,
    ) -> Self {
        Self { users, hasher, link_policy }
    }

    /// 외부 신원에 해당하는 로컬 사용자를 반환합니다. 없으면 생성합니다.
    pub async fn resolve(&self, identity: &ExternalIdentity) -> Result<User, IdentityResolutionError> {
        Ok(self.resolve_with_outcome(identity).await?.user)
    }

    pub async fn resolve_with_outcome(
        &self,
        identity: &ExternalIdentity,
    ) -> Result<Resolution, IdentityResolutionError> {
        let provider = identity.provider();

        if let Some(user) = self.users.find_by_external_id(provider, identity.external_id()).await? {
            log::info!("{} 로그인 - 외부 id 일치: {}", provider, user.email);
            return Ok(Resolution::new(user, ResolutionOutcome::ExternalIdMatch));
        }

        if let Some(user) = self.users.find_by_email(identity.email()).await? {
            return self.link_if_allowed(user, identity).await;
        }

        self.provision(identity).await
    }

    async fn link_if_allowed(
        &self,
        user: User,
        identity: &ExternalIdentity,
    ) -> Result<Resolution, IdentityResolutionError> {
        let linkable = self.link_policy == AccountLinkPolicy::AttachWhenUnbound
            && user.client_id.is_none()
            && user.provider == identity.provider();

        if !linkable {
            log::info!("{} 로그인 - 이메일 일치: {}", identity.provider(), user.email);
            return Ok(Resolution::new(user, ResolutionOutcome::EmailMatch));
        }

        match self.users.attach_external_id(&user.id, identity.external_id()).await {
            Ok(Some(linked)) => {
                log::info!("{} 계정 연동: {}", identity.provider(), linked.email);
                Ok(Resolution::new(linked, ResolutionOutcome::Linked))
            }
            // 그 사이 다른 요청이 연결함
            Ok(None) => Ok(Resolution::new(user, ResolutionOutcome::EmailMatch)),
            Err(e) if e.is_unique_violation() => self.reread_after_conflict(identity).await,
            Err(e) => Err(e.into()),
        }
    }

    async fn provision(&self, identity: &ExternalIdentity) -> Result<Resolution, IdentityResolutionError> {
        let password_hash = self
            .hasher
            .hash(&placeholder_password())
            .map_err(IdentityResolutionError::Hashing)?;

        let new_user = NewUser::for_provider(identity.provider(), identity.profile().clone(), password_hash)
            .map_err(|e| IdentityResolutionError::InvalidIdentity(e.to_string()))?;

        match self.users.create(new_user).await {
            Ok(user) => {
                log::info!("새 {} 사용자 등록: {}", identity.provider(), user.email);
                Ok(Resolution::new(user, ResolutionOutcome::Provisioned))
            }
            Err(e) if e.is_unique_violation() => {
                log::warn!("{} 사용자 생성 중 유니크 충돌, 재조회: {}", identity.provider(), e);
                self.reread_after_conflict(identity).await
            }
            Err(e) => Err(e.into()),
        }
    }

    /// 동시 생성으로 인한 충돌 후 한 번만 재조회합니다.
    async fn reread_after_conflict(&self, identity: &ExternalIdentity) -> Result<Resolution, IdentityResolutionError> {
        let existing = match self.users.find_by_external_id(identity.provider(), identity.external_id()).await? {
            Some(user) => Some(user),
            None => self.users.find_by_email(identity.email()).await?,
        };

        existing
            .map(|user| Resolution::new(user, ResolutionOutcome::ConcurrentlyProvisioned))
            .ok_or_else(|| IdentityResolutionError::ConflictNotVisible {
                external_id: identity.external_id().to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use crate::config::AuthProvider;
    use crate::domain::entities::users::Role;
    use crate::domain::models::oauth::ProviderProfile;
    use crate::errors::errors::StorageError;
    use crate::repositories::users::InMemoryUserStore;
    use crate::services::auth::password_hasher::BcryptHasher;

    fn identity(provider: AuthProvider, external_id: &str, email: &str, name: &str) -> ExternalIdentity {
        ExternalIdentity::new(
            provider,
            ProviderProfile::new(external_id, email, Some(name.to_string())),
        )
        .unwrap()
    }

    fn seeded_user(provider: AuthProvider, client_id: Option<&str>, email: &str) -> User {
        let mut user = NewUser::for_provider(
            provider,
            ProviderProfile::new(client_id.unwrap_or("seed"), email, Some("Seed".to_string())),
            "seed-hash".to_string(),
        )
        .unwrap()
        .into_user(format!("id-{}", email));
        user.client_id = client_id.map(str::to_string);
        user
    }

    fn resolver(store: Arc<dyn UserStore>, policy: AccountLinkPolicy) -> IdentityResolver {
        IdentityResolver::new(store, Arc::new(BcryptHasher::new(4)), policy)
    }

    #[actix_web::test]
    async fn test_new_identity_is_provisioned() {
        let store = Arc::new(InMemoryUserStore::new());
        let resolver = resolver(store.clone(), AccountLinkPolicy::EmailOnly);

        let resolution = resolver
            .resolve_with_outcome(&identity(AuthProvider::Google, "g123", "a@x.com", "Ann"))
            .await
            .unwrap();
        let user = resolution.user;

        assert_eq!(resolution.outcome, ResolutionOutcome::Provisioned);
        assert_eq!(user.provider, AuthProvider::Google);
        assert_eq!(user.client_id.as_deref(), Some("g123"));
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.display_name, "Ann");
        assert!(user.roles().contains(&Role::User));
        assert!(!user.is_verified);
        assert_eq!(store.len(), 1);
        assert_eq!(store.write_count(), 1);
    }

    #[actix_web::test]
    async fn test_provisioned_password_is_a_hash_of_random_value() {
        let store = Arc::new(InMemoryUserStore::new());
        let hasher = Arc::new(BcryptHasher::new(4));
        let resolver = IdentityResolver::new(store, hasher.clone(), AccountLinkPolicy::EmailOnly);

        let a = resolver.resolve(&identity(AuthProvider::Google, "g1", "a@x.com", "A")).await.unwrap();
        let b = resolver.resolve(&identity(AuthProvider::Google, "g2", "b@x.com", "B")).await.unwrap();

        assert!(a.password_hash.starts_with("$2"));
        assert!(!hasher.verify("test", &a.password_hash));
        assert_ne!(a.password_hash, b.password_hash);
    }

    #[actix_web::test]
    async fn test_external_id_match_returns_existing_unchanged() {
        let existing = seeded_user(AuthProvider::Google, Some("g123"), "old@x.com");
        let store = Arc::new(InMemoryUserStore::with_users([existing.clone()]));
        let resolver = resolver(store.clone(), AccountLinkPolicy::AttachWhenUnbound);

        let resolution = resolver
            .resolve_with_outcome(&identity(AuthProvider::Google, "g123", "new@x.com", "Other"))
            .await
            .unwrap();

        assert_eq!(resolution.outcome, ResolutionOutcome::ExternalIdMatch);
        assert_eq!(resolution.user, existing);
        assert_eq!(resolution.user.email, "old@x.com");
        assert_eq!(store.len(), 1);
        assert_eq!(store.write_count(), 0);
    }

    #[actix_web::test]
    async fn test_email_match_returns_existing_without_writes() {
        let existing = seeded_user(AuthProvider::GitHub, Some("42"), "a@x.com");
        let store = Arc::new(InMemoryUserStore::with_users([existing.clone()]));
        let resolver = resolver(store.clone(), AccountLinkPolicy::EmailOnly);

        let resolution = resolver
            .resolve_with_outcome(&identity(AuthProvider::Google, "g-new", "A@X.com", "Ann"))
            .await
            .unwrap();

        assert_eq!(resolution.outcome, ResolutionOutcome::EmailMatch);
        assert_eq!(resolution.user, existing);
        assert_eq!(store.write_count(), 0);
    }

    #[actix_web::test]
    async fn test_email_only_policy_does_not_link_unbound_account() {
        let existing = seeded_user(AuthProvider::Google, None, "a@x.com");
        let store = Arc::new(InMemoryUserStore::with_users([existing.clone()]));
        let resolver = resolver(store.clone(), AccountLinkPolicy::EmailOnly);

        let user = resolver.resolve(&identity(AuthProvider::Google, "g9", "a@x.com", "Ann")).await.unwrap();

        assert!(user.client_id.is_none());
        assert_eq!(store.write_count(), 0);
    }

    #[actix_web::test]
    async fn test_attach_policy_links_unbound_same_provider_account() {
        let existing = seeded_user(AuthProvider::Google, None, "a@x.com");
        let store = Arc::new(InMemoryUserStore::with_users([existing.clone()]));
        let resolver = resolver(store.clone(), AccountLinkPolicy::AttachWhenUnbound);

        let resolution = resolver
            .resolve_with_outcome(&identity(AuthProvider::Google, "g9", "a@x.com", "Ann"))
            .await
            .unwrap();

        assert_eq!(resolution.outcome, ResolutionOutcome::Linked);
        assert_eq!(resolution.user.id, existing.id);
        assert_eq!(resolution.user.client_id.as_deref(), Some("g9"));

        // 다음 로그인은 외부 id로 바로 일치
        let again = resolver
            .resolve_with_outcome(&identity(AuthProvider::Google, "g9", "a@x.com", "Ann"))
            .await
            .unwrap();
        assert_eq!(again.outcome, ResolutionOutcome::ExternalIdMatch);
        assert_eq!(store.len(), 1);
    }

    #[actix_web::test]
    async fn test_attach_policy_skips_other_provider_account() {
        let existing = seeded_user(AuthProvider::GitHub, None, "a@x.com");
        let store = Arc::new(InMemoryUserStore::with_users([existing.clone()]));
        let resolver = resolver(store.clone(), AccountLinkPolicy::AttachWhenUnbound);

        let resolution = resolver
            .resolve_with_outcome(&identity(AuthProvider::Google, "g9", "a@x.com", "Ann"))
            .await
            .unwrap();

        assert_eq!(resolution.outcome, ResolutionOutcome::EmailMatch);
        assert!(resolution.user.client_id.is_none());
        assert_eq!(store.write_count(), 0);
    }

    /// 조회는 항상 실패하고 생성 호출 수를 센다
    #[derive(Default)]
    struct UnavailableStore {
        creates: AtomicUsize,
    }

    #[async_trait]
    impl UserStore for UnavailableStore {
        async fn find_by_external_id(&self, _: AuthProvider, _: &str) -> Result<Option<User>, StorageError> {
            Err(StorageError::Unavailable("connection refused".to_string()))
        }

        async fn find_by_email(&self, _: &str) -> Result<Option<User>, StorageError> {
            Err(StorageError::Unavailable("connection refused".to_string()))
        }

        async fn create(&self, _: NewUser) -> Result<User, StorageError> {
            self.creates.fetch_add(1, Ordering::SeqCst);
            Err(StorageError::Unavailable("connection refused".to_string()))
        }

        async fn attach_external_id(&self, _: &str, _: &str) -> Result<Option<User>, StorageError> {
            Ok(None)
        }

        async fn touch_last_login(&self, _: &str, _: DateTime<Utc>) -> Result<Option<User>, StorageError> {
            Ok(None)
        }
    }

    #[actix_web::test]
    async fn test_query_failure_is_propagated_without_creating() {
        let store = Arc::new(UnavailableStore::default());
        let resolver = resolver(store.clone(), AccountLinkPolicy::EmailOnly);

        let err = resolver
            .resolve(&identity(AuthProvider::Google, "g1", "a@x.com", "Ann"))
            .await
            .unwrap_err();

        assert!(matches!(err, IdentityResolutionError::Storage(StorageError::Unavailable(_))));
        assert_eq!(store.creates.load(Ordering::SeqCst), 0);
    }

    /// 두 요청이 모두 조회를 마친 뒤에야 생성이 진행되도록 막는 저장소
    struct RacingStore {
        inner: InMemoryUserStore,
        barrier: tokio::sync::Barrier,
    }

    #[async_trait]
    impl UserStore for RacingStore {
        async fn find_by_external_id(&self, provider: AuthProvider, id: &str) -> Result<Option<User>, StorageError> {
            self.inner.find_by_external_id(provider, id).await
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
            self.inner.find_by_email(email).await
        }

        async fn create(&self, user: NewUser) -> Result<User, StorageError> {
            self.barrier.wait().await;
            self.inner.create(user).await
        }

        async fn attach_external_id(&self, user_id: &str, id: &str) -> Result<Option<User>, StorageError> {
            self.inner.attach_external_id(user_id, id).await
        }

        async fn touch_last_login(&self, user_id: &str, at: DateTime<Utc>) -> Result<Option<User>, StorageError> {
            self.inner.touch_last_login(user_id, at).await
        }
    }

    #[tokio::test]
    async fn test_concurrent_first_logins_create_exactly_one_user() {
        let store = Arc::new(RacingStore {
            inner: InMemoryUserStore::new(),
            barrier: tokio::sync::Barrier::new(2),
        });
        let resolver = resolver(store.clone(), AccountLinkPolicy::EmailOnly);
        let incoming = identity(AuthProvider::Google, "g-race", "race@x.com", "Racer");

        let (first, second) = tokio::join!(
            resolver.resolve_with_outcome(&incoming),
            resolver.resolve_with_outcome(&incoming),
        );
        let (first, second) = (first.unwrap(), second.unwrap());

        assert_eq!(store.inner.len(), 1);
        assert_eq!(first.user.id, second.user.id);
        assert_eq!(first.user.client_id.as_deref(), Some("g-race"));
        assert_eq!(second.user.client_id.as_deref(), Some("g-race"));

        let mut outcomes = vec![first.outcome, second.outcome];
        outcomes.sort_by_key(|o| *o == ResolutionOutcome::Provisioned);
        assert_eq!(
            outcomes,
            vec![ResolutionOutcome::ConcurrentlyProvisioned, ResolutionOutcome::Provisioned]
        );
    }

    /// 생성은 항상 유니크 충돌, 재조회해도 아무것도 없는 저장소
    struct PhantomConflictStore;

    #[async_trait]
    impl UserStore for PhantomConflictStore {
        async fn find_by_external_id(&self, _: AuthProvider, _: &str) -> Result<Option<User>, StorageError> {
            Ok(None)
        }

        async fn find_by_email(&self, _: &str) -> Result<Option<User>, StorageError> {
            Ok(None)
        }

        async fn create(&self, _: NewUser) -> Result<User, StorageError> {
            Err(StorageError::UniqueViolation("email".to_string()))
        }

        async fn attach_external_id(&self, _: &str, _: &str) -> Result<Option<User>, StorageError> {
            Ok(None)
        }

        async fn touch_last_login(&self, _: &str, _: DateTime<Utc>) -> Result<Option<User>, StorageError> {
            Ok(None)
        }
    }

    #[actix_web::test]
    async fn test_conflict_without_visible_record_is_an_error() {
        let resolver = resolver(Arc::new(PhantomConflictStore), AccountLinkPolicy::EmailOnly);

        let err = resolver
            .resolve(&identity(AuthProvider::Google, "g1", "a@x.com", "Ann"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            IdentityResolutionError::ConflictNotVisible { external_id: "g1".to_string() }
        );
    }
}
