//! # 애플리케이션 컨텍스트
//!
//! 시작 시 한 번 협력자 그래프를 조립하고, `web::Data`로 핸들러에 전달합니다.
//! 전역 상태 없이 모든 의존성은 생성자 인자로 흐릅니다.
//!
//! ```text
//! UserStore ─────────────┬──► IdentityResolver ─────┐
//! CredentialHasher ──────┘                          ├──► OAuthFlowController
//! RememberMeStore ───────┬──► AuthenticationSession ┘          ▲
//! SessionSettings ───────┘                                     │
//! ClientRegistry (Google / GitHub) ────────────────────────────┘
//! ```

use std::sync::Arc;
use crate::{
    caching::redis::RedisClient,
    config::{
        Environment, ResolverConfig, RouteConfig, RouteSettings, SessionConfig, SessionStoreKind,
        StorageBackend, StorageConfig,
    },
    db::Database,
    errors::errors::AppError,
    repositories::{
        sessions::{InMemoryRememberMeStore, RedisRememberMeStore, RememberMeStore},
        users::{InMemoryUserStore, UserRepository, UserStore},
    },
    services::{
        auth::{AuthenticationSession, BcryptHasher, IdentityResolver},
        oauth::{ClientRegistry, OAuthFlowController},
    },
};

pub struct AppContext {
    pub flow: Arc<OAuthFlowController>,
    pub routes: RouteSettings,
    /// 세션 쿠키에 `Secure` 속성 부여 (운영 환경)
    pub secure_cookies: bool,
}

impl AppContext {
    pub fn new(flow: Arc<OAuthFlowController>, routes: RouteSettings) -> Self {
        Self { flow, routes, secure_cookies: false }
    }

    /// 환경 변수 설정으로 전체 그래프를 조립합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::DatabaseError` - MongoDB 연결 또는 인덱스 생성 실패
    /// * `AppError::RedisError` - Redis 연결 실패
    pub async fn from_env() -> Result<Self, AppError> {
        let users = Self::user_store().await?;
        let settings = SessionConfig::settings();

        let remember_me = if settings.remember_me_enabled {
            Some(Self::remember_me_store().await?)
        } else {
            log::info!("remember-me 비활성화");
            None
        };

        let resolver = IdentityResolver::new(
            users.clone(),
            Arc::new(BcryptHasher::from_env()),
            ResolverConfig::link_policy(),
        );
        let sessions = AuthenticationSession::new(settings, users, remember_me);
        let clients = ClientRegistry::from_env(reqwest::Client::new());

        if clients.providers().is_empty() {
            log::warn!("활성화된 OAuth 프로바이더가 없습니다");
        }

        let flow = OAuthFlowController::new(clients, Arc::new(resolver), Arc::new(sessions));

        let mut context = Self::new(Arc::new(flow), RouteConfig::settings());
        context.secure_cookies = Environment::current() == Environment::Production;

        Ok(context)
    }

    async fn user_store() -> Result<Arc<dyn UserStore>, AppError> {
        match StorageConfig::backend() {
            StorageBackend::Mongo => {
                log::info!("📡 데이터베이스 연결 중...");
                let database = Database::new()
                    .await
                    .map_err(|e| AppError::DatabaseError(format!("MongoDB 연결 실패: {}", e)))?;

                let repository = UserRepository::new(Arc::new(database));
                repository.create_indexes().await?;

                Ok(Arc::new(repository))
            }
            StorageBackend::Memory => {
                log::warn!("메모리 사용자 저장소 사용 중 (재시작 시 데이터 유실)");
                Ok(Arc::new(InMemoryUserStore::new()))
            }
        }
    }

    async fn remember_me_store() -> Result<Arc<dyn RememberMeStore>, AppError> {
        match SessionConfig::store_kind() {
            SessionStoreKind::Redis => {
                let redis = RedisClient::new()
                    .await
                    .map_err(|e| AppError::RedisError(format!("Redis 연결 실패: {}", e)))?;

                Ok(Arc::new(RedisRememberMeStore::new(Arc::new(redis))))
            }
            SessionStoreKind::Memory => Ok(Arc::new(InMemoryRememberMeStore::new())),
        }
    }
}
