//! # OAuth 플로우 오케스트레이션
//!
//! ```text
//! start_flow(provider)        ──► 동의 화면 URL
//! handle_callback(provider, code)
//!     exchange_code ──► fetch_profile ──► IdentityResolver ──► AuthenticationSession
//!          │                 │                  │                      │
//!          └── ExchangeFailed┘                  └──── UserNotFound ────┘
//! ```
//!
//! 상태를 갖지 않으며, 세션은 반환값으로만 전달됩니다.

use std::sync::Arc;
use crate::{
    config::AuthProvider,
    domain::models::session::AuthSession,
    errors::errors::{AppError, OAuthExchangeError},
    services::auth::{AuthenticationSession, IdentityResolver},
};
use super::client::ClientRegistry;

/// 콜백 처리 결과
#[derive(Debug)]
pub enum CallbackOutcome {
    Authenticated(AuthSession),
    /// 토큰 교환 또는 프로필 조회 실패
    ExchangeFailed(OAuthExchangeError),
    /// 로컬 사용자를 결정하지 못함
    UserNotFound,
}

pub struct OAuthFlowController {
    clients: ClientRegistry,
    resolver: Arc<IdentityResolver>,
    sessions: Arc<AuthenticationSession>,
}

impl OAuthFlowController {
    pub fn new(
        clients: ClientRegistry,
        resolver: Arc<IdentityResolver>,
        sessions: Arc<AuthenticationSession>,
    ) -> Self {
        Self { clients, resolver, sessions }
    }

    /// 프로바이더 동의 화면으로 보낼 URL을 만듭니다.
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 등록되지 않은 프로바이더
    pub fn start_flow(&self, provider: AuthProvider) -> Result<String, AppError> {
        let client = self.clients.get(provider)?;
        Ok(client.authorization_url(client.scopes()))
    }

    /// Authorization Code로 사용자를 인증하고 세션을 수립합니다.
    ///
    /// 등록되지 않은 프로바이더만 `Err`이고, 나머지 실패는 [`CallbackOutcome`]으로 구분됩니다.
    pub async fn handle_callback(&self, provider: AuthProvider, code: &str) -> Result<CallbackOutcome, AppError> {
        let client = self.clients.get(provider)?;

        if code.trim().is_empty() {
            return Ok(CallbackOutcome::ExchangeFailed(OAuthExchangeError::TokenExchange(
                "authorization code 누락".to_string(),
            )));
        }

        let identity = match client.exchange_code(code).await {
            Ok(token) => client.fetch_profile(&token).await,
            Err(e) => Err(e),
        };

        let identity = match identity {
            Ok(identity) => identity,
            Err(e) => {
                log::warn!("{} OAuth 교환 실패: {}", provider, e);
                return Ok(CallbackOutcome::ExchangeFailed(e));
            }
        };

        let user = match self.resolver.resolve(&identity).await {
            Ok(user) => Some(user),
            Err(e) => {
                log::error!("{} 사용자 결정 실패 ({}): {}", provider, identity.email(), e);
                None
            }
        };

        match self.sessions.establish(user.as_ref()).await {
            Ok(session) => Ok(CallbackOutcome::Authenticated(session)),
            Err(e) => {
                log::warn!("{} 세션 수립 실패: {}", provider, e);
                Ok(CallbackOutcome::UserNotFound)
            }
        }
    }

    pub fn sessions(&self) -> &AuthenticationSession {
        &self.sessions
    }

    pub fn providers(&self) -> Vec<AuthProvider> {
        self.clients.providers()
    }
}
