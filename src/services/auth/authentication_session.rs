//! # 인증 세션 수립
//!
//! 리졸버가 돌려준 사용자로 세션을 만듭니다. 사용자가 없으면 세션은 만들어지지 않습니다.
//!
//! - 세션 토큰: HS256 JWT, `sub`는 사용자 식별자(이메일)
//! - remember-me: 임의 토큰을 발급하고 저장소에는 SHA-256 다이제스트만 보관
//! - 마지막 로그인 시각은 여기서 갱신하며, 갱신 실패는 로그인 실패로 보지 않음

use std::sync::Arc;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sha2::{Digest, Sha256};
use uuid::Uuid;
use crate::{
    config::SessionSettings,
    domain::{
        entities::users::User,
        models::session::{AuthSession, RememberMeEntry, RememberMeToken, SessionClaims},
    },
    errors::errors::AppError,
    repositories::{sessions::RememberMeStore, users::UserStore},
};

pub struct AuthenticationSession {
    settings: SessionSettings,
    users: Arc<dyn UserStore>,
    remember_me: Option<Arc<dyn RememberMeStore>>,
}

impl AuthenticationSession {
    pub fn new(
        settings: SessionSettings,
        users: Arc<dyn UserStore>,
        remember_me: Option<Arc<dyn RememberMeStore>>,
    ) -> Self {
        Self { settings, users, remember_me }
    }

    /// remember-me 토큰 발급 여부
    pub fn supports_remember_me(&self) -> bool {
        self.settings.remember_me_enabled && self.remember_me.is_some()
    }

    /// 세션 토큰 수명 (초)
    pub fn expires_in(&self) -> i64 {
        Duration::hours(self.settings.expiration_hours).num_seconds()
    }

    /// 사용자에 대한 세션을 수립합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 사용자가 없음
    /// * `AppError::InternalError` - 토큰 서명 실패
    pub async fn establish(&self, user: Option<&User>) -> Result<AuthSession, AppError> {
        let user = user.ok_or_else(|| AppError::AuthenticationError("User not found!".to_string()))?;
        let now = Utc::now();

        let session_token = self.issue_token(user, now)?;

        if let Err(e) = self.users.touch_last_login(&user.id, now).await {
            log::warn!("마지막 로그인 시각 갱신 실패 ({}): {}", user.email, e);
        }

        let remember_me = if self.supports_remember_me() {
            self.issue_remember_me(user, now).await
        } else {
            None
        };

        log::info!("세션 수립: {} ({})", user.user_identifier(), user.provider);

        Ok(AuthSession {
            user_identifier: user.user_identifier().to_string(),
            user_id: user.id.clone(),
            provider: user.provider,
            session_token,
            expires_in: self.expires_in(),
            remember_me,
        })
    }

    /// 세션 토큰을 검증하고 클레임을 반환합니다.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AppError> {
        let decoding_key = DecodingKey::from_secret(self.settings.secret.as_ref());

        decode::<SessionClaims>(token, &decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| AppError::AuthenticationError(format!("유효하지 않은 세션 토큰: {}", e)))
    }

    /// remember-me 토큰으로 저장된 항목을 찾습니다. 만료/미존재 시 `None`.
    pub async fn recall(&self, token: &str) -> Result<Option<RememberMeEntry>, AppError> {
        match &self.remember_me {
            Some(store) => Ok(store.load(&token_digest(token)).await?),
            None => Ok(None),
        }
    }

    pub async fn forget(&self, token: &str) -> Result<(), AppError> {
        if let Some(store) = &self.remember_me {
            store.revoke(&token_digest(token)).await?;
        }
        Ok(())
    }

    fn issue_token(&self, user: &User, now: DateTime<Utc>) -> Result<String, AppError> {
        let claims = SessionClaims {
            sub: user.user_identifier().to_string(),
            uid: user.id.clone(),
            provider: user.provider,
            roles: user.role_names(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.settings.expiration_hours)).timestamp(),
        };

        let encoding_key = EncodingKey::from_secret(self.settings.secret.as_ref());

        encode(&Header::default(), &claims, &encoding_key)
            .map_err(|e| AppError::InternalError(format!("세션 토큰 생성 실패: {}", e)))
    }

    /// 저장에 실패하면 remember-me 없이 세션만 수립됩니다.
    async fn issue_remember_me(&self, user: &User, now: DateTime<Utc>) -> Option<RememberMeToken> {
        let store = self.remember_me.as_ref()?;
        let lifetime = Duration::days(self.settings.remember_me_days);
        let token = Uuid::new_v4().simple().to_string();

        let entry = RememberMeEntry {
            user_identifier: user.user_identifier().to_string(),
            user_id: user.id.clone(),
            issued_at: now,
            expires_at: now + lifetime,
        };

        let ttl_seconds = lifetime.num_seconds().max(1) as u64;
        match store.save(&token_digest(&token), &entry, ttl_seconds).await {
            Ok(()) => Some(RememberMeToken { token, expires_at: entry.expires_at }),
            Err(e) => {
                log::warn!("remember-me 토큰 저장 실패 ({}): {}", user.email, e);
                None
            }
        }
    }
}

fn token_digest(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}
