//! 세션 토큰 클레임과 인증 세션 결과
//!
//! 세션은 사용자 식별자(이메일)를 `sub`로 갖는 HS256 JWT로 표현되며,
//! remember-me 토큰은 저장소에 다이제스트로만 보관됩니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::config::AuthProvider;

/// 세션 JWT 클레임
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// 사용자 식별자 (이메일)
    pub sub: String,
    /// 레코드 id
    pub uid: String,
    pub provider: AuthProvider,
    pub roles: Vec<String>,
    pub iat: i64,
    pub exp: i64,
}

/// 세션 수립 결과
///
/// 호출 체인을 따라 반환값으로 전달되며, 전송 방식(쿠키 등)은 핸들러가 정합니다.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user_identifier: String,
    pub user_id: String,
    pub provider: AuthProvider,
    pub session_token: String,
    pub expires_in: i64,
    pub remember_me: Option<RememberMeToken>,
}

/// 브라우저에 전달되는 remember-me 토큰 (원문은 저장하지 않음)
#[derive(Debug, Clone)]
pub struct RememberMeToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// remember-me 저장소 항목
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RememberMeEntry {
    pub user_identifier: String,
    pub user_id: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
