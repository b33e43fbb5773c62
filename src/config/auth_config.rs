//! # Authentication Configuration Module
//!
//! OAuth 프로바이더, 세션 토큰, 계정 연동 정책 등 인증 관련 설정을 관리합니다.
//! 모든 값은 환경 변수에서 읽으며, 누락 시 개발용 기본값을 사용합니다.
//!
//! ## 환경 변수
//!
//! ### Google OAuth
//! ```bash
//! export GOOGLE_CLIENT_ID="your-google-client-id"
//! export GOOGLE_CLIENT_SECRET="your-google-client-secret"
//! export GOOGLE_REDIRECT_URI="http://localhost:8080/google/auth"
//! ```
//!
//! ### GitHub OAuth
//! ```bash
//! export GITHUB_CLIENT_ID="your-github-client-id"
//! export GITHUB_CLIENT_SECRET="your-github-client-secret"
//! export GITHUB_REDIRECT_URI="http://localhost:8080/github/auth"
//! ```
//!
//! ### 세션
//! ```bash
//! export SESSION_SECRET="your-session-signing-key"
//! export SESSION_EXPIRATION_HOURS="24"
//! export REMEMBER_ME_ENABLED="true"
//! export REMEMBER_ME_DAYS="30"
//! export SESSION_STORE="redis"   # redis | memory
//! ```
//!
//! ### 라우트 / 계정 연동
//! ```bash
//! export APP_HOME_ROUTE="/"
//! export AUTH_FAILURE_ROUTE="/?error=authentication_failed"
//! export OAUTH_LINK_UNBOUND_ACCOUNTS="false"
//! ```

use std::env;
use std::fmt;

/// 지원하는 외부 인증 프로바이더
///
/// 레코드 생성 시 한 번 정해지며 이후 변경되지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    Google,

    GitHub,
}

impl AuthProvider {
    /// URL 경로 세그먼트에서 프로바이더를 파싱합니다 (대소문자 무관).
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "google" => Ok(AuthProvider::Google),
            "github" => Ok(AuthProvider::GitHub),
            _ => Err(format!("Unsupported auth provider: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Google => "google",
            AuthProvider::GitHub => "github",
        }
    }
}

impl fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 단일 OAuth 클라이언트 구성
///
/// 엔드포인트를 모두 값으로 보관하므로 테스트에서 목 서버 주소로 바꿔 끼울 수 있습니다.
#[derive(Debug, Clone, PartialEq)]
pub struct OAuthClientSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub auth_uri: String,
    pub token_uri: String,
    pub userinfo_uri: String,
    /// 동의 화면에서 요청할 고정 스코프 목록
    pub scopes: Vec<String>,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// 파싱 실패 시 기본값, 0 이하는 1
fn positive_or(raw: &str, default: i64) -> i64 {
    raw.trim().parse::<i64>().map(|v| v.max(1)).unwrap_or(default)
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

pub struct GoogleOAuthConfig;

impl GoogleOAuthConfig {
    pub const DEFAULT_SCOPES: [&'static str; 2] = ["email", "profile"];

    /// Google 클라이언트 설정을 읽습니다.
    ///
    /// `GOOGLE_CLIENT_ID`와 `GOOGLE_CLIENT_SECRET`이 없으면 `None`을 반환하고
    /// Google 로그인은 비활성화됩니다.
    pub fn settings() -> Option<OAuthClientSettings> {
        let client_id = non_empty_env("GOOGLE_CLIENT_ID")?;
        let client_secret = non_empty_env("GOOGLE_CLIENT_SECRET")?;

        Some(OAuthClientSettings {
            client_id,
            client_secret,
            redirect_uri: env_or("GOOGLE_REDIRECT_URI", "http://localhost:8080/google/auth"),
            auth_uri: env_or("GOOGLE_AUTH_URI", "https://accounts.google.com/o/oauth2/auth"),
            token_uri: env_or("GOOGLE_TOKEN_URI", "https://oauth2.googleapis.com/token"),
            userinfo_uri: env_or("GOOGLE_USERINFO_URI", "https://www.googleapis.com/oauth2/v2/userinfo"),
            scopes: Self::DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect(),
        })
    }
}

pub struct GithubOAuthConfig;

impl GithubOAuthConfig {
    pub const DEFAULT_SCOPES: [&'static str; 2] = ["read:user", "user:email"];

    pub fn settings() -> Option<OAuthClientSettings> {
        let client_id = non_empty_env("GITHUB_CLIENT_ID")?;
        let client_secret = non_empty_env("GITHUB_CLIENT_SECRET")?;

        Some(OAuthClientSettings {
            client_id,
            client_secret,
            redirect_uri: env_or("GITHUB_REDIRECT_URI", "http://localhost:8080/github/auth"),
            auth_uri: env_or("GITHUB_AUTH_URI", "https://github.com/login/oauth/authorize"),
            token_uri: env_or("GITHUB_TOKEN_URI", "https://github.com/login/oauth/access_token"),
            userinfo_uri: env_or("GITHUB_USERINFO_URI", "https://api.github.com/user"),
            scopes: Self::DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect(),
        })
    }
}

/// 세션 토큰 저장소 종류
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionStoreKind {
    Redis,
    Memory,
}

/// 세션 토큰 관련 설정
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub secret: String,
    pub expiration_hours: i64,
    pub remember_me_enabled: bool,
    pub remember_me_days: i64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            secret: "session-secret".to_string(),
            expiration_hours: 24,
            remember_me_enabled: true,
            remember_me_days: 30,
        }
    }
}

pub struct SessionConfig;

impl SessionConfig {
    pub fn secret() -> String {
        env::var("SESSION_SECRET")
            .unwrap_or_else(|_| {
                log::warn!("SESSION_SECRET not set, using default (not secure for production!)");
                "session-secret".to_string()
            })
    }

    /// 0 이하 값은 1로 보정합니다.
    pub fn expiration_hours() -> i64 {
        positive_or(&env_or("SESSION_EXPIRATION_HOURS", "24"), 24)
    }

    pub fn remember_me_enabled() -> bool {
        env_or("REMEMBER_ME_ENABLED", "true")
            .parse()
            .unwrap_or(true)
    }

    /// 0 이하 값은 1로 보정합니다. Redis `SET EX 0`은 거부됩니다.
    pub fn remember_me_days() -> i64 {
        positive_or(&env_or("REMEMBER_ME_DAYS", "30"), 30)
    }

    pub fn store_kind() -> SessionStoreKind {
        match env_or("SESSION_STORE", "redis").to_lowercase().as_str() {
            "memory" => SessionStoreKind::Memory,
            _ => SessionStoreKind::Redis,
        }
    }

    pub fn settings() -> SessionSettings {
        SessionSettings {
            secret: Self::secret(),
            expiration_hours: Self::expiration_hours(),
            remember_me_enabled: Self::remember_me_enabled(),
            remember_me_days: Self::remember_me_days(),
        }
    }
}

/// 로그인 결과에 따른 리다이렉트 경로
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSettings {
    pub home_route: String,
    pub failure_route: String,
}

impl Default for RouteSettings {
    fn default() -> Self {
        Self {
            home_route: "/".to_string(),
            failure_route: "/?error=authentication_failed".to_string(),
        }
    }
}

pub struct RouteConfig;

impl RouteConfig {
    pub fn settings() -> RouteSettings {
        let defaults = RouteSettings::default();
        RouteSettings {
            home_route: env_or("APP_HOME_ROUTE", &defaults.home_route),
            failure_route: env_or("AUTH_FAILURE_ROUTE", &defaults.failure_route),
        }
    }
}

/// 이메일로 찾은 기존 계정에 외부 id를 붙일지 결정하는 정책
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccountLinkPolicy {
    /// 이메일 일치 레코드를 그대로 반환 (쓰기 없음)
    #[default]
    EmailOnly,
    /// 같은 프로바이더이고 `client_id`가 비어있는 경우에만 외부 id를 연결
    AttachWhenUnbound,
}

pub struct ResolverConfig;

impl ResolverConfig {
    pub fn link_policy() -> AccountLinkPolicy {
        match env_or("OAUTH_LINK_UNBOUND_ACCOUNTS", "false").parse::<bool>() {
            Ok(true) => AccountLinkPolicy::AttachWhenUnbound,
            _ => AccountLinkPolicy::EmailOnly,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifetimes_are_at_least_one() {
        assert_eq!(positive_or("0", 30), 1);
        assert_eq!(positive_or("-5", 24), 1);
        assert_eq!(positive_or(" 7 ", 30), 7);
        assert_eq!(positive_or("abc", 30), 30);
    }

    #[test]
    fn test_auth_provider_from_string() {
        assert_eq!(AuthProvider::from_str("google").unwrap(), AuthProvider::Google);
        assert_eq!(AuthProvider::from_str("github").unwrap(), AuthProvider::GitHub);

        // 대소문자 무관 테스트
        assert_eq!(AuthProvider::from_str("GOOGLE").unwrap(), AuthProvider::Google);
        assert_eq!(AuthProvider::from_str("GitHub").unwrap(), AuthProvider::GitHub);

        // 지원하지 않는 프로바이더 테스트
        assert!(AuthProvider::from_str("twitter").is_err());
        assert!(AuthProvider::from_str("").is_err());
    }

    #[test]
    fn test_auth_provider_serialization_matches_path_segment() {
        for provider in [AuthProvider::Google, AuthProvider::GitHub] {
            let json = serde_json::to_string(&provider).unwrap();
            assert_eq!(json, format!("\"{}\"", provider.as_str()));

            let deserialized: AuthProvider = serde_json::from_str(&json).unwrap();
            assert_eq!(provider, deserialized);
        }
    }

    #[test]
    fn test_default_scopes() {
        assert_eq!(GoogleOAuthConfig::DEFAULT_SCOPES, ["email", "profile"]);
        assert!(GithubOAuthConfig::DEFAULT_SCOPES.contains(&"user:email"));
    }

    #[test]
    fn test_link_policy_defaults_to_email_only() {
        assert_eq!(AccountLinkPolicy::default(), AccountLinkPolicy::EmailOnly);
    }

    #[test]
    fn test_route_defaults() {
        let routes = RouteSettings::default();
        assert_eq!(routes.home_route, "/");
        assert!(routes.failure_route.starts_with('/'));
    }
}
