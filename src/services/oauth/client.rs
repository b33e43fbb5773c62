//! # OAuth 2.0 클라이언트 계약
//!
//! 프로바이더별 Authorization Code 교환과 프로필 조회를 추상화합니다.
//! 콜백 처리 쪽은 [`ClientRegistry`]에서 프로바이더에 맞는 클라이언트를 꺼내 씁니다.

use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use crate::{
    config::{AuthProvider, GithubOAuthConfig, GoogleOAuthConfig, OAuthClientSettings},
    domain::models::oauth::{AccessToken, ExternalIdentity, OAuthTokenResponse},
    errors::errors::OAuthExchangeError,
};
use super::{github_client::GithubOAuthClient, google_client::GoogleOAuthClient};

#[async_trait]
pub trait OAuthClient: Send + Sync {
    fn provider(&self) -> AuthProvider;

    /// 설정에 등록된 기본 스코프
    fn scopes(&self) -> &[String];

    /// 동의 화면 URL
    fn authorization_url(&self, scopes: &[String]) -> String;

    async fn exchange_code(&self, code: &str) -> Result<AccessToken, OAuthExchangeError>;

    async fn fetch_profile(&self, token: &AccessToken) -> Result<ExternalIdentity, OAuthExchangeError>;
}

/// 프로바이더 → 클라이언트 매핑
#[derive(Clone, Default)]
pub struct ClientRegistry {
    clients: HashMap<AuthProvider, Arc<dyn OAuthClient>>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 클라이언트 id/secret이 설정된 프로바이더만 등록합니다.
    pub fn from_env(http: reqwest::Client) -> Self {
        let mut registry = Self::new();

        match GoogleOAuthConfig::settings() {
            Some(settings) => registry.register(Arc::new(GoogleOAuthClient::new(http.clone(), settings))),
            None => log::warn!("GOOGLE_CLIENT_ID/SECRET 미설정, Google 로그인 비활성화"),
        }

        match GithubOAuthConfig::settings() {
            Some(settings) => registry.register(Arc::new(GithubOAuthClient::new(http, settings))),
            None => log::warn!("GITHUB_CLIENT_ID/SECRET 미설정, GitHub 로그인 비활성화"),
        }

        registry
    }

    pub fn register(&mut self, client: Arc<dyn OAuthClient>) {
        log::info!("OAuth 프로바이더 등록: {}", client.provider());
        self.clients.insert(client.provider(), client);
    }

    pub fn get(&self, provider: AuthProvider) -> Result<Arc<dyn OAuthClient>, OAuthExchangeError> {
        self.clients
            .get(&provider)
            .cloned()
            .ok_or_else(|| OAuthExchangeError::UnsupportedProvider(provider.to_string()))
    }

    pub fn providers(&self) -> Vec<AuthProvider> {
        let mut providers: Vec<_> = self.clients.keys().copied().collect();
        providers.sort_by_key(|p| p.as_str());
        providers
    }
}

/// `authorize?client_id=..&redirect_uri=..&response_type=code&scope=..`
pub(crate) fn build_authorization_url(settings: &OAuthClientSettings, scopes: &[String]) -> String {
    let scope = scopes.join(" ");
    let params = [
        ("client_id", settings.client_id.as_str()),
        ("redirect_uri", settings.redirect_uri.as_str()),
        ("response_type", "code"),
        ("scope", scope.as_str()),
    ];

    let query_string = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", settings.auth_uri, query_string)
}

/// 토큰 엔드포인트에 code를 보내고 액세스 토큰을 꺼냅니다.
///
/// GitHub은 실패해도 200을 주므로 본문의 `error` 필드까지 확인합니다.
pub(crate) async fn request_access_token(
    http: &reqwest::Client,
    settings: &OAuthClientSettings,
    provider: AuthProvider,
    code: &str,
) -> Result<AccessToken, OAuthExchangeError> {
    let params = [
        ("code", code),
        ("client_id", settings.client_id.as_str()),
        ("client_secret", settings.client_secret.as_str()),
        ("redirect_uri", settings.redirect_uri.as_str()),
        ("grant_type", "authorization_code"),
    ];

    let response = http
        .post(&settings.token_uri)
        .header(reqwest::header::ACCEPT, "application/json")
        .form(&params)
        .send()
        .await
        .map_err(|e| OAuthExchangeError::TokenExchange(format!("{} 토큰 요청 실패: {}", provider, e)))?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(OAuthExchangeError::TokenExchange(format!(
            "{} 토큰 교환 실패 ({}): {}", provider, status, error_text
        )));
    }

    let body = response
        .json::<OAuthTokenResponse>()
        .await
        .map_err(|e| OAuthExchangeError::TokenExchange(format!("{} 토큰 응답 파싱 실패: {}", provider, e)))?;

    if let Some(error) = body.error {
        return Err(OAuthExchangeError::TokenExchange(format!(
            "{} 토큰 교환 거부: {} {}",
            provider,
            error,
            body.error_description.unwrap_or_default()
        )));
    }

    body.access_token
        .filter(|t| !t.is_empty())
        .map(AccessToken::new)
        .ok_or_else(|| OAuthExchangeError::TokenExchange(format!("{} 응답에 access_token 없음", provider)))
}
