//! # GitHub OAuth 클라이언트
//!
//! 토큰 엔드포인트는 `Accept: application/json`을 줘야 JSON으로 응답하고,
//! REST API는 `User-Agent` 헤더가 없으면 요청을 거부합니다.
//! 공개 이메일이 없는 계정은 `/user/emails`에서 검증된 주 이메일을 찾습니다.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use crate::{
    config::{AuthProvider, OAuthClientSettings},
    domain::models::oauth::{
        github_user::{select_primary_email, GithubEmail, GithubUser},
        AccessToken, ExternalIdentity,
    },
    errors::errors::OAuthExchangeError,
};
use super::client::{build_authorization_url, request_access_token, OAuthClient};

const USER_AGENT: &str = "oauth_identity_service";

pub struct GithubOAuthClient {
    http: reqwest::Client,
    settings: OAuthClientSettings,
}

impl GithubOAuthClient {
    pub fn new(http: reqwest::Client, settings: OAuthClientSettings) -> Self {
        Self { http, settings }
    }

    fn emails_uri(&self) -> String {
        format!("{}/emails", self.settings.userinfo_uri.trim_end_matches('/'))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, token: &AccessToken) -> Result<T, OAuthExchangeError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(token.secret())
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| OAuthExchangeError::ProfileFetch(format!("GitHub API 요청 실패 ({}): {}", url, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(OAuthExchangeError::ProfileFetch(format!(
                "GitHub API 응답 오류 ({}): {} {}", url, status, error_text
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| OAuthExchangeError::ProfileFetch(format!("GitHub 응답 파싱 실패: {}", e)))
    }
}

#[async_trait]
impl OAuthClient for GithubOAuthClient {
    fn provider(&self) -> AuthProvider {
        AuthProvider::GitHub
    }

    fn scopes(&self) -> &[String] {
        &self.settings.scopes
    }

    fn authorization_url(&self, scopes: &[String]) -> String {
        build_authorization_url(&self.settings, scopes)
    }

    async fn exchange_code(&self, code: &str) -> Result<AccessToken, OAuthExchangeError> {
        request_access_token(&self.http, &self.settings, AuthProvider::GitHub, code).await
    }

    async fn fetch_profile(&self, token: &AccessToken) -> Result<ExternalIdentity, OAuthExchangeError> {
        let user: GithubUser = self.get_json(&self.settings.userinfo_uri, token).await?;

        let (email, verified) = match user.email.clone().filter(|e| !e.trim().is_empty()) {
            Some(email) => (email, false),
            None => {
                let emails: Vec<GithubEmail> = self.get_json(&self.emails_uri(), token).await?;
                let primary = select_primary_email(&emails).ok_or_else(|| {
                    OAuthExchangeError::InvalidProfile("GitHub 계정에 검증된 이메일 없음".to_string())
                })?;
                (primary.email.clone(), primary.verified)
            }
        };

        ExternalIdentity::new(AuthProvider::GitHub, user.into_profile(email, verified))
    }
}
