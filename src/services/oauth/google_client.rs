//! # Google OAuth 2.0 클라이언트
//!
//! ```text
//! GET  /connect/google ──► accounts.google.com/o/oauth2/auth?scope=email profile
//! GET  /google/auth?code=.. ──► POST oauth2.googleapis.com/token (form)
//!                           ──► GET  www.googleapis.com/oauth2/v2/userinfo (Bearer)
//! ```

use async_trait::async_trait;
use crate::{
    config::{AuthProvider, OAuthClientSettings},
    domain::models::oauth::{google_user::GoogleUserInfo, AccessToken, ExternalIdentity},
    errors::errors::OAuthExchangeError,
};
use super::client::{build_authorization_url, request_access_token, OAuthClient};

pub struct GoogleOAuthClient {
    http: reqwest::Client,
    settings: OAuthClientSettings,
}

impl GoogleOAuthClient {
    pub fn new(http: reqwest::Client, settings: OAuthClientSettings) -> Self {
        Self { http, settings }
    }
}

#[async_trait]
impl OAuthClient for GoogleOAuthClient {
    fn provider(&self) -> AuthProvider {
        AuthProvider::Google
    }

    fn scopes(&self) -> &[String] {
        &self.settings.scopes
    }

    fn authorization_url(&self, scopes: &[String]) -> String {
        build_authorization_url(&self.settings, scopes)
    }

    async fn exchange_code(&self, code: &str) -> Result<AccessToken, OAuthExchangeError> {
        request_access_token(&self.http, &self.settings, AuthProvider::Google, code).await
    }

    async fn fetch_profile(&self, token: &AccessToken) -> Result<ExternalIdentity, OAuthExchangeError> {
        let response = self
            .http
            .get(&self.settings.userinfo_uri)
            .bearer_auth(token.secret())
            .send()
            .await
            .map_err(|e| OAuthExchangeError::ProfileFetch(format!("Google 사용자 정보 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(OAuthExchangeError::ProfileFetch(format!(
                "Google 사용자 정보 조회 실패: {}", error_text
            )));
        }

        let info = response
            .json::<GoogleUserInfo>()
            .await
            .map_err(|e| OAuthExchangeError::ProfileFetch(format!("Google 사용자 정보 파싱 실패: {}", e)))?;

        let profile = info
            .into_profile()
            .ok_or_else(|| OAuthExchangeError::InvalidProfile("Google 프로필에 이메일 없음".to_string()))?;

        ExternalIdentity::new(AuthProvider::Google, profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_string_contains, header, method, path},
    };

    fn client(server: &MockServer) -> GoogleOAuthClient {
        GoogleOAuthClient::new(
            reqwest::Client::new(),
            OAuthClientSettings {
                client_id: "google-client".to_string(),
                client_secret: "google-secret".to_string(),
                redirect_uri: "http://localhost:8080/google/auth".to_string(),
                auth_uri: format!("{}/o/oauth2/auth", server.uri()),
                token_uri: format!("{}/token", server.uri()),
                userinfo_uri: format!("{}/oauth2/v2/userinfo", server.uri()),
                scopes: vec!["email".to_string(), "profile".to_string()],
            },
        )
    }

    #[tokio::test]
    async fn test_exchange_code_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("code=valid-code"))
            .and(body_string_contains("grant_type=authorization_code"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "ya29.token",
                "token_type": "Bearer",
                "expires_in": 3599,
                "scope": "email profile"
            })))
            .mount(&server)
            .await;

        let token = client(&server).exchange_code("valid-code").await.unwrap();

        assert_eq!(token.secret(), "ya29.token");
    }

    #[tokio::test]
    async fn test_exchange_invalid_code_fails() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "invalid_grant",
                "error_description": "Bad Request"
            })))
            .mount(&server)
            .await;

        let err = client(&server).exchange_code("expired").await.unwrap_err();

        assert!(matches!(err, OAuthExchangeError::TokenExchange(_)));
    }

    #[tokio::test]
    async fn test_fetch_profile_maps_identity() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/oauth2/v2/userinfo"))
            .and(header("authorization", "Bearer ya29.token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "g123",
                "email": "A@x.com",
                "verified_email": true,
                "name": "Ann"
            })))
            .mount(&server)
            .await;

        let identity = client(&server)
            .fetch_profile(&AccessToken::new("ya29.token"))
            .await
            .unwrap();

        assert_eq!(identity.provider(), AuthProvider::Google);
        assert_eq!(identity.external_id(), "g123");
        assert_eq!(identity.email(), "a@x.com");
        assert_eq!(identity.display_name(), "Ann");
    }

    #[tokio::test]
    async fn test_profile_without_email_is_rejected() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/oauth2/v2/userinfo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "g123" })))
            .mount(&server)
            .await;

        let err = client(&server)
            .fetch_profile(&AccessToken::new("ya29.token"))
            .await
            .unwrap_err();

        assert!(matches!(err, OAuthExchangeError::InvalidProfile(_)));
    }

    #[tokio::test]
    async fn test_expired_access_token_fails_profile_fetch() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/oauth2/v2/userinfo"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = client(&server)
            .fetch_profile(&AccessToken::new("stale"))
            .await
            .unwrap_err();

        assert!(matches!(err, OAuthExchangeError::ProfileFetch(_)));
    }
}
