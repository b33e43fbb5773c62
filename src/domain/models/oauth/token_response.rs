//! OAuth 2.0 토큰 엔드포인트 응답 모델

use serde::Deserialize;

/// Authorization Code 교환 결과
///
/// Google과 GitHub 모두 이 형태로 응답합니다.
/// GitHub은 실패 시에도 200과 함께 `error` 필드를 돌려줍니다.
#[derive(Debug, Deserialize)]
pub struct OAuthTokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,

    #[serde(default)]
    pub token_type: Option<String>,

    #[serde(default)]
    pub expires_in: Option<i64>,

    #[serde(default)]
    pub scope: Option<String>,

    #[serde(default)]
    pub error: Option<String>,

    #[serde(default)]
    pub error_description: Option<String>,
}

/// 프로바이더가 발급한 액세스 토큰
#[derive(Clone, PartialEq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

// 로그에 토큰 값이 남지 않도록 Debug를 직접 구현
impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(***)")
    }
}
