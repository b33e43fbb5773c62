//! OAuth 콜백 요청/응답 DTO

use serde::{Deserialize, Serialize};
use validator::Validate;

/// `GET /{provider}/auth` 쿼리 파라미터
#[derive(Debug, Deserialize, Validate)]
pub struct OAuthCallbackQuery {
    #[serde(default)]
    #[validate(length(min = 1, message = "Authorization code가 필요합니다"))]
    pub code: String,

    /// 본 서비스는 state를 검증하지 않으며 값만 받아 둡니다
    #[serde(default)]
    pub state: Option<String>,

    /// 사용자가 동의를 거부했거나 프로바이더 측 에러가 발생한 경우
    #[serde(default)]
    pub error: Option<String>,

    #[serde(default)]
    pub error_description: Option<String>,
}

/// 사용자를 확정하지 못했을 때 반환하는 JSON 본문
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct StatusResponse {
    pub status: bool,
    pub message: String,
}

impl StatusResponse {
    pub fn user_not_found() -> Self {
        Self {
            status: false,
            message: "User not found!".to_string(),
        }
    }
}
