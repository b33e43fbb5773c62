//! # Google OAuth 사용자 정보 모델
//!
//! `https://www.googleapis.com/oauth2/v2/userinfo` 응답을 매핑합니다.

use serde::Deserialize;
use super::external_identity::ProviderProfile;

#[derive(Debug, Deserialize)]
pub struct GoogleUserInfo {
    /// Google 계정 고유 id (subject)
    pub id: String,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub picture: Option<String>,

    #[serde(default)]
    pub verified_email: bool,
}

impl GoogleUserInfo {
    /// 이메일이 없는 응답은 `None` (email 스코프 미동의)
    pub fn into_profile(self) -> Option<ProviderProfile> {
        let email = self.email?;
        Some(ProviderProfile {
            external_id: self.id,
            email,
            display_name: self.name,
            avatar_url: self.picture,
            email_verified: self.verified_email,
        })
    }
}
