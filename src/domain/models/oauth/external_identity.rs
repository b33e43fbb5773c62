//! # 외부 신원 모델
//!
//! 토큰 교환 후 프로바이더에서 받은 프로필을 검증된 형태로 보관합니다.
//! 이 타입을 통과한 값만 신원 매핑과 계정 생성에 사용됩니다.

use validator::Validate;
use crate::config::AuthProvider;
use crate::errors::errors::OAuthExchangeError;
use crate::utils::string_utils::{clean_optional_string, email_local_part, normalize_email};

/// 프로바이더 프로필의 필수 필드 묶음
///
/// `normalized()`를 거친 뒤에만 의미가 있습니다.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct ProviderProfile {
    /// 프로바이더가 발급한 subject 식별자
    #[validate(length(min = 1, max = 180, message = "external id must be 1-180 characters"))]
    pub external_id: String,

    #[validate(email(message = "provider returned an invalid email"))]
    #[validate(length(max = 180))]
    pub email: String,

    pub display_name: Option<String>,

    pub avatar_url: Option<String>,

    /// 프로바이더가 이메일 소유를 확인했는지 여부 (정보용)
    pub email_verified: bool,
}

impl ProviderProfile {
    pub fn new(external_id: impl Into<String>, email: impl Into<String>, display_name: Option<String>) -> Self {
        Self {
            external_id: external_id.into(),
            email: email.into(),
            display_name,
            avatar_url: None,
            email_verified: false,
        }
    }

    /// 공백 제거, 이메일 소문자화 후 검증합니다.
    pub fn normalized(self) -> Result<Self, validator::ValidationErrors> {
        let profile = Self {
            external_id: self.external_id.trim().to_string(),
            email: normalize_email(&self.email),
            display_name: clean_optional_string(self.display_name),
            avatar_url: clean_optional_string(self.avatar_url),
            email_verified: self.email_verified,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// 표시 이름이 없으면 이메일 로컬 파트를 사용합니다.
    pub fn display_name_or_default(&self) -> String {
        self.display_name
            .clone()
            .unwrap_or_else(|| email_local_part(&self.email).to_string())
    }
}

/// 검증된 외부 신원 (provider, subject id, email, display name)
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalIdentity {
    provider: AuthProvider,
    profile: ProviderProfile,
}

impl ExternalIdentity {
    pub fn new(provider: AuthProvider, profile: ProviderProfile) -> Result<Self, OAuthExchangeError> {
        let profile = profile
            .normalized()
            .map_err(|e| OAuthExchangeError::InvalidProfile(e.to_string()))?;

        Ok(Self { provider, profile })
    }

    pub fn provider(&self) -> AuthProvider {
        self.provider
    }

    pub fn external_id(&self) -> &str {
        &self.profile.external_id
    }

    pub fn email(&self) -> &str {
        &self.profile.email
    }

    pub fn display_name(&self) -> String {
        self.profile.display_name_or_default()
    }

    pub fn profile(&self) -> &ProviderProfile {
        &self.profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_normalizes_email_and_id() {
        let identity = ExternalIdentity::new(
            AuthProvider::Google,
            ProviderProfile::new(" g123 ", "  Ann@X.com", Some(" Ann ".to_string())),
        )
        .unwrap();

        assert_eq!(identity.external_id(), "g123");
        assert_eq!(identity.email(), "ann@x.com");
        assert_eq!(identity.display_name(), "Ann");
        assert_eq!(identity.provider(), AuthProvider::Google);
    }

    #[test]
    fn test_display_name_falls_back_to_local_part() {
        let identity = ExternalIdentity::new(
            AuthProvider::GitHub,
            ProviderProfile::new("42", "octo@github.com", Some("   ".to_string())),
        )
        .unwrap();

        assert_eq!(identity.display_name(), "octo");
    }

    #[test]
    fn test_rejects_empty_external_id() {
        let result = ExternalIdentity::new(
            AuthProvider::Google,
            ProviderProfile::new("  ", "a@x.com", None),
        );

        assert!(matches!(result, Err(OAuthExchangeError::InvalidProfile(_))));
    }

    #[test]
    fn test_rejects_invalid_email() {
        let result = ExternalIdentity::new(
            AuthProvider::Google,
            ProviderProfile::new("g1", "not-an-email", None),
        );

        assert!(matches!(result, Err(OAuthExchangeError::InvalidProfile(_))));
    }
}
