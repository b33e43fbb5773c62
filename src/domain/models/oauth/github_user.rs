//! # GitHub OAuth 사용자 정보 모델
//!
//! `GET /user`와 `GET /user/emails` 응답을 매핑합니다.
//! GitHub의 사용자 id는 숫자이므로 문자열로 변환해 외부 id로 사용합니다.

use serde::Deserialize;
use super::external_identity::ProviderProfile;

#[derive(Debug, Deserialize)]
pub struct GithubUser {
    pub id: u64,

    pub login: String,

    #[serde(default)]
    pub name: Option<String>,

    /// 공개 이메일 (비공개 설정 시 null)
    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GithubEmail {
    pub email: String,

    #[serde(default)]
    pub primary: bool,

    #[serde(default)]
    pub verified: bool,
}

impl GithubUser {
    /// 표시 이름이 없으면 로그인 이름을 사용합니다.
    pub fn into_profile(self, email: String, email_verified: bool) -> ProviderProfile {
        ProviderProfile {
            external_id: self.id.to_string(),
            email,
            display_name: self.name.or(Some(self.login)),
            avatar_url: self.avatar_url,
            email_verified,
        }
    }
}

/// 주 이메일 중 검증된 것을 우선 선택합니다.
pub fn select_primary_email(emails: &[GithubEmail]) -> Option<&GithubEmail> {
    emails
        .iter()
        .find(|e| e.primary && e.verified)
        .or_else(|| emails.iter().find(|e| e.verified))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_uses_login_when_name_missing() {
        let user: GithubUser = serde_json::from_str(
            r#"{"id": 583231, "login": "octocat", "name": null, "email": null}"#,
        )
        .unwrap();

        let profile = user.into_profile("octo@github.com".to_string(), true);

        assert_eq!(profile.external_id, "583231");
        assert_eq!(profile.display_name.as_deref(), Some("octocat"));
    }

    #[test]
    fn test_select_primary_verified_email() {
        let emails: Vec<GithubEmail> = serde_json::from_str(
            r#"[
                {"email": "old@x.com", "primary": false, "verified": true},
                {"email": "main@x.com", "primary": true, "verified": true},
                {"email": "new@x.com", "primary": false, "verified": false}
            ]"#,
        )
        .unwrap();

        assert_eq!(select_primary_email(&emails).unwrap().email, "main@x.com");
    }

    #[test]
    fn test_unverified_emails_are_not_selected() {
        let emails = vec![GithubEmail {
            email: "x@x.com".to_string(),
            primary: true,
            verified: false,
        }];

        assert!(select_primary_email(&emails).is_none());
    }
}
