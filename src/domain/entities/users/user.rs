//! User Entity Implementation
//!
//! 외부 프로바이더 신원에 묶인 로컬 사용자 레코드입니다.
//! 레코드는 신원 매핑 과정에서만 생성되며, 프로바이더는 생성 후 변경되지 않습니다.

use std::collections::BTreeSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::config::AuthProvider;
use crate::domain::models::oauth::ProviderProfile;

/// 사용자 권한 태그
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ROLE_USER")]
    User,

    #[serde(rename = "ROLE_ADMIN")]
    Admin,
}

impl Role {
    /// 모든 사용자가 암묵적으로 갖는 기본 권한
    pub const BASE: Role = Role::User;

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "ROLE_USER",
            Role::Admin => "ROLE_ADMIN",
        }
    }
}

/// 저장된 사용자 레코드
///
/// `roles` 필드는 저장된 값만 담고 있으며, 기본 권한은 [`User::roles`]에서 합쳐집니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// 생성 시 할당되는 불변 식별자
    #[serde(rename = "_id")]
    pub id: String,

    /// 프로바이더가 발급한 subject id. (provider, client_id) 조합은 유일
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    /// 계정 연동용 보조 키 (정규화된 값, 유일)
    pub email: String,

    pub display_name: String,

    pub provider: AuthProvider,

    #[serde(default)]
    roles: BTreeSet<Role>,

    /// OAuth 계정은 임의 값의 해시만 가집니다
    pub password_hash: String,

    #[serde(default)]
    pub is_verified: bool,

    pub last_login: DateTime<Utc>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl User {
    /// 세션 식별자로 사용되는 안정적인 사용자 식별자 (이메일)
    pub fn user_identifier(&self) -> &str {
        &self.email
    }

    /// 저장된 권한에 기본 권한(`ROLE_USER`)을 합친 집합
    pub fn roles(&self) -> BTreeSet<Role> {
        let mut roles = self.roles.clone();
        roles.insert(Role::BASE);
        roles
    }

    pub fn stored_roles(&self) -> &BTreeSet<Role> {
        &self.roles
    }

    pub fn has_role(&self, role: Role) -> bool {
        role == Role::BASE || self.roles.contains(&role)
    }

    pub fn role_names(&self) -> Vec<String> {
        self.roles().iter().map(|r| r.as_str().to_string()).collect()
    }

    pub fn is_bound_to(&self, provider: AuthProvider, external_id: &str) -> bool {
        self.provider == provider && self.client_id.as_deref() == Some(external_id)
    }
}

/// 아직 저장되지 않은 사용자
///
/// 저장소가 id를 할당하면서 [`User`]가 됩니다.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub client_id: String,
    pub email: String,
    pub display_name: String,
    pub provider: AuthProvider,
    pub roles: BTreeSet<Role>,
    pub password_hash: String,
    pub is_verified: bool,
    pub last_login: DateTime<Utc>,
}

impl NewUser {
    /// 프로바이더 태그와 필수 프로필 필드로 새 사용자를 만듭니다.
    ///
    /// 프로필은 정규화/검증을 거치며, 기본 권한 집합과 미인증 상태로 시작합니다.
    pub fn for_provider(
        provider: AuthProvider,
        profile: ProviderProfile,
        password_hash: String,
    ) -> Result<Self, validator::ValidationErrors> {
        let profile = profile.normalized()?;
        let display_name = profile.display_name_or_default();

        Ok(Self {
            client_id: profile.external_id,
            email: profile.email,
            display_name,
            provider,
            roles: BTreeSet::from([Role::BASE]),
            password_hash,
            is_verified: false,
            last_login: Utc::now(),
        })
    }

    pub fn into_user(self, id: String) -> User {
        let now = Utc::now();

        User {
            id,
            client_id: Some(self.client_id),
            email: self.email,
            display_name: self.display_name,
            provider: self.provider,
            roles: self.roles,
            password_hash: self.password_hash,
            is_verified: self.is_verified,
            last_login: self.last_login,
            created_at: now,
            updated_at: now,
        }
    }
}
