//! 비밀번호 해싱 협력자
//!
//! OAuth로 생성되는 계정은 실제 비밀번호가 없으므로, 추측 불가능한 임의 값을
//! 해시해 저장합니다. 프로바이더 자격 증명은 절대 저장하지 않습니다.

use uuid::Uuid;
use crate::config::PasswordConfig;

pub trait CredentialHasher: Send + Sync {
    fn hash(&self, plain: &str) -> Result<String, String>;

    fn verify(&self, plain: &str, hash: &str) -> bool;
}

pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// `BCRYPT_COST` 또는 환경별 기본 cost 사용
    pub fn from_env() -> Self {
        Self::new(PasswordConfig::bcrypt_cost())
    }
}

impl CredentialHasher for BcryptHasher {
    fn hash(&self, plain: &str) -> Result<String, String> {
        bcrypt::hash(plain, self.cost).map_err(|e| e.to_string())
    }

    fn verify(&self, plain: &str, hash: &str) -> bool {
        bcrypt::verify(plain, hash).unwrap_or(false)
    }
}

/// 사용할 수 없는 임의의 플레이스홀더 비밀번호
pub fn placeholder_password() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = BcryptHasher::new(4);
        let hash = hasher.hash("secret").unwrap();

        assert_ne!(hash, "secret");
        assert!(hasher.verify("secret", &hash));
        assert!(!hasher.verify("other", &hash));
    }

    #[test]
    fn test_placeholder_passwords_are_unique() {
        let a = placeholder_password();
        let b = placeholder_password();

        assert_ne!(a, b);
        assert_eq!(a.len(), 64);
    }
}
