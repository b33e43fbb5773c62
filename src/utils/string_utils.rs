//! # 문자열 유틸리티
//!
//! 프로바이더가 넘겨준 프로필 값을 정리하는 공통 함수들입니다.

pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 이메일을 비교 가능한 형태로 정규화합니다 (공백 제거 + 소문자).
///
/// 이메일은 계정 연동의 보조 키이므로 저장과 조회 모두 이 함수를 거쳐야 합니다.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// 이메일의 로컬 파트(`@` 앞부분)를 반환합니다.
pub fn email_local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}
