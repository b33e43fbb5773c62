//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 저장소는 모두 트레이트 뒤에 있으며, 서비스에는 `Arc<dyn Trait>`으로 주입됩니다.
//!
//! - [`users`] - 사용자 레코드 (MongoDB / 메모리)
//! - [`sessions`] - remember-me 토큰 (Redis / 메모리)

pub mod users;
pub mod sessions;
