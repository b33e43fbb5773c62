//! # Domain Models Module
//!
//! 엔티티가 아닌 도메인 모델들을 정의합니다.
//!
//! - [`oauth`] - 프로바이더 API 응답 매핑과 검증된 외부 신원
//! - [`session`] - 세션 토큰 클레임과 remember-me 항목

pub mod oauth;
pub mod session;
