//! 에러 타입 모듈
//!
//! 저장소, OAuth 통신, 신원 매핑, HTTP 경계 에러를 정의합니다.

pub mod errors;

pub use errors::*;
