//! 세션 관련 저장소
//!
//! remember-me 토큰 영속화를 담당합니다.

pub mod remember_me_store;

pub use remember_me_store::*;
