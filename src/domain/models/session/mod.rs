//! 세션 모델

pub mod session_token;

pub use session_token::*;
