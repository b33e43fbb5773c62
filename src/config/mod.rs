//! # Configuration Module
//!
//! 서비스의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 저장소, 서버, 환경, 비밀번호 해싱 설정
//! - [`auth_config`] - OAuth 프로바이더, 세션, 계정 연동 정책 설정
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{GoogleOAuthConfig, ServerConfig, SessionConfig};
//!
//! let bind = format!("{}:{}", ServerConfig::host(), ServerConfig::port());
//! let google = GoogleOAuthConfig::settings(); // 미설정 시 None
//! let session = SessionConfig::settings();
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
