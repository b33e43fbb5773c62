//! OAuth 2.0 로그인 플로우
//!
//! - [`client`] - 프로바이더 클라이언트 계약과 레지스트리
//! - [`google_client`], [`github_client`] - `reqwest` 기반 구현체
//! - [`flow_controller`] - 동의 화면 리다이렉트와 콜백 처리

pub mod client;
pub mod google_client;
pub mod github_client;
pub mod flow_controller;

pub use client::{ClientRegistry, OAuthClient};
pub use google_client::GoogleOAuthClient;
pub use github_client::GithubOAuthClient;
pub use flow_controller::{CallbackOutcome, OAuthFlowController};
