//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 모든 서비스는 협력자를 생성자로 주입받으며, [`crate::core::AppContext`]가 한 번 조립합니다.
//!
//! - [`auth`] - 계정 결정(`IdentityResolver`)과 세션 수립(`AuthenticationSession`)
//! - [`oauth`] - 프로바이더 클라이언트와 로그인 플로우(`OAuthFlowController`)

pub mod auth;
pub mod oauth;
