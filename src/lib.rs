//! OAuth 아이덴티티 서비스
//!
//! Google/GitHub OAuth 2.0 로그인으로 받은 외부 신원을 로컬 사용자 계정에 연결하고
//! 세션을 수립하는 서비스입니다.
//!
//! # Features
//!
//! - **계정 결정**: 외부 id → 이메일 → 신규 생성 순서로 로컬 계정 매핑
//! - **동시성 안전**: 저장소 유니크 제약 + 충돌 시 1회 재조회
//! - **세션**: HS256 JWT 세션 토큰, 다이제스트로만 저장되는 remember-me 토큰
//! - **MongoDB / Redis**: 사용자와 remember-me 토큰 영구 저장 (메모리 구현체 포함)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← /connect/{provider}, /{provider}/auth
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 쿠키/리다이렉트 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← OAuthFlowController → IdentityResolver → AuthenticationSession
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← UserStore, RememberMeStore
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use oauth_identity_service::core::AppContext;
//! use oauth_identity_service::config::AuthProvider;
//!
//! let context = AppContext::from_env().await?;
//! let consent_url = context.flow.start_flow(AuthProvider::Google)?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
