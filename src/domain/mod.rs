//! # Domain Layer Module
//!
//! 도메인 계층을 구성하는 핵심 모듈입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities   - 저장되는 사용자 레코드 (User, NewUser, Role)
//! ├── models     - 외부 신원, 프로바이더 응답, 세션 모델
//! └── dto        - HTTP 요청/응답 객체
//!      │
//!      ▼
//! Application Layer (services)
//!      │
//!      ▼
//! Infrastructure Layer (repositories, db, caching)
//! ```

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::*;
pub use dto::*;
