//! # Domain Entities Module
//!
//! 저장소에 영속되는 핵심 엔티티들을 정의합니다.
//! 모든 엔티티는 `serde`로 직렬화되어 MongoDB 문서 또는 메모리 저장소에 그대로 저장됩니다.

pub mod users;

pub use users::*;
