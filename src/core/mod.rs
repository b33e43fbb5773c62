//! # Core Module
//!
//! - [`context`] - 협력자 그래프를 조립하는 [`AppContext`]

pub mod context;

pub use context::*;
