//! Users Entity Module
//!
//! 외부 프로바이더 신원에 묶인 사용자 엔티티를 정의합니다.
//!
//! ```rust,ignore
//! use crate::domain::entities::users::{NewUser, User};
//!
//! let new_user = NewUser::for_provider(AuthProvider::Google, profile, password_hash)?;
//! let user: User = store.create(new_user).await?;
//! assert!(user.roles().contains(&Role::User));
//! ```

pub mod user;

pub use user::*;
