//! 인증 서비스 모듈
//!
//! 외부 신원을 로컬 계정에 매핑하고, 매핑된 계정으로 세션을 수립합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::{IdentityResolver, AuthenticationSession};
//!
//! let user = resolver.resolve(&identity).await?;
//! let session = sessions.establish(Some(&user)).await?;
//! ```

pub mod password_hasher;
pub mod identity_resolver;
pub mod authentication_session;

pub use password_hasher::*;
pub use identity_resolver::*;
pub use authentication_session::*;
