//! # OAuth 통합 모델
//!
//! 프로바이더 API 응답 매핑과, 그 결과로 얻는 검증된 외부 신원을 정의합니다.
//!
//! ```text
//! OAuthTokenResponse ──► AccessToken
//!                            │
//!                            ▼
//! GoogleUserInfo / GithubUser ──► ProviderProfile ──► ExternalIdentity
//! ```

pub mod external_identity;
pub mod google_user;
pub mod github_user;
pub mod token_response;

pub use external_identity::*;
pub use token_response::*;
