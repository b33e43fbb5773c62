//! 사용자 데이터 액세스 계층
//!
//! - [`user_store::UserStore`] - 신원 매핑이 의존하는 저장소 계약
//! - [`user_repo::UserRepository`] - MongoDB 구현체
//! - [`memory_user_store::InMemoryUserStore`] - 개발/테스트용 메모리 구현체
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::users::{UserStore, InMemoryUserStore};
//!
//! let store: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());
//! let user = store.find_by_email("user@example.com").await?;
//! ```

pub mod user_store;
pub mod user_repo;
pub mod memory_user_store;

pub use user_store::UserStore;
pub use user_repo::UserRepository;
pub use memory_user_store::InMemoryUserStore;
