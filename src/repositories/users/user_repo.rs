//! # MongoDB 사용자 리포지토리
//!
//! [`UserStore`]의 운영 구현체입니다. `users` 컬렉션을 사용하며,
//! 유니크 제약은 MongoDB 인덱스로 강제합니다.
//!
//! ## 인덱스
//!
//! | 이름 | 키 | 속성 |
//! |------|----|------|
//! | `email_unique` | `email` | UNIQUE |
//! | `provider_client_id_unique` | `provider`, `client_id` | UNIQUE, `client_id`가 문자열인 문서만 |
//!
//! 중복 키 에러(코드 11000)는 [`StorageError::UniqueViolation`]으로 변환되어
//! 리졸버가 재조회로 처리할 수 있게 합니다.

use std::sync::Arc;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    error::{ErrorKind, WriteFailure},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};
use crate::{
    config::AuthProvider,
    db::Database,
    domain::entities::users::{NewUser, User},
    errors::errors::StorageError,
};
use super::user_store::UserStore;

const COLLECTION_NAME: &str = "users";
const DUPLICATE_KEY_CODE: i32 = 11000;

pub struct UserRepository {
    /// MongoDB 데이터베이스 연결
    db: Arc<Database>,
}

impl UserRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<User> {
        self.db.get_database().collection::<User>(COLLECTION_NAME)
    }

    /// 유니크 인덱스를 생성합니다. 애플리케이션 시작 시 한 번 호출합니다.
    ///
    /// 이미 중복 데이터가 있으면 인덱스 생성이 실패합니다.
    pub async fn create_indexes(&self) -> Result<(), StorageError> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        // client_id가 없는 레코드끼리는 충돌하지 않도록 부분 인덱스 사용
        let client_id_index = IndexModel::builder()
            .keys(doc! { "provider": 1, "client_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("provider_client_id_unique".to_string())
                .partial_filter_expression(doc! { "client_id": { "$type": "string" } })
                .build())
            .build();

        self.collection()
            .create_indexes([email_index, client_id_index])
            .await
            .map_err(map_mongo_error)?;

        Ok(())
    }

    async fn update_one_returning(
        &self,
        filter: Document,
        set: Document,
    ) -> Result<Option<User>, StorageError> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection()
            .find_one_and_update(filter, doc! { "$set": set })
            .with_options(options)
            .await
            .map_err(map_mongo_error)
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_external_id(
        &self,
        provider: AuthProvider,
        external_id: &str,
    ) -> Result<Option<User>, StorageError> {
        self.collection()
            .find_one(doc! { "provider": provider.as_str(), "client_id": external_id })
            .await
            .map_err(map_mongo_error)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        self.collection()
            .find_one(doc! { "email": email })
            .await
            .map_err(map_mongo_error)
    }

    async fn create(&self, user: NewUser) -> Result<User, StorageError> {
        let user = user.into_user(ObjectId::new().to_hex());

        self.collection()
            .insert_one(&user)
            .await
            .map_err(map_mongo_error)?;

        Ok(user)
    }

    async fn attach_external_id(
        &self,
        user_id: &str,
        external_id: &str,
    ) -> Result<Option<User>, StorageError> {
        let filter = unbound_filter(user_id);
        let set = doc! {
            "client_id": external_id,
            "updated_at": bson_datetime(Utc::now())?,
        };

        self.update_one_returning(filter, set).await
    }

    async fn touch_last_login(
        &self,
        user_id: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<User>, StorageError> {
        let set = doc! {
            "last_login": bson_datetime(at)?,
            "updated_at": bson_datetime(Utc::now())?,
        };

        self.update_one_returning(doc! { "_id": user_id }, set).await
    }
}

/// `client_id`가 없거나 null인 문서만 매칭합니다.
///
/// `{"client_id": null}`은 필드가 없는 문서도 매칭하므로
/// 메모리 저장소의 `client_id.is_none()`과 같은 의미가 됩니다.
fn unbound_filter(user_id: &str) -> Document {
    doc! {
        "_id": user_id,
        "client_id": null,
    }
}

/// 엔티티 직렬화와 같은 표현으로 시각을 변환합니다.
fn bson_datetime(at: DateTime<Utc>) -> Result<mongodb::bson::Bson, StorageError> {
    mongodb::bson::to_bson(&at).map_err(|e| StorageError::Query(e.to_string()))
}

/// MongoDB 에러를 저장소 에러로 변환합니다.
pub fn map_mongo_error(e: mongodb::error::Error) -> StorageError {
    match e.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY_CODE => {
            StorageError::UniqueViolation(write_error.message.clone())
        }
        ErrorKind::Command(command_error) if command_error.code == DUPLICATE_KEY_CODE => {
            StorageError::UniqueViolation(command_error.message.clone())
        }
        ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) | ErrorKind::ConnectionPoolCleared { .. } => {
            StorageError::Unavailable(e.to_string())
        }
        _ => StorageError::Query(e.to_string()),
    }
}
