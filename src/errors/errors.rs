//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 계층별 에러 타입을 `thiserror`로 정의하고, HTTP 경계에서는
//! `actix_web::ResponseError`를 구현한 [`AppError`]로 변환합니다.
//!
//! ## 에러 계층
//!
//! ```text
//! StorageError ──────────┐
//!                        ├──► IdentityResolutionError ──┐
//! (해싱 실패) ───────────┘                              ├──► AppError ──► HTTP 응답
//! OAuthExchangeError ────────────────────────────────────┘
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::errors::{AppError, StorageError};
//!
//! async fn load(store: &dyn UserStore, email: &str) -> Result<User, AppError> {
//!     store.find_by_email(email).await?
//!         .ok_or_else(|| AppError::NotFound("User not found!".to_string()))
//! }
//! ```

use thiserror::Error;

/// 저장소 계층 에러
///
/// 사용자/세션 저장소 구현체가 반환하는 에러입니다.
/// 유니크 제약 위반은 리졸버에서 재조회로 처리되므로 별도 변형으로 구분합니다.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    /// 유니크 제약 조건 위반 (email 또는 provider + client_id)
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    /// 저장소에 연결할 수 없음
    #[error("datastore unavailable: {0}")]
    Unavailable(String),

    /// 쿼리 실행 또는 (역)직렬화 실패
    #[error("query failed: {0}")]
    Query(String),
}

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, StorageError::UniqueViolation(_))
    }
}

/// OAuth 프로바이더와의 통신 에러
///
/// 토큰 교환 또는 프로필 조회 단계의 실패를 나타냅니다.
/// 클라이언트에게는 세부 내용 없이 일반 인증 실패로만 노출됩니다.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OAuthExchangeError {
    #[error("unsupported oauth provider: {0}")]
    UnsupportedProvider(String),

    #[error("token exchange failed: {0}")]
    TokenExchange(String),

    #[error("profile fetch failed: {0}")]
    ProfileFetch(String),

    /// 프로바이더가 필수 필드(id, email)를 주지 않았거나 형식이 잘못됨
    #[error("invalid provider profile: {0}")]
    InvalidProfile(String),
}

/// 외부 신원을 로컬 계정으로 매핑하는 중 발생한 에러
///
/// 조회 실패 시 사용자를 임의로 만들어내지 않고 이 에러를 그대로 전파합니다.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IdentityResolutionError {
    #[error("identity lookup failed: {0}")]
    Storage(#[from] StorageError),

    /// 유니크 충돌 후 재조회에서도 레코드를 찾지 못함
    #[error("concurrently created account for {external_id} is not visible")]
    ConflictNotVisible { external_id: String },

    #[error("credential hashing failed: {0}")]
    Hashing(String),

    #[error("identity rejected at account construction: {0}")]
    InvalidIdentity(String),
}

/// 애플리케이션 전역 에러 타입
///
/// 핸들러에서 반환되면 자동으로 HTTP 응답으로 변환됩니다.
/// 5xx 계열은 내부 세부 정보를 노출하지 않습니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 캐시 관련 에러 (500 Internal Server Error)
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복 에러 (409 Conflict)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패 에러 (401 Unauthorized)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 외부 서비스 에러 (502 Bad Gateway)
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::UniqueViolation(msg) => AppError::ConflictError(msg),
            other => AppError::DatabaseError(other.to_string()),
        }
    }
}

impl From<OAuthExchangeError> for AppError {
    fn from(e: OAuthExchangeError) -> Self {
        match e {
            OAuthExchangeError::UnsupportedProvider(p) => AppError::NotFound(format!("oauth provider {}", p)),
            other => AppError::ExternalServiceError(other.to_string()),
        }
    }
}

impl From<IdentityResolutionError> for AppError {
    fn from(e: IdentityResolutionError) -> Self {
        AppError::InternalError(e.to_string())
    }
}

impl actix_web::ResponseError for AppError {
    /// HTTP 에러 응답을 생성합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.status_code();

        // 서버 측 에러는 내부 메시지를 숨김
        let message = if status.is_server_error() {
            log::error!("요청 처리 실패: {}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        actix_web::HttpResponse::build(status)
            .json(serde_json::json!({
                "error": message
            }))
    }

    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::ExternalServiceError(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;
