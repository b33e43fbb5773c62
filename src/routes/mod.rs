//! 라우트 설정 모듈
//!
//! # Available Routes
//!
//! - `GET /health` - 헬스체크
//! - `GET /connect/{provider}` - OAuth 로그인 시작 (`google`, `github`)
//! - `GET /{provider}/auth` - OAuth 콜백
//! - `GET /session` - 현재 세션 확인
//! - `POST /logout` - 로그아웃
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! let app = App::new()
//!     .app_data(web::Data::new(context))
//!     .configure(configure_all_routes);
//! ```

use actix_web::{get, web, HttpResponse};
use serde_json::json;
use crate::core::AppContext;
use crate::handlers;

pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check);

    configure_session_routes(cfg);
    configure_oauth_routes(cfg);
}

fn configure_session_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::oauth::current_session)
        .service(handlers::oauth::logout);
}

/// `/{provider}/auth`는 범용 패턴이므로 가장 마지막에 등록합니다.
fn configure_oauth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::oauth::connect)
        .service(handlers::oauth::oauth_callback);
}

/// 서비스 상태와 활성화된 OAuth 프로바이더 목록
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
#[get("/health")]
async fn health_check(ctx: web::Data<AppContext>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "oauth_identity_service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "providers": ctx.flow.providers()
    }))
}
