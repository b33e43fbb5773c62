//! OAuth 로그인 HTTP 핸들러
//!
//! - `GET /connect/{provider}` - 동의 화면으로 302
//! - `GET /{provider}/auth` - 콜백, 성공 시 세션 쿠키와 함께 홈으로 302
//! - `GET /session` - 현재 세션 확인
//! - `POST /logout` - 세션/remember-me 쿠키 제거
//!
//! 실패 응답에는 내부 에러 내용을 싣지 않습니다.

use actix_web::{
    cookie::{time::Duration as CookieDuration, Cookie, SameSite},
    get, http::header, post, web, HttpRequest, HttpResponse,
};
use serde_json::json;
use validator::Validate;
use crate::{
    config::AuthProvider,
    core::AppContext,
    domain::{
        dto::{OAuthCallbackQuery, StatusResponse},
        models::session::AuthSession,
    },
    errors::errors::AppError,
    services::oauth::CallbackOutcome,
};

pub const SESSION_COOKIE: &str = "session";
pub const REMEMBER_ME_COOKIE: &str = "remember_me";

fn parse_provider(segment: &str) -> Result<AuthProvider, AppError> {
    AuthProvider::from_str(segment).map_err(AppError::NotFound)
}

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location.to_string()))
        .finish()
}

fn build_cookie(name: &'static str, value: String, max_age_seconds: i64, secure: bool) -> Cookie<'static> {
    Cookie::build(name, value)
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::seconds(max_age_seconds))
        .finish()
}

fn authenticated_response(ctx: &AppContext, session: AuthSession) -> HttpResponse {
    let mut response = HttpResponse::Found();
    response.insert_header((header::LOCATION, ctx.routes.home_route.clone()));
    response.cookie(build_cookie(
        SESSION_COOKIE,
        session.session_token,
        session.expires_in,
        ctx.secure_cookies,
    ));

    if let Some(remember_me) = session.remember_me {
        let max_age = (remember_me.expires_at - chrono::Utc::now()).num_seconds().max(0);
        response.cookie(build_cookie(REMEMBER_ME_COOKIE, remember_me.token, max_age, ctx.secure_cookies));
    }

    response.finish()
}

/// 쿠키 또는 `Authorization: Bearer` 헤더에서 세션 토큰을 꺼냅니다.
fn session_token(req: &HttpRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        return Some(cookie.value().to_string());
    }

    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
}

#[get("/connect/{provider}")]
pub async fn connect(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let provider = parse_provider(&path)?;
    let url = ctx.flow.start_flow(provider)?;

    log::info!("{} 로그인 시작", provider);
    Ok(redirect(&url))
}

#[get("/{provider}/auth")]
pub async fn oauth_callback(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
    query: web::Query<OAuthCallbackQuery>,
) -> Result<HttpResponse, AppError> {
    let provider = parse_provider(&path)?;

    // 사용자가 동의를 거부했거나 프로바이더 측 에러
    if let Some(error) = &query.error {
        log::warn!(
            "{} OAuth 에러: {} - {}",
            provider,
            error,
            query.error_description.as_deref().unwrap_or("")
        );
        return Ok(redirect(&ctx.routes.failure_route));
    }

    if let Err(e) = query.validate() {
        log::warn!("{} 콜백 파라미터 오류: {}", provider, e);
        return Ok(redirect(&ctx.routes.failure_route));
    }

    match ctx.flow.handle_callback(provider, &query.code).await? {
        CallbackOutcome::Authenticated(session) => {
            log::info!("{} 로그인 성공: {}", provider, session.user_identifier);
            Ok(authenticated_response(&ctx, session))
        }
        CallbackOutcome::ExchangeFailed(_) => Ok(redirect(&ctx.routes.failure_route)),
        CallbackOutcome::UserNotFound => Ok(HttpResponse::Ok().json(StatusResponse::user_not_found())),
    }
}

#[get("/session")]
pub async fn current_session(
    ctx: web::Data<AppContext>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let token = session_token(&req)
        .ok_or_else(|| AppError::AuthenticationError("세션이 없습니다".to_string()))?;

    let claims = ctx.flow.sessions().verify(&token)?;

    Ok(HttpResponse::Ok().json(json!({
        "user_identifier": claims.sub,
        "user_id": claims.uid,
        "provider": claims.provider,
        "roles": claims.roles,
        "expires_at": claims.exp
    })))
}

#[post("/logout")]
pub async fn logout(
    ctx: web::Data<AppContext>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    // 폐기에 실패해도 쿠키는 항상 제거
    if let Some(cookie) = req.cookie(REMEMBER_ME_COOKIE) {
        if let Err(e) = ctx.flow.sessions().forget(cookie.value()).await {
            log::warn!("remember-me 토큰 폐기 실패: {}", e);
        }
    }

    let mut session = build_cookie(SESSION_COOKIE, String::new(), 0, ctx.secure_cookies);
    session.make_removal();
    let mut remember_me = build_cookie(REMEMBER_ME_COOKIE, String::new(), 0, ctx.secure_cookies);
    remember_me.make_removal();

    Ok(HttpResponse::Ok()
        .cookie(session)
        .cookie(remember_me)
        .json(StatusResponse {
            status: true,
            message: "Logged out".to_string(),
        }))
}
