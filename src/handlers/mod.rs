//! HTTP 요청 핸들러
//!
//! 핸들러는 `web::Data<AppContext>`로 서비스를 받고, 도메인 결과를 HTTP 응답으로만 바꿉니다.
//! 에러는 `AppError`로 반환하면 `ResponseError` 구현이 JSON 응답을 만듭니다.

pub mod oauth;
