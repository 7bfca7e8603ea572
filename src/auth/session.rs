use std::future::{ready, Ready};

use actix_web::{
    cookie::{time::Duration as CookieDuration, Cookie, SameSite},
    http::header::AUTHORIZATION,
    web, FromRequest, HttpRequest,
};

use crate::{app_state::AppState, auth::Claims, errors::AppError};

pub const SESSION_COOKIE: &str = "quiz_session";
pub const OAUTH_STATE_COOKIE: &str = "oauth_state";

/// Extractor for the signed-in user. Reads the session cookie, or an
/// `Authorization: Bearer <session token>` header for API clients.
pub struct AuthenticatedUser(pub Claims);

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::InternalError("Application state not configured".to_string()))?;

    let token = session_token(req)
        .ok_or_else(|| AppError::Unauthorized("Not logged in".to_string()))?;

    let claims = state.jwt_service.validate_session(&token)?;
    Ok(AuthenticatedUser(claims))
}

fn session_token(req: &HttpRequest) -> Option<String> {
    let from_header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string);

    from_header.or_else(|| req.cookie(SESSION_COOKIE).map(|c| c.value().to_string()))
}

pub fn session_cookie(token: String, max_age_seconds: i64, secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::seconds(max_age_seconds))
        .finish()
}

pub fn state_cookie(state: String, secure: bool) -> Cookie<'static> {
    Cookie::build(OAUTH_STATE_COOKIE, state)
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::minutes(10))
        .finish()
}

/// An expired cookie that makes the browser drop `name`.
pub fn removal_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::build(name, "").path("/").finish();
    cookie.make_removal();
    cookie
}
