use actix_web::{get, http::header::LOCATION, web, HttpRequest, HttpResponse};
use uuid::Uuid;

use crate::{
    app_state::AppState,
    auth::{
        session::{
            removal_cookie, session_cookie, state_cookie, OAUTH_STATE_COOKIE, SESSION_COOKIE,
        },
        AuthenticatedUser,
    },
    errors::AppError,
    models::dto::{request::CallbackParams, response::DashboardResponse},
};

fn redirect(location: &str) -> actix_web::HttpResponseBuilder {
    let mut builder = HttpResponse::Found();
    builder.insert_header((LOCATION, location.to_string()));
    builder
}

#[get("/login")]
pub async fn login(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let csrf_state = Uuid::new_v4().to_string();
    let url = state.oauth_client.authorization_url(&csrf_state)?;

    Ok(redirect(url.as_str())
        .cookie(state_cookie(csrf_state, state.secure_cookies()))
        .finish())
}

#[get("/callback")]
pub async fn callback(
    state: web::Data<AppState>,
    req: HttpRequest,
    web::Query(params): web::Query<CallbackParams>,
) -> Result<HttpResponse, AppError> {
    if let Some(error) = params.error {
        log::warn!("Google sign-in was not completed: {}", error);
        return Err(AppError::Unauthorized(format!("Sign-in was cancelled: {}", error)));
    }

    let expected_state = req.cookie(OAUTH_STATE_COOKIE).map(|c| c.value().to_string());
    match (expected_state, params.state.as_deref()) {
        (Some(expected), Some(received)) if expected == received => {}
        _ => {
            log::warn!("OAuth callback with missing or mismatched state");
            return Err(AppError::Unauthorized("Invalid sign-in state".to_string()));
        }
    }

    let code = params
        .code
        .ok_or_else(|| AppError::ValidationError("Missing authorization code".to_string()))?;

    let token = state.oauth_client.exchange_code(&code).await?;
    let user = state.oauth_client.fetch_user_info(&token.access_token).await?;
    log::info!("Signed in {}", user.email);

    let lifetime = state.jwt_service.session_lifetime(token.expires_in);
    let session = state.jwt_service.create_session_for(
        &user.email,
        user.name,
        &token.access_token,
        lifetime,
    )?;

    Ok(redirect("/dashboard")
        .cookie(session_cookie(
            session,
            lifetime.num_seconds(),
            state.secure_cookies(),
        ))
        .cookie(removal_cookie(OAUTH_STATE_COOKIE))
        .finish())
}

#[get("/dashboard")]
pub async fn dashboard(auth: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(DashboardResponse {
        email: auth.0.email,
    })
}

#[get("/logout")]
pub async fn logout() -> HttpResponse {
    redirect("/")
        .cookie(removal_cookie(SESSION_COOKIE))
        .finish()
}
