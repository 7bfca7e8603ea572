use actix_web::{post, web, Either, HttpResponse};
use secrecy::SecretString;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::request::CreateQuizRequest,
    services::{
        form_publisher::GoogleFormsPublisher, identity::SessionIdentity,
        question_source::GoogleSheetQuestionSource,
    },
};

/// Accepts the sheet link either as a browser form post or as JSON.
#[post("/create_test")]
pub async fn create_test(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    request: Either<web::Json<CreateQuizRequest>, web::Form<CreateQuizRequest>>,
) -> Result<HttpResponse, AppError> {
    let request = match request {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => form.into_inner(),
    };

    let user_token = SecretString::from(auth.0.google_token.clone());
    let identity = SessionIdentity::new(auth.0);
    let source = GoogleSheetQuestionSource::new(
        state.sheets_client.clone(),
        user_token.clone(),
        &state.config.question_range,
    );
    let publisher = GoogleFormsPublisher::new(state.http.clone(), user_token);

    let response = state
        .quiz_service
        .create_quiz(request, &identity, &source, &publisher)
        .await?;
    Ok(HttpResponse::Created().json(response))
}
