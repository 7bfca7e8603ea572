use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    #[error("Rate limited until {retry_at}")]
    RateLimited { retry_at: DateTime<Utc> },

    #[error("Access store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("External API error: {0}")]
    ExternalApiError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    fn error_code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::NotAuthorized(_) => "NOT_AUTHORIZED",
            AppError::RateLimited { .. } => "RATE_LIMITED",
            AppError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            AppError::ExternalApiError(_) => "EXTERNAL_API_ERROR",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Message shown to the end user. Transient and upstream failures are
    /// reported without their cause, which only goes to the log.
    pub fn public_message(&self) -> String {
        match self {
            AppError::StoreUnavailable(_) => {
                "Access check is temporarily unavailable, please try again later".to_string()
            }
            AppError::ExternalApiError(_) | AppError::InternalError(_) => {
                "Something went wrong while creating the quiz, please try again".to_string()
            }
            AppError::RateLimited { retry_at } => format!(
                "Limited accounts must wait between quizzes. Try again after {}",
                retry_at.format("%Y-%m-%d %H:%M UTC")
            ),
            other => other.to_string(),
        }
    }

    /// Re-labels any failure talking to an access store.
    pub fn into_store_unavailable(self) -> Self {
        match self {
            AppError::StoreUnavailable(_) => self,
            other => AppError::StoreUnavailable(other.to_string()),
        }
    }

    fn retry_at(&self) -> Option<DateTime<Utc>> {
        match self {
            AppError::RateLimited { retry_at } => Some(*retry_at),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_at: Option<DateTime<Utc>>,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotAuthorized(_) => StatusCode::FORBIDDEN,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::ExternalApiError(_) => StatusCode::BAD_GATEWAY,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("{}", self);
        }

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.public_message(),
            code: self.status_code().as_u16(),
            kind: self.error_code(),
            retry_at: self.retry_at(),
        })
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::ExternalApiError(err.to_string())
    }
}
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        AppError::Unauthorized(format!("Invalid session: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;
