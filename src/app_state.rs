use std::{sync::Arc, time::Duration};

use crate::{
    auth::{GoogleOAuthClient, JwtService, ServiceAccountTokenSource},
    config::Config,
    errors::{AppError, AppResult},
    repositories::{RowStore, SheetsRowStore},
    services::{
        access_gate::{AccessGate, AccessPolicy},
        quiz_compiler::CompileOptions,
        quiz_service::QuizService,
        sheets_client::SheetsClient,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub jwt_service: Arc<JwtService>,
    pub oauth_client: GoogleOAuthClient,
    pub sheets_client: SheetsClient,
    pub http: reqwest::Client,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))?;

        let sheets_client = SheetsClient::new(http.clone());
        let tokens = Arc::new(ServiceAccountTokenSource::new(http.clone(), &config)?);

        let unlimited: Arc<dyn RowStore> = Arc::new(SheetsRowStore::new(
            sheets_client.clone(),
            tokens.clone(),
            &config.access_spreadsheet_id,
            &config.unlimited_sheet_name,
        ));
        let limited: Arc<dyn RowStore> = Arc::new(SheetsRowStore::new(
            sheets_client.clone(),
            tokens,
            &config.access_spreadsheet_id,
            &config.limited_sheet_name,
        ));
        let access_gate = Arc::new(AccessGate::new(
            unlimited,
            limited,
            AccessPolicy::from_config(&config),
        ));

        let quiz_service = Arc::new(QuizService::new(
            access_gate,
            CompileOptions {
                collect_respondent_name: config.collect_respondent_name,
            },
            &config.default_quiz_title,
        ));

        let jwt_service = Arc::new(JwtService::new(
            &config.session_secret,
            config.session_expiration_hours,
        ));
        let oauth_client = GoogleOAuthClient::new(http.clone(), &config);

        Ok(Self {
            quiz_service,
            jwt_service,
            oauth_client,
            sheets_client,
            http,
            config: Arc::new(config),
        })
    }

    pub fn secure_cookies(&self) -> bool {
        self.config.public_base_url.starts_with("https://")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_app_state_builds_without_network() {
        let state = AppState::new(Config::test_config()).unwrap();
        assert!(!state.secure_cookies());
        assert_eq!(
            state.jwt_service.session_lifetime(None),
            chrono::Duration::hours(1)
        );
    }
}
