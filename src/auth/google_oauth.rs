use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};

use crate::{
    config::Config,
    constants::google::{AUTH_URL, TOKEN_URL, USERINFO_URL, USER_SCOPES},
    errors::{AppError, AppResult},
    models::google::oauth::{TokenErrorResponse, TokenResponse, UserInfo},
    services::http_helpers::ensure_success,
};

/// Authorization-code flow against Google's OAuth endpoints.
#[derive(Clone)]
pub struct GoogleOAuthClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: SecretString,
    redirect_uri: String,
}

impl GoogleOAuthClient {
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            client_id: config.google_client_id.clone(),
            client_secret: config.google_client_secret.clone(),
            redirect_uri: config.google_redirect_uri.clone(),
        }
    }

    pub fn authorization_url(&self, state: &str) -> AppResult<Url> {
        let scopes = USER_SCOPES.join(" ");
        Url::parse_with_params(
            AUTH_URL,
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", scopes.as_str()),
                ("access_type", "offline"),
                ("include_granted_scopes", "true"),
                ("state", state),
            ],
        )
        .map_err(|e| AppError::InternalError(format!("Failed to build authorization URL: {}", e)))
    }

    pub async fn exchange_code(&self, code: &str) -> AppResult<TokenResponse> {
        let response = self
            .http
            .post(TOKEN_URL)
            .header("accept", "application/json")
            .form(&[
                ("code", code),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.expose_secret()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| {
                log::error!("Failed to send token request to Google: {}", e);
                AppError::ExternalApiError(format!("Failed to exchange OAuth code: {}", e))
            })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let detail = serde_json::from_str::<TokenErrorResponse>(&body)
                .map(|e| format!("{} - {}", e.error, e.error_description.unwrap_or_default()))
                .unwrap_or(body);
            log::error!("Google OAuth error ({}): {}", status, detail);
            return Err(AppError::Unauthorized(format!("Sign-in failed: {}", detail)));
        }

        serde_json::from_str::<TokenResponse>(&body).map_err(|e| {
            AppError::ExternalApiError(format!("Failed to parse token response: {}", e))
        })
    }

    pub async fn fetch_user_info(&self, access_token: &str) -> AppResult<UserInfo> {
        let response = self
            .http
            .get(USERINFO_URL)
            .bearer_auth(access_token)
            .send()
            .await?;

        let response = ensure_success(response, "Userinfo").await?;
        Ok(response.json::<UserInfo>().await?)
    }
}
