use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::RwLock;

use crate::{
    config::Config,
    constants::google::{JWT_BEARER_GRANT, SERVICE_ACCOUNT_SCOPE, TOKEN_URL},
    errors::{AppError, AppResult},
    models::google::oauth::{ServiceAccountClaims, TokenResponse},
    services::http_helpers::ensure_success,
};

const ASSERTION_LIFETIME_SECS: i64 = 3600;

#[derive(Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

/// Access tokens for the service account that owns the access sheets.
///
/// Tokens are cached and refreshed one minute before they expire.
pub struct ServiceAccountTokenSource {
    http: reqwest::Client,
    client_email: String,
    encoding_key: Option<EncodingKey>,
    token_url: String,
    cached: RwLock<Option<CachedToken>>,
}

impl ServiceAccountTokenSource {
    pub fn new(http: reqwest::Client, config: &Config) -> AppResult<Self> {
        let pem = config.service_account_private_key.expose_secret();
        let encoding_key = if pem.trim().is_empty() {
            log::warn!("SERVICE_ACCOUNT_PRIVATE_KEY is not set, access checks will be unavailable");
            None
        } else {
            Some(EncodingKey::from_rsa_pem(pem.as_bytes()).map_err(|e| {
                AppError::InternalError(format!("Invalid service account private key: {}", e))
            })?)
        };

        Ok(Self {
            http,
            client_email: config.service_account_email.clone(),
            encoding_key,
            token_url: TOKEN_URL.to_string(),
            cached: RwLock::new(None),
        })
    }

    pub async fn access_token(&self) -> AppResult<SecretString> {
        let now = Utc::now();
        if let Some(cached) = self.cached.read().await.as_ref() {
            if cached.expires_at - Duration::seconds(60) > now {
                return Ok(SecretString::from(cached.access_token.clone()));
            }
        }

        let mut cached = self.cached.write().await;
        // another request may have refreshed it while we waited for the lock
        if let Some(token) = cached.as_ref() {
            if token.expires_at - Duration::seconds(60) > now {
                return Ok(SecretString::from(token.access_token.clone()));
            }
        }

        let fresh = self.fetch_token(now).await?;
        let access_token = fresh.access_token.clone();
        *cached = Some(fresh);
        Ok(SecretString::from(access_token))
    }

    fn assertion(&self, now: DateTime<Utc>) -> AppResult<String> {
        let key = self.encoding_key.as_ref().ok_or_else(|| {
            AppError::StoreUnavailable("Service account credentials are not configured".to_string())
        })?;

        let claims = ServiceAccountClaims {
            iss: self.client_email.clone(),
            scope: SERVICE_ACCOUNT_SCOPE.to_string(),
            aud: self.token_url.clone(),
            iat: now.timestamp(),
            exp: now.timestamp() + ASSERTION_LIFETIME_SECS,
        };

        encode(&Header::new(Algorithm::RS256), &claims, key).map_err(|e| {
            AppError::InternalError(format!("Failed to sign service account assertion: {}", e))
        })
    }

    async fn fetch_token(&self, now: DateTime<Utc>) -> AppResult<CachedToken> {
        let assertion = self.assertion(now)?;

        let response = self
            .http
            .post(&self.token_url)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;
        let token = ensure_success(response, "Service account token exchange")
            .await?
            .json::<TokenResponse>()
            .await?;

        log::debug!("Obtained service account token for {}", self.client_email);

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at: now + Duration::seconds(token.expires_in.unwrap_or(ASSERTION_LIFETIME_SECS)),
        })
    }
}
