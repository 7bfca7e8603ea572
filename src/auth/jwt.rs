use chrono::Duration;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};

use crate::{
    auth::claims::Claims,
    errors::{AppError, AppResult},
};

/// Signs and verifies session tokens (HS256).
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiration_hours: i64,
}

impl JwtService {
    pub fn new(secret: &SecretString, expiration_hours: i64) -> Self {
        let secret_bytes = secret.expose_secret().as_bytes();

        Self {
            encoding_key: EncodingKey::from_secret(secret_bytes),
            decoding_key: DecodingKey::from_secret(secret_bytes),
            validation: Validation::default(),
            expiration_hours,
        }
    }

    pub fn create_session(
        &self,
        email: &str,
        name: Option<String>,
        google_token: &str,
    ) -> AppResult<String> {
        self.create_session_for(email, name, google_token, self.session_lifetime(None))
    }

    pub fn create_session_for(
        &self,
        email: &str,
        name: Option<String>,
        google_token: &str,
        lifetime: Duration,
    ) -> AppResult<String> {
        let claims = Claims::with_lifetime(email, name, google_token, lifetime);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("Failed to create session token: {}", e)))
    }

    pub fn validate_session(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::Unauthorized("Session expired, please sign in again".to_string())
                }
                _ => AppError::from(e),
            })?;
        Ok(token_data.claims)
    }

    /// Configured session lifetime, shortened to `token_expires_in` seconds
    /// so a session never outlives the Google access token it carries.
    pub fn session_lifetime(&self, token_expires_in: Option<i64>) -> Duration {
        let configured = Duration::hours(self.expiration_hours);
        match token_expires_in {
            Some(secs) if secs > 0 => Duration::seconds(secs.min(configured.num_seconds())),
            _ => configured,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new(&SecretString::from("test_secret_key".to_string()), 1)
    }

    #[test]
    fn test_create_and_validate_session() {
        let jwt = service();

        let token = jwt
            .create_session("u@x.com", Some("U".to_string()), "ya29.token")
            .unwrap();
        let claims = jwt.validate_session(&token).unwrap();

        assert_eq!(claims.email, "u@x.com");
        assert_eq!(claims.google_token, "ya29.token");
    }

    #[test]
    fn test_invalid_token() {
        let result = service().validate_session("invalid.token.here");
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let other = JwtService::new(&SecretString::from("another_secret".to_string()), 1);
        let token = other.create_session("u@x.com", None, "t").unwrap();

        assert!(service().validate_session(&token).is_err());
    }

    #[test]
    fn test_session_lifetime_is_capped_by_google_token() {
        let jwt = JwtService::new(&SecretString::from("test_secret_key".to_string()), 8);

        assert_eq!(jwt.session_lifetime(Some(3599)), Duration::seconds(3599));
        assert_eq!(jwt.session_lifetime(Some(86_400)), Duration::hours(8));
        assert_eq!(jwt.session_lifetime(None), Duration::hours(8));
        assert_eq!(jwt.session_lifetime(Some(0)), Duration::hours(8));
    }

    #[test]
    fn test_session_expires_with_google_token() {
        let jwt = service();
        let token = jwt
            .create_session_for("u@x.com", None, "t", Duration::seconds(-120))
            .unwrap();

        let result = jwt.validate_session(&token);
        assert!(matches!(result, Err(AppError::Unauthorized(msg)) if msg.contains("expired")));
    }

    #[test]
    fn test_expired_session() {
        let expired = JwtService::new(&SecretString::from("test_secret_key".to_string()), -2);
        let token = expired.create_session("u@x.com", None, "t").unwrap();

        let result = service().validate_session(&token);
        assert!(matches!(result, Err(AppError::Unauthorized(msg)) if msg.contains("expired")));
    }
}
