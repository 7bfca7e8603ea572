use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

/// Session carried in the signed session cookie after the OAuth callback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (verified email)
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub google_token: String, // Access token for the user's Sheets/Forms calls
    pub exp: usize, // Expiration time (as UTC timestamp)
    pub iat: usize, // Issued at (as UTC timestamp)
}

impl Claims {
    pub fn new(email: &str, name: Option<String>, google_token: &str, expiration_hours: i64) -> Self {
        Self::with_lifetime(email, name, google_token, Duration::hours(expiration_hours))
    }

    pub fn with_lifetime(
        email: &str,
        name: Option<String>,
        google_token: &str,
        lifetime: Duration,
    ) -> Self {
        let now = Utc::now();
        let exp = now + lifetime;

        Self {
            sub: email.to_string(),
            email: email.to_string(),
            name,
            google_token: google_token.to_string(),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }
}
