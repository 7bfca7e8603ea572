use serde::{Deserialize, Serialize};

/// Token endpoint response, for both the authorization-code and the
/// service-account (JWT bearer) grants.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TokenErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct UserInfo {
    pub email: String,
    #[serde(default)]
    pub verified_email: Option<bool>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Claims of the service-account assertion exchanged for an access token.
#[derive(Clone, Debug, Serialize)]
pub struct ServiceAccountClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}
