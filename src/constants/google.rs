pub const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";
pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4";
pub const FORMS_API_BASE: &str = "https://forms.googleapis.com/v1";

/// Scopes requested from the signed-in user.
pub const USER_SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/spreadsheets.readonly",
    "https://www.googleapis.com/auth/forms.body",
    "https://www.googleapis.com/auth/userinfo.email",
    "https://www.googleapis.com/auth/userinfo.profile",
    "openid",
];

/// Scope of the service account that maintains the access sheets.
pub const SERVICE_ACCOUNT_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

pub const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

pub const NAME_PROMPT: &str = "Enter your name";

pub fn form_view_link(form_id: &str) -> String {
    format!("https://docs.google.com/forms/d/{}/viewform", form_id)
}
