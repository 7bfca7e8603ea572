use std::env;
use secrecy::SecretString;

const DEFAULT_SESSION_SECRET: &str = "dev_session_secret_change_in_production";
const DEFAULT_CLIENT_ID: &str = "google_client_id";
const DEFAULT_CLIENT_SECRET: &str = "google_client_secret";
const DEFAULT_COOLDOWN_HOURS: i64 = 24;
const DEFAULT_SESSION_HOURS: i64 = 1;

/// Upper bound for any hour-based setting (ten years).
pub const MAX_HOURS: i64 = 24 * 365 * 10;

#[derive(Clone, Debug)]
pub struct Config {
    pub web_server_host: String,
    pub web_server_port: u16,
    pub public_base_url: String,
    pub google_client_id: String,
    pub google_client_secret: SecretString,
    pub google_redirect_uri: String,
    pub session_secret: SecretString,
    pub session_expiration_hours: i64,
    pub access_spreadsheet_id: String,
    pub unlimited_sheet_name: String,
    pub limited_sheet_name: String,
    pub service_account_email: String,
    pub service_account_private_key: SecretString,
    pub limited_cooldown_hours: i64,
    pub allow_self_registration: bool,
    pub default_quiz_title: String,
    pub collect_respondent_name: bool,
    pub question_range: String,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Falls back to `default` when `hours` is outside `min..=MAX_HOURS`.
fn hours_in_range(key: &str, hours: i64, min: i64, default: i64) -> i64 {
    if (min..=MAX_HOURS).contains(&hours) {
        hours
    } else {
        log::warn!(
            "{} = {} is outside {}..={}, using {}",
            key,
            hours,
            min,
            MAX_HOURS,
            default
        );
        default
    }
}

impl Config {
    pub fn from_env() -> Self {
        let web_server_port = env_parse("WEB_SERVER_PORT", 8080);
        let public_base_url = env_or(
            "PUBLIC_BASE_URL",
            &format!("http://localhost:{}", web_server_port),
        );
        let google_redirect_uri = env::var("GOOGLE_REDIRECT_URI")
            .unwrap_or_else(|_| format!("{}/callback", public_base_url.trim_end_matches('/')));

        Self {
            web_server_host: env_or("WEB_SERVER_HOST", "localhost"),
            web_server_port,
            public_base_url,
            google_client_id: env_or("GOOGLE_CLIENT_ID", DEFAULT_CLIENT_ID),
            google_client_secret: SecretString::from(env_or(
                "GOOGLE_CLIENT_SECRET",
                DEFAULT_CLIENT_SECRET,
            )),
            google_redirect_uri,
            session_secret: SecretString::from(env_or("SESSION_SECRET", DEFAULT_SESSION_SECRET)),
            session_expiration_hours: hours_in_range(
                "SESSION_EXPIRATION_HOURS",
                env_parse("SESSION_EXPIRATION_HOURS", DEFAULT_SESSION_HOURS),
                1,
                DEFAULT_SESSION_HOURS,
            ),
            access_spreadsheet_id: env_or("ACCESS_SPREADSHEET_ID", ""),
            unlimited_sheet_name: env_or("UNLIMITED_SHEET_NAME", "Unlimited"),
            limited_sheet_name: env_or("LIMITED_SHEET_NAME", "Limited"),
            service_account_email: env_or("SERVICE_ACCOUNT_EMAIL", ""),
            // PEM keys often arrive with escaped newlines when passed through .env files
            service_account_private_key: SecretString::from(
                env_or("SERVICE_ACCOUNT_PRIVATE_KEY", "").replace("\\n", "\n"),
            ),
            limited_cooldown_hours: hours_in_range(
                "LIMITED_COOLDOWN_HOURS",
                env_parse("LIMITED_COOLDOWN_HOURS", DEFAULT_COOLDOWN_HOURS),
                0,
                DEFAULT_COOLDOWN_HOURS,
            ),
            allow_self_registration: env_parse("ALLOW_SELF_REGISTRATION", true),
            default_quiz_title: env_or("DEFAULT_QUIZ_TITLE", "Quiz from Google Sheets"),
            collect_respondent_name: env_parse("COLLECT_RESPONDENT_NAME", true),
            question_range: env_or("QUESTION_RANGE", "A:Z"),
        }
    }

    /// Cooldown between quizzes for limited accounts, clamped to `0..=MAX_HOURS`.
    pub fn limited_cooldown(&self) -> chrono::Duration {
        chrono::Duration::hours(self.limited_cooldown_hours.clamp(0, MAX_HOURS))
    }

    /// Validate that production-critical configuration is set
    /// Panics if required secrets are using default values
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        let session_secret = self.session_secret.expose_secret();

        if session_secret == DEFAULT_SESSION_SECRET {
            panic!(
                "FATAL: SESSION_SECRET is using default value! Set SESSION_SECRET environment variable to a secure random string."
            );
        }

        if session_secret.len() < 32 {
            panic!(
                "FATAL: SESSION_SECRET is too short ({}). Must be at least 32 characters for security.",
                session_secret.len()
            );
        }

        if self.google_client_secret.expose_secret() == DEFAULT_CLIENT_SECRET
            || self.google_client_id == DEFAULT_CLIENT_ID
        {
            panic!(
                "FATAL: GOOGLE_CLIENT_ID / GOOGLE_CLIENT_SECRET are using default values! Set them from the OAuth client credentials."
            );
        }

        if self.access_spreadsheet_id.is_empty()
            || self.service_account_email.is_empty()
            || self.service_account_private_key.expose_secret().is_empty()
        {
            panic!(
                "FATAL: ACCESS_SPREADSHEET_ID, SERVICE_ACCOUNT_EMAIL and SERVICE_ACCOUNT_PRIVATE_KEY must be set."
            );
        }
    }

    pub fn test_config() -> Self {
        Self {
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            public_base_url: "http://127.0.0.1:8080".to_string(),
            google_client_id: "client-id.apps.googleusercontent.com".to_string(),
            google_client_secret: SecretString::from("client secret".to_string()),
            google_redirect_uri: "http://127.0.0.1:8080/callback".to_string(),
            session_secret: SecretString::from("test_session_secret_key".to_string()),
            session_expiration_hours: 1,
            access_spreadsheet_id: "access-sheet".to_string(),
            unlimited_sheet_name: "Unlimited".to_string(),
            limited_sheet_name: "Limited".to_string(),
            service_account_email: "svc@project.iam.gserviceaccount.com".to_string(),
            service_account_private_key: SecretString::from(String::new()),
            limited_cooldown_hours: 24,
            allow_self_registration: true,
            default_quiz_title: "Quiz from Google Sheets".to_string(),
            collect_respondent_name: true,
            question_range: "A:Z".to_string(),
        }
    }
}
