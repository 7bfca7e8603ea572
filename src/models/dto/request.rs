use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, max = 2048, message = "Enter a link to a Google Sheet"))]
    pub sheet_url: String,

    #[validate(length(max = 300))]
    #[serde(default)]
    pub title: Option<String>,
}

impl CreateQuizRequest {
    /// Title to use for the form; blank titles fall back to `default`.
    pub fn title_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(default)
    }
}

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
