use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{AppError, AppResult};

static SPREADSHEET_ID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/d/([a-zA-Z0-9_-]+)").expect("SPREADSHEET_ID_REGEX is a valid regex pattern")
});

/// Pulls the spreadsheet id out of a sharing link such as
/// `https://docs.google.com/spreadsheets/d/<id>/edit#gid=0`.
pub fn extract_spreadsheet_id(sheet_url: &str) -> AppResult<String> {
    let sheet_url = sheet_url.trim();
    if sheet_url.is_empty() {
        return Err(AppError::ValidationError(
            "Enter a link to a Google Sheet".to_string(),
        ));
    }

    SPREADSHEET_ID_REGEX
        .captures(sheet_url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| AppError::ValidationError("Invalid Google Sheet link".to_string()))
}
