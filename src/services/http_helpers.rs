use reqwest::{Response, Url};

use crate::errors::{AppError, AppResult};

/// Turns a non-2xx upstream response into an `ExternalApiError` carrying
/// the status and body, so the cause ends up in the logs.
pub async fn ensure_success(response: Response, what: &str) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read response body".to_string());
    log::error!("{} failed with status {}: {}", what, status, body);

    Err(AppError::ExternalApiError(format!(
        "{} failed with status {}: {}",
        what, status, body
    )))
}

/// Appends already-unescaped segments to `base`, percent-encoding each one.
pub fn api_url(base: &str, segments: &[&str]) -> AppResult<Url> {
    let mut url = Url::parse(base)
        .map_err(|e| AppError::InternalError(format!("Invalid API base URL '{}': {}", base, e)))?;

    url.path_segments_mut()
        .map_err(|_| AppError::InternalError(format!("API base URL '{}' cannot be a base", base)))?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}
