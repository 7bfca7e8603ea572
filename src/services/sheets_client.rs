use crate::{
    constants::google::SHEETS_API_BASE,
    errors::AppResult,
    models::google::sheets::ValueRange,
    services::http_helpers::{api_url, ensure_success},
};

/// Thin client over the `spreadsheets.values` endpoints.
#[derive(Clone)]
pub struct SheetsClient {
    http: reqwest::Client,
    base_url: String,
}

impl SheetsClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self::with_base_url(http, SHEETS_API_BASE)
    }

    pub fn with_base_url(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    pub async fn get_values(
        &self,
        token: &str,
        spreadsheet_id: &str,
        range: &str,
    ) -> AppResult<ValueRange> {
        let url = api_url(&self.base_url, &["spreadsheets", spreadsheet_id, "values", range])?;
        log::debug!("Reading {} from spreadsheet {}", range, spreadsheet_id);

        let response = self.http.get(url).bearer_auth(token).send().await?;
        let values = ensure_success(response, "Sheets values.get")
            .await?
            .json::<ValueRange>()
            .await?;
        Ok(values)
    }

    pub async fn append_row(
        &self,
        token: &str,
        spreadsheet_id: &str,
        range: &str,
        values: Vec<String>,
    ) -> AppResult<()> {
        let target = format!("{}:append", range);
        let url = api_url(&self.base_url, &["spreadsheets", spreadsheet_id, "values", target.as_str()])?;

        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .query(&[("valueInputOption", "RAW"), ("insertDataOption", "INSERT_ROWS")])
            .json(&ValueRange::single_row(values))
            .send()
            .await?;
        ensure_success(response, "Sheets values.append").await?;
        Ok(())
    }

    pub async fn update_values(
        &self,
        token: &str,
        spreadsheet_id: &str,
        range: &str,
        values: Vec<String>,
    ) -> AppResult<()> {
        let url = api_url(&self.base_url, &["spreadsheets", spreadsheet_id, "values", range])?;

        let response = self
            .http
            .put(url)
            .bearer_auth(token)
            .query(&[("valueInputOption", "RAW")])
            .json(&ValueRange::single_row(values))
            .send()
            .await?;
        ensure_success(response, "Sheets values.update").await?;
        Ok(())
    }
}
