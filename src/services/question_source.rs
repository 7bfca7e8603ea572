use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::{
    errors::{AppError, AppResult},
    models::domain::SheetRow,
    services::sheets_client::SheetsClient,
};

/// Where quiz rows come from.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionSource: Send + Sync {
    async fn fetch_rows(&self, spreadsheet_id: &str) -> AppResult<Vec<SheetRow>>;
}

/// Reads the question sheet with the signed-in user's own token, so only
/// sheets the user can open are accepted.
pub struct GoogleSheetQuestionSource {
    client: SheetsClient,
    token: SecretString,
    range: String,
}

impl GoogleSheetQuestionSource {
    pub fn new(client: SheetsClient, token: SecretString, range: &str) -> Self {
        Self {
            client,
            token,
            range: range.to_string(),
        }
    }
}

#[async_trait]
impl QuestionSource for GoogleSheetQuestionSource {
    async fn fetch_rows(&self, spreadsheet_id: &str) -> AppResult<Vec<SheetRow>> {
        let values = self
            .client
            .get_values(self.token.expose_secret(), spreadsheet_id, &self.range)
            .await?;

        if values.values.is_empty() {
            return Err(AppError::ValidationError(
                "There is no data in the spreadsheet".to_string(),
            ));
        }

        values.values.into_iter().map(SheetRow::from_values).collect()
    }
}
