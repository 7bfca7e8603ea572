use std::sync::Arc;

use async_trait::async_trait;
use secrecy::ExposeSecret;

use crate::{
    auth::ServiceAccountTokenSource,
    errors::{AppError, AppResult},
    models::google::sheets::cell_to_string,
    services::sheets_client::SheetsClient,
};

/// Range-addressed access to one tab of an external spreadsheet.
///
/// Ranges are relative to the tab (`A:B`); row indices are 1-based like the
/// sheet itself.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RowStore: Send + Sync {
    async fn get_column(&self, range: &str) -> AppResult<Vec<Vec<String>>>;
    async fn append_row(&self, values: Vec<String>) -> AppResult<()>;
    async fn update_cell(&self, row_index: usize, column: &str, value: &str) -> AppResult<()>;
}

pub struct SheetsRowStore {
    client: SheetsClient,
    tokens: Arc<ServiceAccountTokenSource>,
    spreadsheet_id: String,
    sheet_name: String,
}

impl SheetsRowStore {
    pub fn new(
        client: SheetsClient,
        tokens: Arc<ServiceAccountTokenSource>,
        spreadsheet_id: &str,
        sheet_name: &str,
    ) -> Self {
        Self {
            client,
            tokens,
            spreadsheet_id: spreadsheet_id.to_string(),
            sheet_name: sheet_name.to_string(),
        }
    }

    fn qualified(&self, range: &str) -> String {
        qualify_range(&self.sheet_name, range)
    }
}

/// `'Sheet name'!A:B`, with quotes in the name doubled.
pub fn qualify_range(sheet_name: &str, range: &str) -> String {
    format!("'{}'!{}", sheet_name.replace('\'', "''"), range)
}

#[async_trait]
impl RowStore for SheetsRowStore {
    async fn get_column(&self, range: &str) -> AppResult<Vec<Vec<String>>> {
        let token = self.tokens.access_token().await.map_err(AppError::into_store_unavailable)?;
        let values = self
            .client
            .get_values(token.expose_secret(), &self.spreadsheet_id, &self.qualified(range))
            .await
            .map_err(AppError::into_store_unavailable)?;

        Ok(values
            .values
            .iter()
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect())
    }

    async fn append_row(&self, values: Vec<String>) -> AppResult<()> {
        let token = self.tokens.access_token().await.map_err(AppError::into_store_unavailable)?;
        self.client
            .append_row(
                token.expose_secret(),
                &self.spreadsheet_id,
                &self.qualified("A:B"),
                values,
            )
            .await
            .map_err(AppError::into_store_unavailable)
    }

    async fn update_cell(&self, row_index: usize, column: &str, value: &str) -> AppResult<()> {
        let token = self.tokens.access_token().await.map_err(AppError::into_store_unavailable)?;
        let cell = format!("{}{}", column, row_index);
        self.client
            .update_values(
                token.expose_secret(),
                &self.spreadsheet_id,
                &self.qualified(&cell),
                vec![value.to_string()],
            )
            .await
            .map_err(AppError::into_store_unavailable)
    }
}
