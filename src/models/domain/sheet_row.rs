use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    errors::{AppError, AppResult},
    models::google::sheets::cell_to_string,
};

/// One spreadsheet row: question text in the first cell, answer options after it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct SheetRow(Vec<String>);

impl SheetRow {
    pub fn new<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SheetRow(cells.into_iter().map(Into::into).collect())
    }

    /// Builds a row from raw JSON cells as returned by the values API.
    ///
    /// Scalars are kept as their text form, so `42` stays the option text "42".
    /// Arrays and objects are not valid cell values and reject the row.
    pub fn from_values(cells: Vec<Value>) -> AppResult<Self> {
        cells
            .into_iter()
            .map(|cell| match cell {
                Value::Array(_) | Value::Object(_) => Err(AppError::ValidationError(format!(
                    "Unsupported cell value: {}",
                    cell
                ))),
                scalar => Ok(cell_to_string(&scalar)),
            })
            .collect::<AppResult<Vec<_>>>()
            .map(SheetRow)
    }

    pub fn cells(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn question(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn raw_options(&self) -> &[String] {
        self.0.get(1..).unwrap_or(&[])
    }
}
