use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `spreadsheets.values` resource. `values` is omitted by the API when the
/// requested range is empty.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<String>,
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}

impl ValueRange {
    pub fn single_row(values: Vec<String>) -> Self {
        Self {
            range: None,
            major_dimension: Some("ROWS".to_string()),
            values: vec![values.into_iter().map(Value::String).collect()],
        }
    }
}

/// Renders a cell the way it reads in the sheet. Numbers and booleans are
/// kept as their literal text.
pub fn cell_to_string(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        other => other.to_string(),
    }
}
