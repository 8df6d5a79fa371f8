//! Wire types for the Statement Execution API.

use serde::{Deserialize, Serialize};

/// Statement submission body.
#[derive(Debug, Serialize)]
pub(crate) struct SubmitRequest<'a> {
    pub statement: &'a str,
    pub warehouse_id: &'a str,
    /// Server-side wait before the API returns a pending handle.
    pub wait_timeout: &'a str,
    pub on_wait_timeout: &'a str,
}

/// Response shape shared by submission and polling.
#[derive(Debug, Deserialize)]
pub(crate) struct StatementResponse {
    pub statement_id: String,
    pub status: StatementStatus,
    #[serde(default)]
    pub manifest: Option<Manifest>,
    #[serde(default)]
    pub result: Option<ResultChunk>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatementStatus {
    pub state: String,
    #[serde(default)]
    pub error: Option<StatementErrorInfo>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatementErrorInfo {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Manifest {
    pub schema: SchemaInfo,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SchemaInfo {
    #[serde(default)]
    pub columns: Vec<ColumnInfo>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ColumnInfo {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResultChunk {
    #[serde(default)]
    pub data_array: Option<Vec<Vec<Option<String>>>>,
}

/// Decoded result of a successful statement.
///
/// Column names come from the manifest schema; each cell is the string
/// rendering the API produced, or None for SQL NULL.
#[derive(Debug, Clone, Default)]
pub struct StatementResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl StatementResult {
    pub(crate) fn from_response(response: &StatementResponse) -> Self {
        let columns = response
            .manifest
            .as_ref()
            .map(|m| m.schema.columns.iter().map(|c| c.name.clone()).collect())
            .unwrap_or_default();
        let rows = response
            .result
            .as_ref()
            .and_then(|r| r.data_array.clone())
            .unwrap_or_default();
        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// First cell of the first row, if any.
    pub fn first_value(&self) -> Option<&str> {
        self.rows.first()?.first()?.as_deref()
    }

    /// Cell by row index and column name.
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.get(idx)?.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StatementResult {
        StatementResult {
            columns: vec!["path".to_string(), "count".to_string()],
            rows: vec![
                vec![Some("a.pdf".to_string()), Some("3".to_string())],
                vec![Some("b.pdf".to_string()), None],
            ],
        }
    }

    #[test]
    fn value_lookup_by_column_name() {
        let result = sample();
        assert_eq!(result.value(0, "count"), Some("3"));
        assert_eq!(result.value(1, "count"), None);
        assert_eq!(result.value(0, "missing"), None);
        assert_eq!(result.value(9, "path"), None);
    }

    #[test]
    fn first_value_of_empty_result_is_none() {
        assert_eq!(StatementResult::default().first_value(), None);
        assert_eq!(sample().first_value(), Some("a.pdf"));
    }

    #[test]
    fn decodes_api_response_shape() {
        let json = r#"{
            "statement_id": "stmt-1",
            "status": { "state": "SUCCEEDED" },
            "manifest": { "schema": { "columns": [ { "name": "c1" } ] } },
            "result": { "data_array": [ [ "v1" ], [ null ] ] }
        }"#;
        let response: StatementResponse = serde_json::from_str(json).unwrap();
        let result = StatementResult::from_response(&response);
        assert_eq!(result.columns, vec!["c1"]);
        assert_eq!(result.row_count(), 2);
        assert_eq!(result.value(0, "c1"), Some("v1"));
        assert_eq!(result.value(1, "c1"), None);
    }
}
