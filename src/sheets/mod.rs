// Read-through access to remote tabular data.
//
// Both the authorization directory and the per-user datasets are published
// spreadsheet exports served as CSV over HTTP. This module is the only place
// that knows that: callers hand it a URL and get back a `Table`, so the
// spreadsheet dependency could be swapped for a real datastore without
// touching the lookup or render code.

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use crate::http;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),
}

/// Parsed tabular data: a header row plus string cells.
///
/// Rows are stored positionally and padded to the header width, so ragged
/// CSV input reads back as empty cells rather than errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Parse CSV text: comma-delimited, first row is the header, quoted
    /// fields per common CSV convention.
    pub fn parse(text: &str) -> Result<Self, SheetError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(text.as_bytes());

        let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let row = (0..columns.len())
                .map(|i| record.get(i).unwrap_or("").to_string())
                .collect();
            rows.push(row);
        }

        Ok(Self { columns, rows })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Cell value by row index and column name.
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx).map(String::as_str)
    }

    /// Index of the first row whose `column` cell equals `value` exactly
    /// (case-sensitive).
    pub fn find_row(&self, column: &str, value: &str) -> Option<usize> {
        let idx = self.column_index(column)?;
        self.rows
            .iter()
            .position(|row| row.get(idx).map(String::as_str) == Some(value))
    }

    /// Row as a column-name to value map.
    pub fn row_map(&self, row: usize) -> Option<HashMap<String, String>> {
        let row = self.rows.get(row)?;
        Some(
            self.columns
                .iter()
                .cloned()
                .zip(row.iter().cloned())
                .collect(),
        )
    }
}

/// Fetch a CSV document and parse it. A non-success HTTP status is an error;
/// this never follows a stale cache because there is none.
pub async fn fetch_table(url: &str) -> Result<Table, SheetError> {
    let response = http::client().get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(SheetError::Status(status));
    }

    let text = response.text().await?;
    Table::parse(&text)
}
