//! Result rows.
//!
//! A [`Record`] is one row as an ordered column-name → [`Value`] mapping.
//! [`Rows`] is the complete result of one execution; it is returned by value
//! and dropped by whichever extraction method consumes it.

use crate::decode::decode_column;
use crate::error::{StmtError, StmtResult};
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// One result row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    columns: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column. Later duplicates are kept but shadowed by the first.
    pub fn push(&mut self, column: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.columns.push((column.into(), value.into()));
        self
    }

    /// Value of `column`, if the row has it.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, v)| v)
    }

    /// Value of `column`, or `InvalidArgument` if the row has no such column.
    pub fn try_get(&self, column: &str) -> StmtResult<&Value> {
        self.get(column).ok_or_else(|| {
            StmtError::invalid_argument(format!("column '{column}' does not exist in result"))
        })
    }

    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    /// Consume the row and take the value of `column`.
    pub fn take(self, column: &str) -> Option<Value> {
        self.columns
            .into_iter()
            .find(|(name, _)| name == column)
            .map(|(_, v)| v)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(name, v)| (name.as_str(), v))
    }

    /// Decode a driver row.
    pub fn from_pg_row(row: &tokio_postgres::Row) -> StmtResult<Self> {
        let columns = row
            .columns()
            .iter()
            .enumerate()
            .map(|(idx, col)| Ok((col.name().to_string(), decode_column(row, idx)?)))
            .collect::<StmtResult<Vec<_>>>()?;
        Ok(Self { columns })
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            columns: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// The rows produced by one execution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rows {
    columns: Vec<String>,
    records: Vec<Record>,
}

impl Rows {
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Self {
        Self { columns, records }
    }

    /// Rows without a column description (column names taken from the first row).
    pub fn from_records(records: Vec<Record>) -> Self {
        let columns = records
            .first()
            .map(|r| r.column_names().map(str::to_string).collect())
            .unwrap_or_default();
        Self { columns, records }
    }

    /// Result column names, in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first(&self) -> Option<&Record> {
        self.records.first()
    }

    pub fn into_first(self) -> Option<Record> {
        self.records.into_iter().next()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl IntoIterator for Rows {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
