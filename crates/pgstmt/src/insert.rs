//! INSERT statement constructor.

use crate::error::{StmtError, StmtResult};
use crate::statement::Statement;
use crate::value::Value;

/// Collects `(column, value)` pairs for a single-row INSERT.
///
/// ```ignore
/// let mut q = InsertBuilder::new("users")
///     .add_column("name", "alice")
///     .add_column("age", 30)
///     .into_statement()?;
/// q.execute_with_return_field(&client, "id").await?;
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct InsertBuilder {
    table: String,
    columns: Vec<String>,
    values: Vec<Value>,
}

impl InsertBuilder {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Add one column and its value.
    pub fn add_column(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.columns.push(column.into());
        self.values.push(value.into());
        self
    }

    /// Add several columns, in iteration order.
    pub fn add_columns<K, V>(mut self, columns: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        for (column, value) in columns {
            self = self.add_column(column, value);
        }
        self
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Build `INSERT INTO table (c1, c2) VALUES ($1, $2)`.
    pub fn into_statement(self) -> StmtResult<Statement> {
        if self.columns.is_empty() {
            return Err(StmtError::invalid_argument(format!(
                "INSERT into '{}' has no columns",
                self.table
            )));
        }

        let placeholders = (1..=self.values.len())
            .map(|i| format!("${i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table,
            self.columns.join(", "),
            placeholders
        );
        Ok(Statement::with_params(sql, self.values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_insert_with_placeholders() {
        let q = InsertBuilder::new("users")
            .add_column("name", "a")
            .add_column("age", 3)
            .into_statement()
            .unwrap();
        assert_eq!(q.text(), Some("INSERT INTO users (name, age) VALUES ($1, $2)"));
        assert_eq!(q.params(), &[Value::from("a"), Value::Int(3)]);
    }

    #[test]
    fn add_columns_keeps_caller_order() {
        let q = InsertBuilder::new("t")
            .add_columns([("z", 1), ("a", 2), ("m", 3)])
            .into_statement()
            .unwrap();
        assert_eq!(q.text(), Some("INSERT INTO t (z, a, m) VALUES ($1, $2, $3)"));
        assert_eq!(q.params(), &[Value::Int(1), Value::Int(2), Value::Int(3)]);
    }

    #[test]
    fn null_values_are_bound_not_inlined() {
        let q = InsertBuilder::new("t")
            .add_column("note", None::<String>)
            .into_statement()
            .unwrap();
        assert_eq!(q.text(), Some("INSERT INTO t (note) VALUES ($1)"));
        assert_eq!(q.params(), &[Value::Null]);
    }

    #[test]
    fn rejects_empty_insert() {
        let err = InsertBuilder::new("t").into_statement().unwrap_err();
        assert!(err.is_invalid_argument());
    }
}
