//! UPDATE statement constructor.

use crate::error::{StmtError, StmtResult};
use crate::statement::Statement;
use crate::value::Value;

/// Collects `SET` assignments for an UPDATE keyed on a single equality.
///
/// The WHERE value is always bound last, after every assignment.
#[derive(Debug, Clone)]
#[must_use]
pub struct UpdateBuilder {
    table: String,
    where_column: String,
    where_value: Value,
    set: Vec<(String, Value)>,
}

impl UpdateBuilder {
    pub fn new(
        table: impl Into<String>,
        where_column: impl Into<String>,
        where_value: impl Into<Value>,
    ) -> Self {
        Self {
            table: table.into(),
            where_column: where_column.into(),
            where_value: where_value.into(),
            set: Vec::new(),
        }
    }

    /// Add `column = $N`.
    pub fn add_column(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set.push((column.into(), value.into()));
        self
    }

    /// Add several assignments, in iteration order.
    pub fn add_columns<K, V>(mut self, columns: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.set
            .extend(columns.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn column_count(&self) -> usize {
        self.set.len()
    }

    /// Build `UPDATE table SET c1 = $1, c2 = $2 WHERE wc = $3`.
    pub fn into_statement(self) -> StmtResult<Statement> {
        if self.set.is_empty() {
            return Err(StmtError::invalid_argument(format!(
                "UPDATE of '{}' has no columns to set",
                self.table
            )));
        }

        let mut q = Statement::new();
        q.push("UPDATE ").push(&self.table).push(" SET ");
        for (i, (column, value)) in self.set.into_iter().enumerate() {
            if i > 0 {
                q.push(", ");
            }
            q.push(&column).push(" = ").bind(value);
        }
        q.push(" WHERE ")
            .push(&self.where_column)
            .push(" = ")
            .bind(self.where_value);
        Ok(q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn where_value_bound_after_assignments() {
        let q = UpdateBuilder::new("t", "id", 5)
            .add_column("name", "a")
            .add_column("age", 3)
            .into_statement()
            .unwrap();
        assert_eq!(q.text(), Some("UPDATE t SET name = $1, age = $2 WHERE id = $3"));
        assert_eq!(
            q.params(),
            &[Value::from("a"), Value::Int(3), Value::Int(5)]
        );
    }

    #[test]
    fn add_columns_mixes_with_add_column() {
        let q = UpdateBuilder::new("users", "email", "x@y")
            .add_column("active", true)
            .add_columns([("a", Value::Null), ("b", Value::from(2.5))])
            .into_statement()
            .unwrap();
        assert_eq!(
            q.text(),
            Some("UPDATE users SET active = $1, a = $2, b = $3 WHERE email = $4")
        );
        assert_eq!(q.param_count(), 4);
        assert_eq!(q.params()[3], Value::from("x@y"));
    }

    #[test]
    fn null_assignment_stays_a_placeholder() {
        // SET col = NULL is valid, unlike WHERE col = NULL.
        let q = UpdateBuilder::new("t", "id", 1)
            .add_column("deleted_at", Value::Null)
            .into_statement()
            .unwrap();
        assert_eq!(q.text(), Some("UPDATE t SET deleted_at = $1 WHERE id = $2"));
    }

    #[test]
    fn rejects_empty_update() {
        let err = UpdateBuilder::new("t", "id", 1).into_statement().unwrap_err();
        assert!(err.is_invalid_argument());
    }
}
