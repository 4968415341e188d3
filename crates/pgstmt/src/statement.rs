//! Incremental statement builder.
//!
//! A [`Statement`] is SQL text plus the ordered list of values bound to its
//! `$1, $2, ...` placeholders. Text and values are appended together, so the
//! caller controls placeholder numbering; [`Statement::null_aware_eq`] and
//! [`Statement::bind`] number placeholders for you.
//!
//! # Example
//!
//! ```ignore
//! use pgstmt::stmt;
//!
//! let mut q = stmt("SELECT id, name FROM users WHERE ");
//! q.null_aware_eq("deleted_at", None::<String>)
//!     .push(" AND ")
//!     .null_aware_eq("status", "active");
//!
//! let rows = q.execute_all(&client).await?;
//! ```

use crate::config::ExecConfig;
use crate::error::{StmtError, StmtResult};
use crate::operator;
use crate::types;
use crate::value::Value;

/// SQL text with positionally bound parameters.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct Statement {
    sql: String,
    params: Vec<Value>,
    config: ExecConfig,
}

/// Start building a statement.
pub fn stmt(initial_sql: impl Into<String>) -> Statement {
    Statement::with_params(initial_sql, Vec::<Value>::new())
}

impl Statement {
    /// Create an empty statement.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a statement pre-seeded with text and parameters.
    pub fn with_params<V: Into<Value>>(
        sql: impl Into<String>,
        params: impl IntoIterator<Item = V>,
    ) -> Self {
        Self {
            sql: sql.into(),
            params: params.into_iter().map(Into::into).collect(),
            config: ExecConfig::default(),
        }
    }

    /// Replace the execution settings.
    pub fn with_config(mut self, config: ExecConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ExecConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ExecConfig {
        &mut self.config
    }

    /// Append a SQL fragment and the values for the placeholders it contains.
    ///
    /// Nothing checks that `fragment` references exactly as many new
    /// placeholders as `values` provides.
    pub fn append<V: Into<Value>>(
        &mut self,
        fragment: &str,
        values: impl IntoIterator<Item = V>,
    ) -> &mut Self {
        self.sql.push_str(fragment);
        self.params.extend(values.into_iter().map(Into::into));
        self
    }

    /// Append raw SQL text without parameters.
    pub fn push(&mut self, fragment: &str) -> &mut Self {
        self.sql.push_str(fragment);
        self
    }

    /// Append a value and its `$N` placeholder.
    pub fn bind(&mut self, value: impl Into<Value>) -> &mut Self {
        self.params.push(value.into());
        let idx = self.params.len();
        self.sql.push('$');
        self.sql.push_str(&idx.to_string());
        self
    }

    /// Append `column = $N`, or `column IS null` when `value` is null.
    ///
    /// `= NULL` never matches in SQL, so null comparisons need the `IS` form.
    pub fn null_aware_eq(&mut self, column: &str, value: impl Into<Value>) -> &mut Self {
        let value = value.into();
        self.sql.push_str(column);
        if value.is_null() {
            self.sql.push_str(" IS null");
            return self;
        }
        self.sql.push_str(" = ");
        self.bind(value)
    }

    /// Append `column <op> $N` after checking `op` against the allowed
    /// WHERE operators.
    pub fn where_op(
        &mut self,
        column: &str,
        op: &str,
        value: impl Into<Value>,
    ) -> StmtResult<&mut Self> {
        if !operator::is_valid_where_operator(op) {
            return Err(StmtError::invalid_argument(format!(
                "'{op}' is not a valid where operator; expected one of: {}",
                operator::where_operators_text()
            )));
        }
        self.sql.push_str(column);
        self.sql.push(' ');
        self.sql.push_str(&op.to_ascii_uppercase());
        self.sql.push(' ');
        Ok(self.bind(value))
    }

    /// Replace text and parameters wholesale.
    pub fn reset<V: Into<Value>>(
        &mut self,
        sql: impl Into<String>,
        params: impl IntoIterator<Item = V>,
    ) -> &mut Self {
        self.sql = sql.into();
        self.params = params.into_iter().map(Into::into).collect();
        self
    }

    /// Empty both the text and the parameters.
    pub fn clear(&mut self) {
        self.sql.clear();
        self.params.clear();
    }

    /// The SQL text, or `None` if nothing has been set.
    pub fn text(&self) -> Option<&str> {
        (!self.sql.is_empty()).then_some(self.sql.as_str())
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sql.is_empty() && self.params.is_empty()
    }

    /// The placeholder the next bound value will get, e.g. `"$3"`.
    pub fn next_placeholder(&self) -> String {
        format!("${}", self.params.len() + 1)
    }

    /// Replace every `Value::Bool` parameter with its `t`/`f` literal.
    pub fn coerce_booleans(&mut self) -> &mut Self {
        for param in &mut self.params {
            if let Value::Bool(b) = *param {
                *param = Value::Text(types::encode_bool(b).to_string());
            }
        }
        self
    }

    /// Split into SQL text and parameters.
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }

    pub(crate) fn sql_str(&self) -> &str {
        &self.sql
    }
}
