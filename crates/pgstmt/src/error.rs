//! Error types for pgstmt

use crate::value::Value;
use thiserror::Error;

/// Result type alias for pgstmt operations
pub type StmtResult<T> = Result<T, StmtError>;

/// Error types for statement building and execution
#[derive(Debug, Error)]
pub enum StmtError {
    /// The server rejected the statement or the dispatch failed.
    ///
    /// `diagnostic` is best-effort: the driver does not always report a
    /// message for a failed dispatch.
    #[error("Query failure: {} {sql}", diagnostic.as_deref().unwrap_or("(no diagnostic)"))]
    QueryFailure {
        diagnostic: Option<String>,
        sql: String,
        params: Vec<Value>,
    },

    /// The statement succeeded but returned no rows where one was required
    #[error("Results not found: {0}")]
    ResultsNotFound(String),

    /// A caller-supplied identifier or literal is not valid
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// More rows than the accessor allows
    #[error("Ambiguous result: expected at most 1 row, got {rows}")]
    AmbiguousResult { rows: usize },

    /// Row decode error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Database connection or configuration error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Pool error
    #[cfg(feature = "pool")]
    #[error("Pool error: {0}")]
    Pool(String),
}

impl StmtError {
    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create a results-not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::ResultsNotFound(message.into())
    }

    /// Check if this is a query failure
    pub fn is_query_failure(&self) -> bool {
        matches!(self, Self::QueryFailure { .. })
    }

    /// Check if this is a results-not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ResultsNotFound(_))
    }

    /// Check if this is an invalid argument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Check if this is an ambiguous result error
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Self::AmbiguousResult { .. })
    }

    /// SQL text of a failed statement, if this is a query failure.
    pub fn failed_sql(&self) -> Option<&str> {
        match self {
            Self::QueryFailure { sql, .. } => Some(sql),
            _ => None,
        }
    }
}

#[cfg(feature = "pool")]
impl From<deadpool_postgres::PoolError> for StmtError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Pool(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_failure_display_includes_diagnostic_and_sql() {
        let err = StmtError::QueryFailure {
            diagnostic: Some("relation \"nope\" does not exist".into()),
            sql: "SELECT * FROM nope".into(),
            params: vec![],
        };
        assert_eq!(
            err.to_string(),
            "Query failure: relation \"nope\" does not exist SELECT * FROM nope"
        );
        assert_eq!(err.failed_sql(), Some("SELECT * FROM nope"));
    }

    #[test]
    fn query_failure_without_diagnostic() {
        let err = StmtError::QueryFailure {
            diagnostic: None,
            sql: "SELECT 1".into(),
            params: vec![Value::Int(1)],
        };
        assert!(err.to_string().contains("(no diagnostic)"));
        assert!(err.is_query_failure());
    }
}
