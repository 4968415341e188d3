//! Statement execution and result shaping.
//!
//! Every method here performs exactly one dispatch through the supplied
//! [`GenericClient`]. Once the server has run the statement it is cleared, so
//! a builder cannot be re-run by accident, even when the returned rows fail to
//! decode ([`StmtError::Decode`]). When the server rejects it, it is left as
//! it was for inspection.
//!
//! Result multiplicity at a glance:
//!
//! | method                      | 0 rows                 | 1 row      | 2+ rows            |
//! |-----------------------------|------------------------|------------|--------------------|
//! | `execute_all`               | `None`                 | `Some(vec)`| `Some(vec)`        |
//! | `execute_one_row`           | `None`                 | row        | first row          |
//! | `get_row`                   | `None`                 | row        | `AmbiguousResult`  |
//! | `execute_with_return_field` | `ResultsNotFound`      | value      | first row's value  |

use crate::client::GenericClient;
use crate::error::{StmtError, StmtResult};
use crate::row::{Record, Rows};
use crate::statement::Statement;
use crate::value::Value;
use tracing::Level;

/// Dispatch a tracing event at a runtime-determined level.
macro_rules! emit_at_level {
    ($level:expr, $($field:tt)*) => {
        match $level {
            Level::ERROR => tracing::error!($($field)*),
            Level::WARN  => tracing::warn!($($field)*),
            Level::INFO  => tracing::info!($($field)*),
            Level::DEBUG => tracing::debug!($($field)*),
            Level::TRACE => tracing::trace!($($field)*),
        }
    };
}

impl Statement {
    /// Execute the statement and return its rows.
    ///
    /// Applies the boolean coercion pass first when the statement's
    /// [`ExecConfig`](crate::ExecConfig) asks for it.
    pub async fn execute(&mut self, conn: &impl GenericClient) -> StmtResult<Rows> {
        if self.config().coerce_booleans {
            self.coerce_booleans();
        }

        let config = self.config();
        if config.log_sql {
            let sql = config.truncate_sql(self.sql_str());
            emit_at_level!(
                config.log_level,
                target: "pgstmt.sql",
                param_count = self.param_count(),
                sql = %sql,
                "dispatch"
            );
        }

        let result = conn.query(self.sql_str(), self.params()).await;
        match result {
            Ok(fetched) => {
                if let Err(err) = &fetched {
                    tracing::warn!(
                        target: "pgstmt.sql",
                        error = %err,
                        sql = %self.config().truncate_sql(self.sql_str()),
                        "statement ran but its rows could not be decoded"
                    );
                }
                self.clear();
                fetched
            }
            Err(err) => {
                tracing::warn!(
                    target: "pgstmt.sql",
                    code = err.code.as_deref().unwrap_or("-"),
                    error = %err,
                    sql = %self.config().truncate_sql(self.sql_str()),
                    "statement failed"
                );
                Err(StmtError::QueryFailure {
                    diagnostic: err.message,
                    sql: self.sql_str().to_string(),
                    params: self.params().to_vec(),
                })
            }
        }
    }

    /// Execute and return every row, or `None` when there are none.
    pub async fn execute_all(&mut self, conn: &impl GenericClient) -> StmtResult<Option<Vec<Record>>> {
        let rows = self.execute(conn).await?;
        if rows.is_empty() {
            return Ok(None);
        }
        Ok(Some(rows.into_records()))
    }

    /// Execute and return one column from every row, or `None` when there are
    /// no rows.
    pub async fn execute_one_field(
        &mut self,
        conn: &impl GenericClient,
        column: &str,
    ) -> StmtResult<Option<Vec<Value>>> {
        let rows = self.execute(conn).await?;
        if rows.is_empty() {
            return Ok(None);
        }
        if !rows.has_column(column) {
            return Err(missing_column(column));
        }
        let values = rows
            .into_iter()
            .map(|record| record.take(column).unwrap_or_default())
            .collect();
        Ok(Some(values))
    }

    /// Execute and return the first row, if any.
    ///
    /// Extra rows are ignored; use [`Statement::get_row`] to reject them.
    pub async fn execute_one_row(&mut self, conn: &impl GenericClient) -> StmtResult<Option<Record>> {
        let rows = self.execute(conn).await?;
        Ok(rows.into_first())
    }

    /// Execute and return the only row, if any.
    ///
    /// Fails with [`StmtError::AmbiguousResult`] when more than one row comes back.
    pub async fn get_row(&mut self, conn: &impl GenericClient) -> StmtResult<Option<Record>> {
        let rows = self.execute(conn).await?;
        match rows.len() {
            0 | 1 => Ok(rows.into_first()),
            n => Err(StmtError::AmbiguousResult { rows: n }),
        }
    }

    /// Whether the statement produces exactly one row.
    pub async fn record_exists(&mut self, conn: &impl GenericClient) -> StmtResult<bool> {
        Ok(self.get_row(conn).await?.is_some())
    }

    /// First column of the only row, if any. Same multiplicity rules as
    /// [`Statement::get_row`].
    pub async fn execute_scalar(&mut self, conn: &impl GenericClient) -> StmtResult<Option<Value>> {
        let row = self.get_row(conn).await?;
        Ok(row.and_then(|r| r.iter().next().map(|(_, v)| v.clone())))
    }

    /// Append `RETURNING column`, execute, and return that column from the
    /// first affected row.
    ///
    /// The statement runs before the column is looked up: a `column` missing
    /// from the result yields `InvalidArgument` after the mutation has already
    /// been applied. Zero affected rows yields `ResultsNotFound`.
    pub async fn execute_with_return_field(
        &mut self,
        conn: &impl GenericClient,
        column: &str,
    ) -> StmtResult<Value> {
        self.push(" RETURNING ").push(column);

        let rows = self.execute(conn).await?;
        let Some(first) = rows.into_first() else {
            return Err(StmtError::not_found(format!(
                "no rows affected; nothing returned for '{column}'"
            )));
        };
        first.take(column).ok_or_else(|| missing_column(column))
    }
}

fn missing_column(column: &str) -> StmtError {
    StmtError::invalid_argument(format!(
        "query executed, but column '{column}' does not exist in the result"
    ))
}
