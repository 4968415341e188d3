//! Generic client trait for unified database access.
//!
//! The statement executor never opens or closes connections; it borrows
//! anything implementing [`GenericClient`] for the duration of one dispatch.

use crate::error::StmtResult;
use crate::row::{Record, Rows};
use crate::value::Value;
use std::fmt;
use tokio_postgres::types::ToSql;

/// Driver-level failure of a single dispatch.
///
/// The message is optional: a dispatch can fail without the driver reporting
/// any text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchError {
    pub message: Option<String>,
    /// SQLSTATE code, when the server reported one.
    pub code: Option<String>,
}

impl DispatchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            code: None,
        }
    }

    /// A failure with no diagnostic text.
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.code, &self.message) {
            (Some(code), Some(msg)) => write!(f, "{code}: {msg}"),
            (None, Some(msg)) => f.write_str(msg),
            (Some(code), None) => f.write_str(code),
            (None, None) => f.write_str("unknown error"),
        }
    }
}

impl std::error::Error for DispatchError {}

impl From<tokio_postgres::Error> for DispatchError {
    fn from(err: tokio_postgres::Error) -> Self {
        let Some(db_err) = err.as_db_error() else {
            let message = err.to_string();
            return Self {
                message: (!message.is_empty()).then_some(message),
                code: None,
            };
        };

        // Verbose form: severity, message, then detail/hint when present.
        let mut message = format!("{}: {}", db_err.severity(), db_err.message());
        if let Some(detail) = db_err.detail() {
            message.push_str("\nDETAIL: ");
            message.push_str(detail);
        }
        if let Some(hint) = db_err.hint() {
            message.push_str("\nHINT: ");
            message.push_str(hint);
        }
        Self {
            message: Some(message),
            code: Some(db_err.code().code().to_string()),
        }
    }
}

/// Rows of a statement the server accepted, or the failure to decode them.
///
/// A decode failure does not mean the statement did not run.
pub type Fetched = StmtResult<Rows>;

/// A trait that unifies database clients and transactions.
///
/// Implementations send `sql` with `params` bound positionally (`$1` is
/// `params[0]`) in a single round trip. The outer error means the server
/// did not run the statement; the inner [`Fetched`] result reports whether
/// the rows it returned could be decoded.
pub trait GenericClient: Send + Sync {
    fn query(
        &self,
        sql: &str,
        params: &[Value],
    ) -> impl std::future::Future<Output = Result<Fetched, DispatchError>> + Send;
}

fn params_ref(params: &[Value]) -> Vec<&(dyn ToSql + Sync)> {
    params.iter().map(|p| p as &(dyn ToSql + Sync)).collect()
}

fn collect_rows(columns: &[tokio_postgres::Column], rows: Vec<tokio_postgres::Row>) -> Fetched {
    let records = rows
        .iter()
        .map(Record::from_pg_row)
        .collect::<StmtResult<Vec<_>>>()?;
    let columns = columns.iter().map(|c| c.name().to_string()).collect();
    Ok(Rows::new(columns, records))
}

/// Prepare then query, so the column list is known even for zero rows.
///
/// Pooled clients use an unnamed `prepare` as well: builder output is mostly
/// one-off text, and `prepare_cached` would keep every variant on the
/// connection.
macro_rules! impl_generic_client {
    ($($ty:ty => $inner:ty),* $(,)?) => {
        $(impl GenericClient for $ty {
            async fn query(&self, sql: &str, params: &[Value]) -> Result<Fetched, DispatchError> {
                let stmt = self.prepare(sql).await?;
                let rows = <$inner>::query(self, &stmt, &params_ref(params)).await?;
                Ok(collect_rows(stmt.columns(), rows))
            }
        })*
    };
}

impl_generic_client!(
    tokio_postgres::Client => tokio_postgres::Client,
    tokio_postgres::Transaction<'_> => tokio_postgres::Transaction<'_>,
);

#[cfg(feature = "pool")]
impl_generic_client!(
    deadpool_postgres::Client => tokio_postgres::Client,
    deadpool_postgres::Transaction<'_> => tokio_postgres::Transaction<'_>,
);
