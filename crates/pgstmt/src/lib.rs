//! # pgstmt
//!
//! Parameterized PostgreSQL statements with shaped results.
//!
//! ## Features
//!
//! - **Incremental building**: SQL text and its `$N` values are appended together
//! - **Null-aware equality**: `column IS null` instead of a `= NULL` that never matches
//! - **Shaped results**: all rows, one column, first row, exactly-one row, or a
//!   `RETURNING` value
//! - **Fail-fast errors**: one dispatch per call, failures carry the SQL and values
//! - **Transaction-friendly**: pass a transaction anywhere a `GenericClient` is expected
//!
//! ```ignore
//! use pgstmt::{InsertBuilder, stmt};
//!
//! let id = InsertBuilder::new("users")
//!     .add_column("name", "alice")
//!     .add_column("email", None::<String>)
//!     .into_statement()?
//!     .execute_with_return_field(&client, "id")
//!     .await?;
//!
//! let mut q = stmt("SELECT id, name FROM users WHERE ");
//! q.null_aware_eq("email", None::<String>);
//! let rows = q.execute_all(&client).await?;
//! ```

pub mod client;
pub mod config;
mod decode;
pub mod error;
pub mod exec;
pub mod insert;
pub mod operator;
pub mod row;
pub mod statement;
pub mod types;
pub mod update;
pub mod value;

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(test)]
pub(crate) mod mock;

pub use client::{DispatchError, Fetched, GenericClient};
pub use config::ExecConfig;
pub use error::{StmtError, StmtResult};
pub use insert::InsertBuilder;
pub use operator::{is_valid_where_operator, where_operators_text};
pub use row::{Record, Rows};
pub use statement::{Statement, stmt};
pub use types::{blank_to_null, check_range, decode_bool, encode_bool, is_valid_integer_for};
pub use update::UpdateBuilder;
pub use value::Value;
