//! # pgstmt-schema
//!
//! Table and column lookups against `information_schema`, issued through
//! ordinary [`pgstmt`] statements.
//!
//! ```ignore
//! use pgstmt_schema::{table_exists, table_metadata};
//!
//! if table_exists(&client, "users", None).await? {
//!     for column in table_metadata(&client, "users").await? {
//!         println!("{} {}", column.name, column.data_type);
//!     }
//! }
//! ```

mod introspect;

pub use introspect::{ColumnMeta, DEFAULT_SCHEMA, TableName, schema_tables, table_exists, table_metadata};
