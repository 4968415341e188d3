use pgstmt::{GenericClient, Record, StmtError, StmtResult, Value, stmt};
use serde::{Deserialize, Serialize};

/// Schema searched when the caller does not name one.
pub const DEFAULT_SCHEMA: &str = "public";

// information_schema columns use domain types (sql_identifier,
// cardinal_number, ...); every projection is cast to a base type.

const SCHEMA_TABLES_SQL: &str = "SELECT table_schema::text AS table_schema, table_name::text AS table_name \
FROM information_schema.tables \
WHERE table_type = 'BASE TABLE' AND table_schema = $1 \
ORDER BY table_name";

const TABLE_EXISTS_SQL: &str = "SELECT 1 AS found \
FROM information_schema.tables \
WHERE table_name = $1 AND table_type = 'BASE TABLE' AND table_schema = $2";

const TABLE_METADATA_SQL: &str = "SELECT column_name::text AS column_name, \
data_type::text AS data_type, \
column_default::text AS column_default, \
is_nullable::text AS is_nullable, \
character_maximum_length::int AS character_maximum_length, \
numeric_precision::int AS numeric_precision, \
udt_name::text AS udt_name \
FROM information_schema.columns \
WHERE table_name = $1 \
ORDER BY ordinal_position";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableName {
    pub schema: String,
    pub name: String,
}

/// One row of `information_schema.columns`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMeta {
    pub name: String,
    pub data_type: String,
    pub default: Option<String>,
    pub nullable: bool,
    pub character_maximum_length: Option<i64>,
    pub numeric_precision: Option<i64>,
    pub udt_name: String,
}

impl ColumnMeta {
    fn from_record(record: &Record) -> StmtResult<Self> {
        Ok(Self {
            name: required_text(record, "column_name")?,
            data_type: required_text(record, "data_type")?,
            default: optional_text(record, "column_default")?,
            nullable: required_text(record, "is_nullable")? == "YES",
            character_maximum_length: optional_int(record, "character_maximum_length")?,
            numeric_precision: optional_int(record, "numeric_precision")?,
            udt_name: required_text(record, "udt_name")?,
        })
    }
}

/// Base tables in `schema` (default `public`), ordered by name.
pub async fn schema_tables(
    conn: &impl GenericClient,
    schema: Option<&str>,
) -> StmtResult<Vec<TableName>> {
    let schema = schema.unwrap_or(DEFAULT_SCHEMA);
    let mut q = stmt(SCHEMA_TABLES_SQL);
    q.append("", [schema]);

    let Some(records) = q.execute_all(conn).await? else {
        return Ok(Vec::new());
    };
    records
        .iter()
        .map(|r| -> StmtResult<TableName> {
            Ok(TableName {
                schema: required_text(r, "table_schema")?,
                name: required_text(r, "table_name")?,
            })
        })
        .collect()
}

/// Whether `table` is a base table in `schema` (default `public`).
pub async fn table_exists(
    conn: &impl GenericClient,
    table: &str,
    schema: Option<&str>,
) -> StmtResult<bool> {
    let mut q = stmt(TABLE_EXISTS_SQL);
    q.append("", [table, schema.unwrap_or(DEFAULT_SCHEMA)]);
    q.record_exists(conn).await
}

/// Column metadata for `table`, in ordinal order.
///
/// Fails with `InvalidArgument` when no columns are found, which is also
/// what an unknown table looks like.
pub async fn table_metadata(conn: &impl GenericClient, table: &str) -> StmtResult<Vec<ColumnMeta>> {
    let mut q = stmt(TABLE_METADATA_SQL);
    q.append("", [table]);

    let Some(records) = q.execute_all(conn).await? else {
        return Err(StmtError::invalid_argument(format!(
            "no columns found for table '{table}'"
        )));
    };
    let columns = records
        .iter()
        .map(ColumnMeta::from_record)
        .collect::<StmtResult<Vec<_>>>()?;

    tracing::debug!(target: "pgstmt.schema", table, columns = columns.len(), "loaded table metadata");
    Ok(columns)
}

fn optional_text(record: &Record, column: &str) -> StmtResult<Option<String>> {
    match record.try_get(column)? {
        Value::Null => Ok(None),
        Value::Text(s) => Ok(Some(s.clone())),
        other => Err(StmtError::decode(column, format!("expected text, got {other}"))),
    }
}

fn required_text(record: &Record, column: &str) -> StmtResult<String> {
    optional_text(record, column)?
        .ok_or_else(|| StmtError::decode(column, "unexpected NULL"))
}

fn optional_int(record: &Record, column: &str) -> StmtResult<Option<i64>> {
    match record.try_get(column)? {
        Value::Null => Ok(None),
        Value::Int(i) => Ok(Some(*i)),
        other => Err(StmtError::decode(column, format!("expected integer, got {other}"))),
    }
}
