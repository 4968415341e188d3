//! PostgreSQL type knowledge: numeric type bounds and literal encodings.
//!
//! Everything here is pure lookup or conversion with no state.

mod bounds;

pub use bounds::{
    BIGINT_MAX, BIGINT_MIN, BIGSERIAL_MAX, BIGSERIAL_MIN, INTEGER_MAX, INTEGER_MIN,
    NUMERIC_TYPES, SERIAL_MAX, SERIAL_MIN, SMALLINT_MAX, SMALLINT_MIN, SMALLSERIAL_MAX,
    SMALLSERIAL_MIN, TypeBounds, bounds_of, check_range, is_integer_type, is_numeric_type,
    is_valid_integer_for, range_of,
};

use crate::error::{StmtError, StmtResult};

/// Text-protocol literal for `true`.
pub const BOOLEAN_TRUE: &str = "t";
/// Text-protocol literal for `false`.
pub const BOOLEAN_FALSE: &str = "f";

/// Encode a bool as PostgreSQL's single-character literal.
pub fn encode_bool(value: bool) -> &'static str {
    if value { BOOLEAN_TRUE } else { BOOLEAN_FALSE }
}

/// Decode PostgreSQL's single-character boolean literal.
///
/// Only `"t"` and `"f"` are accepted.
pub fn decode_bool(literal: &str) -> StmtResult<bool> {
    match literal {
        BOOLEAN_TRUE => Ok(true),
        BOOLEAN_FALSE => Ok(false),
        other => Err(StmtError::invalid_argument(format!(
            "'{other}' is not a valid postgres boolean"
        ))),
    }
}

/// Map blank text to `None` so nullable columns get NULL instead of `''`.
pub fn blank_to_null(incoming: Option<&str>) -> Option<&str> {
    incoming.filter(|s| !s.trim().is_empty())
}
