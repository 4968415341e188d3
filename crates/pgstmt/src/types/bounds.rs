//! Numeric type names and their accepted value ranges.
//!
//! See <https://www.postgresql.org/docs/current/datatype-numeric.html>.

use crate::error::{StmtError, StmtResult};
use rust_decimal::Decimal;
use std::str::FromStr;

pub const SMALLINT_MIN: i64 = -32768;
pub const SMALLINT_MAX: i64 = 32767;

pub const INTEGER_MIN: i64 = -2147483648;
pub const INTEGER_MAX: i64 = 2147483647;

/// Narrower than the real `bigint` range (±9223372036854775807).
///
/// Range checks compare decimal strings, and the true extremes cannot be
/// compared reliably that way, so the bound stops at eighteen nines.
pub const BIGINT_MIN: i64 = -999_999_999_999_999_999;
pub const BIGINT_MAX: i64 = 999_999_999_999_999_999;

pub const SMALLSERIAL_MIN: i64 = 1;
pub const SMALLSERIAL_MAX: i64 = SMALLINT_MAX;

pub const SERIAL_MIN: i64 = SMALLSERIAL_MIN;
pub const SERIAL_MAX: i64 = INTEGER_MAX;

pub const BIGSERIAL_MIN: i64 = SMALLSERIAL_MIN;
pub const BIGSERIAL_MAX: i64 = BIGINT_MAX;

/// Static description of one numeric column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeBounds {
    /// Type name as reported by `information_schema.columns.data_type`.
    pub name: &'static str,
    pub numeric: bool,
    pub integer: bool,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl TypeBounds {
    const fn integer(name: &'static str, min: i64, max: i64) -> Self {
        Self {
            name,
            numeric: true,
            integer: true,
            min: Some(min),
            max: Some(max),
        }
    }

    const fn unbounded(name: &'static str) -> Self {
        Self {
            name,
            numeric: true,
            integer: false,
            min: None,
            max: None,
        }
    }

    /// `(min, max)` when the type has fixed bounds.
    pub fn range(&self) -> Option<(i64, i64)> {
        Some((self.min?, self.max?))
    }
}

/// Every numeric type the registry knows about.
pub static NUMERIC_TYPES: &[TypeBounds] = &[
    TypeBounds::integer("smallint", SMALLINT_MIN, SMALLINT_MAX),
    TypeBounds::integer("integer", INTEGER_MIN, INTEGER_MAX),
    TypeBounds::integer("bigint", BIGINT_MIN, BIGINT_MAX),
    TypeBounds::unbounded("decimal"),
    TypeBounds::unbounded("numeric"),
    TypeBounds::unbounded("real"),
    TypeBounds::unbounded("double precision"),
    TypeBounds::integer("smallserial", SMALLSERIAL_MIN, SMALLSERIAL_MAX),
    TypeBounds::integer("serial", SERIAL_MIN, SERIAL_MAX),
    TypeBounds::integer("bigserial", BIGSERIAL_MIN, BIGSERIAL_MAX),
];

/// Look up the bounds entry for a type name.
pub fn bounds_of(type_name: &str) -> Option<&'static TypeBounds> {
    NUMERIC_TYPES.iter().find(|b| b.name == type_name)
}

pub fn is_numeric_type(type_name: &str) -> bool {
    bounds_of(type_name).is_some()
}

pub fn is_integer_type(type_name: &str) -> bool {
    bounds_of(type_name).is_some_and(|b| b.integer)
}

/// `(min, max)` for integer and serial types; `None` for everything else.
pub fn range_of(type_name: &str) -> Option<(i64, i64)> {
    bounds_of(type_name).and_then(TypeBounds::range)
}

/// Optional sign, digits, at most one decimal point, at least one digit.
fn is_decimal_literal(s: &str) -> bool {
    let unsigned = s.strip_prefix(['-', '+']).unwrap_or(s);
    let (int, frac) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    !(int.is_empty() && frac.is_empty()) && all_digits(int) && all_digits(frac)
}

/// Check a textual value against the bounds of `type_name`.
///
/// Returns `Ok(true)` when the value fits, or when the type has no fixed
/// bounds. Fails with `InvalidArgument` if `value` is not a decimal number.
pub fn check_range(type_name: &str, value: &str) -> StmtResult<bool> {
    let literal = value.trim();
    if !is_decimal_literal(literal) {
        return Err(StmtError::invalid_argument(format!(
            "'{value}' is not a decimal number"
        )));
    }
    let Some((min, max)) = range_of(type_name) else {
        return Ok(true);
    };
    match Decimal::from_str(literal.strip_suffix('.').unwrap_or(literal)) {
        Ok(parsed) => Ok(parsed >= Decimal::from(min) && parsed <= Decimal::from(max)),
        // Too many digits for Decimal, so far beyond any integer bound.
        Err(_) => Ok(false),
    }
}

/// True when `value` is an integer literal (optional sign, digits only) that
/// fits the integer type `type_name`.
pub fn is_valid_integer_for(type_name: &str, value: &str) -> bool {
    if !is_integer_type(type_name) {
        return false;
    }
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix(['-', '+']).unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    check_range(type_name, trimmed).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_integer_membership() {
        for name in ["smallint", "integer", "bigint", "smallserial", "serial", "bigserial"] {
            assert!(is_numeric_type(name), "{name}");
            assert!(is_integer_type(name), "{name}");
        }
        for name in ["decimal", "numeric", "real", "double precision"] {
            assert!(is_numeric_type(name), "{name}");
            assert!(!is_integer_type(name), "{name}");
        }
        assert!(!is_numeric_type("text"));
        assert!(!is_integer_type("boolean"));
    }

    #[test]
    fn serial_ranges_start_at_one_and_inherit_max() {
        assert_eq!(range_of("smallserial"), Some((1, SMALLINT_MAX)));
        assert_eq!(range_of("serial"), Some((1, INTEGER_MAX)));
        assert_eq!(range_of("bigserial"), Some((1, BIGINT_MAX)));
    }

    #[test]
    fn bigint_range_is_narrowed() {
        assert_eq!(
            range_of("bigint"),
            Some((-999_999_999_999_999_999, 999_999_999_999_999_999))
        );
    }

    #[test]
    fn unbounded_types_have_no_range() {
        assert_eq!(range_of("numeric"), None);
        assert_eq!(range_of("double precision"), None);
        assert_eq!(range_of("varchar"), None);
    }

    #[test]
    fn check_range_compares_decimal_strings() {
        assert!(check_range("smallint", "32767").unwrap());
        assert!(!check_range("smallint", "32768").unwrap());
        assert!(!check_range("serial", "0").unwrap());
        assert!(check_range("bigint", "-999999999999999999").unwrap());
        assert!(!check_range("bigint", "9223372036854775807").unwrap());
        assert!(check_range("numeric", "123456789012345678901234.5").unwrap());
        assert!(check_range("integer", "abc").unwrap_err().is_invalid_argument());
        assert!(check_range("numeric", "1e5").unwrap_err().is_invalid_argument());
        assert!(check_range("integer", "-").unwrap_err().is_invalid_argument());
    }

    #[test]
    fn check_range_beyond_decimal_precision() {
        let long = "9".repeat(40);
        assert!(check_range("numeric", &long).unwrap());
        assert!(check_range("decimal", &format!("-{long}.{long}")).unwrap());
        assert!(!check_range("bigint", &long).unwrap());
        assert!(!check_range("smallint", &format!("-{long}")).unwrap());
        assert!(check_range("integer", "12.").unwrap());
    }

    #[test]
    fn integer_validation_rejects_fractions() {
        assert!(is_valid_integer_for("integer", "42"));
        assert!(!is_valid_integer_for("integer", "4.2"));
        assert!(!is_valid_integer_for("integer", "4.0"));
        assert!(is_valid_integer_for("smallint", "-32768"));
        assert!(!is_valid_integer_for("smallint", "32768"));
        assert!(!is_valid_integer_for("integer", "-"));
        assert!(!is_valid_integer_for("integer", "x"));
        assert!(!is_valid_integer_for("numeric", "42"));
        assert!(!is_valid_integer_for("smallserial", "-1"));
    }
}
