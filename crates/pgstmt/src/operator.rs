//! Comparison operators accepted in caller-supplied WHERE clauses.

/// Allowed operators, in display order.
pub const OPERATORS: &[&str] = &["=", "!=", "<", ">", "<=", ">=", "IS", "IS NOT", "LIKE", "ILIKE"];

/// Case-insensitive membership check against [`OPERATORS`].
pub fn is_valid_where_operator(op: &str) -> bool {
    let op = op.to_ascii_uppercase();
    OPERATORS.contains(&op.as_str())
}

/// Comma-separated operator list for error messages.
pub fn where_operators_text() -> String {
    OPERATORS.join(", ")
}
