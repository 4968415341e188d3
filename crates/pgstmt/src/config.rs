//! Per-statement execution settings.

use tracing::Level;

/// Configuration applied by the execute-family methods of a
/// [`Statement`](crate::Statement).
#[derive(Debug, Clone)]
pub struct ExecConfig {
    /// Replace `Value::Bool` parameters with `t`/`f` before dispatch.
    pub coerce_booleans: bool,
    /// Emit a `tracing` event for every dispatch.
    pub log_sql: bool,
    /// Event level for dispatch logging.
    pub log_level: Level,
    /// Truncate logged SQL (in bytes). `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self {
            coerce_booleans: false,
            log_sql: true,
            log_level: Level::DEBUG,
            max_sql_length: Some(200),
        }
    }
}

impl ExecConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the boolean coercion pass.
    pub fn coerce_booleans(mut self, enabled: bool) -> Self {
        self.coerce_booleans = enabled;
        self
    }

    /// Disable dispatch logging.
    pub fn quiet(mut self) -> Self {
        self.log_sql = false;
        self
    }

    /// Override the tracing event level.
    pub fn log_level(mut self, level: Level) -> Self {
        self.log_level = level;
        self
    }

    /// Set maximum SQL length to log.
    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    pub(crate) fn truncate_sql<'a>(&self, sql: &'a str) -> std::borrow::Cow<'a, str> {
        match self.max_sql_length {
            Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)).into(),
            _ => sql.into(),
        }
    }
}

fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}
