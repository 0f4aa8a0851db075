//! Error types for rowport
//!
//! Three failure classes cover the whole crate:
//! - `NotConfigured`: an operation ran before its executor or table was set
//! - `InvalidArgument`: bad identifiers, empty records, unrenderable values
//! - `ExecutionFailed`: the executor reported a failure, surfaced as-is

use thiserror::Error;

/// Result type for rowport operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for rowport
#[derive(Error, Debug)]
pub enum Error {
    /// Operation attempted before a required piece of state was set
    #[error("not configured: {what} has not been set")]
    NotConfigured {
        /// Which piece of state is missing ("executor" or "table")
        what: &'static str,
    },

    /// Malformed input: invalid identifier, empty record, unrenderable value
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the argument
        message: String,
    },

    /// The executor capability reported a failure. The cause is not
    /// interpreted here; it propagates to the caller untouched.
    #[error("execution failed: {message}")]
    ExecutionFailed {
        /// Description of the failure
        message: String,
        /// The statement that failed, when known
        sql: Option<String>,
        /// Underlying driver error, when available
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Create a not-configured error
    pub fn not_configured(what: &'static str) -> Self {
        Self::NotConfigured { what }
    }

    /// Create an invalid-argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an execution error
    pub fn execution_failed(message: impl Into<String>) -> Self {
        Self::ExecutionFailed {
            message: message.into(),
            sql: None,
            source: None,
        }
    }

    /// Create an execution error carrying the offending SQL
    pub fn execution_failed_with_sql(message: impl Into<String>, sql: impl Into<String>) -> Self {
        Self::ExecutionFailed {
            message: message.into(),
            sql: Some(sql.into()),
            source: None,
        }
    }

    /// Create an execution error with an underlying driver error
    pub fn execution_failed_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ExecutionFailed {
            message: message.into(),
            sql: None,
            source: Some(Box::new(source)),
        }
    }

    /// The SQL text attached to an execution failure, if any
    pub fn sql(&self) -> Option<&str> {
        match self {
            Self::ExecutionFailed { sql, .. } => sql.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::not_configured("table");
        assert_eq!(err.to_string(), "not configured: table has not been set");

        let err = Error::invalid_argument("bad column name");
        assert!(err.to_string().contains("bad column name"));

        let err = Error::execution_failed_with_sql("syntax error", "SELECT * FORM users");
        assert!(err.to_string().contains("syntax error"));
        assert_eq!(err.sql(), Some("SELECT * FORM users"));
    }

    #[test]
    fn test_execution_source_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
        let err = Error::execution_failed_with_source("connection lost", io);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_sql_accessor_only_on_execution() {
        assert_eq!(Error::not_configured("executor").sql(), None);
        assert_eq!(Error::invalid_argument("x").sql(), None);
    }
}
