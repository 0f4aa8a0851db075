//! SQL injection prevention for rowport.
//!
//! Generated statements interpolate two kinds of untrusted text: identifiers
//! (table and column names) and value literals. Identifiers are allowlisted,
//! literals are backslash-escaped before being wrapped in double quotes, and
//! nothing else reaches the output string.

use crate::error::{Error, Result};

/// Longest accepted table or column name.
const MAX_IDENTIFIER_LEN: usize = 255;

/// Check that a table or column name is safe to splice into a statement.
///
/// Accepts `[A-Za-z_][A-Za-z0-9_]*` up to 255 characters and nothing else, so
/// quoting, comment markers, whitespace, and schema-qualified names are all
/// rejected before any SQL is assembled.
///
/// # Examples
///
/// ```
/// use rowport::security::validate_sql_identifier;
///
/// assert!(validate_sql_identifier("users").is_ok());
/// assert!(validate_sql_identifier("user_tags_2024").is_ok());
///
/// assert!(validate_sql_identifier("users; DROP TABLE users--").is_err());
/// assert!(validate_sql_identifier("users.id").is_err());
/// assert!(validate_sql_identifier("2fast").is_err());
/// ```
pub fn validate_sql_identifier(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::invalid_argument("SQL identifier is empty"));
    }
    if name.len() > MAX_IDENTIFIER_LEN {
        return Err(Error::invalid_argument(format!(
            "SQL identifier exceeds {MAX_IDENTIFIER_LEN} characters: {}",
            name.len()
        )));
    }
    for (idx, c) in name.char_indices() {
        let accepted = c == '_' || c.is_ascii_alphabetic() || (idx > 0 && c.is_ascii_digit());
        if !accepted {
            return Err(Error::invalid_argument(format!(
                "'{name}' is not a valid SQL identifier: unexpected character '{c}'"
            )));
        }
    }
    Ok(())
}

/// Escape a value for interpolation into a double-quoted SQL string literal.
///
/// Backslashes and both quote characters get a backslash prefix, so an
/// embedded value can never terminate the literal around it.
///
/// # Examples
///
/// ```
/// use rowport::security::escape_string_literal;
///
/// assert_eq!(escape_string_literal("Alice"), "Alice");
/// assert_eq!(escape_string_literal("don't"), "don\\'t");
/// assert_eq!(escape_string_literal(r#"say "hi""#), r#"say \"hi\""#);
/// ```
pub fn escape_string_literal(value: &str) -> String {
    if !value.chars().any(|c| matches!(c, '\\' | '\'' | '"')) {
        return value.to_string();
    }
    let mut escaped = String::with_capacity(value.len() + 2);
    for c in value.chars() {
        if matches!(c, '\\' | '\'' | '"') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
