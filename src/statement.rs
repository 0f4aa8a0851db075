//! SQL statement construction for rowport
//!
//! Pure functions from records to statement text; nothing here holds state
//! between calls. Identifiers are validated and value literals escaped before
//! they reach the output string, so callers can hand the result straight to
//! an executor.
//!
//! Statement shapes:
//! - `WHERE a="1" AND b="2|3"`
//! - `INSERT INTO t (a, b) VALUES("1", "2|3")` plus an optional
//!   `ON DUPLICATE KEY UPDATE` suffix covering every column
//! - `UPDATE t SET a="1", b="2|3" WHERE ...`
//! - `SELECT a, b FROM t WHERE ...`

use crate::error::{Error, Result};
use crate::security::{escape_string_literal, validate_sql_identifier};
use crate::types::{Record, Value};

/// Separator used to flatten list-valued fields unless configured otherwise
pub const DEFAULT_SEPARATOR: &str = "|";

/// Render a field as a quoted, escaped SQL string literal.
///
/// Scalars stringify; lists join their elements with `separator` first.
pub fn render_literal(value: &Value, separator: &str) -> Result<String> {
    let raw = value.render(separator)?;
    Ok(format!("\"{}\"", escape_string_literal(&raw)))
}

/// Build a `WHERE` fragment from an equality predicate.
///
/// An empty predicate yields an empty fragment (no `WHERE` clause). Otherwise
/// the conditions appear in the predicate's insertion order so the generated
/// text is reproducible.
pub fn build_where(predicate: &Record, separator: &str) -> Result<String> {
    if predicate.is_empty() {
        return Ok(String::new());
    }
    let mut conditions = Vec::with_capacity(predicate.len());
    for (column, value) in predicate.iter() {
        validate_sql_identifier(column)?;
        conditions.push(format!("{}={}", column, render_literal(value, separator)?));
    }
    Ok(format!("WHERE {}", conditions.join(" AND ")))
}

/// Build the `col=val, ...` assignment list shared by UPDATE and the
/// upsert suffix.
fn build_assignments(record: &Record, separator: &str) -> Result<String> {
    let mut parts = Vec::with_capacity(record.len());
    for (column, value) in record.iter() {
        validate_sql_identifier(column)?;
        parts.push(format!("{}={}", column, render_literal(value, separator)?));
    }
    Ok(parts.join(", "))
}

/// Build an INSERT statement from a record.
///
/// With `upsert` set, an `ON DUPLICATE KEY UPDATE` suffix covering every
/// column is appended so conflicting keys update in place.
///
/// An empty record has no well-formed INSERT; it is rejected rather than
/// emitting a malformed statement.
pub fn build_insert(table: &str, record: &Record, separator: &str, upsert: bool) -> Result<String> {
    validate_sql_identifier(table)?;
    if record.is_empty() {
        return Err(Error::invalid_argument(
            "cannot build an INSERT from an empty record",
        ));
    }

    let mut columns = Vec::with_capacity(record.len());
    let mut values = Vec::with_capacity(record.len());
    for (column, value) in record.iter() {
        validate_sql_identifier(column)?;
        columns.push(column);
        values.push(render_literal(value, separator)?);
    }

    let mut sql = format!(
        "INSERT INTO {} ({}) VALUES({})",
        table,
        columns.join(", "),
        values.join(", ")
    );
    if upsert {
        sql.push_str(" ON DUPLICATE KEY UPDATE ");
        sql.push_str(&build_assignments(record, separator)?);
    }
    Ok(sql)
}

/// Build an UPDATE statement from a record and a pre-built WHERE fragment.
///
/// `where_fragment` is the output of [`build_where`]; an empty fragment
/// produces an unfiltered UPDATE.
pub fn build_update(
    table: &str,
    record: &Record,
    where_fragment: &str,
    separator: &str,
) -> Result<String> {
    validate_sql_identifier(table)?;
    if record.is_empty() {
        return Err(Error::invalid_argument(
            "cannot build an UPDATE from an empty record",
        ));
    }

    let mut sql = format!(
        "UPDATE {} SET {}",
        table,
        build_assignments(record, separator)?
    );
    if !where_fragment.is_empty() {
        sql.push(' ');
        sql.push_str(where_fragment);
    }
    Ok(sql)
}

/// Build a SELECT statement from a projection and a pre-built WHERE fragment.
///
/// An empty projection normalizes to `*`. Each entry must be a valid
/// identifier or the literal `*`.
pub fn build_select(table: &str, columns: &[&str], where_fragment: &str) -> Result<String> {
    validate_sql_identifier(table)?;

    let projection = if columns.is_empty() {
        "*".to_string()
    } else {
        for column in columns {
            if *column != "*" {
                validate_sql_identifier(column)?;
            }
        }
        columns.join(", ")
    };

    let mut sql = format!("SELECT {} FROM {}", projection, table);
    if !where_fragment.is_empty() {
        sql.push(' ');
        sql.push_str(where_fragment);
    }
    Ok(sql)
}
