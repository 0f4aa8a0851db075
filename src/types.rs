//! Value and record types for rowport
//!
//! A record field is either a single scalar or an ordered list of scalars,
//! decided when the record is built rather than inferred at serialization
//! time. Result rows coming back from the executor carry text only.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// A single database-renderable datum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    /// Boolean value
    Bool(bool),
    /// Signed integer (TINYINT through BIGINT)
    Int(i64),
    /// Unsigned integer
    UInt(u64),
    /// Floating point (REAL, DOUBLE PRECISION)
    Float(f64),
    /// Arbitrary precision decimal (NUMERIC, DECIMAL)
    Decimal(Decimal),
    /// Text string (VARCHAR, TEXT, CHAR)
    Text(String),
    /// Date without time (DATE)
    Date(NaiveDate),
    /// Time without date (TIME)
    Time(NaiveTime),
    /// Timestamp without timezone (TIMESTAMP)
    DateTime(NaiveDateTime),
    /// Timestamp with timezone (TIMESTAMPTZ)
    DateTimeTz(DateTime<Utc>),
    /// UUID
    Uuid(Uuid),
    /// JSON value, rendered in compact form
    Json(serde_json::Value),
}

impl Scalar {
    /// Render the scalar as unquoted literal text.
    ///
    /// Fails for values with no SQL literal form (non-finite floats).
    pub fn render(&self) -> Result<String> {
        match self {
            Self::Bool(v) => Ok(v.to_string()),
            Self::Int(v) => Ok(v.to_string()),
            Self::UInt(v) => Ok(v.to_string()),
            Self::Float(v) => {
                if v.is_finite() {
                    Ok(v.to_string())
                } else {
                    Err(Error::invalid_argument(format!(
                        "non-finite float {v} cannot be rendered as a SQL literal"
                    )))
                }
            }
            Self::Decimal(v) => Ok(v.to_string()),
            Self::Text(v) => Ok(v.clone()),
            Self::Date(v) => Ok(v.to_string()),
            Self::Time(v) => Ok(v.to_string()),
            Self::DateTime(v) => Ok(v.to_string()),
            Self::DateTimeTz(v) => Ok(v.to_rfc3339()),
            Self::Uuid(v) => Ok(v.to_string()),
            Self::Json(v) => serde_json::to_string(v)
                .map_err(|e| Error::invalid_argument(format!("unrenderable JSON value: {e}"))),
        }
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i8> for Scalar {
    fn from(v: i8) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i16> for Scalar {
    fn from(v: i16) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for Scalar {
    fn from(v: u32) -> Self {
        Self::UInt(u64::from(v))
    }
}

impl From<u64> for Scalar {
    fn from(v: u64) -> Self {
        Self::UInt(v)
    }
}

impl From<f32> for Scalar {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<Decimal> for Scalar {
    fn from(v: Decimal) -> Self {
        Self::Decimal(v)
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<NaiveDate> for Scalar {
    fn from(v: NaiveDate) -> Self {
        Self::Date(v)
    }
}

impl From<NaiveTime> for Scalar {
    fn from(v: NaiveTime) -> Self {
        Self::Time(v)
    }
}

impl From<NaiveDateTime> for Scalar {
    fn from(v: NaiveDateTime) -> Self {
        Self::DateTime(v)
    }
}

impl From<DateTime<Utc>> for Scalar {
    fn from(v: DateTime<Utc>) -> Self {
        Self::DateTimeTz(v)
    }
}

impl From<Uuid> for Scalar {
    fn from(v: Uuid) -> Self {
        Self::Uuid(v)
    }
}

impl From<serde_json::Value> for Scalar {
    fn from(v: serde_json::Value) -> Self {
        Self::Json(v)
    }
}

/// A record field: one scalar, or an ordered list of scalars
///
/// Lists render as their elements joined by the configured separator, so a
/// field `[42, 1337]` with separator `|` is stored as the text `42|1337`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Single scalar field
    Scalar(Scalar),
    /// Ordered list of scalars, flattened on render
    List(Vec<Scalar>),
}

impl Value {
    /// Whether this field is list-valued
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Render the field as unquoted literal text, joining list elements
    /// with `separator`.
    pub fn render(&self, separator: &str) -> Result<String> {
        match self {
            Self::Scalar(s) => s.render(),
            Self::List(items) => {
                let mut parts = Vec::with_capacity(items.len());
                for item in items {
                    parts.push(item.render()?);
                }
                Ok(parts.join(separator))
            }
        }
    }
}

impl From<Scalar> for Value {
    fn from(v: Scalar) -> Self {
        Self::Scalar(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Scalar(v.into())
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Self::Scalar(v.into())
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Self::Scalar(v.into())
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Scalar(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Scalar(v.into())
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Scalar(v.into())
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::Scalar(v.into())
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Scalar(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Scalar(v.into())
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Self::Scalar(v.into())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Scalar(v.into())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Scalar(v.into())
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Self::Scalar(v.into())
    }
}

impl From<NaiveTime> for Value {
    fn from(v: NaiveTime) -> Self {
        Self::Scalar(v.into())
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Self::Scalar(v.into())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Scalar(v.into())
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Self::Scalar(v.into())
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Self::Scalar(v.into())
    }
}

impl<T: Into<Scalar>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

/// An ordered mapping of column name to field value
///
/// Entries keep insertion order so the SQL text generated from a record is
/// deterministic. Setting an existing column replaces the value in place
/// without changing its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    entries: Vec<(String, Value)>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of columns
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the record has no columns
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Set a column, replacing an existing value in place
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        let column = column.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(c, _)| *c == column) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((column, value)),
        }
    }

    /// Builder-style variant of [`Record::set`]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(column, value);
        self
    }

    /// Get a field by column name
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v)
    }

    /// Check whether a column is present
    pub fn contains(&self, column: &str) -> bool {
        self.entries.iter().any(|(c, _)| c == column)
    }

    /// Column names in insertion order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(c, _)| c.as_str())
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(c, v)| (c.as_str(), v))
    }
}

impl<C: Into<String>, V: Into<Value>> FromIterator<(C, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (C, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (column, value) in iter {
            record.set(column, value);
        }
        record
    }
}

/// One result row: ordered column names with their text values
///
/// Values come back as text only; nothing is coerced back to numeric or
/// list form.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Vec<String>,
    values: Vec<String>,
}

impl Row {
    /// Create a row from parallel column/value vectors
    pub fn new(columns: Vec<String>, values: Vec<String>) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Self { columns, values }
    }

    /// Column count
    #[inline]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if the row has no columns
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column names in result order
    #[inline]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Values in result order
    #[inline]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Get a value by column index
    #[inline]
    pub fn get(&self, idx: usize) -> Option<&str> {
        self.values.get(idx).map(String::as_str)
    }

    /// Get a value by column name (ASCII case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Option<&str> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
            .and_then(|idx| self.get(idx))
    }

    /// Iterate (column, value) pairs in result order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }
}

impl<C: Into<String>, V: Into<String>> FromIterator<(C, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (C, V)>>(iter: I) -> Self {
        let (columns, values) = iter
            .into_iter()
            .map(|(c, v)| (c.into(), v.into()))
            .unzip();
        Self { columns, values }
    }
}

/// Ordered rows returned by an executor query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    rows: Vec<Row>,
}

impl ResultSet {
    /// Create a result set from rows in executor order
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Number of rows
    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the result set has no rows
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The rows in executor order
    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// First row, if any
    pub fn first(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// Consume into the row vector, preserving order
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

impl FromIterator<Row> for ResultSet {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ResultSet {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}
