//! Record importer: reads table rows back as text records
//!
//! Builds a SELECT from a column projection and an equality predicate and
//! returns every matching row in executor order. Values come back as text;
//! nothing is coerced to numeric or list form.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::executor::Executor;
use crate::security::validate_sql_identifier;
use crate::statement::{build_select, build_where, DEFAULT_SEPARATOR};
use crate::types::{Record, Row};

/// Reads rows from a table through an injected [`Executor`].
///
/// # Example
///
/// ```rust,ignore
/// let mut importer = Importer::new();
/// importer.set_executor(executor);
/// importer.set_table("users")?;
///
/// let conditions = Record::new().with("country", "IS");
/// let rows = importer.get_fields(&["id", "name"], &conditions).await?;
/// ```
pub struct Importer {
    executor: Option<Arc<dyn Executor>>,
    table: Option<String>,
    separator: String,
}

impl Default for Importer {
    fn default() -> Self {
        Self::new()
    }
}

impl Importer {
    /// Create an importer with no executor or table and the default `|`
    /// list separator
    pub fn new() -> Self {
        Self {
            executor: None,
            table: None,
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }

    /// Set the list separator used for list-valued condition fields
    /// (construction-time option)
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Set the executor handle
    pub fn set_executor(&mut self, executor: Arc<dyn Executor>) {
        self.executor = Some(executor);
    }

    /// Set the table to read from.
    ///
    /// Fails with `InvalidArgument` if the name is not a valid SQL
    /// identifier.
    pub fn set_table(&mut self, table: impl Into<String>) -> Result<()> {
        let table = table.into();
        validate_sql_identifier(&table)?;
        self.table = Some(table);
        Ok(())
    }

    /// The configured table, if set
    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    /// The list separator
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Fetch rows matching an equality predicate.
    ///
    /// An empty `columns` projection normalizes to `*`. Rows come back in
    /// the order the executor returned them.
    pub async fn get_fields(&self, columns: &[&str], conditions: &Record) -> Result<Vec<Row>> {
        let executor = self
            .executor
            .as_ref()
            .ok_or_else(|| Error::not_configured("executor"))?;
        let table = self
            .table
            .as_deref()
            .ok_or_else(|| Error::not_configured("table"))?;

        let where_fragment = build_where(conditions, &self.separator)?;
        let select = build_select(table, columns, &where_fragment)?;
        let result = executor.query(&select).await?;
        tracing::debug!("fetched {} rows from {}", result.row_count(), table);
        Ok(result.into_rows())
    }
}
