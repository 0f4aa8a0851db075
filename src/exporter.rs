//! Record exporter: reconciles records into table rows
//!
//! For each incoming record the exporter decides between INSERT, UPDATE, and
//! no-op. Identity filter columns select the existing row to compare against;
//! without filters every record is inserted unconditionally.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::executor::Executor;
use crate::security::validate_sql_identifier;
use crate::statement::{build_insert, build_select, build_update, build_where, DEFAULT_SEPARATOR};
use crate::types::{Record, Row};

/// Write mode for exported records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Plain INSERT (fails on duplicate keys)
    #[default]
    Insert,
    /// INSERT with an `ON DUPLICATE KEY UPDATE` suffix covering every column
    Upsert,
}

/// Writes records into a table through an injected [`Executor`].
///
/// The exporter holds no connection of its own; the table name and executor
/// may be swapped between calls, while the list separator and write mode are
/// fixed for the instance lifetime.
///
/// # Example
///
/// ```rust,ignore
/// let mut exporter = Exporter::new().with_write_mode(WriteMode::Upsert);
/// exporter.set_executor(executor);
/// exporter.set_table("users")?;
/// exporter.set_filters(["id"])?;
///
/// let record = Record::new().with("id", 1).with("name", "Alice");
/// exporter.export_item(&record).await?;
/// ```
pub struct Exporter {
    executor: Option<Arc<dyn Executor>>,
    table: Option<String>,
    filters: Vec<String>,
    separator: String,
    write_mode: WriteMode,
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter {
    /// Create an exporter with no executor or table, the default `|` list
    /// separator, and plain-insert write mode
    pub fn new() -> Self {
        Self {
            executor: None,
            table: None,
            filters: Vec::new(),
            separator: DEFAULT_SEPARATOR.to_string(),
            write_mode: WriteMode::default(),
        }
    }

    /// Set the list separator (construction-time option)
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Set the write mode (construction-time option)
    pub fn with_write_mode(mut self, mode: WriteMode) -> Self {
        self.write_mode = mode;
        self
    }

    /// Set the executor handle
    pub fn set_executor(&mut self, executor: Arc<dyn Executor>) {
        self.executor = Some(executor);
    }

    /// Set the target table.
    ///
    /// Fails with `InvalidArgument` if the name is not a valid SQL
    /// identifier.
    pub fn set_table(&mut self, table: impl Into<String>) -> Result<()> {
        let table = table.into();
        validate_sql_identifier(&table)?;
        self.table = Some(table);
        Ok(())
    }

    /// Set the identity filter columns used to find an existing row.
    ///
    /// With no filters configured every exported record is inserted
    /// unconditionally; filters are the opt-in switch for update checking.
    pub fn set_filters<I, S>(&mut self, columns: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        for column in &columns {
            validate_sql_identifier(column)?;
        }
        self.filters = columns;
        Ok(())
    }

    /// The configured table, if set
    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    /// The configured identity filter columns
    pub fn filters(&self) -> &[String] {
        &self.filters
    }

    /// The list separator
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// The write mode
    pub fn write_mode(&self) -> WriteMode {
        self.write_mode
    }

    /// Export one record into the configured table.
    ///
    /// When identity filters match columns of the record, an existing row is
    /// looked up first and compared field by field: identical rows are left
    /// alone, differing rows get one UPDATE restricted to the identity
    /// predicate. Otherwise (or when no row matches) one INSERT is issued,
    /// with an upsert suffix in [`WriteMode::Upsert`].
    ///
    /// An empty record is a documented no-op: no query is issued.
    pub async fn export_item(&self, record: &Record) -> Result<()> {
        let executor = self
            .executor
            .as_ref()
            .ok_or_else(|| Error::not_configured("executor"))?;
        let table = self
            .table
            .as_deref()
            .ok_or_else(|| Error::not_configured("table"))?;

        if record.is_empty() {
            tracing::debug!("skipping export of empty record to {}", table);
            return Ok(());
        }

        let predicate = self.identity_predicate(record);
        if predicate.is_empty() {
            // No identity to look up; insert unconditionally without a SELECT.
            let insert = build_insert(
                table,
                record,
                &self.separator,
                self.write_mode == WriteMode::Upsert,
            )?;
            tracing::debug!("inserting record into {} without identity lookup", table);
            return executor.execute(&insert).await;
        }

        let where_fragment = build_where(&predicate, &self.separator)?;
        let select = build_select(table, &[], &where_fragment)?;
        let existing = executor.query(&select).await?;

        match existing.first() {
            Some(row) => {
                if self.differs_from(record, row)? {
                    let update = build_update(table, record, &where_fragment, &self.separator)?;
                    tracing::debug!("updating existing row in {}", table);
                    executor.execute(&update).await
                } else {
                    tracing::debug!("row in {} already up to date", table);
                    Ok(())
                }
            }
            None => {
                let insert = build_insert(
                    table,
                    record,
                    &self.separator,
                    self.write_mode == WriteMode::Upsert,
                )?;
                tracing::debug!("inserting new row into {}", table);
                executor.execute(&insert).await
            }
        }
    }

    /// The equality predicate identifying the record's row: filter columns
    /// present in the record, in filter declaration order.
    fn identity_predicate(&self, record: &Record) -> Record {
        self.filters
            .iter()
            .filter_map(|column| {
                record
                    .get(column)
                    .map(|value| (column.clone(), value.clone()))
            })
            .collect()
    }

    /// Compare a record against a stored row on their shared fields, using
    /// the same rendering rule the INSERT path uses.
    fn differs_from(&self, record: &Record, row: &Row) -> Result<bool> {
        for (column, value) in record.iter() {
            if let Some(stored) = row.get_by_name(column) {
                if value.render(&self.separator)? != stored {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }
}
