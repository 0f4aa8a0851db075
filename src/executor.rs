//! The query-executor capability consumed by the exporter and importer
//!
//! Connection establishment, authentication, pooling, and retry policy all
//! live behind this trait; the core only hands over finished SQL text and
//! reads back ordered rows. An adapter over any driver (or an in-memory
//! fake in tests) implements it.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::ResultSet;

/// Runs SQL text against a database on behalf of the core.
///
/// The trait bound is the whole contract: anything satisfying it is a valid
/// executor, so wiring one in cannot fail at runtime. Implementations shared
/// across instances or tasks are responsible for their own concurrency
/// safety.
///
/// # Example
///
/// ```rust,ignore
/// struct MyAdapter { /* driver handle */ }
///
/// #[async_trait]
/// impl Executor for MyAdapter {
///     async fn execute(&self, sql: &str) -> Result<()> {
///         self.driver.run(sql).await
///             .map_err(|e| Error::execution_failed_with_source("statement failed", e))
///     }
///
///     async fn query(&self, sql: &str) -> Result<ResultSet> {
///         let rows = self.driver.fetch_all(sql).await
///             .map_err(|e| Error::execution_failed_with_source("query failed", e))?;
///         Ok(rows.into_iter().map(to_row).collect())
///     }
/// }
/// ```
#[async_trait]
pub trait Executor: Send + Sync {
    /// Run a statement with no result set (INSERT, UPDATE, DDL)
    async fn execute(&self, sql: &str) -> Result<()>;

    /// Run a SELECT and collect the full result set in row order
    async fn query(&self, sql: &str) -> Result<ResultSet>;
}
