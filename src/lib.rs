//! # rowport
//!
//! Bidirectional mapping between structured records and rows in a relational
//! table, via dynamically constructed SQL text.
//!
//! The crate decides, for each incoming record, whether to INSERT, UPDATE, or
//! skip, and generates injection-safe SELECT/INSERT/UPDATE statements from an
//! unordered key-value record plus an optional set of identity columns. It
//! runs everything through an injected [`Executor`] capability: transport,
//! authentication, pooling, and connection lifecycle are the adapter's
//! concern, never this crate's.
//!
//! ## Components
//!
//! - **Exporter**: given a record and a table, looks up a matching row via
//!   identity filters and applies INSERT or UPDATE; supports an upsert write
//!   mode.
//! - **Importer**: given a table, a column projection, and an equality
//!   predicate, builds and runs a SELECT and returns matching rows as ordered
//!   text records.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rowport::prelude::*;
//!
//! let executor: Arc<dyn Executor> = Arc::new(MyAdapter::connect(url).await?);
//!
//! let mut exporter = Exporter::new().with_write_mode(WriteMode::Upsert);
//! exporter.set_executor(executor.clone());
//! exporter.set_table("users")?;
//! exporter.set_filters(["id"])?;
//! exporter
//!     .export_item(&Record::new().with("id", 1).with("name", "Alice"))
//!     .await?;
//!
//! let mut importer = Importer::new();
//! importer.set_executor(executor);
//! importer.set_table("users")?;
//! let rows = importer
//!     .get_fields(&["*"], &Record::new().with("id", 1))
//!     .await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod error;
pub mod executor;
pub mod exporter;
pub mod importer;
pub mod security;
pub mod statement;
pub mod types;

/// Prelude module for convenient imports
pub mod prelude {
    // Error types
    pub use crate::error::{Error, Result};

    // Value and record types
    pub use crate::types::{Record, ResultSet, Row, Scalar, Value};

    // Executor capability
    pub use crate::executor::Executor;

    // Statement builders
    pub use crate::statement::{
        build_insert, build_select, build_update, build_where, render_literal, DEFAULT_SEPARATOR,
    };

    // Exporter and importer
    pub use crate::exporter::{Exporter, WriteMode};
    pub use crate::importer::Importer;
}

// Re-export commonly used items at crate root
pub use error::{Error, Result};
pub use executor::Executor;
pub use exporter::{Exporter, WriteMode};
pub use importer::Importer;
pub use types::{Record, ResultSet, Row, Scalar, Value};
