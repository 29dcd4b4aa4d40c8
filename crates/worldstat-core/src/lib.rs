//! worldstat core: host-independent metric types, row schemas, and errors.
//!
//! This crate defines the value surface shared by the agent and any
//! management client: declared metric types, statically declared table
//! schemas, and immutable tabular datasets that enforce index-key
//! uniqueness. It carries no host or runtime dependencies.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. All fallible
//! paths surface as `MetricsError`/`Result` so a bad row never takes the
//! host process down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod dataset;
pub mod error;
pub mod schema;
pub mod value;

/// Shared result type.
pub use error::Result;
pub use error::{ErrorKind, MetricsError};
pub use dataset::{TableBuilder, TabularDataset};
pub use schema::{Cell, Column, ColumnType, RowSchema, TableRow};
pub use value::{MetricType, MetricValue};
