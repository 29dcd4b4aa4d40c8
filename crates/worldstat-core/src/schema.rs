//! Statically declared row schemas for tabular metrics.
//!
//! Every table kind is a plain struct implementing [`TableRow`]; its
//! [`RowSchema`] is a `static` so column layout and index key are fixed at
//! compile time. [`RowSchema::validate`] is still run once at registration
//! so that a malformed declaration fails startup instead of a query.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::error::{MetricsError, Result};

/// Semantic type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    String,
    Int32,
    Int64,
}

/// One column of a row schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "type")]
    pub ty: ColumnType,
}

impl Column {
    pub const fn new(name: &'static str, description: &'static str, ty: ColumnType) -> Self {
        Self { name, description, ty }
    }
}

/// Ordered column list plus the index key that must be unique per table.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct RowSchema {
    /// Table type name (e.g. `LoadedEntities`).
    pub name: &'static str,
    pub description: &'static str,
    pub columns: &'static [Column],
    pub index: &'static [&'static str],
}

impl RowSchema {
    /// Position of a column by name.
    pub fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == column)
    }

    /// Positions of the index columns, in index order.
    ///
    /// Only meaningful on a validated schema; unknown names are dropped.
    pub fn index_positions(&self) -> Vec<usize> {
        self.index.iter().filter_map(|n| self.position(n)).collect()
    }

    /// Structural check: non-empty, unique column names, index columns exist.
    pub fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(MetricsError::Schema(format!("{}: no columns", self.name)));
        }
        let mut seen = HashSet::new();
        for c in self.columns {
            if !seen.insert(c.name) {
                return Err(MetricsError::Schema(format!(
                    "{}: duplicate column {}",
                    self.name, c.name
                )));
            }
        }
        if self.index.is_empty() {
            return Err(MetricsError::Schema(format!("{}: empty index key", self.name)));
        }
        let mut seen_index = HashSet::new();
        for k in self.index {
            if !seen.contains(k) {
                return Err(MetricsError::Schema(format!(
                    "{}: index column {} is not declared",
                    self.name, k
                )));
            }
            if !seen_index.insert(*k) {
                return Err(MetricsError::Schema(format!(
                    "{}: index column {} listed twice",
                    self.name, k
                )));
            }
        }
        Ok(())
    }
}

/// A single table cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Str(String),
    Int32(i32),
    Int64(i64),
}

impl Cell {
    pub fn column_type(&self) -> ColumnType {
        match self {
            Cell::Str(_) => ColumnType::String,
            Cell::Int32(_) => ColumnType::Int32,
            Cell::Int64(_) => ColumnType::Int64,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Integer value widened to i64 (either integer width).
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Cell::Int32(v) => Some(i64::from(*v)),
            Cell::Int64(v) => Some(*v),
            Cell::Str(_) => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Str(s) => f.write_str(s),
            Cell::Int32(v) => write!(f, "{v}"),
            Cell::Int64(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for Cell {
    fn from(v: &str) -> Self {
        Cell::Str(v.to_string())
    }
}

impl From<String> for Cell {
    fn from(v: String) -> Self {
        Cell::Str(v)
    }
}

impl From<i32> for Cell {
    fn from(v: i32) -> Self {
        Cell::Int32(v)
    }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self {
        Cell::Int64(v)
    }
}

/// A typed row of one table kind.
pub trait TableRow {
    /// Schema shared by every row of this kind.
    const SCHEMA: &'static RowSchema;

    /// Cells in schema column order.
    fn into_cells(self) -> Vec<Cell>;
}
