//! Immutable tabular datasets and the builder that enforces index uniqueness.

use std::collections::HashMap;
use std::marker::PhantomData;

use serde::Serialize;

use crate::error::{MetricsError, Result};
use crate::schema::{Cell, RowSchema, TableRow};

/// Fixed-schema row set, unique under `schema.index`.
///
/// Only [`TableBuilder`] can add rows; once `finish`ed the dataset is
/// read-only.
#[derive(Debug, Clone, Serialize)]
pub struct TabularDataset {
    schema: &'static RowSchema,
    rows: Vec<Vec<Cell>>,
    #[serde(skip)]
    by_key: HashMap<Vec<Cell>, usize>,
}

impl TabularDataset {
    fn empty(schema: &'static RowSchema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
            by_key: HashMap::new(),
        }
    }

    pub fn schema(&self) -> &'static RowSchema {
        self.schema
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in insertion order.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Look up a row by its index-key projection (in index order).
    pub fn get(&self, key: &[Cell]) -> Option<&[Cell]> {
        self.by_key
            .get(key)
            .and_then(|&i| self.rows.get(i))
            .map(Vec::as_slice)
    }

    /// Read a named column of a row.
    pub fn cell<'a>(&self, row: &'a [Cell], column: &str) -> Option<&'a Cell> {
        self.schema.position(column).and_then(|i| row.get(i))
    }

    fn insert(&mut self, cells: Vec<Cell>) -> Result<()> {
        if cells.len() != self.schema.columns.len() {
            return Err(MetricsError::Schema(format!(
                "{}: row has {} cells, schema has {} columns",
                self.schema.name,
                cells.len(),
                self.schema.columns.len()
            )));
        }
        for (cell, col) in cells.iter().zip(self.schema.columns) {
            if cell.column_type() != col.ty {
                return Err(MetricsError::Schema(format!(
                    "{}: column {} expects {:?}, got {:?}",
                    self.schema.name,
                    col.name,
                    col.ty,
                    cell.column_type()
                )));
            }
        }

        let key: Vec<Cell> = self
            .schema
            .index_positions()
            .into_iter()
            .filter_map(|i| cells.get(i).cloned())
            .collect();
        if self.by_key.contains_key(&key) {
            let key = key.iter().map(Cell::to_string).collect::<Vec<_>>().join(",");
            return Err(MetricsError::DuplicateKey {
                table: self.schema.name,
                key,
            });
        }
        self.by_key.insert(key, self.rows.len());
        self.rows.push(cells);
        Ok(())
    }
}

/// Accumulates typed rows of one kind into a [`TabularDataset`].
pub struct TableBuilder<R: TableRow> {
    table: TabularDataset,
    _row: PhantomData<fn(R)>,
}

impl<R: TableRow> TableBuilder<R> {
    pub fn new() -> Self {
        Self {
            table: TabularDataset::empty(R::SCHEMA),
            _row: PhantomData,
        }
    }

    /// Append a row. Fails if its index key is already present.
    pub fn push(&mut self, row: R) -> Result<()> {
        self.table.insert(row.into_cells())
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn finish(self) -> TabularDataset {
        self.table
    }
}

impl<R: TableRow> Default for TableBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}
