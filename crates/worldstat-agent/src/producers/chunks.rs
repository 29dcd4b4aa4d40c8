//! `chunks`: loaded chunks per level.

use worldstat_core::error::Result;
use worldstat_core::schema::{Cell, Column, ColumnType, RowSchema, TableRow};
use worldstat_core::{TableBuilder, TabularDataset};

use super::{narrow, resolved_levels};
use crate::host::HostSources;

pub static LOADED_CHUNKS: RowSchema = RowSchema {
    name: "LoadedChunks",
    description: "Number of loaded chunks",
    columns: &[
        Column::new("level", "level ID", ColumnType::String),
        Column::new("value", "value", ColumnType::Int32),
    ],
    index: &["level"],
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedChunksRow {
    pub level: String,
    pub value: i32,
}

impl TableRow for LoadedChunksRow {
    const SCHEMA: &'static RowSchema = &LOADED_CHUNKS;

    fn into_cells(self) -> Vec<Cell> {
        vec![self.level.into(), self.value.into()]
    }
}

pub fn build(sources: &HostSources) -> Result<TabularDataset> {
    let mut table = TableBuilder::<LoadedChunksRow>::new();
    for (level_id, level) in resolved_levels(sources.server.as_ref()) {
        let value = narrow(level.loaded_chunk_count(), "chunk")?;
        table.push(LoadedChunksRow { level: level_id, value })?;
    }
    Ok(table.finish())
}
