//! `blockEntities`: ticking block entities per (level, block-entity type).
//!
//! Counts use a 64-bit column; large installations can exceed `i32`.

use worldstat_core::error::Result;
use worldstat_core::schema::{Cell, Column, ColumnType, RowSchema, TableRow};
use worldstat_core::{TableBuilder, TabularDataset};

use super::{narrow, resolved_levels};
use crate::host::HostSources;

pub static TICKING_BLOCK_ENTITIES: RowSchema = RowSchema {
    name: "TickingBlockEntities",
    description: "Number of ticking block entities",
    columns: &[
        Column::new("level", "level ID", ColumnType::String),
        Column::new("entity", "entity ID", ColumnType::String),
        Column::new("value", "value", ColumnType::Int64),
    ],
    index: &["level", "entity"],
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickingBlockEntitiesRow {
    pub level: String,
    pub entity: String,
    pub value: i64,
}

impl TableRow for TickingBlockEntitiesRow {
    const SCHEMA: &'static RowSchema = &TICKING_BLOCK_ENTITIES;

    fn into_cells(self) -> Vec<Cell> {
        vec![self.level.into(), self.entity.into(), self.value.into()]
    }
}

/// One row per resolved level and block-entity type in the catalog.
pub fn build(sources: &HostSources) -> Result<TabularDataset> {
    let catalog = sources.block_entity_types.ids();
    let mut table = TableBuilder::<TickingBlockEntitiesRow>::new();

    for (level_id, level) in resolved_levels(sources.server.as_ref()) {
        let ticking = level.ticking_block_entity_counts();

        for entity in &catalog {
            let count = ticking.get(entity).copied().unwrap_or(0);
            table.push(TickingBlockEntitiesRow {
                level: level_id.clone(),
                entity: entity.clone(),
                value: narrow(count, entity)?,
            })?;
        }
    }

    Ok(table.finish())
}
