//! `entities`: loaded entities per (level, entity type).

use worldstat_core::error::Result;
use worldstat_core::schema::{Cell, Column, ColumnType, RowSchema, TableRow};
use worldstat_core::{TableBuilder, TabularDataset};

use super::{narrow, resolved_levels};
use crate::host::HostSources;

pub static LOADED_ENTITIES: RowSchema = RowSchema {
    name: "LoadedEntities",
    description: "Number of loaded entities",
    columns: &[
        Column::new("level", "level ID", ColumnType::String),
        Column::new("entity", "entity ID", ColumnType::String),
        Column::new("value", "value", ColumnType::Int32),
    ],
    index: &["level", "entity"],
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedEntitiesRow {
    pub level: String,
    pub entity: String,
    pub value: i32,
}

impl TableRow for LoadedEntitiesRow {
    const SCHEMA: &'static RowSchema = &LOADED_ENTITIES;

    fn into_cells(self) -> Vec<Cell> {
        vec![self.level.into(), self.entity.into(), self.value.into()]
    }
}

/// One row per resolved level and entity type in the catalog.
pub fn build(sources: &HostSources) -> Result<TabularDataset> {
    let catalog = sources.entity_types.ids();
    let mut table = TableBuilder::<LoadedEntitiesRow>::new();

    for (level_id, level) in resolved_levels(sources.server.as_ref()) {
        for entity in &catalog {
            let count = level.count_entities(entity);
            table.push(LoadedEntitiesRow {
                level: level_id.clone(),
                entity: entity.clone(),
                value: narrow(count, entity)?,
            })?;
        }
    }

    Ok(table.finish())
}
