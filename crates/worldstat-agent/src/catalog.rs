//! The fixed metric catalog and its one-time startup registration.

use std::sync::Arc;

use worldstat_core::error::Result;
use worldstat_core::schema::RowSchema;
use worldstat_core::value::{MetricType, MetricValue};

use crate::config::RegistrySection;
use crate::host::HostSources;
use crate::producers::{block_entities, chunks, entities, scalar};
use crate::registry::{MetricRegistry, Producer};

pub const MIN_TICK_TIME: &str = "minTickTime";
pub const MAX_TICK_TIME: &str = "maxTickTime";
pub const AVERAGE_TICK_TIME: &str = "averageTickTime";
pub const TICK_TIMES: &str = "tickTimes";
pub const PLAYERS: &str = "players";
pub const MAX_PLAYERS: &str = "maxPlayers";
pub const ENTITIES: &str = "entities";
pub const BLOCK_ENTITIES: &str = "blockEntities";
pub const CHUNKS: &str = "chunks";

pub const BUILTIN_METRICS: &[&str] = &[
    MIN_TICK_TIME,
    MAX_TICK_TIME,
    AVERAGE_TICK_TIME,
    TICK_TIMES,
    PLAYERS,
    MAX_PLAYERS,
    ENTITIES,
    BLOCK_ENTITIES,
    CHUNKS,
];

/// Schemas of every built-in table.
pub fn table_schemas() -> [&'static RowSchema; 3] {
    [
        &entities::LOADED_ENTITIES,
        &block_entities::TICKING_BLOCK_ENTITIES,
        &chunks::LOADED_CHUNKS,
    ]
}

/// Register the built-in catalog, skipping names listed in `cfg.disabled`.
///
/// Table schemas are validated first; a malformed schema aborts
/// registration. Returns the number of metrics installed.
pub fn install_builtin(
    registry: &MetricRegistry,
    sources: &HostSources,
    cfg: &RegistrySection,
) -> Result<usize> {
    for schema in table_schemas() {
        if let Err(e) = schema.validate() {
            tracing::error!(table = schema.name, error = %e, "table schema rejected");
            return Err(e);
        }
    }

    let entries: Vec<(&str, &str, MetricType, Producer)> = vec![
        (
            MIN_TICK_TIME,
            "Minimum tick time in the observation window (ms)",
            MetricType::Float,
            scalar_producer(sources, |s| scalar::min_tick_time(s.server.as_ref()).into()),
        ),
        (
            MAX_TICK_TIME,
            "Maximum tick time in the observation window (ms)",
            MetricType::Float,
            scalar_producer(sources, |s| scalar::max_tick_time(s.server.as_ref()).into()),
        ),
        (
            AVERAGE_TICK_TIME,
            "Average tick time in the observation window (ms)",
            MetricType::Float,
            scalar_producer(sources, |s| scalar::average_tick_time(s.server.as_ref()).into()),
        ),
        (
            TICK_TIMES,
            "Tick times in the observation window (ns)",
            MetricType::LongArray,
            scalar_producer(sources, |s| {
                MetricValue::LongArray(scalar::tick_times(s.server.as_ref()))
            }),
        ),
        (
            PLAYERS,
            "Number of connected players",
            MetricType::Int,
            scalar_producer(sources, |s| scalar::players(s.server.as_ref()).into()),
        ),
        (
            MAX_PLAYERS,
            "The maximum number of players that can play on the server at the same time",
            MetricType::Int,
            scalar_producer(sources, |s| scalar::max_players(s.server.as_ref()).into()),
        ),
        (
            ENTITIES,
            "Number of loaded entities",
            MetricType::Table(&entities::LOADED_ENTITIES),
            table_producer(sources, entities::build),
        ),
        (
            BLOCK_ENTITIES,
            "Number of ticking block entities",
            MetricType::Table(&block_entities::TICKING_BLOCK_ENTITIES),
            table_producer(sources, block_entities::build),
        ),
        (
            CHUNKS,
            "Number of loaded chunks",
            MetricType::Table(&chunks::LOADED_CHUNKS),
            table_producer(sources, chunks::build),
        ),
    ];

    let mut installed = 0;
    for (name, description, ty, producer) in entries {
        if !cfg.is_enabled(name) {
            tracing::debug!(metric = %name, "metric disabled by config");
            continue;
        }
        registry.register(name, description, ty, producer);
        installed += 1;
    }
    Ok(installed)
}

fn scalar_producer<F>(sources: &HostSources, read: F) -> Producer
where
    F: Fn(&HostSources) -> MetricValue + Send + Sync + 'static,
{
    let sources = sources.clone();
    Arc::new(move || Ok(read(&sources)))
}

fn table_producer<F>(sources: &HostSources, build: F) -> Producer
where
    F: Fn(&HostSources) -> Result<worldstat_core::TabularDataset> + Send + Sync + 'static,
{
    let sources = sources.clone();
    Arc::new(move || build(&sources).map(MetricValue::Table))
}
