//! Host seam: the live server state metrics are read from.
//!
//! The agent never owns world, entity, or chunk state. It reads it through
//! these traits, which the embedding server implements. Every read returns
//! an owned snapshot so producers never iterate a collection the simulation
//! loop may be mutating.

pub mod fixture;
pub mod memory;

use std::collections::HashMap;
use std::sync::Arc;

pub use fixture::HostFixture;
pub use memory::{MemoryCatalog, MemoryLevel, MemoryServer};

/// Server-wide counters and the level directory.
pub trait ServerHost: Send + Sync {
    /// Recent tick durations in nanoseconds, oldest first.
    fn tick_times_nanos(&self) -> Vec<u64>;
    fn player_count(&self) -> i32;
    fn max_players(&self) -> i32;
    /// Keys of every level the server knows about, loaded or not.
    fn level_keys(&self) -> Vec<String>;
    /// Resolve a key to a live level. `None` if unloaded or unknown.
    fn level(&self, key: &str) -> Option<Arc<dyn Level>>;
}

/// One live simulation level.
pub trait Level: Send + Sync {
    /// Live entities of `entity_type` currently in this level.
    fn count_entities(&self, entity_type: &str) -> usize;
    /// Currently ticking block entities, counted per type id.
    /// Types with no ticking instance may be omitted.
    fn ticking_block_entity_counts(&self) -> HashMap<String, usize>;
    fn loaded_chunk_count(&self) -> usize;
}

/// Process-wide registry of known type identifiers.
pub trait TypeCatalog: Send + Sync {
    fn ids(&self) -> Vec<String>;
}

/// Everything the built-in producers read from.
#[derive(Clone)]
pub struct HostSources {
    pub server: Arc<dyn ServerHost>,
    pub entity_types: Arc<dyn TypeCatalog>,
    pub block_entity_types: Arc<dyn TypeCatalog>,
}

impl HostSources {
    pub fn new(
        server: Arc<dyn ServerHost>,
        entity_types: Arc<dyn TypeCatalog>,
        block_entity_types: Arc<dyn TypeCatalog>,
    ) -> Self {
        Self {
            server,
            entity_types,
            block_entity_types,
        }
    }
}
