//! YAML host fixtures (strict parsing) for the dump tool and tests.

use std::collections::BTreeMap;
use std::fs;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use worldstat_core::error::{MetricsError, Result};

use super::{HostSources, MemoryCatalog, MemoryServer};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HostFixture {
    #[serde(default)]
    pub players: i32,
    #[serde(default = "default_max_players")]
    pub max_players: i32,
    #[serde(default)]
    pub tick_times_nanos: Vec<u64>,
    #[serde(default)]
    pub entity_types: Vec<String>,
    #[serde(default)]
    pub block_entity_types: Vec<String>,
    #[serde(default)]
    pub levels: Vec<LevelFixture>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LevelFixture {
    pub id: String,
    #[serde(default = "default_loaded")]
    pub loaded: bool,
    #[serde(default)]
    pub chunks: usize,
    #[serde(default)]
    pub entities: BTreeMap<String, usize>,
    #[serde(default)]
    pub tickers: BTreeMap<String, usize>,
}

fn default_max_players() -> i32 {
    20
}
fn default_loaded() -> bool {
    true
}

impl HostFixture {
    pub fn load_from_file(path: &str) -> Result<Self> {
        let s = fs::read_to_string(path)
            .map_err(|e| MetricsError::Config(format!("read host fixture failed: {e}")))?;
        Self::load_from_str(&s)
    }

    pub fn load_from_str(s: &str) -> Result<Self> {
        serde_yaml::from_str(s)
            .map_err(|e| MetricsError::Config(format!("invalid host fixture yaml: {e}")))
    }

    /// Materialize the fixture as an in-memory server plus catalogs.
    pub fn build(&self) -> (Arc<MemoryServer>, HostSources) {
        let server = Arc::new(MemoryServer::new(self.max_players));
        server.set_players(self.players);
        for &t in &self.tick_times_nanos {
            server.record_tick(Duration::from_nanos(t));
        }
        for lf in &self.levels {
            if !lf.loaded {
                server.declare_level(&lf.id);
                continue;
            }
            let level = server.load_level(&lf.id);
            level.set_loaded_chunks(lf.chunks);
            for (ty, &n) in &lf.entities {
                level.spawn(ty, n);
            }
            for (ty, &n) in &lf.tickers {
                level.add_tickers(ty, n);
            }
        }

        let sources = HostSources::new(
            server.clone(),
            Arc::new(MemoryCatalog::new(self.entity_types.iter().cloned())),
            Arc::new(MemoryCatalog::new(self.block_entity_types.iter().cloned())),
        );
        (server, sources)
    }
}
