//! Shared host setups for agent tests.

#![allow(dead_code)]

use std::sync::Arc;

use worldstat_agent::host::{HostSources, MemoryCatalog, MemoryServer};
use worldstat_core::schema::Cell;
use worldstat_core::TabularDataset;

/// overworld: 3 zombies, 0 pigs; nether: nothing.
pub fn two_levels() -> (Arc<MemoryServer>, HostSources) {
    let server = Arc::new(MemoryServer::new(20));
    let overworld = server.load_level("overworld");
    overworld.spawn("zombie", 3);
    overworld.add_tickers("furnace", 2);
    overworld.add_tickers("hopper", 1);
    overworld.set_loaded_chunks(441);
    let nether = server.load_level("nether");
    nether.set_loaded_chunks(121);

    let sources = HostSources::new(
        server.clone(),
        Arc::new(MemoryCatalog::new(["zombie", "pig"])),
        Arc::new(MemoryCatalog::new(["furnace", "hopper", "chest"])),
    );
    (server, sources)
}

/// Rows rendered as strings, sorted, for order-independent comparison.
pub fn row_set(t: &TabularDataset) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = t
        .rows()
        .map(|r| r.iter().map(Cell::to_string).collect())
        .collect();
    rows.sort();
    rows
}

pub fn strs(rows: &[&[&str]]) -> Vec<Vec<String>> {
    let mut out: Vec<Vec<String>> = rows
        .iter()
        .map(|r| r.iter().map(|s| s.to_string()).collect())
        .collect();
    out.sort();
    out
}
