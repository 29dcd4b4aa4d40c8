//! Entities, block-entities, and chunks table builds.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use worldstat_agent::host::{HostSources, Level, MemoryCatalog, ServerHost};
use worldstat_agent::producers::{block_entities, chunks, entities};
use worldstat_core::schema::{Cell, ColumnType};
use worldstat_core::MetricsError;

use common::{row_set, strs, two_levels};

#[test]
fn entities_one_row_per_level_and_type() {
    let (_server, sources) = two_levels();
    let t = entities::build(&sources).unwrap();

    assert_eq!(t.schema(), &entities::LOADED_ENTITIES);
    assert_eq!(t.len(), 4);
    assert_eq!(
        row_set(&t),
        strs(&[
            &["overworld", "zombie", "3"],
            &["overworld", "pig", "0"],
            &["nether", "zombie", "0"],
            &["nether", "pig", "0"],
        ])
    );
    let zombies = t.get(&[Cell::from("overworld"), Cell::from("zombie")]).unwrap();
    assert_eq!(zombies[2], Cell::Int32(3));
}

#[test]
fn unloaded_level_contributes_no_rows() {
    let (server, sources) = two_levels();
    server.unload_level("nether");
    server.declare_level("the_end");

    let t = entities::build(&sources).unwrap();
    assert_eq!(
        row_set(&t),
        strs(&[&["overworld", "zombie", "3"], &["overworld", "pig", "0"]])
    );

    let b = block_entities::build(&sources).unwrap();
    assert_eq!(b.len(), 3);
    assert!(b.rows().all(|r| r[0] == Cell::from("overworld")));

    let c = chunks::build(&sources).unwrap();
    assert_eq!(row_set(&c), strs(&[&["overworld", "441"]]));
}

#[test]
fn block_entities_count_ticking_instances_as_int64() {
    let (_server, sources) = two_levels();
    let t = block_entities::build(&sources).unwrap();

    assert_eq!(t.schema().columns[2].ty, ColumnType::Int64);
    assert_eq!(t.len(), 2 * 3);
    let furnaces = t.get(&[Cell::from("overworld"), Cell::from("furnace")]).unwrap();
    assert_eq!(furnaces[2], Cell::Int64(2));
    let hoppers = t.get(&[Cell::from("overworld"), Cell::from("hopper")]).unwrap();
    assert_eq!(hoppers[2], Cell::Int64(1));
    let chests = t.get(&[Cell::from("nether"), Cell::from("chest")]).unwrap();
    assert_eq!(chests[2], Cell::Int64(0));
}

#[test]
fn tickers_outside_the_catalog_are_ignored() {
    let (server, sources) = two_levels();
    server
        .memory_level("overworld")
        .unwrap()
        .add_tickers("modded:grinder", 7);

    let t = block_entities::build(&sources).unwrap();
    assert_eq!(t.len(), 6);
    assert!(t.rows().all(|r| r[1] != Cell::from("modded:grinder")));
}

#[test]
fn chunks_one_row_per_level() {
    let (_server, sources) = two_levels();
    let t = chunks::build(&sources).unwrap();
    assert_eq!(t.schema().index, &["level"]);
    assert_eq!(
        row_set(&t),
        strs(&[&["overworld", "441"], &["nether", "121"]])
    );
}

#[test]
fn empty_catalog_yields_no_entity_rows() {
    let (server, _) = two_levels();
    let sources = HostSources::new(
        server,
        Arc::new(MemoryCatalog::default()),
        Arc::new(MemoryCatalog::default()),
    );
    assert!(entities::build(&sources).unwrap().is_empty());
    assert!(block_entities::build(&sources).unwrap().is_empty());
    assert_eq!(chunks::build(&sources).unwrap().len(), 2);
}

#[test]
fn repeated_builds_are_identical_without_host_changes() {
    let (_server, sources) = two_levels();
    let a = entities::build(&sources).unwrap();
    let b = entities::build(&sources).unwrap();
    assert_eq!(row_set(&a), row_set(&b));
}

#[test]
fn builds_see_host_changes() {
    let (server, sources) = two_levels();
    let before = entities::build(&sources).unwrap();
    server.memory_level("nether").unwrap().spawn("pig", 4);
    let after = entities::build(&sources).unwrap();

    let key = [Cell::from("nether"), Cell::from("pig")];
    assert_eq!(before.get(&key).unwrap()[2], Cell::Int32(0));
    assert_eq!(after.get(&key).unwrap()[2], Cell::Int32(4));
}

#[test]
fn duplicate_catalog_entry_is_a_key_collision() {
    let (server, _) = two_levels();
    let sources = HostSources::new(
        server,
        Arc::new(MemoryCatalog::new(["zombie", "zombie"])),
        Arc::new(MemoryCatalog::default()),
    );
    let err = entities::build(&sources).unwrap_err();
    assert!(matches!(err, MetricsError::DuplicateKey { .. }));
}

struct Crowded;

impl Level for Crowded {
    fn count_entities(&self, _: &str) -> usize {
        i32::MAX as usize + 1
    }
    fn ticking_block_entity_counts(&self) -> HashMap<String, usize> {
        HashMap::from([("minecraft:hopper".to_string(), 3_000_000_000)])
    }
    fn loaded_chunk_count(&self) -> usize {
        1
    }
}

struct OneLevel;

impl ServerHost for OneLevel {
    fn tick_times_nanos(&self) -> Vec<u64> {
        Vec::new()
    }
    fn player_count(&self) -> i32 {
        0
    }
    fn max_players(&self) -> i32 {
        0
    }
    fn level_keys(&self) -> Vec<String> {
        vec!["overworld".into()]
    }
    fn level(&self, _: &str) -> Option<Arc<dyn Level>> {
        Some(Arc::new(Crowded))
    }
}

#[test]
fn count_wider_than_column_is_a_data_error() {
    let sources = HostSources::new(
        Arc::new(OneLevel),
        Arc::new(MemoryCatalog::new(["zombie"])),
        Arc::new(MemoryCatalog::default()),
    );
    let err = entities::build(&sources).unwrap_err();
    assert!(matches!(err, MetricsError::Data(_)));
    assert_eq!(chunks::build(&sources).unwrap().len(), 1);
}

#[test]
fn block_entity_counts_beyond_i32_fit_the_int64_column() {
    let sources = HostSources::new(
        Arc::new(OneLevel),
        Arc::new(MemoryCatalog::default()),
        Arc::new(MemoryCatalog::new(["minecraft:hopper", "minecraft:chest"])),
    );
    let t = block_entities::build(&sources).unwrap();
    let hoppers = t
        .get(&[Cell::from("overworld"), Cell::from("minecraft:hopper")])
        .unwrap();
    assert_eq!(hoppers[2], Cell::Int64(3_000_000_000));
    let chests = t
        .get(&[Cell::from("overworld"), Cell::from("minecraft:chest")])
        .unwrap();
    assert_eq!(chests[2], Cell::Int64(0));
}

#[test]
fn ticker_counts_are_reported_per_type() {
    let (server, _) = two_levels();
    let overworld = server.memory_level("overworld").unwrap();
    overworld.add_tickers("minecraft:hopper", 3_000_000);

    let counts = overworld.ticking_block_entity_counts();
    assert_eq!(counts.len(), 3);
    assert_eq!(counts.get("minecraft:hopper"), Some(&3_000_000));
    assert_eq!(counts.get("furnace"), Some(&2));
}

#[test]
fn builds_tolerate_concurrent_mutation() {
    let (server, sources) = two_levels();
    let stop = Arc::new(AtomicBool::new(false));

    let sim = {
        let server = server.clone();
        let stop = stop.clone();
        thread::spawn(move || {
            let mut i = 0u64;
            while !stop.load(Ordering::Relaxed) {
                let level = server.load_level("overworld");
                level.spawn("pig", 1);
                level.add_tickers("chest", 1);
                if i % 3 == 0 {
                    level.despawn("pig", 2);
                    level.remove_tickers("chest", 1);
                }
                if i % 2 == 0 {
                    server.unload_level("nether");
                } else {
                    server.load_level("nether");
                }
                i += 1;
            }
        })
    };

    for _ in 0..200 {
        let t = entities::build(&sources).unwrap();
        assert_eq!(t.len() % 2, 0);
        let keys: HashSet<Vec<String>> = t
            .rows()
            .map(|r| vec![r[0].to_string(), r[1].to_string()])
            .collect();
        assert_eq!(keys.len(), t.len());

        let b = block_entities::build(&sources).unwrap();
        assert_eq!(b.len() % 3, 0);
        let c = chunks::build(&sources).unwrap();
        assert!((1..=2).contains(&c.len()));
    }

    stop.store(true, Ordering::Relaxed);
    sim.join().unwrap();
}
