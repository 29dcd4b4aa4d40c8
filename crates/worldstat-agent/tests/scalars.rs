//! Tick-time and player producers.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use worldstat_agent::host::memory::TICK_WINDOW;
use worldstat_agent::host::MemoryServer;
use worldstat_agent::producers::scalar;

#[test]
fn empty_window_reads_zero() {
    let server = MemoryServer::new(20);
    assert_eq!(scalar::min_tick_time(&server), 0.0);
    assert_eq!(scalar::max_tick_time(&server), 0.0);
    assert_eq!(scalar::average_tick_time(&server), 0.0);
    assert!(scalar::tick_times(&server).is_empty());
}

#[test]
fn min_and_max_in_millis() {
    let server = MemoryServer::new(20);
    for ms in [5, 10, 2] {
        server.record_tick(Duration::from_millis(ms));
    }
    assert_eq!(scalar::min_tick_time(&server), 2.0);
    assert_eq!(scalar::max_tick_time(&server), 10.0);
    assert!(scalar::min_tick_time(&server) <= scalar::max_tick_time(&server));
}

#[test]
fn sub_millisecond_ticks_keep_fraction() {
    let server = MemoryServer::new(20);
    server.record_tick(Duration::from_micros(1_500));
    assert_eq!(scalar::min_tick_time(&server), 1.5);
}

#[test]
fn average_and_raw_window() {
    let server = MemoryServer::new(20);
    for ms in [5, 10, 3] {
        server.record_tick(Duration::from_millis(ms));
    }
    assert_eq!(scalar::average_tick_time(&server), 6.0);
    assert_eq!(
        scalar::tick_times(&server),
        vec![5_000_000, 10_000_000, 3_000_000]
    );
}

#[test]
fn window_is_bounded() {
    let server = MemoryServer::new(20);
    server.record_tick(Duration::from_millis(1));
    for _ in 0..TICK_WINDOW {
        server.record_tick(Duration::from_millis(50));
    }
    assert_eq!(scalar::tick_times(&server).len(), TICK_WINDOW);
    assert_eq!(scalar::min_tick_time(&server), 50.0);
}

#[test]
fn player_counts_pass_through() {
    let server = MemoryServer::new(20);
    server.set_players(7);
    assert_eq!(scalar::players(&server), 7);
    assert_eq!(scalar::max_players(&server), 20);
    server.set_max_players(64);
    assert_eq!(scalar::max_players(&server), 64);
}
