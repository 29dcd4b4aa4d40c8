//! Tick-time and player-count producers.

use crate::host::ServerHost;

const NANOS_PER_MILLI: f64 = 1_000_000.0;

fn millis(nanos: f64) -> f32 {
    (nanos / NANOS_PER_MILLI) as f32
}

/// Shortest tick in the window (ms); 0 when the window is empty.
pub fn min_tick_time(server: &dyn ServerHost) -> f32 {
    server
        .tick_times_nanos()
        .into_iter()
        .min()
        .map_or(0.0, |n| millis(n as f64))
}

/// Longest tick in the window (ms); 0 when the window is empty.
pub fn max_tick_time(server: &dyn ServerHost) -> f32 {
    server
        .tick_times_nanos()
        .into_iter()
        .max()
        .map_or(0.0, |n| millis(n as f64))
}

/// Mean tick in the window (ms); 0 when the window is empty.
pub fn average_tick_time(server: &dyn ServerHost) -> f32 {
    let window = server.tick_times_nanos();
    if window.is_empty() {
        return 0.0;
    }
    let sum: u128 = window.iter().map(|&n| u128::from(n)).sum();
    millis(sum as f64 / window.len() as f64)
}

/// Raw window in nanoseconds, oldest first.
pub fn tick_times(server: &dyn ServerHost) -> Vec<i64> {
    server
        .tick_times_nanos()
        .into_iter()
        .map(|n| i64::try_from(n).unwrap_or(i64::MAX))
        .collect()
}

pub fn players(server: &dyn ServerHost) -> i32 {
    server.player_count()
}

pub fn max_players(server: &dyn ServerHost) -> i32 {
    server.max_players()
}
