//! worldstat-dump
//!
//! Load an agent config and a host fixture, register the built-in metrics,
//! and print the requested metrics (all when none are named) as JSON.
//!
//! Usage: `worldstat-dump [config.yaml] [host.yaml] [metric...]`
//!
//! Names that fail are reported under `errors` in the output; the exit code
//! is non-zero when any did.

use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use worldstat_agent::{agent, config, host::HostFixture, Agent};
use worldstat_core::error::{MetricsError, Result};

/// Returns whether every requested metric was evaluated.
fn run() -> Result<bool> {
    let mut args = std::env::args().skip(1);
    let cfg_path = args.next().unwrap_or_else(|| "worldstat.yaml".into());
    let host_path = args.next().unwrap_or_else(|| "fixtures/host.yaml".into());
    let names: Vec<String> = args.collect();

    let cfg = config::load_from_file(&cfg_path)?;
    let fixture = HostFixture::load_from_file(&host_path)?;
    let (_server, sources) = fixture.build();
    let agent = Agent::start(cfg, sources)?;

    let out = agent::dump(&agent, &names)?;
    let complete = out["errors"].as_object().map_or(true, |e| e.is_empty());

    let text = serde_json::to_string_pretty(&out)
        .map_err(|e| MetricsError::Data(format!("encode output failed: {e}")))?;
    println!("{text}");
    Ok(complete)
}

fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(code = e.kind().as_str(), error = %e, "worldstat-dump failed");
            ExitCode::FAILURE
        }
    }
}
