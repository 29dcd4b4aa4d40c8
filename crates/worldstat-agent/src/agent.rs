//! Startup wiring: config + host sources -> populated registry.

use std::sync::Arc;

use serde_json::{Map, Value};
use worldstat_core::error::{MetricsError, Result};
use worldstat_core::value::MetricValue;

use crate::catalog;
use crate::config::AgentConfig;
use crate::host::HostSources;
use crate::registry::{MetricInfo, MetricRegistry};

/// Handle the embedding server keeps for the process lifetime.
#[derive(Clone)]
pub struct Agent {
    inner: Arc<AgentInner>,
}

struct AgentInner {
    cfg: AgentConfig,
    registry: MetricRegistry,
}

impl Agent {
    /// Register the built-in catalog once, at server start.
    /// Returns Result so the embedding server decides how to abort.
    pub fn start(cfg: AgentConfig, sources: HostSources) -> Result<Self> {
        let registry = MetricRegistry::new();
        let installed = catalog::install_builtin(&registry, &sources, &cfg.registry)?;
        tracing::info!(domain = %cfg.registry.domain, installed, "metrics registered");

        Ok(Self {
            inner: Arc::new(AgentInner { cfg, registry }),
        })
    }

    /// Management domain label the registry is published under.
    pub fn domain(&self) -> &str {
        &self.inner.cfg.registry.domain
    }

    pub fn registry(&self) -> &MetricRegistry {
        &self.inner.registry
    }

    pub fn query(&self, name: &str) -> Result<MetricValue> {
        self.inner.registry.query(name)
    }

    pub fn describe(&self) -> Vec<MetricInfo> {
        self.inner.registry.describe()
    }
}

/// Evaluate `names` (every registered metric when empty) into one JSON
/// document:
///
/// ```text
/// { "domain": "...", "metrics": { name: value, .. }, "errors": { name: "CODE: msg", .. } }
/// ```
///
/// A failing or unknown name lands in `errors`; the other names are still
/// evaluated. Only a value that cannot be encoded fails the whole dump.
pub fn dump<S: AsRef<str>>(agent: &Agent, names: &[S]) -> Result<Value> {
    let names: Vec<String> = if names.is_empty() {
        agent.registry().names()
    } else {
        names.iter().map(|n| n.as_ref().to_string()).collect()
    };

    let mut metrics = Map::new();
    let mut errors = Map::new();
    for name in names {
        match agent.query(&name) {
            Ok(value) => {
                let json = serde_json::to_value(&value)
                    .map_err(|e| MetricsError::Data(format!("encode {name} failed: {e}")))?;
                metrics.insert(name, json);
            }
            Err(e) => {
                tracing::warn!(metric = %name, code = e.kind().as_str(), "metric left out of dump");
                errors.insert(name, Value::String(format!("{}: {e}", e.kind().as_str())));
            }
        }
    }

    let mut out = Map::new();
    out.insert("domain".into(), Value::String(agent.domain().to_string()));
    out.insert("metrics".into(), Value::Object(metrics));
    out.insert("errors".into(), Value::Object(errors));
    Ok(Value::Object(out))
}
