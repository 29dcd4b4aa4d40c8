use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use dashmap::DashMap;

use worldstat_core::error::{MetricsError, Result};
use worldstat_core::value::{MetricType, MetricValue};

/// Zero-argument value producer. Re-run in full on every query.
pub type Producer = Arc<dyn Fn() -> Result<MetricValue> + Send + Sync>;

/// Registered metric: name, description, declared type, and producer.
struct MetricDescriptor {
    name: String,
    description: String,
    ty: MetricType,
    producer: Producer,
}

/// Introspection record returned by [`MetricRegistry::describe`].
#[derive(Debug, Clone, PartialEq)]
pub struct MetricInfo {
    pub name: String,
    pub description: String,
    pub ty: MetricType,
}

/// Name -> descriptor map queried on demand by the management client.
///
/// No values are cached; every query invokes the producer. Producer errors
/// and panics are logged and surfaced as [`MetricsError::Evaluation`].
#[derive(Default)]
pub struct MetricRegistry {
    metrics: DashMap<String, Arc<MetricDescriptor>>,
}

impl MetricRegistry {
    pub fn new() -> Self {
        Self {
            metrics: DashMap::new(),
        }
    }

    /// Store `producer` under `name`, replacing any previous entry.
    pub fn register(
        &self,
        name: impl Into<String>,
        description: impl Into<String>,
        ty: MetricType,
        producer: Producer,
    ) {
        let name = name.into();
        let desc = Arc::new(MetricDescriptor {
            name: name.clone(),
            description: description.into(),
            ty,
            producer,
        });
        if self.metrics.insert(name.clone(), desc).is_some() {
            tracing::debug!(metric = %name, "metric re-registered");
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.metrics.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.metrics.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Name, description, and declared type of every metric, sorted by name.
    pub fn describe(&self) -> Vec<MetricInfo> {
        let mut out: Vec<MetricInfo> = self
            .metrics
            .iter()
            .map(|e| MetricInfo {
                name: e.name.clone(),
                description: e.description.clone(),
                ty: e.ty,
            })
            .collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        out
    }

    /// Evaluate one metric now.
    pub fn query(&self, name: &str) -> Result<MetricValue> {
        // Clone out so the shard lock is not held while the producer runs.
        let desc = self
            .metrics
            .get(name)
            .ok_or_else(|| MetricsError::UnknownMetric(name.to_string()))?
            .value()
            .clone();

        tracing::debug!(metric = %name, "metric query");

        let cause = match panic::catch_unwind(AssertUnwindSafe(|| (desc.producer)())) {
            Ok(Ok(v)) if v.conforms_to(&desc.ty) => return Ok(v),
            Ok(Ok(_)) => format!("value does not match declared type {}", desc.ty.label()),
            Ok(Err(e)) => e.to_string(),
            Err(payload) => format!("producer panicked: {}", panic_message(payload.as_ref())),
        };

        tracing::error!(metric = %name, %cause, "metric evaluation failed");
        Err(MetricsError::Evaluation {
            metric: name.to_string(),
            cause,
        })
    }

    /// Evaluate several metrics. Unknown or failing names are left out.
    pub fn query_many<S: AsRef<str>>(&self, names: &[S]) -> Vec<(String, MetricValue)> {
        let mut out = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            match self.query(name) {
                Ok(v) => out.push((name.to_string(), v)),
                Err(MetricsError::UnknownMetric(_)) => {
                    tracing::debug!(metric = %name, "bulk query skipped unknown metric");
                }
                // already logged by `query`
                Err(_) => {}
            }
        }
        out
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
