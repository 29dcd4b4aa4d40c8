use serde::Deserialize;
use worldstat_core::error::{MetricsError, Result};

use crate::catalog::BUILTIN_METRICS;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    pub version: u32,

    #[serde(default)]
    pub registry: RegistrySection,
}

impl AgentConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MetricsError::UnsupportedVersion);
        }
        self.registry.validate()
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            version: 1,
            registry: RegistrySection::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistrySection {
    /// Management domain label the registry is published under.
    #[serde(default = "default_domain")]
    pub domain: String,

    /// Built-in metrics that are not installed.
    #[serde(default)]
    pub disabled: Vec<String>,
}

impl Default for RegistrySection {
    fn default() -> Self {
        Self {
            domain: default_domain(),
            disabled: Vec::new(),
        }
    }
}

impl RegistrySection {
    pub fn validate(&self) -> Result<()> {
        if self.domain.trim().is_empty() {
            return Err(MetricsError::Config("registry.domain must not be empty".into()));
        }
        for name in &self.disabled {
            if !BUILTIN_METRICS.contains(&name.as_str()) {
                return Err(MetricsError::Config(format!(
                    "registry.disabled names unknown metric: {name}"
                )));
            }
        }
        Ok(())
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        !self.disabled.iter().any(|d| d == name)
    }
}

fn default_domain() -> String {
    "net.minecraft.server:type=Server".into()
}
