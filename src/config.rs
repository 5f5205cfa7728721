//! Run configuration
//!
//! Every field has a default, so an empty TOML document is a valid config.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analytics::{DegreeCounting, Subgraph};
use crate::error::{GraphError, Result};
use crate::inference::AllyPolicy;
use crate::ingest::UnresolvedPolicy;
use crate::types::{NodeKind, RelationKind};

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "ALLEGIANCE_CONFIG";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub inference: InferenceConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

/// Ingestion configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestConfig {
    /// What to do when a relation names a character or house that does not exist
    #[serde(default)]
    pub unresolved: UnresolvedPolicy,
    /// Record count above which ingestion fans out over the rayon pool
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            unresolved: UnresolvedPolicy::default(),
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

fn default_parallel_threshold() -> usize {
    1000
}

/// Rule engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InferenceConfig {
    #[serde(default)]
    pub ally_policy: AllyPolicy,
}

/// Analytics configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default = "default_node_kind")]
    pub node_kind: NodeKind,
    #[serde(default = "default_relation_kinds")]
    pub relation_kinds: Vec<RelationKind>,
    #[serde(default)]
    pub degree_counting: DegreeCounting,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            node_kind: default_node_kind(),
            relation_kinds: default_relation_kinds(),
            degree_counting: DegreeCounting::default(),
        }
    }
}

impl AnalyticsConfig {
    pub fn subgraph(&self) -> Subgraph {
        Subgraph::new(self.node_kind, self.relation_kinds.iter().copied())
    }
}

fn default_node_kind() -> NodeKind {
    NodeKind::Character
}

fn default_relation_kinds() -> Vec<RelationKind> {
    vec![
        RelationKind::Ally,
        RelationKind::Marriage,
        RelationKind::Parental,
    ]
}

impl Config {
    /// Load configuration
    ///
    /// Reads the file named by `ALLEGIANCE_CONFIG` when the variable is set,
    /// otherwise returns the defaults.
    pub fn load() -> Result<Self> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) => Self::from_file(PathBuf::from(path)),
            Err(_) => {
                log::debug!("{} not set, using default configuration", CONFIG_ENV_VAR);
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            GraphError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&content)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| GraphError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.analytics.relation_kinds.is_empty() {
            return Err(GraphError::Config(
                "analytics.relation_kinds must name at least one relation kind".to_string(),
            ));
        }
        Ok(())
    }
}
