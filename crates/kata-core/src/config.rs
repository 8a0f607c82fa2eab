use crate::discovery::{DiscoveryOptions, DEFAULT_DESCRIPTOR_FILE, DEFAULT_SOLUTION_FILE};
use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SUPPORTED_CONFIG_VERSION: u32 = 1;
pub const DEFAULT_PARALLEL: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HarnessConfig {
    pub version: u32,
    #[serde(default = "default_problems_dir")]
    pub problems_dir: PathBuf,
    #[serde(default = "default_solution_file")]
    pub solution_file: String,
    #[serde(default = "default_descriptor_file")]
    pub descriptor_file: String,
    #[serde(default)]
    pub parallel: Option<usize>,
    #[serde(default)]
    pub filter: Option<String>,
}

fn default_problems_dir() -> PathBuf {
    PathBuf::from("problems")
}

fn default_solution_file() -> String {
    DEFAULT_SOLUTION_FILE.to_string()
}

fn default_descriptor_file() -> String {
    DEFAULT_DESCRIPTOR_FILE.to_string()
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            version: SUPPORTED_CONFIG_VERSION,
            problems_dir: default_problems_dir(),
            solution_file: default_solution_file(),
            descriptor_file: default_descriptor_file(),
            parallel: None,
            filter: None,
        }
    }
}

impl HarnessConfig {
    pub fn parallel(&self) -> usize {
        self.parallel.unwrap_or(DEFAULT_PARALLEL).max(1)
    }

    pub fn discovery_options(&self) -> DiscoveryOptions {
        DiscoveryOptions {
            filter: self.filter.clone().filter(|f| !f.is_empty()),
            solution_file: self.solution_file.clone(),
            descriptor_file: self.descriptor_file.clone(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<HarnessConfig, ConfigError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ConfigError(format!("failed to read config {}: {}", path.display(), e)))?;
    let mut cfg: HarnessConfig = serde_yaml::from_str(&raw)
        .map_err(|e| ConfigError(format!("failed to parse YAML: {}", e)))?;
    if cfg.version != SUPPORTED_CONFIG_VERSION {
        return Err(ConfigError(format!(
            "unsupported config version {} (supported: {})",
            cfg.version, SUPPORTED_CONFIG_VERSION
        )));
    }
    // Relative corpus paths are taken relative to the config file.
    if cfg.problems_dir.is_relative() {
        if let Some(parent) = path.parent() {
            cfg.problems_dir = parent.join(&cfg.problems_dir);
        }
    }
    Ok(cfg)
}
