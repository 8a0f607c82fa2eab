//! Merges the config file with command-line overrides.

use crate::cli::args::CorpusArgs;
use kata_core::config::{load_config, HarnessConfig};
use kata_core::errors::ConfigError;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "kata.yaml";

/// Explicit `--config` must exist; the implicit `./kata.yaml` is optional.
pub fn resolve(args: &CorpusArgs) -> Result<HarnessConfig, ConfigError> {
    let mut cfg = match &args.config {
        Some(path) => load_config(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
            load_config(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => HarnessConfig::default(),
    };

    if let Some(dir) = &args.problems {
        cfg.problems_dir = dir.clone();
    }
    if let Some(filter) = &args.filter {
        cfg.filter = Some(filter.clone());
    }
    Ok(cfg)
}
