//! Classifier configuration resolution: `--config`, then `CASEBOARD_CONFIG`,
//! then built-in defaults.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use caseboard_model::{Classifier, ClassifierConfig};

pub const CONFIG_ENV: &str = "CASEBOARD_CONFIG";

pub fn config_path(flag: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = flag {
        return Some(path.to_path_buf());
    }
    std::env::var_os(CONFIG_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

pub fn load_config(flag: Option<&Path>) -> Result<ClassifierConfig> {
    let Some(path) = config_path(flag) else {
        debug!("no classifier config given; using built-in defaults");
        return Ok(ClassifierConfig::default());
    };
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read classifier config {}", path.display()))?;
    let config = ClassifierConfig::from_json(&text)
        .with_context(|| format!("invalid classifier config {}", path.display()))?;
    info!(config = %path.display(), "loaded classifier config");
    Ok(config)
}

pub fn load_classifier(flag: Option<&Path>) -> Result<Classifier> {
    Ok(Classifier::new(&load_config(flag)?))
}
