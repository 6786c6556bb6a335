use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::processor::{SignPostingProcessor, DEFAULT_VALIDATORS};
use crate::validation::Validator;

/// Global configuration loaded from `~/.config/signpost/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignpostConfig {
    /// Validators run by `signpost validate` when none are given on the command line.
    pub validators: Vec<Validator>,
    /// Treat warnings as failures.
    pub deny_warnings: bool,
    /// Validate each anchor context of a Link Set on its own.
    pub per_anchor: bool,
}

impl Default for SignpostConfig {
    fn default() -> Self {
        Self {
            validators: DEFAULT_VALIDATORS.to_vec(),
            deny_warnings: false,
            per_anchor: false,
        }
    }
}

impl SignpostConfig {
    pub fn processor(&self) -> SignPostingProcessor {
        SignPostingProcessor::builder()
            .with_validators(self.validators.iter().copied())
            .build()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("signpost")?;
    Ok(xdg_dirs.get_config_file("config.toml"))
}

pub fn load_from(path: &Path) -> Result<SignpostConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: SignpostConfig = toml::from_str(&data)
        .with_context(|| format!("invalid config {}", path.display()))?;
    tracing::debug!(path = %path.display(), validators = cfg.validators.len(), "loaded config");
    Ok(cfg)
}

/// Load configuration from disk; a missing file yields the defaults.
pub fn load_or_default() -> Result<SignpostConfig> {
    let path = config_path()?;
    if !path.exists() {
        tracing::debug!("no config at {}, using defaults", path.display());
        return Ok(SignpostConfig::default());
    }
    load_from(&path)
}
