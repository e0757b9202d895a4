//! Engine configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::weights::ScoringWeights;

/// Environment variable that overrides [`SqiConfig::output_dir`].
pub const OUTPUT_DIR_ENV: &str = "SQI_OUTPUT_DIR";

/// Top-level SQI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqiConfig {
    /// Weight tables. Entries given here overlay the built-in defaults.
    #[serde(default)]
    pub weights: ScoringWeights,
    /// Output directory for result files.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Pretty-print JSON written to stdout.
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./sqi-results")
}
fn default_pretty() -> bool {
    true
}

impl Default for SqiConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            output_dir: default_output_dir(),
            pretty: default_pretty(),
        }
    }
}

/// Parse a TOML config string, overlaying its weights on the defaults.
pub fn parse_config_str(content: &str) -> Result<SqiConfig> {
    let mut config: SqiConfig = toml::from_str(content).context("failed to parse config")?;
    config.weights = ScoringWeights::default().merged_with(&config.weights);
    Ok(config)
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `sqi.toml` in the current directory
/// 2. `~/.config/sqi/config.toml`
///
/// Environment variable override: `SQI_OUTPUT_DIR`.
pub fn load_config() -> Result<SqiConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<SqiConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("sqi.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("invalid config: {}", path.display()))?
        }
        None => SqiConfig::default(),
    };

    if let Ok(dir) = std::env::var(OUTPUT_DIR_ENV) {
        if !dir.trim().is_empty() {
            config.output_dir = PathBuf::from(dir);
        }
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("sqi"))
}
