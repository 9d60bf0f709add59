//! Configuration loading for skein.
//!
//! Configuration is loaded from TOML files with environment variable
//! overrides. Only demo/CLI concerns live here; the generation presets and
//! force constants are in-code named constants by contract.

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "config.default.toml";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct SkeinConfig {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub pipeline: PipelineConfig,

    #[serde(default)]
    pub roster: RosterConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_directory")]
    pub directory: String,

    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            width: default_width(),
            height: default_height(),
        }
    }
}

fn default_directory() -> String {
    "output".to_string()
}

fn default_width() -> u32 {
    960
}

fn default_height() -> u32 {
    720
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Default SPOF-score threshold for reduction.
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Drop degree-0 nodes after thresholding.
    #[serde(default = "default_drop_isolated")]
    pub drop_isolated: bool,

    /// Default time range key: 1m, 3m, 1y or max.
    #[serde(default = "default_time_range")]
    pub time_range: String,

    /// Default layout strategy: shell or free.
    #[serde(default = "default_strategy")]
    pub strategy: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            drop_isolated: default_drop_isolated(),
            time_range: default_time_range(),
            strategy: default_strategy(),
        }
    }
}

fn default_threshold() -> f64 {
    0.5
}

fn default_drop_isolated() -> bool {
    true
}

fn default_time_range() -> String {
    "max".to_string()
}

fn default_strategy() -> String {
    "shell".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct RosterConfig {
    /// Sample roster size when no participant names are supplied.
    #[serde(default = "default_roster_size")]
    pub size: usize,

    /// Seed for the sample roster.
    #[serde(default = "default_roster_seed")]
    pub seed: u64,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            size: default_roster_size(),
            seed: default_roster_seed(),
        }
    }
}

fn default_roster_size() -> usize {
    12
}

fn default_roster_seed() -> u64 {
    42
}

impl SkeinConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false))
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("SKEIN").separator("_"))
            .build()?;

        let skein_config: SkeinConfig = config.try_deserialize().unwrap_or_default();
        Ok(skein_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = SkeinConfig::default();
        assert_eq!(config.output.directory, "output");
        assert!(config.output.width > 0 && config.output.height > 0);
        assert!((0.0..=1.0).contains(&config.pipeline.threshold));
        assert_eq!(config.pipeline.time_range, "max");
        assert_eq!(config.pipeline.strategy, "shell");
        assert!(config.roster.size >= 2);
    }
}
