//! CLI configuration file.
//!
//! ```toml
//! [parallel]
//! chunk_size = 1024
//! parallel_threshold = 4096
//! ```
//!
//! A missing file means defaults; missing keys fall back individually.

use std::path::Path;

use ad_operators::ParallelConfig;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Resolved CLI configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Kernel dispatch settings
    pub parallel: ParallelConfig,
}

impl CliConfig {
    /// Reads `path`, or returns defaults if it does not exist.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "no configuration file, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading configuration {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing configuration {}", path.display()))
    }

    /// Parses configuration text.
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }
}
