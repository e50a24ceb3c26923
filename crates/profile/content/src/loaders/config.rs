//! Engine configuration loader.

use std::path::Path;

use profile_core::EngineConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for engine configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load engine configuration from a TOML file.
    ///
    /// Missing tables and keys take their defaults:
    ///
    /// ```toml
    /// [registry]
    /// required_major = 5
    /// required_minor = 8
    /// ```
    pub fn load(path: &Path) -> LoadResult<EngineConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse engine configuration from TOML text.
    pub fn parse(content: &str) -> LoadResult<EngineConfig> {
        let config: EngineConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}
