//! Content factory for loading engine data from a directory.

use std::path::{Path, PathBuf};

use profile_core::EngineConfig;

use crate::loaders::{ConfigLoader, LoadResult, Scenario, ScenarioLoader};

/// Content factory that loads engine content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── scenarios/
///     ├── wardrobe.json
///     └── defaults.json
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load engine configuration from `config.toml`, or defaults if absent.
    pub fn load_config(&self) -> LoadResult<EngineConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(EngineConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load `scenarios/<name>.json`.
    pub fn load_scenario(&self, name: &str) -> LoadResult<Scenario> {
        let path = self.scenarios_dir().join(format!("{name}.json"));
        ScenarioLoader::load(&path)
    }

    /// Names of the scenarios in `scenarios/`, sorted.
    pub fn scenario_names(&self) -> LoadResult<Vec<String>> {
        let dir = self.scenarios_dir();
        let entries = std::fs::read_dir(&dir)
            .map_err(|e| anyhow::anyhow!("Failed to read directory {}: {}", dir.display(), e))?;

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if !path.extension().is_some_and(|ext| ext == "json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    fn scenarios_dir(&self) -> PathBuf {
        self.data_dir.join("scenarios")
    }
}
