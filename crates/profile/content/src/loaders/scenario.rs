//! Scenario loader.
//!
//! A scenario bundles everything one arbitration needs: the host's actor
//! table, the mod registry's state and the user's profile store.

use std::collections::BTreeSet;
use std::path::Path;

use profile_core::{HostEnv, HostSnapshot, Profile, ProfileId, RegistrySnapshot};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::loaders::{LoadResult, read_file};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub host: HostSnapshot,
    pub registry: RegistrySnapshot,
    pub profiles: Vec<Profile>,
}

impl Scenario {
    /// Oracle environment backed by this scenario's snapshots.
    pub fn env(&self) -> HostEnv<'_> {
        HostEnv::from_snapshots(&self.host, &self.registry)
    }

    pub fn profile(&self, id: ProfileId) -> Option<&Profile> {
        self.profiles.iter().find(|profile| profile.id == id)
    }

    /// Rejects duplicate profile ids; warns about competing defaults.
    fn validate(&self) -> LoadResult<()> {
        let mut seen = BTreeSet::new();
        for profile in &self.profiles {
            if !seen.insert(profile.id) {
                anyhow::bail!("Duplicate profile id {} ('{}')", profile.id.0, profile.name);
            }
        }

        let defaults = self.profiles.iter().filter(|p| p.is_default).count();
        if defaults > 1 {
            warn!(defaults, "several default profiles; the first enabled one is used");
        }
        let local_defaults = self
            .profiles
            .iter()
            .filter(|p| p.is_default_local_player)
            .count();
        if local_defaults > 1 {
            warn!(
                local_defaults,
                "several default local-player profiles; the first enabled one is used"
            );
        }

        Ok(())
    }
}

/// Loader for scenarios from JSON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Load a scenario from a JSON file.
    ///
    /// Conditions use the stored record form (`{"Type": "Gear", "Slot":
    /// "Head", "ModelId": 10}`); records that do not decode are dropped.
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid scenario {}: {}", path.display(), e))
    }

    /// Parse a scenario from JSON text.
    pub fn parse(content: &str) -> LoadResult<Scenario> {
        let scenario: Scenario = serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario JSON: {}", e))?;
        scenario.validate()?;
        Ok(scenario)
    }
}
