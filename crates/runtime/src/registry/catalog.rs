use std::sync::{PoisonError, RwLock};

use profile_core::ModRegistry;
use tracing::debug;

/// Cached `(directory, name)` pairs of installed mods, for validating mod
/// conditions while editing.
#[derive(Debug, Default)]
pub struct ModCatalog {
    mods: RwLock<Vec<(String, String)>>,
}

impl ModCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reloads the list from `registry`. A failed query leaves the catalog
    /// empty.
    pub fn refresh(&self, registry: &dyn ModRegistry) -> usize {
        let mut mods: Vec<(String, String)> = match registry.installed_mods() {
            Ok(installed) => installed.into_iter().collect(),
            Err(error) => {
                debug!(target: "runtime::catalog", %error, "installed mod list unavailable");
                Vec::new()
            }
        };
        mods.sort_by(|a, b| {
            a.0.to_lowercase()
                .cmp(&b.0.to_lowercase())
                .then_with(|| a.0.cmp(&b.0))
        });

        let count = mods.len();
        *self.mods.write().unwrap_or_else(PoisonError::into_inner) = mods;
        debug!(target: "runtime::catalog", count, "mod catalog refreshed");
        count
    }

    pub fn clear(&self) {
        self.mods
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Installed mods sorted by directory, case-insensitively.
    pub fn available_mods(&self) -> Vec<(String, String)> {
        self.mods
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// True if `name` is an installed mod's directory, ignoring case.
    pub fn is_valid_mod(&self, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }
        let needle = name.to_lowercase();
        self.mods
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|(directory, _)| directory.to_lowercase() == needle)
    }

    pub fn len(&self) -> usize {
        self.mods.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
