//! Companion mod registry oracle.
use std::collections::BTreeMap;
use std::fmt;

use super::RegistryError;
use crate::actor::ObjectIndex;

/// Identifier of a mod collection in the registry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollectionId(pub u64);

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Installed mods: directory name → display name.
pub type InstalledMods = BTreeMap<String, String>;

/// Status code of a registry settings query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegistryStatus {
    Success,
    ModMissing,
    CollectionMissing,
    InvalidArgument,
    UnknownError,
}

/// Answer to a mod settings query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModSettingsReply {
    pub status: RegistryStatus,
    /// Present only when the registry found the mod's settings.
    pub enabled: Option<bool>,
}

impl ModSettingsReply {
    pub const fn found(enabled: bool) -> Self {
        Self {
            status: RegistryStatus::Success,
            enabled: Some(enabled),
        }
    }

    pub const fn failed(status: RegistryStatus) -> Self {
        Self {
            status,
            enabled: None,
        }
    }

    /// The enabled state if the query succeeded.
    pub fn enabled(&self) -> Option<bool> {
        match self.status {
            RegistryStatus::Success => self.enabled,
            _ => None,
        }
    }
}

/// Read-only view of the companion mod-management service.
pub trait ModRegistry: Send + Sync {
    /// True if the service is connected with a supported API version.
    fn is_available(&self) -> bool;

    /// Collection in effect for the actor in an object table slot.
    fn effective_collection(&self, index: ObjectIndex)
    -> Result<Option<CollectionId>, RegistryError>;

    /// Settings of one mod in a collection.
    ///
    /// The mod is located by `directory` if non-empty, otherwise by `name`.
    fn mod_settings(
        &self,
        collection: CollectionId,
        directory: &str,
        name: &str,
    ) -> Result<ModSettingsReply, RegistryError>;

    fn installed_mods(&self) -> Result<InstalledMods, RegistryError>;
}
