use profile_core::{ApiVersion, CollectionId, ProfileChange, ProfileId};
use serde::{Deserialize, Serialize};

/// What changed about one mod in one collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum SettingChangeKind {
    /// Enabled state toggled.
    Enabled,
    /// Load priority changed.
    Priority,
    /// An option of the mod changed.
    Setting,
    /// Collection now inherits the mod's settings, or stopped inheriting them.
    Inheritance,
    /// Mod files edited or the mod was reloaded.
    Edited,
}

/// Settings-changed notification raised by the mod registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModSettingChange {
    pub kind: SettingChangeKind,
    pub collection: CollectionId,
    pub directory: String,
    /// The change came from a parent collection.
    pub inherited: bool,
}

impl ModSettingChange {
    pub fn new(
        kind: SettingChangeKind,
        collection: CollectionId,
        directory: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            collection,
            directory: directory.into(),
            inherited: false,
        }
    }
}

/// Registry link lifecycle events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryEvent {
    /// Link established with a supported API version.
    Available { version: ApiVersion },
    /// The registry reports an API version this engine cannot use.
    VersionMismatch {
        found: Option<ApiVersion>,
        required: ApiVersion,
    },
    /// Link torn down.
    Disabled,
}

/// Reason an arbitration result may be stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReevaluationRequest {
    ModSettingChanged(ModSettingChange),
    ProfileChanged {
        profile: ProfileId,
        change: ProfileChange,
    },
    /// The registry became available or went away.
    RegistryStateChanged,
}
