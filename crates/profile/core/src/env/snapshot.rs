//! In-memory oracle implementations.
//!
//! [`HostSnapshot`] and [`RegistrySnapshot`] capture the state a host and a
//! mod registry would report at one point in time. They back the CLI
//! scenarios and the test suites, and serialize to plain JSON/TOML (no
//! non-string map keys).
use std::collections::BTreeSet;

use super::{
    ActorOracle, AppearanceOracle, CollectionId, HostError, InstalledMods, ModRegistry,
    ModSettingsReply, RegistryError, RegistryStatus,
};
use crate::actor::{ActorHandle, ActorIdentity, ObjectIndex, TrueActor};
use crate::appearance::{Customize, EmoteId, HumanSlot};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Host
// ============================================================================

/// Identity that stands in for another actor (portrait copy, fitting room).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActorAlias {
    pub alias: ActorIdentity,
    pub target: ActorIdentity,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EquippedModel {
    pub slot: HumanSlot,
    pub model_id: u16,
}

/// An actor present in the object table.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LiveActor {
    pub identity: ActorIdentity,
    pub index: ObjectIndex,
    #[cfg_attr(feature = "serde", serde(default))]
    pub gear: Vec<EquippedModel>,
    /// `None` for non-human models.
    #[cfg_attr(feature = "serde", serde(default))]
    pub customize: Option<Customize>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub emote: EmoteId,
    /// Reads through the handle fail, as if the actor despawned after lookup.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stale: bool,
}

impl LiveActor {
    pub fn new(identity: ActorIdentity, index: u16) -> Self {
        Self {
            identity,
            index: ObjectIndex(index),
            gear: Vec::new(),
            customize: None,
            emote: EmoteId::NONE,
            stale: false,
        }
    }

    #[must_use]
    pub fn wearing(mut self, slot: HumanSlot, model_id: u16) -> Self {
        self.gear.retain(|equipped| equipped.slot != slot);
        self.gear.push(EquippedModel { slot, model_id });
        self
    }

    #[must_use]
    pub fn with_customize(mut self, customize: Customize) -> Self {
        self.customize = Some(customize);
        self
    }

    #[must_use]
    pub fn playing(mut self, emote: u16) -> Self {
        self.emote = EmoteId(emote);
        self
    }

    #[must_use]
    pub fn stale(mut self) -> Self {
        self.stale = true;
        self
    }
}

/// Snapshot of the host's actor table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HostSnapshot {
    pub local_player: Option<ActorIdentity>,
    pub aliases: Vec<ActorAlias>,
    pub actors: Vec<LiveActor>,
}

impl HostSnapshot {
    #[must_use]
    pub fn with_actor(mut self, actor: LiveActor) -> Self {
        self.actors.push(actor);
        self
    }

    #[must_use]
    pub fn with_local_player(mut self, identity: ActorIdentity) -> Self {
        self.local_player = Some(identity);
        self
    }

    #[must_use]
    pub fn with_alias(mut self, alias: ActorIdentity, target: ActorIdentity) -> Self {
        self.aliases.push(ActorAlias { alias, target });
        self
    }

    fn live(&self, handle: ActorHandle) -> Result<&LiveActor, HostError> {
        self.actors
            .iter()
            .find(|actor| actor.index == handle.index && !actor.stale)
            .ok_or(HostError::StaleHandle(handle.index))
    }
}

impl ActorOracle for HostSnapshot {
    fn resolve_true_actor(&self, identity: &ActorIdentity) -> TrueActor {
        match self.aliases.iter().find(|alias| &alias.alias == identity) {
            Some(alias) => TrueActor {
                identity: alias.target.clone(),
                matched: true,
            },
            None => TrueActor::unchanged(identity),
        }
    }

    fn find_live_actor(&self, identity: &ActorIdentity) -> Option<ActorHandle> {
        self.actors
            .iter()
            .find(|actor| &actor.identity == identity)
            .map(|actor| ActorHandle::new(actor.index))
    }

    fn is_local_player(&self, identity: &ActorIdentity) -> bool {
        self.local_player.as_ref() == Some(identity)
    }
}

impl AppearanceOracle for HostSnapshot {
    fn equipped_model(&self, handle: ActorHandle, slot: HumanSlot) -> Result<u16, HostError> {
        let actor = self.live(handle)?;
        if actor.customize.is_none() {
            return Err(HostError::NoDrawObject(handle.index));
        }
        Ok(actor
            .gear
            .iter()
            .find(|equipped| equipped.slot == slot)
            .map_or(0, |equipped| equipped.model_id))
    }

    fn customize(&self, handle: ActorHandle) -> Result<Option<Customize>, HostError> {
        Ok(self.live(handle)?.customize)
    }

    fn current_emote(&self, handle: ActorHandle) -> Result<EmoteId, HostError> {
        Ok(self.live(handle)?.emote)
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Registry API version as reported by the companion service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ApiVersion {
    pub major: u32,
    pub minor: u32,
}

impl ApiVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Same major, at least the required minor.
    pub const fn satisfies(self, required: ApiVersion) -> bool {
        self.major == required.major && self.minor >= required.minor
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::new(5, 8)
    }
}

impl std::fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InstalledMod {
    pub directory: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModSetting {
    pub directory: String,
    pub enabled: bool,
}

/// One collection, the actors it is assigned to and its explicit settings.
///
/// Installed mods without a setting entry count as disabled.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CollectionSnapshot {
    pub id: CollectionId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub actors: Vec<ObjectIndex>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub settings: Vec<ModSetting>,
}

impl CollectionSnapshot {
    pub fn new(id: u64) -> Self {
        Self {
            id: CollectionId(id),
            actors: Vec::new(),
            settings: Vec::new(),
        }
    }

    #[must_use]
    pub fn assigned_to(mut self, index: u16) -> Self {
        self.actors.push(ObjectIndex(index));
        self
    }

    #[must_use]
    pub fn with_setting(mut self, directory: impl Into<String>, enabled: bool) -> Self {
        self.settings.push(ModSetting {
            directory: directory.into(),
            enabled,
        });
        self
    }
}

/// Registry query that a snapshot can be told to fail.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RegistryCall {
    ApiVersion,
    EffectiveCollection,
    ModSettings,
    InstalledMods,
}

/// Snapshot of the companion mod registry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RegistrySnapshot {
    pub available: bool,
    pub api_version: ApiVersion,
    pub mods: Vec<InstalledMod>,
    pub collections: Vec<CollectionSnapshot>,
    /// Calls that fail with [`RegistryError::CallFailed`].
    pub faults: BTreeSet<RegistryCall>,
}

impl Default for RegistrySnapshot {
    fn default() -> Self {
        Self {
            available: true,
            api_version: ApiVersion::default(),
            mods: Vec::new(),
            collections: Vec::new(),
            faults: BTreeSet::new(),
        }
    }
}

impl RegistrySnapshot {
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_mod(mut self, directory: impl Into<String>, name: impl Into<String>) -> Self {
        self.mods.push(InstalledMod {
            directory: directory.into(),
            name: name.into(),
        });
        self
    }

    #[must_use]
    pub fn with_collection(mut self, collection: CollectionSnapshot) -> Self {
        self.collections.push(collection);
        self
    }

    #[must_use]
    pub fn with_fault(mut self, call: RegistryCall) -> Self {
        self.faults.insert(call);
        self
    }

    #[must_use]
    pub fn with_api_version(mut self, major: u32, minor: u32) -> Self {
        self.api_version = ApiVersion::new(major, minor);
        self
    }

    /// Version query, subject to the same faults as the other calls.
    pub fn probe_api_version(&self) -> Result<ApiVersion, RegistryError> {
        self.check(RegistryCall::ApiVersion)?;
        Ok(self.api_version)
    }

    fn check(&self, call: RegistryCall) -> Result<(), RegistryError> {
        if !self.available {
            return Err(RegistryError::Unavailable);
        }
        if self.faults.contains(&call) {
            return Err(RegistryError::call_failed(call_name(call), "injected fault"));
        }
        Ok(())
    }

    fn find_mod(&self, directory: &str, name: &str) -> Option<&InstalledMod> {
        if !directory.is_empty() {
            self.mods.iter().find(|m| m.directory == directory)
        } else if !name.is_empty() {
            self.mods.iter().find(|m| m.name == name)
        } else {
            None
        }
    }
}

fn call_name(call: RegistryCall) -> &'static str {
    match call {
        RegistryCall::ApiVersion => "api_version",
        RegistryCall::EffectiveCollection => "effective_collection",
        RegistryCall::ModSettings => "mod_settings",
        RegistryCall::InstalledMods => "installed_mods",
    }
}

impl ModRegistry for RegistrySnapshot {
    fn is_available(&self) -> bool {
        self.available
    }

    fn effective_collection(
        &self,
        index: ObjectIndex,
    ) -> Result<Option<CollectionId>, RegistryError> {
        self.check(RegistryCall::EffectiveCollection)?;
        Ok(self
            .collections
            .iter()
            .find(|collection| collection.actors.contains(&index))
            .map(|collection| collection.id))
    }

    fn mod_settings(
        &self,
        collection: CollectionId,
        directory: &str,
        name: &str,
    ) -> Result<ModSettingsReply, RegistryError> {
        self.check(RegistryCall::ModSettings)?;
        if directory.is_empty() && name.is_empty() {
            return Ok(ModSettingsReply::failed(RegistryStatus::InvalidArgument));
        }
        let Some(installed) = self.find_mod(directory, name) else {
            return Ok(ModSettingsReply::failed(RegistryStatus::ModMissing));
        };
        let Some(snapshot) = self.collections.iter().find(|c| c.id == collection) else {
            return Ok(ModSettingsReply::failed(RegistryStatus::CollectionMissing));
        };
        let enabled = snapshot
            .settings
            .iter()
            .find(|setting| setting.directory == installed.directory)
            .is_some_and(|setting| setting.enabled);
        Ok(ModSettingsReply::found(enabled))
    }

    fn installed_mods(&self) -> Result<InstalledMods, RegistryError> {
        self.check(RegistryCall::InstalledMods)?;
        Ok(self
            .mods
            .iter()
            .map(|m| (m.directory.clone(), m.name.clone()))
            .collect())
    }
}
