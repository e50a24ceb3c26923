//! Profiles and the edits the engine allows on them.
//!
//! The engine only ever borrows profiles immutably; the editing methods here
//! exist for the owning store and report what changed as a [`ProfileChange`]
//! so the runtime can decide whether arbitration must be redone.
use std::fmt;

use crate::actor::{ActorIdentity, ActorKind};
use crate::condition::Condition;
use crate::error::{EngineError, ErrorSeverity};

/// Unique identifier of a profile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProfileId(pub u64);

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "profile#{}", self.0)
    }
}

/// Reference to a transform template owned by the template store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemplateId(pub u64);

/// A named, prioritized bundle of templates with an optional activation policy.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Profile {
    pub id: ProfileId,
    pub name: String,
    pub enabled: bool,
    /// Higher wins.
    pub priority: i32,
    pub write_protected: bool,
    pub templates: Vec<TemplateId>,
    #[cfg_attr(feature = "serde", serde(with = "crate::condition::codec::records"))]
    pub conditions: Vec<Condition>,
    /// Master switch; when off the profile applies regardless of `conditions`.
    pub conditions_enabled: bool,
    pub characters: Vec<ActorIdentity>,
    pub is_default: bool,
    pub is_default_local_player: bool,
    /// Injected by an external controller rather than the user.
    pub temporary: bool,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            id: ProfileId::default(),
            name: String::new(),
            enabled: true,
            priority: 0,
            write_protected: false,
            templates: Vec::new(),
            conditions: Vec::new(),
            conditions_enabled: true,
            characters: Vec::new(),
            is_default: false,
            is_default_local_player: false,
            temporary: false,
        }
    }
}

impl Profile {
    pub fn new(id: ProfileId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Self::default()
        }
    }

    /// Profile injected by an external controller for one actor.
    ///
    /// Temporary profiles are write-protected for the lifetime of the injection.
    pub fn temporary(id: ProfileId, name: impl Into<String>, actor: ActorIdentity) -> Self {
        Self {
            temporary: true,
            write_protected: true,
            characters: vec![actor],
            ..Self::new(id, name)
        }
    }

    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub fn with_character(mut self, actor: ActorIdentity) -> Self {
        self.characters.push(actor);
        self
    }

    #[must_use]
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use]
    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    #[must_use]
    pub fn as_default_local_player(mut self) -> Self {
        self.is_default_local_player = true;
        self
    }

    pub fn is_bound_to(&self, actor: &ActorIdentity) -> bool {
        self.characters.iter().any(|bound| bound == actor)
    }

    /// True if the global default binding may apply to an actor of this kind.
    pub fn default_applies_to(kind: ActorKind) -> bool {
        kind != ActorKind::Invalid && !kind.is_special()
    }

    /// Conditions that take part in evaluation.
    ///
    /// Empty when the master switch is off.
    pub fn active_conditions(&self) -> impl Iterator<Item = &Condition> {
        self.conditions
            .iter()
            .filter(move |condition| self.conditions_enabled && condition.enabled)
    }

    pub fn add_condition(&mut self, condition: Condition) -> Result<ProfileChange, ProfileError> {
        self.ensure_writable()?;
        self.conditions.push(condition);
        Ok(ProfileChange::ModifiedConditions)
    }

    pub fn remove_condition(&mut self, index: usize) -> Result<ProfileChange, ProfileError> {
        self.ensure_writable()?;
        self.ensure_index(index)?;
        self.conditions.remove(index);
        Ok(ProfileChange::RemovedCondition)
    }

    pub fn set_condition_enabled(
        &mut self,
        index: usize,
        enabled: bool,
    ) -> Result<ProfileChange, ProfileError> {
        self.ensure_writable()?;
        self.ensure_index(index)?;
        self.conditions[index].enabled = enabled;
        Ok(if enabled {
            ProfileChange::EnabledCondition
        } else {
            ProfileChange::DisabledCondition
        })
    }

    pub fn set_conditions_enabled(&mut self, enabled: bool) -> Result<ProfileChange, ProfileError> {
        self.ensure_writable()?;
        self.conditions_enabled = enabled;
        Ok(if enabled {
            ProfileChange::EnabledConditions
        } else {
            ProfileChange::DisabledConditions
        })
    }

    fn ensure_writable(&self) -> Result<(), ProfileError> {
        if self.write_protected {
            return Err(ProfileError::WriteProtected(self.id));
        }
        Ok(())
    }

    fn ensure_index(&self, index: usize) -> Result<(), ProfileError> {
        if index >= self.conditions.len() {
            return Err(ProfileError::ConditionOutOfRange {
                profile: self.id,
                index,
                len: self.conditions.len(),
            });
        }
        Ok(())
    }
}

/// What changed on a profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ProfileChange {
    Created,
    Deleted,
    Renamed,
    Toggled,
    PriorityChanged,

    AddedCharacter,
    RemovedCharacter,

    AddedTemplate,
    RemovedTemplate,
    EnabledTemplate,
    DisabledTemplate,
    MovedTemplate,
    ChangedTemplate,

    ReloadedAll,
    WriteProtection,
    ChangedDefaultProfile,
    ChangedDefaultLocalPlayerProfile,
    TemporaryProfileAdded,
    TemporaryProfileDeleted,

    // whole conditions feature on a profile
    EnabledConditions,
    DisabledConditions,
    ModifiedConditions,
    // one specific condition
    EnabledCondition,
    DisabledCondition,
    RemovedCondition,
}

impl ProfileChange {
    /// True if the change can alter which profile wins arbitration.
    ///
    /// Cosmetic and template-content changes do not; the transform pipeline
    /// handles those without re-arbitrating.
    pub const fn affects_arbitration(self) -> bool {
        !matches!(
            self,
            ProfileChange::Renamed
                | ProfileChange::WriteProtection
                | ProfileChange::AddedTemplate
                | ProfileChange::RemovedTemplate
                | ProfileChange::EnabledTemplate
                | ProfileChange::DisabledTemplate
                | ProfileChange::MovedTemplate
                | ProfileChange::ChangedTemplate
        )
    }
}

/// Rejected profile edit.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("{0} is write-protected")]
    WriteProtected(ProfileId),

    #[error("{profile} has {len} conditions, index {index} is out of range")]
    ConditionOutOfRange {
        profile: ProfileId,
        index: usize,
        len: usize,
    },
}

impl EngineError for ProfileError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::WriteProtected(_) => "PROFILE_WRITE_PROTECTED",
            Self::ConditionOutOfRange { .. } => "PROFILE_CONDITION_OUT_OF_RANGE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appearance::GearSlot;

    #[test]
    fn edits_report_changes() {
        let mut profile = Profile::new(ProfileId(1), "Dancer");
        assert_eq!(
            profile.add_condition(Condition::emote(7)),
            Ok(ProfileChange::ModifiedConditions)
        );
        assert_eq!(
            profile.set_condition_enabled(0, false),
            Ok(ProfileChange::DisabledCondition)
        );
        assert_eq!(
            profile.set_conditions_enabled(false),
            Ok(ProfileChange::DisabledConditions)
        );
        assert_eq!(profile.remove_condition(0), Ok(ProfileChange::RemovedCondition));
        assert!(profile.conditions.is_empty());
    }

    #[test]
    fn write_protected_profiles_reject_edits() {
        let mut profile = Profile::temporary(ProfileId(9), "Injected", ActorIdentity::player("A B", 1));
        assert_eq!(
            profile.add_condition(Condition::emote(1)),
            Err(ProfileError::WriteProtected(ProfileId(9)))
        );
        assert_eq!(
            profile.set_conditions_enabled(false),
            Err(ProfileError::WriteProtected(ProfileId(9)))
        );
        assert!(profile.conditions_enabled);
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let mut profile = Profile::new(ProfileId(2), "Empty");
        assert_eq!(
            profile.set_condition_enabled(3, true),
            Err(ProfileError::ConditionOutOfRange {
                profile: ProfileId(2),
                index: 3,
                len: 0
            })
        );
    }

    #[test]
    fn active_conditions_respect_both_switches() {
        let mut profile = Profile::new(ProfileId(3), "Gear")
            .with_condition(Condition::gear(GearSlot::Head, 1))
            .with_condition(Condition::gear(GearSlot::Body, 2).with_enabled(false));
        assert_eq!(profile.active_conditions().count(), 1);

        profile.conditions_enabled = false;
        assert_eq!(profile.active_conditions().count(), 0);
    }

    #[test]
    fn template_edits_do_not_trigger_arbitration() {
        assert!(!ProfileChange::MovedTemplate.affects_arbitration());
        assert!(!ProfileChange::Renamed.affects_arbitration());
        assert!(ProfileChange::PriorityChanged.affects_arbitration());
        assert!(ProfileChange::DisabledCondition.affects_arbitration());
        assert!(ProfileChange::TemporaryProfileAdded.affects_arbitration());
    }

    #[test]
    fn default_binding_skips_special_actors() {
        assert!(Profile::default_applies_to(ActorKind::Player));
        assert!(Profile::default_applies_to(ActorKind::Npc));
        assert!(!Profile::default_applies_to(ActorKind::Owned));
        assert!(!Profile::default_applies_to(ActorKind::Retainer));
        assert!(!Profile::default_applies_to(ActorKind::Invalid));
    }
}
