//! Activation conditions attached to a profile.
//!
//! A [`Condition`] is one clause of a profile's activation policy. The set of
//! kinds is closed; the evaluator matches on [`ConditionPayload`] exhaustively,
//! so adding a kind means extending the enum and every match on it.
pub mod codec;

use std::fmt;

use crate::appearance::{Clan, Customize, EmoteId, Gender, GearSlot, Race};
use crate::error::{EngineError, ErrorSeverity};

pub use codec::{ConditionRecord, DecodeError, FieldValue};

/// Discriminant of a condition, also its stored `Type` tag.
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
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConditionKind {
    Mod,
    Gear,
    Race,
    Emote,
}

/// Requires a mod to be enabled in the actor's effective collection.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ModCondition {
    /// Directory name or display name; which one is not known at authoring time.
    pub mod_identifier: String,
}

/// Requires a model id to be equipped in a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GearCondition {
    pub slot: GearSlot,
    pub model_id: u16,
}

/// Requires the actor's race, clan and gender.
///
/// Constructed only through [`RaceCondition::new`], which rejects clans that do
/// not belong to the race.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RaceCondition {
    race: Race,
    clan: Clan,
    gender: Gender,
}

impl RaceCondition {
    pub fn new(race: Race, clan: Clan, gender: Gender) -> Result<Self, ConditionError> {
        if !race.has_clan(clan) {
            return Err(ConditionError::ClanMismatch { race, clan });
        }
        Ok(Self { race, clan, gender })
    }

    pub fn race(&self) -> Race {
        self.race
    }

    pub fn clan(&self) -> Clan {
        self.clan
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn customize(&self) -> Customize {
        Customize::new(self.race, self.clan, self.gender)
    }

    /// True if the actor's customization is exactly this race, clan and gender.
    pub fn matches(&self, actual: &Customize) -> bool {
        self.customize() == *actual
    }
}

/// Requires the actor to be playing an emote.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EmoteCondition {
    pub emote_id: EmoteId,
}

/// Typed payload of a condition.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConditionPayload {
    Mod(ModCondition),
    Gear(GearCondition),
    Race(RaceCondition),
    Emote(EmoteCondition),
}

/// One clause of a profile's activation policy.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Condition {
    pub enabled: bool,
    pub payload: ConditionPayload,
}

impl Condition {
    /// Wraps a payload as an enabled condition.
    pub fn new(payload: ConditionPayload) -> Self {
        Self {
            enabled: true,
            payload,
        }
    }

    pub fn mod_enabled(mod_identifier: impl Into<String>) -> Self {
        Self::new(ConditionPayload::Mod(ModCondition {
            mod_identifier: mod_identifier.into(),
        }))
    }

    pub fn gear(slot: GearSlot, model_id: u16) -> Self {
        Self::new(ConditionPayload::Gear(GearCondition { slot, model_id }))
    }

    pub fn race(race: Race, clan: Clan, gender: Gender) -> Result<Self, ConditionError> {
        RaceCondition::new(race, clan, gender).map(|race| Self::new(ConditionPayload::Race(race)))
    }

    pub fn emote(emote_id: u16) -> Self {
        Self::new(ConditionPayload::Emote(EmoteCondition {
            emote_id: EmoteId(emote_id),
        }))
    }

    /// Builder-style toggle of the enabled flag.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn kind(&self) -> ConditionKind {
        match self.payload {
            ConditionPayload::Mod(_) => ConditionKind::Mod,
            ConditionPayload::Gear(_) => ConditionKind::Gear,
            ConditionPayload::Race(_) => ConditionKind::Race,
            ConditionPayload::Emote(_) => ConditionKind::Emote,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.payload {
            ConditionPayload::Mod(m) => write!(f, "mod '{}' enabled", m.mod_identifier),
            ConditionPayload::Gear(g) => {
                write!(f, "{} wears model {}", g.slot.display_name(), g.model_id)
            }
            ConditionPayload::Race(r) => write!(f, "race {}", r.customize()),
            ConditionPayload::Emote(e) => write!(f, "emote {}", e.emote_id),
        }?;
        if !self.enabled {
            write!(f, " (disabled)")?;
        }
        Ok(())
    }
}

/// Rejected condition construction.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConditionError {
    #[error("clan {clan} does not belong to race {race}")]
    ClanMismatch { race: Race, clan: Clan },
}

impl EngineError for ConditionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ClanMismatch { .. } => "CONDITION_CLAN_MISMATCH",
        }
    }
}
