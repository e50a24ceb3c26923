//! Actor identity and live handle types.
//!
//! The engine treats [`ActorIdentity`] as an opaque key: it compares identities
//! for equality and prints an incognito label in logs. Everything else about an
//! actor (liveness, appearance, ownership) is answered by the host oracles.
use std::fmt;

/// Category of an actor identity.
///
/// Owned actors (minions, mounts, pets), retainers and special slots (fitting
/// room, portrait copies) are *special*: the global default profile never
/// applies to them.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ActorKind {
    /// Unresolvable identity.
    #[default]
    Invalid,
    /// Player character.
    Player,
    /// Non-player character.
    Npc,
    /// Minion, mount or pet owned by a player.
    Owned,
    /// Retainer of a player.
    Retainer,
    /// Host-specific special slot.
    Special,
}

impl ActorKind {
    /// Returns true for owned actors, retainers and special slots.
    #[inline]
    pub const fn is_special(self) -> bool {
        matches!(self, Self::Owned | Self::Retainer | Self::Special)
    }
}

/// Stable identity of an actor.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorIdentity {
    pub kind: ActorKind,
    pub name: String,
    pub home_world: u16,
}

impl ActorIdentity {
    pub fn new(kind: ActorKind, name: impl Into<String>, home_world: u16) -> Self {
        Self {
            kind,
            name: name.into(),
            home_world,
        }
    }

    /// Shorthand for a player character identity.
    pub fn player(name: impl Into<String>, home_world: u16) -> Self {
        Self::new(ActorKind::Player, name, home_world)
    }

    /// The identity returned when nothing could be resolved.
    pub fn invalid() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.kind != ActorKind::Invalid && !self.name.is_empty()
    }

    /// Debug label safe to write to logs: the name is reduced to initials.
    ///
    /// `Player("Jane Doe", 73)` becomes `player:J. D.@73`.
    pub fn incognito(&self) -> String {
        let initials = self
            .name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .map(|c| format!("{c}."))
            .collect::<Vec<_>>()
            .join(" ");
        format!("{}:{}@{}", self.kind, initials, self.home_world)
    }
}

impl fmt::Display for ActorIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}@{}", self.kind, self.name, self.home_world)
    }
}

/// Slot of an actor in the host object table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectIndex(pub u16);

impl fmt::Display for ObjectIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle to an actor that was live when it was looked up.
///
/// Handles can go stale between lookup and read; every host read through a
/// handle is therefore fallible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ActorHandle {
    pub index: ObjectIndex,
}

impl ActorHandle {
    pub const fn new(index: ObjectIndex) -> Self {
        Self { index }
    }
}

/// Result of normalizing an actor alias to the actor it stands for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrueActor {
    pub identity: ActorIdentity,
    /// True when the input was a recognized alias and was rewritten.
    pub matched: bool,
}

impl TrueActor {
    /// The input identity, unchanged.
    pub fn unchanged(identity: &ActorIdentity) -> Self {
        Self {
            identity: identity.clone(),
            matched: false,
        }
    }
}
