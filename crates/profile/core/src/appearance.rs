//! Appearance vocabulary shared by conditions and host reads.
//!
//! Enum variant names double as the stored spelling in condition records
//! (`"LeftRing"`, `"SeekerOfTheSun"`, `"AuRa"`), so renaming a variant is a
//! data format change.
use std::fmt;

/// Equipment slot a gear condition can target.
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
#[strum(ascii_case_insensitive)]
pub enum GearSlot {
    Head,
    Body,
    Hands,
    Legs,
    Feet,
    Ears,
    Neck,
    Wrists,
    LeftRing,
    RightRing,
}

impl GearSlot {
    pub const COUNT: usize = 10;

    /// All slots in display order.
    pub const ALL: [GearSlot; Self::COUNT] = [
        GearSlot::Head,
        GearSlot::Body,
        GearSlot::Hands,
        GearSlot::Legs,
        GearSlot::Feet,
        GearSlot::Ears,
        GearSlot::Neck,
        GearSlot::Wrists,
        GearSlot::LeftRing,
        GearSlot::RightRing,
    ];

    #[inline]
    pub const fn as_index(self) -> usize {
        self as usize
    }

    /// Label shown to users.
    pub const fn display_name(self) -> &'static str {
        match self {
            GearSlot::Head => "Head",
            GearSlot::Body => "Body",
            GearSlot::Hands => "Gloves",
            GearSlot::Legs => "Legs",
            GearSlot::Feet => "Feet",
            GearSlot::Ears => "Earrings",
            GearSlot::Neck => "Necklace",
            GearSlot::Wrists => "Wrist",
            GearSlot::LeftRing => "Left Ring",
            GearSlot::RightRing => "Right Ring",
        }
    }

    /// Slot of the human draw model that renders this gear slot.
    ///
    /// Returns `None` for slots the human model does not render; gear
    /// conditions on such slots are skipped during evaluation.
    pub const fn human_slot(self) -> Option<HumanSlot> {
        Some(match self {
            GearSlot::Head => HumanSlot::Head,
            GearSlot::Body => HumanSlot::Body,
            GearSlot::Hands => HumanSlot::Hands,
            GearSlot::Legs => HumanSlot::Legs,
            GearSlot::Feet => HumanSlot::Feet,
            GearSlot::Ears => HumanSlot::Ears,
            GearSlot::Neck => HumanSlot::Neck,
            GearSlot::Wrists => HumanSlot::Wrists,
            GearSlot::LeftRing => HumanSlot::LFinger,
            GearSlot::RightRing => HumanSlot::RFinger,
        })
    }
}

/// Equipment slot layout of the host's human draw model.
///
/// Ring order is right-before-left, unlike [`GearSlot`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HumanSlot {
    Head,
    Body,
    Hands,
    Legs,
    Feet,
    Ears,
    Neck,
    Wrists,
    RFinger,
    LFinger,
}

/// Playable race.
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
#[strum(ascii_case_insensitive)]
pub enum Race {
    Hyur,
    Elezen,
    Lalafell,
    Miqote,
    Roegadyn,
    AuRa,
    Hrothgar,
    Viera,
}

impl Race {
    pub const ALL: [Race; 8] = [
        Race::Hyur,
        Race::Elezen,
        Race::Lalafell,
        Race::Miqote,
        Race::Roegadyn,
        Race::AuRa,
        Race::Hrothgar,
        Race::Viera,
    ];

    /// The two clans of this race.
    pub const fn clans(self) -> [Clan; 2] {
        match self {
            Race::Hyur => [Clan::Midlander, Clan::Highlander],
            Race::Elezen => [Clan::Wildwood, Clan::Duskwight],
            Race::Lalafell => [Clan::Plainsfolk, Clan::Dunesfolk],
            Race::Miqote => [Clan::SeekerOfTheSun, Clan::KeeperOfTheMoon],
            Race::Roegadyn => [Clan::Seawolf, Clan::Hellsguard],
            Race::AuRa => [Clan::Raen, Clan::Xaela],
            Race::Hrothgar => [Clan::Helion, Clan::Lost],
            Race::Viera => [Clan::Rava, Clan::Veena],
        }
    }

    pub fn has_clan(self, clan: Clan) -> bool {
        self.clans().contains(&clan)
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Race::Hyur => "Hyur",
            Race::Elezen => "Elezen",
            Race::Lalafell => "Lalafell",
            Race::Miqote => "Miqo'te",
            Race::Roegadyn => "Roegadyn",
            Race::AuRa => "Au Ra",
            Race::Hrothgar => "Hrothgar",
            Race::Viera => "Viera",
        }
    }
}

/// Clan (sub-race) of a playable race.
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
#[strum(ascii_case_insensitive)]
pub enum Clan {
    Midlander,
    Highlander,
    Wildwood,
    Duskwight,
    Plainsfolk,
    Dunesfolk,
    SeekerOfTheSun,
    KeeperOfTheMoon,
    Seawolf,
    Hellsguard,
    Raen,
    Xaela,
    Helion,
    Lost,
    Rava,
    Veena,
}

impl Clan {
    /// Race this clan belongs to.
    pub fn race(self) -> Race {
        match self {
            Clan::Midlander | Clan::Highlander => Race::Hyur,
            Clan::Wildwood | Clan::Duskwight => Race::Elezen,
            Clan::Plainsfolk | Clan::Dunesfolk => Race::Lalafell,
            Clan::SeekerOfTheSun | Clan::KeeperOfTheMoon => Race::Miqote,
            Clan::Seawolf | Clan::Hellsguard => Race::Roegadyn,
            Clan::Raen | Clan::Xaela => Race::AuRa,
            Clan::Helion | Clan::Lost => Race::Hrothgar,
            Clan::Rava | Clan::Veena => Race::Viera,
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Clan::Midlander => "Midlander",
            Clan::Highlander => "Highlander",
            Clan::Wildwood => "Wildwood",
            Clan::Duskwight => "Duskwight",
            Clan::Plainsfolk => "Plainsfolk",
            Clan::Dunesfolk => "Dunesfolk",
            Clan::SeekerOfTheSun => "Seeker of the Sun",
            Clan::KeeperOfTheMoon => "Keeper of the Moon",
            Clan::Seawolf => "Sea Wolf",
            Clan::Hellsguard => "Hellsguard",
            Clan::Raen => "Raen",
            Clan::Xaela => "Xaela",
            Clan::Helion => "Helion",
            Clan::Lost => "The Lost",
            Clan::Rava => "Rava",
            Clan::Veena => "Veena",
        }
    }
}

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
#[strum(ascii_case_insensitive)]
pub enum Gender {
    Male,
    Female,
}

/// Race, clan and gender of a human-customizable model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Customize {
    pub race: Race,
    pub clan: Clan,
    pub gender: Gender,
}

impl Customize {
    pub const fn new(race: Race, clan: Clan, gender: Gender) -> Self {
        Self { race, clan, gender }
    }
}

impl fmt::Display for Customize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - {}",
            self.race.display_name(),
            self.clan.display_name(),
            self.gender
        )
    }
}

/// Row id of an emote in the host's emote table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmoteId(pub u16);

impl EmoteId {
    /// No emote playing.
    pub const NONE: Self = Self(0);

    /// Emotes that seat the actor on a chair (ground sitting excluded).
    pub const CHAIR_SIT: [EmoteId; 5] = [
        EmoteId(50),
        EmoteId(95),
        EmoteId(96),
        EmoteId(254),
        EmoteId(255),
    ];

    pub fn is_chair_sit(self) -> bool {
        Self::CHAIR_SIT.contains(&self)
    }
}

impl fmt::Display for EmoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
