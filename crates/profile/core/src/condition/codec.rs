//! Generic structured form of conditions.
//!
//! A stored condition is a flat mapping of field name to primitive value,
//! tagged by `Type`:
//!
//! ```text
//! { "Type": "Gear", "Enabled": true, "Slot": "Head", "ModelId": 6123 }
//! { "Type": "Race", "Enabled": true, "Race": "AuRa", "Clan": "Xaela", "Gender": "Male" }
//! ```
//!
//! Decoding is lenient per record and strict per field: an unknown `Type` or a
//! malformed payload drops that one record, never the list.
use std::collections::BTreeMap;
use std::str::FromStr;

use tracing::{debug, trace};

use super::{Condition, ConditionError, ConditionKind, ConditionPayload, RaceCondition};
use crate::appearance::{Clan, EmoteId, Gender, GearSlot, Race};
use crate::error::{EngineError, ErrorSeverity};

pub const FIELD_TYPE: &str = "Type";
pub const FIELD_ENABLED: &str = "Enabled";
pub const FIELD_MOD_NAME: &str = "ModName";
pub const FIELD_SLOT: &str = "Slot";
pub const FIELD_MODEL_ID: &str = "ModelId";
pub const FIELD_RACE: &str = "Race";
pub const FIELD_CLAN: &str = "Clan";
pub const FIELD_GENDER: &str = "Gender";
pub const FIELD_EMOTE_ID: &str = "EmoteId";

/// Primitive value of a record field.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl FieldValue {
    fn describe(&self) -> String {
        match self {
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Int(i) => i.to_string(),
            FieldValue::Text(s) => format!("'{s}'"),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<u16> for FieldValue {
    fn from(value: u16) -> Self {
        FieldValue::Int(i64::from(value))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

/// One stored condition.
pub type ConditionRecord = BTreeMap<String, FieldValue>;

/// Why a stored condition was dropped.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("record has no 'Type' tag")]
    MissingKind,

    #[error("unknown condition kind {0}")]
    UnknownKind(String),

    #[error("{kind} condition is missing field '{field}'")]
    MissingField {
        kind: ConditionKind,
        field: &'static str,
    },

    #[error("field '{field}' has invalid value {value}")]
    InvalidValue { field: &'static str, value: String },

    #[error(transparent)]
    Invalid(#[from] ConditionError),
}

impl EngineError for DecodeError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingKind => "DECODE_MISSING_KIND",
            Self::UnknownKind(_) => "DECODE_UNKNOWN_KIND",
            Self::MissingField { .. } => "DECODE_MISSING_FIELD",
            Self::InvalidValue { .. } => "DECODE_INVALID_VALUE",
            Self::Invalid(_) => "DECODE_INVALID_CONDITION",
        }
    }
}

/// Encodes one condition.
pub fn encode(condition: &Condition) -> ConditionRecord {
    let mut record = ConditionRecord::new();
    record.insert(FIELD_TYPE.into(), condition.kind().as_ref().into());
    record.insert(FIELD_ENABLED.into(), condition.enabled.into());

    match &condition.payload {
        ConditionPayload::Mod(m) => {
            record.insert(FIELD_MOD_NAME.into(), m.mod_identifier.clone().into());
        }
        ConditionPayload::Gear(g) => {
            record.insert(FIELD_SLOT.into(), g.slot.as_ref().into());
            record.insert(FIELD_MODEL_ID.into(), g.model_id.into());
        }
        ConditionPayload::Race(r) => {
            record.insert(FIELD_RACE.into(), r.race().as_ref().into());
            record.insert(FIELD_GENDER.into(), r.gender().as_ref().into());
            record.insert(FIELD_CLAN.into(), r.clan().as_ref().into());
        }
        ConditionPayload::Emote(e) => {
            record.insert(FIELD_EMOTE_ID.into(), e.emote_id.0.into());
        }
    }

    record
}

/// Encodes a condition list, preserving order.
pub fn encode_all<'a>(conditions: impl IntoIterator<Item = &'a Condition>) -> Vec<ConditionRecord> {
    conditions.into_iter().map(encode).collect()
}

/// Decodes one condition.
pub fn decode(record: &ConditionRecord) -> Result<Condition, DecodeError> {
    let kind = match record.get(FIELD_TYPE) {
        Some(FieldValue::Text(tag)) => ConditionKind::from_str(tag)
            .map_err(|_| DecodeError::UnknownKind(format!("'{tag}'")))?,
        Some(other) => return Err(DecodeError::UnknownKind(other.describe())),
        None => return Err(DecodeError::MissingKind),
    };

    let enabled = match record.get(FIELD_ENABLED) {
        None => true,
        Some(FieldValue::Bool(b)) => *b,
        Some(other) => {
            return Err(DecodeError::InvalidValue {
                field: FIELD_ENABLED,
                value: other.describe(),
            });
        }
    };

    let fields = Fields { record, kind };
    let payload = match kind {
        ConditionKind::Mod => ConditionPayload::Mod(super::ModCondition {
            mod_identifier: fields.text(FIELD_MOD_NAME)?.to_owned(),
        }),
        ConditionKind::Gear => ConditionPayload::Gear(super::GearCondition {
            slot: fields.parsed::<GearSlot>(FIELD_SLOT)?,
            model_id: fields.u16(FIELD_MODEL_ID)?,
        }),
        ConditionKind::Race => ConditionPayload::Race(RaceCondition::new(
            fields.parsed::<Race>(FIELD_RACE)?,
            fields.parsed::<Clan>(FIELD_CLAN)?,
            fields.parsed::<Gender>(FIELD_GENDER)?,
        )?),
        ConditionKind::Emote => ConditionPayload::Emote(super::EmoteCondition {
            emote_id: EmoteId(fields.u16(FIELD_EMOTE_ID)?),
        }),
    };

    Ok(Condition { enabled, payload })
}

/// Decodes a condition list, dropping records that fail to decode.
///
/// Unknown kinds are skipped silently (trace level); malformed records are
/// logged at debug level.
pub fn decode_all<'a>(records: impl IntoIterator<Item = &'a ConditionRecord>) -> Vec<Condition> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(position, record)| match decode(record) {
            Ok(condition) => Some(condition),
            Err(error @ DecodeError::UnknownKind(_)) => {
                trace!(target: "profile_core::condition", position, %error, "skipping condition");
                None
            }
            Err(error) => {
                debug!(
                    target: "profile_core::condition",
                    position,
                    code = error.error_code(),
                    %error,
                    "dropping malformed condition"
                );
                None
            }
        })
        .collect()
}

struct Fields<'r> {
    record: &'r ConditionRecord,
    kind: ConditionKind,
}

impl<'r> Fields<'r> {
    fn get(&self, field: &'static str) -> Result<&'r FieldValue, DecodeError> {
        self.record.get(field).ok_or(DecodeError::MissingField {
            kind: self.kind,
            field,
        })
    }

    fn text(&self, field: &'static str) -> Result<&'r str, DecodeError> {
        match self.get(field)? {
            FieldValue::Text(text) => Ok(text),
            other => Err(DecodeError::InvalidValue {
                field,
                value: other.describe(),
            }),
        }
    }

    fn parsed<T: FromStr>(&self, field: &'static str) -> Result<T, DecodeError> {
        let text = self.text(field)?;
        text.parse().map_err(|_| DecodeError::InvalidValue {
            field,
            value: format!("'{text}'"),
        })
    }

    fn u16(&self, field: &'static str) -> Result<u16, DecodeError> {
        match self.get(field)? {
            FieldValue::Int(value) => u16::try_from(*value).map_err(|_| DecodeError::InvalidValue {
                field,
                value: value.to_string(),
            }),
            other => Err(DecodeError::InvalidValue {
                field,
                value: other.describe(),
            }),
        }
    }
}

/// Serde adapter storing `Vec<Condition>` as a list of records.
///
/// Use with `#[serde(with = "profile_core::condition::codec::records")]`.
/// Entries that are not records, and record fields that are not primitives,
/// are ignored rather than failing the surrounding document.
#[cfg(feature = "serde")]
pub mod records {
    use std::collections::BTreeMap;

    use serde::de::IgnoredAny;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::{ConditionRecord, FieldValue, decode_all, encode_all};
    use crate::condition::Condition;

    pub fn serialize<S>(conditions: &[Condition], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        encode_all(conditions).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Condition>, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum LooseValue {
            Bool(bool),
            Int(i64),
            Text(String),
            Other(IgnoredAny),
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum LooseEntry {
            Record(BTreeMap<String, LooseValue>),
            Other(IgnoredAny),
        }

        let entries = Vec::<LooseEntry>::deserialize(deserializer)?;
        let records: Vec<ConditionRecord> = entries
            .into_iter()
            .filter_map(|entry| match entry {
                LooseEntry::Record(fields) => Some(
                    fields
                        .into_iter()
                        .filter_map(|(name, value)| {
                            let value = match value {
                                LooseValue::Bool(b) => FieldValue::Bool(b),
                                LooseValue::Int(i) => FieldValue::Int(i),
                                LooseValue::Text(s) => FieldValue::Text(s),
                                LooseValue::Other(_) => return None,
                            };
                            Some((name, value))
                        })
                        .collect(),
                ),
                LooseEntry::Other(_) => None,
            })
            .collect();

        Ok(decode_all(&records))
    }
}
