//! Condition evaluation and profile arbitration.
//!
//! `profile-core` decides which user-authored profile is in effect for an
//! actor. Live state comes from host and mod-registry oracles bundled in an
//! [`Env`]; profiles are borrowed from the caller's store for one call.
//! [`ProfileArbitrator::select_effective`] is the entry point, built on
//! [`ConditionEvaluator::applies`].
pub mod actor;
pub mod appearance;
pub mod arbitrator;
pub mod condition;
pub mod config;
pub mod env;
pub mod error;
pub mod evaluator;
pub mod profile;
pub mod resolver;
pub mod snapshot;

pub use actor::{ActorHandle, ActorIdentity, ActorKind, ObjectIndex, TrueActor};
pub use appearance::{Clan, Customize, EmoteId, Gender, GearSlot, HumanSlot, Race};
pub use arbitrator::ProfileArbitrator;
pub use condition::{
    Condition, ConditionError, ConditionKind, ConditionPayload, ConditionRecord, DecodeError,
    EmoteCondition, FieldValue, GearCondition, ModCondition, RaceCondition,
};
pub use config::{EngineConfig, RegistryConfig};
pub use env::{
    ActorOracle, ApiVersion, AppearanceOracle, CollectionId, CollectionSnapshot, Env, HostEnv,
    HostError, HostSnapshot, InstalledMods, LiveActor, ModRegistry, ModSettingsReply,
    OracleError, RegistryCall, RegistryError, RegistrySnapshot, RegistryStatus,
};
pub use error::{EngineError, ErrorSeverity};
pub use evaluator::ConditionEvaluator;
pub use profile::{Profile, ProfileChange, ProfileError, ProfileId, TemplateId};
pub use resolver::{ModIdentityResolver, ModResolution};
pub use snapshot::{ActorStateSnapshot, LazySnapshot};
