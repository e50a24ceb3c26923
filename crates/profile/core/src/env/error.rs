//! Oracle access errors.
//!
//! [`OracleError`] is a wiring fault reported to the caller. [`HostError`] and
//! [`RegistryError`] come from live reads and are absorbed by the evaluator,
//! which fails the affected condition closed.
use crate::actor::ObjectIndex;
use crate::appearance::HumanSlot;
use crate::error::{EngineError, ErrorSeverity};

/// A capability the engine needs was not provided.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    /// ActorOracle is not available in the environment.
    #[error("ActorOracle not available")]
    ActorsNotAvailable,

    /// AppearanceOracle is not available in the environment.
    #[error("AppearanceOracle not available")]
    AppearanceNotAvailable,
}

impl EngineError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ActorsNotAvailable => "ORACLE_ACTORS_NOT_AVAILABLE",
            Self::AppearanceNotAvailable => "ORACLE_APPEARANCE_NOT_AVAILABLE",
        }
    }
}

/// Host state could not be read through a handle.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("actor handle {0} is stale")]
    StaleHandle(ObjectIndex),

    #[error("actor {0} has no draw object")]
    NoDrawObject(ObjectIndex),

    #[error("slot {slot} of actor {index} could not be read")]
    SlotUnreadable { index: ObjectIndex, slot: HumanSlot },
}

impl EngineError for HostError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::StaleHandle(_) => "HOST_STALE_HANDLE",
            Self::NoDrawObject(_) => "HOST_NO_DRAW_OBJECT",
            Self::SlotUnreadable { .. } => "HOST_SLOT_UNREADABLE",
        }
    }
}

/// A registry call did not produce an answer.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("mod registry is not available")]
    Unavailable,

    #[error("mod registry call {call} failed: {reason}")]
    CallFailed { call: &'static str, reason: String },

    #[error("mod registry API {major}.{minor} is not supported")]
    UnsupportedVersion { major: u32, minor: u32 },
}

impl RegistryError {
    pub fn call_failed(call: &'static str, reason: impl Into<String>) -> Self {
        Self::CallFailed {
            call,
            reason: reason.into(),
        }
    }
}

impl EngineError for RegistryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Unavailable | Self::CallFailed { .. } => ErrorSeverity::Recoverable,
            Self::UnsupportedVersion { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Unavailable => "REGISTRY_UNAVAILABLE",
            Self::CallFailed { .. } => "REGISTRY_CALL_FAILED",
            Self::UnsupportedVersion { .. } => "REGISTRY_UNSUPPORTED_VERSION",
        }
    }
}
