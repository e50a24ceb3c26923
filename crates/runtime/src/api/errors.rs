//! Unified error types surfaced by the runtime API.
//!
//! Wraps oracle wiring faults and rejected profile edits so
//! clients can bubble them up with consistent context.
use profile_core::{EngineError, ErrorSeverity, OracleError, ProfileError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Profile(#[from] ProfileError),
}

impl EngineError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Oracle(e) => e.severity(),
            Self::Profile(e) => e.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Oracle(e) => e.error_code(),
            Self::Profile(e) => e.error_code(),
        }
    }
}
