//! Common error infrastructure for profile-core.
//!
//! Concern-specific errors (`OracleError`, `HostError`, `RegistryError`,
//! `DecodeError`, `ProfileError`) live next to the code that produces them.
//! This module provides the shared classification they all implement.
//!
//! # Design Principles
//!
//! - **Fail closed**: host and registry faults never escape the evaluator; they
//!   are classified here so callers can log them consistently
//! - **Severity Classification**: errors are categorized by how a caller should react
//! - **Stable codes**: every variant maps to a static code usable in logs and tests

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: transient host/registry conditions; the next arbitration may succeed
/// - **Validation**: bad stored data or a rejected edit; retrying without changes is pointless
/// - **Internal**: the companion service answered in a way it should not have
/// - **Fatal**: the engine was wired without a capability it cannot work without
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the same request may succeed later.
    ///
    /// Examples: stale actor handle, registry call failed
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: malformed stored condition, edit of a write-protected profile
    Validation,

    /// Internal error - unexpected answer from a collaborator.
    Internal,

    /// Fatal error - a required capability is missing.
    ///
    /// Examples: evaluator built without an actor oracle
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a wiring or collaborator bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all profile-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait EngineError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
