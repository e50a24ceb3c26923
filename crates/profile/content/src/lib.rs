//! File loaders for engine configuration and scenarios.
//!
//! This crate reads the data the engine consumes from files:
//! - Engine configuration (TOML)
//! - Scenarios: a host snapshot, a registry snapshot and a profile store (JSON)
//!
//! Profiles in a scenario carry their conditions in the generic record form,
//! so a scenario file exercises the same decoding path as stored profiles.
//! Loaders use profile-core types directly with serde.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, Scenario, ScenarioLoader};
