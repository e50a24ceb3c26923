//! Runtime around the profile arbitration engine.
//!
//! Modules are organized by responsibility:
//! - [`service`] hosts [`ArbitrationService`], the entry point for hosts
//! - [`registry`] wraps the mod registry backend in an availability-gated link
//!   and caches the installed-mod list
//! - [`events`] provides the topic-based bus for re-evaluation requests
//! - [`api`] exposes the error types downstream clients handle
pub mod api;
pub mod config;
pub mod events;
pub mod registry;
pub mod service;

pub use api::{Result, RuntimeError};
pub use config::RuntimeConfig;
pub use events::{
    Event, EventBus, ModSettingChange, ReevaluationRequest, RegistryEvent, SettingChangeKind,
    Topic,
};
pub use registry::{LinkState, ModCatalog, RegistryBackend, RegistryLink};
pub use service::ArbitrationService;
