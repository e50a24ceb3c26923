//! Runtime configuration.
use std::env;

use profile_core::EngineConfig;

/// Settings for [`crate::ArbitrationService`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub engine: EngineConfig,
    /// Per-topic capacity of the event bus.
    pub event_buffer_size: usize,
}

impl RuntimeConfig {
    pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;

    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `REGISTRY_API_MAJOR` - Required registry major version (default: 5)
    /// - `REGISTRY_API_MINOR` - Minimum registry minor version (default: 8)
    /// - `EVENT_BUS_CAPACITY` - Events buffered per topic (default: 100)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(major) = read_env::<u32>("REGISTRY_API_MAJOR") {
            config.engine.registry.required_major = major;
        }
        if let Some(minor) = read_env::<u32>("REGISTRY_API_MINOR") {
            config.engine.registry.required_minor = minor;
        }
        if let Some(capacity) = read_env::<usize>("EVENT_BUS_CAPACITY") {
            config.event_buffer_size = capacity.max(1);
        }

        config
    }

    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            event_buffer_size: Self::DEFAULT_EVENT_BUFFER_SIZE,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
