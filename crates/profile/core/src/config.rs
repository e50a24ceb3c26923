use crate::env::ApiVersion;

/// Engine tunables shared by the runtime and file loaders.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    pub registry: RegistryConfig,
}

/// Mod registry API the engine was written against.
///
/// The registry is usable when it reports the same major version and at
/// least the required minor version.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RegistryConfig {
    pub required_major: u32,
    pub required_minor: u32,
}

impl RegistryConfig {
    pub const DEFAULT_REQUIRED_MAJOR: u32 = 5;
    pub const DEFAULT_REQUIRED_MINOR: u32 = 8;

    pub fn new(required_major: u32, required_minor: u32) -> Self {
        Self {
            required_major,
            required_minor,
        }
    }

    pub fn required_version(&self) -> ApiVersion {
        ApiVersion::new(self.required_major, self.required_minor)
    }

    /// True if a registry reporting `version` can be used.
    pub fn accepts(&self, version: ApiVersion) -> bool {
        version.satisfies(self.required_version())
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_REQUIRED_MAJOR, Self::DEFAULT_REQUIRED_MINOR)
    }
}
