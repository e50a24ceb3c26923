//! Traits describing the live state the engine reads.
//!
//! Oracles answer questions about actors, their appearance and the companion
//! mod registry. The [`Env`] aggregate bundles them so the evaluator and
//! arbitrator can reach everything they need without coupling to a concrete
//! host.
mod actors;
mod appearance;
mod error;
mod registry;
mod snapshot;

pub use actors::ActorOracle;
pub use appearance::AppearanceOracle;
pub use error::{HostError, OracleError, RegistryError};
pub use registry::{CollectionId, InstalledMods, ModRegistry, ModSettingsReply, RegistryStatus};
pub use snapshot::{
    ActorAlias, ApiVersion, CollectionSnapshot, EquippedModel, HostSnapshot, InstalledMod,
    LiveActor, ModSetting, RegistryCall, RegistrySnapshot,
};

/// Aggregates the oracles required by the evaluator and arbitrator.
///
/// Actor and appearance oracles are required; asking for a missing one is a
/// wiring fault reported as [`OracleError`]. The registry is optional: when
/// absent every mod condition fails closed.
pub struct Env<'a, A, P, R>
where
    A: ActorOracle + ?Sized,
    P: AppearanceOracle + ?Sized,
    R: ModRegistry + ?Sized,
{
    actors: Option<&'a A>,
    appearance: Option<&'a P>,
    registry: Option<&'a R>,
}

impl<A, P, R> Clone for Env<'_, A, P, R>
where
    A: ActorOracle + ?Sized,
    P: AppearanceOracle + ?Sized,
    R: ModRegistry + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<A, P, R> Copy for Env<'_, A, P, R>
where
    A: ActorOracle + ?Sized,
    P: AppearanceOracle + ?Sized,
    R: ModRegistry + ?Sized,
{
}

pub type HostEnv<'a> =
    Env<'a, dyn ActorOracle + 'a, dyn AppearanceOracle + 'a, dyn ModRegistry + 'a>;

impl<'a, A, P, R> Env<'a, A, P, R>
where
    A: ActorOracle + ?Sized,
    P: AppearanceOracle + ?Sized,
    R: ModRegistry + ?Sized,
{
    pub fn new(actors: Option<&'a A>, appearance: Option<&'a P>, registry: Option<&'a R>) -> Self {
        Self {
            actors,
            appearance,
            registry,
        }
    }

    pub fn with_all(actors: &'a A, appearance: &'a P, registry: &'a R) -> Self {
        Self::new(Some(actors), Some(appearance), Some(registry))
    }

    pub fn empty() -> Self {
        Self {
            actors: None,
            appearance: None,
            registry: None,
        }
    }

    /// Returns the ActorOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ActorsNotAvailable` if no actor oracle was provided.
    pub fn actors(&self) -> Result<&'a A, OracleError> {
        self.actors.ok_or(OracleError::ActorsNotAvailable)
    }

    /// Returns the AppearanceOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::AppearanceNotAvailable` if no appearance oracle was provided.
    pub fn appearance(&self) -> Result<&'a P, OracleError> {
        self.appearance.ok_or(OracleError::AppearanceNotAvailable)
    }

    /// Returns the registry if one is wired and reports itself available.
    pub fn registry(&self) -> Option<&'a R> {
        self.registry.filter(|registry| registry.is_available())
    }
}

impl<'a, A, P, R> Env<'a, A, P, R>
where
    A: ActorOracle + 'a,
    P: AppearanceOracle + 'a,
    R: ModRegistry + 'a,
{
    /// Converts this environment into a trait-object based `HostEnv`.
    pub fn into_host_env(self) -> HostEnv<'a> {
        self.as_host_env()
    }

    /// Converts this environment into a trait-object based `HostEnv` (borrows self).
    pub fn as_host_env(&self) -> HostEnv<'a> {
        let actors: Option<&'a dyn ActorOracle> = self.actors.map(|actors| actors as _);
        let appearance: Option<&'a dyn AppearanceOracle> =
            self.appearance.map(|appearance| appearance as _);
        let registry: Option<&'a dyn ModRegistry> = self.registry.map(|registry| registry as _);
        Env::new(actors, appearance, registry)
    }
}

impl<'a> HostEnv<'a> {
    /// Environment backed by one host snapshot and one registry snapshot.
    pub fn from_snapshots(host: &'a HostSnapshot, registry: &'a RegistrySnapshot) -> Self {
        Env::new(
            Some(host as &dyn ActorOracle),
            Some(host as &dyn AppearanceOracle),
            Some(registry as &dyn ModRegistry),
        )
    }
}
