//! Arbitration service.
//!
//! [`ArbitrationService`] owns the host oracles, the registry link and the
//! event bus. Arbitration itself is synchronous; the bus only tells consumers
//! when a previous result may be stale.

use std::sync::Arc;

use profile_content::Scenario;
use profile_core::{
    ActorIdentity, ActorOracle, AppearanceOracle, ConditionEvaluator, HostEnv, ModRegistry,
    Profile, ProfileArbitrator, ProfileChange, ProfileError, ProfileId,
};
use tokio::sync::broadcast;
use tracing::{debug, trace};

use crate::api::Result;
use crate::config::RuntimeConfig;
use crate::events::{Event, EventBus, ModSettingChange, ReevaluationRequest, Topic};
use crate::registry::{LinkState, ModCatalog, RegistryBackend, RegistryLink};

pub struct ArbitrationService {
    config: RuntimeConfig,
    actors: Arc<dyn ActorOracle>,
    appearance: Arc<dyn AppearanceOracle>,
    registry: Arc<RegistryLink>,
    catalog: ModCatalog,
    bus: EventBus,
}

impl ArbitrationService {
    /// Wires the service. The registry link starts disabled until
    /// [`registry_initialized`](Self::registry_initialized) is called.
    pub fn new(
        config: RuntimeConfig,
        actors: Arc<dyn ActorOracle>,
        appearance: Arc<dyn AppearanceOracle>,
        backend: Arc<dyn RegistryBackend>,
    ) -> Self {
        let bus = EventBus::with_capacity(config.event_buffer_size);
        let registry = Arc::new(RegistryLink::new(
            backend,
            config.engine.registry.clone(),
            bus.clone(),
        ));

        Self {
            config,
            actors,
            appearance,
            registry,
            catalog: ModCatalog::new(),
            bus,
        }
    }

    /// Service over a scenario's snapshots with the registry link already
    /// initialized.
    pub fn from_scenario(config: RuntimeConfig, scenario: &Scenario) -> Self {
        let host = Arc::new(scenario.host.clone());
        let service = Self::new(
            config,
            host.clone(),
            host,
            Arc::new(scenario.registry.clone()),
        );
        service.registry_initialized();
        service
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Oracle environment borrowed from this service.
    pub fn env(&self) -> HostEnv<'_> {
        let actors: &dyn ActorOracle = &*self.actors;
        let appearance: &dyn AppearanceOracle = &*self.appearance;
        let registry: &dyn ModRegistry = &*self.registry;
        HostEnv::new(Some(actors), Some(appearance), Some(registry))
    }

    /// True if the conditions of `profile` hold for `actor` right now.
    pub fn applies(&self, profile: &Profile, actor: &ActorIdentity) -> Result<bool> {
        Ok(ConditionEvaluator::new(self.env()).applies(profile, actor)?)
    }

    /// The profile in effect for `actor`, if any.
    pub fn select_effective<'p>(
        &self,
        profiles: &'p [Profile],
        actor: &ActorIdentity,
    ) -> Result<Option<&'p Profile>> {
        Ok(ProfileArbitrator::new(self.env()).select_effective(profiles, actor)?)
    }

    pub fn subscribe_reevaluation(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe(Topic::Reevaluation)
    }

    pub fn subscribe_registry(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe(Topic::Registry)
    }

    /// Settings-changed callback from the registry.
    ///
    /// Ignored unless the link is available with its subscription attached.
    /// Otherwise the catalog is refreshed and a re-evaluation request
    /// published. Returns whether the change was forwarded.
    pub fn notify_mod_setting_changed(&self, change: ModSettingChange) -> bool {
        if !self.registry.is_subscribed() || !self.registry.is_available() {
            trace!(
                target: "runtime::service",
                collection = %change.collection,
                directory = %change.directory,
                "setting change ignored, registry link detached"
            );
            return false;
        }

        self.catalog.refresh(&*self.registry);
        debug!(
            target: "runtime::service",
            kind = %change.kind,
            collection = %change.collection,
            directory = %change.directory,
            "mod setting changed"
        );
        self.bus.publish(Event::Reevaluation(
            ReevaluationRequest::ModSettingChanged(change),
        ));
        true
    }

    /// Publishes a re-evaluation request if `change` can alter arbitration.
    pub fn notify_profile_changed(&self, change: ProfileChange, profile: ProfileId) -> bool {
        if !change.affects_arbitration() {
            trace!(target: "runtime::service", %profile, %change, "profile change ignored");
            return false;
        }

        debug!(target: "runtime::service", %profile, %change, "profile changed");
        self.bus.publish(Event::Reevaluation(ReevaluationRequest::ProfileChanged {
            profile,
            change,
        }));
        true
    }

    /// Applies an edit to `profile` and notifies on success.
    ///
    /// ```ignore
    /// service.apply_edit(&mut profile, |p| p.set_conditions_enabled(false))?;
    /// ```
    pub fn apply_edit<F>(&self, profile: &mut Profile, edit: F) -> Result<ProfileChange>
    where
        F: FnOnce(&mut Profile) -> std::result::Result<ProfileChange, ProfileError>,
    {
        let change = edit(profile)?;
        self.notify_profile_changed(change, profile.id);
        Ok(change)
    }

    /// Backend "initialized" notification: reconnects and reloads the catalog.
    pub fn registry_initialized(&self) -> LinkState {
        let state = self.registry.initialize();
        if state == LinkState::Available {
            self.catalog.refresh(&*self.registry);
        } else {
            self.catalog.clear();
        }
        state
    }

    /// Backend "disposed" notification.
    pub fn registry_disposed(&self) {
        self.registry.disable();
        self.catalog.clear();
    }

    pub fn registry(&self) -> &RegistryLink {
        &self.registry
    }

    pub fn catalog(&self) -> &ModCatalog {
        &self.catalog
    }
}
