//! Availability state machine around a registry backend.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use profile_core::{
    ApiVersion, CollectionId, InstalledMods, ModRegistry, ModSettingsReply, ObjectIndex,
    RegistryConfig, RegistryError,
};
use tracing::{debug, info, warn};

use super::RegistryBackend;
use crate::events::{Event, EventBus, ReevaluationRequest, RegistryEvent};

/// Link state: `Disabled → Initializing → Available`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum LinkState {
    Disabled,
    Initializing,
    Available,
}

impl LinkState {
    const fn to_u8(self) -> u8 {
        match self {
            LinkState::Disabled => 0,
            LinkState::Initializing => 1,
            LinkState::Available => 2,
        }
    }

    const fn from_u8(value: u8) -> Self {
        match value {
            1 => LinkState::Initializing,
            2 => LinkState::Available,
            _ => LinkState::Disabled,
        }
    }
}

/// Connection to the companion mod registry.
///
/// While not [`LinkState::Available`] every query reports
/// [`RegistryError::Unavailable`] and settings-changed notifications are
/// not forwarded.
pub struct RegistryLink {
    backend: Arc<dyn RegistryBackend>,
    config: RegistryConfig,
    bus: EventBus,
    state: AtomicU8,
    subscribed: AtomicBool,
    version_warned: AtomicBool,
}

impl RegistryLink {
    /// Creates a disabled link; call [`initialize`](Self::initialize) to connect.
    pub fn new(backend: Arc<dyn RegistryBackend>, config: RegistryConfig, bus: EventBus) -> Self {
        Self {
            backend,
            config,
            bus,
            state: AtomicU8::new(LinkState::Disabled.to_u8()),
            subscribed: AtomicBool::new(false),
            version_warned: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> LinkState {
        LinkState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// True while the settings-changed subscription is attached.
    pub fn is_subscribed(&self) -> bool {
        self.subscribed.load(Ordering::Acquire)
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// (Re)connects: disables, checks the backend API version, and becomes
    /// available if it is supported.
    ///
    /// A mismatch, or a failed version probe, leaves the link disabled and is
    /// logged once per link.
    pub fn initialize(&self) -> LinkState {
        self.disable();
        self.set_state(LinkState::Initializing);

        let required = self.config.required_version();
        let found = match self.backend.api_version() {
            Ok(version) => Some(version),
            Err(error) => {
                debug!(target: "runtime::registry", %error, "registry version probe failed");
                None
            }
        };

        match found {
            Some(version) if self.config.accepts(version) => {
                self.attach();
                if !self.promote() {
                    // disabled while probing
                    self.detach();
                    return self.state();
                }
                info!(target: "runtime::registry", %version, "mod registry available");
                self.bus.publish(Event::Registry(RegistryEvent::Available { version }));
                self.bus
                    .publish(Event::Reevaluation(ReevaluationRequest::RegistryStateChanged));
            }
            _ => {
                self.disable();
                self.warn_version_once(found, required);
                self.bus
                    .publish(Event::Registry(RegistryEvent::VersionMismatch { found, required }));
            }
        }

        self.state()
    }

    /// Tears the link down and detaches the settings-changed subscription.
    pub fn disable(&self) {
        let previous = LinkState::from_u8(
            self.state
                .swap(LinkState::Disabled.to_u8(), Ordering::AcqRel),
        );
        self.detach();
        if previous == LinkState::Available {
            info!(target: "runtime::registry", "mod registry disabled");
            self.bus.publish(Event::Registry(RegistryEvent::Disabled));
            self.bus
                .publish(Event::Reevaluation(ReevaluationRequest::RegistryStateChanged));
        }
    }

    fn set_state(&self, state: LinkState) {
        self.state.store(state.to_u8(), Ordering::Release);
    }

    /// `Initializing → Available`; fails if a `disable()` got in first.
    fn promote(&self) -> bool {
        self.state
            .compare_exchange(
                LinkState::Initializing.to_u8(),
                LinkState::Available.to_u8(),
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    fn attach(&self) {
        if !self.subscribed.swap(true, Ordering::AcqRel) {
            debug!(target: "runtime::registry", "settings subscription attached");
        }
    }

    fn detach(&self) {
        if self.subscribed.swap(false, Ordering::AcqRel) {
            debug!(target: "runtime::registry", "settings subscription detached");
        }
    }

    fn warn_version_once(&self, found: Option<ApiVersion>, required: ApiVersion) {
        if self.version_warned.swap(true, Ordering::AcqRel) {
            return;
        }
        match found {
            Some(version) => warn!(
                target: "runtime::registry",
                %version,
                %required,
                "mod registry API version not supported, mod conditions disabled"
            ),
            None => warn!(
                target: "runtime::registry",
                %required,
                "mod registry version unknown, mod conditions disabled"
            ),
        }
    }

    fn ensure_available(&self) -> Result<(), RegistryError> {
        match self.state() {
            LinkState::Available => Ok(()),
            _ => Err(RegistryError::Unavailable),
        }
    }
}

impl ModRegistry for RegistryLink {
    fn is_available(&self) -> bool {
        self.state() == LinkState::Available
    }

    fn effective_collection(
        &self,
        index: ObjectIndex,
    ) -> Result<Option<CollectionId>, RegistryError> {
        self.ensure_available()?;
        self.backend.effective_collection(index)
    }

    fn mod_settings(
        &self,
        collection: CollectionId,
        directory: &str,
        name: &str,
    ) -> Result<ModSettingsReply, RegistryError> {
        self.ensure_available()?;
        self.backend.mod_settings(collection, directory, name)
    }

    fn installed_mods(&self) -> Result<InstalledMods, RegistryError> {
        self.ensure_available()?;
        self.backend.installed_mods()
    }
}
