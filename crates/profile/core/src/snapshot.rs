//! Point-in-time view of one resolved actor.
//!
//! An [`ActorStateSnapshot`] lives for a single arbitration call. Identity
//! resolution and the live lookup happen once, at capture. Every other field
//! is read on first use and memoized, so a field no condition asks for is never
//! read and a field several profiles ask for is read once.
use std::cell::OnceCell;

use tracing::debug;

use crate::actor::{ActorHandle, ActorIdentity};
use crate::appearance::{Customize, EmoteId, GearSlot};
use crate::env::{AppearanceOracle, CollectionId, HostEnv, ModRegistry, OracleError};

pub struct ActorStateSnapshot<'a> {
    appearance: &'a dyn AppearanceOracle,
    identity: ActorIdentity,
    handle: Option<ActorHandle>,
    gear: [OnceCell<Option<u16>>; GearSlot::COUNT],
    customize: OnceCell<Option<Customize>>,
    emote: OnceCell<Option<EmoteId>>,
    collection: OnceCell<Option<CollectionId>>,
}

impl<'a> ActorStateSnapshot<'a> {
    /// Resolves `actor` to the actor it stands for and looks it up.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError`] if the environment lacks the actor or
    /// appearance oracle.
    pub fn capture(env: &HostEnv<'a>, actor: &ActorIdentity) -> Result<Self, OracleError> {
        let actors = env.actors()?;
        let appearance = env.appearance()?;

        let resolved = actors.resolve_true_actor(actor);
        let handle = if resolved.identity.is_valid() {
            actors.find_live_actor(&resolved.identity)
        } else {
            None
        };
        if handle.is_none() {
            debug!(
                target: "profile_core::snapshot",
                actor = %actor.incognito(),
                resolved = %resolved.identity.incognito(),
                alias = resolved.matched,
                "actor is not live"
            );
        }

        Ok(Self {
            appearance,
            identity: resolved.identity,
            handle,
            gear: Default::default(),
            customize: OnceCell::new(),
            emote: OnceCell::new(),
            collection: OnceCell::new(),
        })
    }

    /// Identity after alias resolution.
    pub fn identity(&self) -> &ActorIdentity {
        &self.identity
    }

    pub fn handle(&self) -> Option<ActorHandle> {
        self.handle
    }

    pub fn is_live(&self) -> bool {
        self.handle.is_some()
    }

    /// Model id in a gear slot, or `None` if it could not be read.
    pub fn equipped(&self, slot: GearSlot) -> Option<u16> {
        *self.gear[slot.as_index()].get_or_init(|| {
            let handle = self.handle?;
            let human = slot.human_slot()?;
            self.appearance
                .equipped_model(handle, human)
                .map_err(|error| self.read_failed("gear", &error))
                .ok()
        })
    }

    /// Race, clan and gender; `None` for non-human models and failed reads.
    pub fn customize(&self) -> Option<Customize> {
        *self.customize.get_or_init(|| {
            let handle = self.handle?;
            self.appearance
                .customize(handle)
                .map_err(|error| self.read_failed("customize", &error))
                .ok()
                .flatten()
        })
    }

    pub fn emote(&self) -> Option<EmoteId> {
        *self.emote.get_or_init(|| {
            let handle = self.handle?;
            self.appearance
                .current_emote(handle)
                .map_err(|error| self.read_failed("emote", &error))
                .ok()
        })
    }

    /// Collection in effect for the actor, read through `registry` on first use.
    pub fn collection<R: ModRegistry + ?Sized>(&self, registry: &R) -> Option<CollectionId> {
        *self.collection.get_or_init(|| {
            let handle = self.handle?;
            registry
                .effective_collection(handle.index)
                .map_err(|error| self.read_failed("collection", &error))
                .ok()
                .flatten()
        })
    }

    fn read_failed(&self, field: &'static str, error: &dyn std::error::Error) {
        debug!(
            target: "profile_core::snapshot",
            actor = %self.identity.incognito(),
            field,
            %error,
            "actor state read failed"
        );
    }
}

/// Snapshot captured on first access.
///
/// The arbitrator hands this to the evaluator for every candidate, so an
/// arbitration where no candidate needs live state never touches the host.
pub struct LazySnapshot<'a, 'b> {
    env: HostEnv<'a>,
    actor: &'b ActorIdentity,
    cell: OnceCell<ActorStateSnapshot<'a>>,
}

impl<'a, 'b> LazySnapshot<'a, 'b> {
    pub fn new(env: HostEnv<'a>, actor: &'b ActorIdentity) -> Self {
        Self {
            env,
            actor,
            cell: OnceCell::new(),
        }
    }

    pub fn actor(&self) -> &ActorIdentity {
        self.actor
    }

    /// The captured snapshot, capturing it now if needed.
    pub fn get(&self) -> Result<&ActorStateSnapshot<'a>, OracleError> {
        if let Some(snapshot) = self.cell.get() {
            return Ok(snapshot);
        }
        let snapshot = ActorStateSnapshot::capture(&self.env, self.actor)?;
        Ok(self.cell.get_or_init(|| snapshot))
    }

    pub fn is_captured(&self) -> bool {
        self.cell.get().is_some()
    }
}
