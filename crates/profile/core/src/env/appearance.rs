//! Appearance reads through a live actor handle.
use super::HostError;
use crate::actor::ActorHandle;
use crate::appearance::{Customize, EmoteId, HumanSlot};

/// Reads of a live actor's visible state.
///
/// Every read may fail if the handle went stale since lookup; the evaluator
/// treats a failed read as an unsatisfied condition.
pub trait AppearanceOracle: Send + Sync {
    /// Model id equipped in a slot of the human draw model (0 when empty).
    fn equipped_model(&self, handle: ActorHandle, slot: HumanSlot) -> Result<u16, HostError>;

    /// Race, clan and gender, or `None` if the actor's model is not a
    /// human-customizable model.
    fn customize(&self, handle: ActorHandle) -> Result<Option<Customize>, HostError>;

    /// Emote currently played by the actor ([`EmoteId::NONE`] when idle).
    fn current_emote(&self, handle: ActorHandle) -> Result<EmoteId, HostError>;
}
