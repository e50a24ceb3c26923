//! Actor lookup oracle.
use crate::actor::{ActorHandle, ActorIdentity, TrueActor};

/// Host-side actor enumeration and identity normalization.
///
/// Implementations own the knowledge of which identities are aliases
/// (portrait copies, fitting-room slots) for a real actor and which object
/// table slot an identity currently occupies.
pub trait ActorOracle: Send + Sync {
    /// Normalizes an alias to the actor it stands for.
    ///
    /// Returns the input unchanged (with `matched == false`) when it is not an
    /// alias. An invalid identity in the result means nothing could be resolved.
    fn resolve_true_actor(&self, identity: &ActorIdentity) -> TrueActor;

    /// Returns a handle to the live actor with this identity, ignoring ownership.
    fn find_live_actor(&self, identity: &ActorIdentity) -> Option<ActorHandle>;

    /// True if the identity is the locally logged-in player.
    fn is_local_player(&self, identity: &ActorIdentity) -> bool;
}
