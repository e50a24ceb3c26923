//! Selection of the one profile in effect for an actor.
use std::cmp::Reverse;

use tracing::{debug, trace};

use crate::actor::ActorIdentity;
use crate::env::{HostEnv, OracleError};
use crate::evaluator::ConditionEvaluator;
use crate::profile::Profile;
use crate::snapshot::LazySnapshot;

/// Reduces a profile store to at most one effective profile per actor.
///
/// Stateless between calls; re-arbitration is driven from outside.
pub struct ProfileArbitrator<'a> {
    env: HostEnv<'a>,
    evaluator: ConditionEvaluator<'a>,
}

impl<'a> ProfileArbitrator<'a> {
    pub fn new(env: HostEnv<'a>) -> Self {
        Self {
            env,
            evaluator: ConditionEvaluator::new(env),
        }
    }

    /// Enabled profiles that may apply to `actor`, in visiting order.
    ///
    /// Profiles bound to the actor come first in the store's order. Without an
    /// enabled binding, the local player falls back to the default
    /// local-player profile, then any non-special actor to the global default.
    /// The result is sorted temporary-first, then by descending priority;
    /// the sort is stable so ties keep store order.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError`] if the local-player check is needed and the
    /// environment has no actor oracle.
    pub fn candidates<'p>(
        &self,
        profiles: &'p [Profile],
        actor: &ActorIdentity,
    ) -> Result<Vec<&'p Profile>, OracleError> {
        let mut candidates: Vec<&Profile> = profiles
            .iter()
            .filter(|profile| profile.enabled && profile.is_bound_to(actor))
            .collect();

        if candidates.is_empty() && self.env.actors()?.is_local_player(actor) {
            candidates.extend(
                profiles
                    .iter()
                    .find(|profile| profile.enabled && profile.is_default_local_player),
            );
        }
        if candidates.is_empty() && Profile::default_applies_to(actor.kind) {
            candidates.extend(
                profiles
                    .iter()
                    .find(|profile| profile.enabled && profile.is_default),
            );
        }

        candidates.sort_by_key(|profile| (Reverse(profile.temporary), Reverse(profile.priority)));
        Ok(candidates)
    }

    /// The profile in effect for `actor`, if any.
    ///
    /// An enabled temporary candidate wins without evaluation. Otherwise the
    /// first candidate whose conditions apply wins and later candidates are
    /// not evaluated. `Ok(None)` means no profile is in effect.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError`] if a required oracle is missing.
    pub fn select_effective<'p>(
        &self,
        profiles: &'p [Profile],
        actor: &ActorIdentity,
    ) -> Result<Option<&'p Profile>, OracleError> {
        let candidates = self.candidates(profiles, actor)?;
        let snapshot = LazySnapshot::new(self.env, actor);

        for profile in candidates {
            if profile.temporary {
                debug!(
                    target: "profile_core::arbitrator",
                    profile = %profile.id,
                    actor = %actor.incognito(),
                    "temporary profile wins"
                );
                return Ok(Some(profile));
            }
            if self.evaluator.applies_with(profile, &snapshot)? {
                debug!(
                    target: "profile_core::arbitrator",
                    profile = %profile.id,
                    priority = profile.priority,
                    actor = %actor.incognito(),
                    "profile selected"
                );
                return Ok(Some(profile));
            }
            trace!(
                target: "profile_core::arbitrator",
                profile = %profile.id,
                actor = %actor.incognito(),
                "candidate conditions not met"
            );
        }

        debug!(
            target: "profile_core::arbitrator",
            actor = %actor.incognito(),
            "no effective profile"
        );
        Ok(None)
    }

    pub fn evaluator(&self) -> &ConditionEvaluator<'a> {
        &self.evaluator
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::actor::{ActorHandle, ActorKind};
    use crate::appearance::{Clan, Customize, EmoteId, Gender, GearSlot, HumanSlot, Race};
    use crate::condition::Condition;
    use crate::env::{
        ActorOracle, AppearanceOracle, HostError, HostSnapshot, LiveActor, ModRegistry,
        RegistrySnapshot,
    };
    use crate::profile::ProfileId;

    /// Counts emote reads; everything else passes through.
    struct EmoteCounter {
        inner: HostSnapshot,
        emote_reads: AtomicUsize,
    }

    impl AppearanceOracle for EmoteCounter {
        fn equipped_model(&self, handle: ActorHandle, slot: HumanSlot) -> Result<u16, HostError> {
            self.inner.equipped_model(handle, slot)
        }

        fn customize(&self, handle: ActorHandle) -> Result<Option<Customize>, HostError> {
            self.inner.customize(handle)
        }

        fn current_emote(&self, handle: ActorHandle) -> Result<EmoteId, HostError> {
            self.emote_reads.fetch_add(1, Ordering::Relaxed);
            self.inner.current_emote(handle)
        }
    }

    /// Winner id and number of emote reads for one arbitration.
    fn select_counting_emotes(profiles: &[Profile]) -> (Option<ProfileId>, usize) {
        let host = host();
        let counter = EmoteCounter {
            inner: host.clone(),
            emote_reads: AtomicUsize::new(0),
        };
        let registry = RegistrySnapshot::default();
        let env = HostEnv::new(
            Some(&host as &dyn ActorOracle),
            Some(&counter as &dyn AppearanceOracle),
            Some(&registry as &dyn ModRegistry),
        );

        let winner = ProfileArbitrator::new(env)
            .select_effective(profiles, &jane())
            .expect("oracles present")
            .map(|profile| profile.id);
        (winner, counter.emote_reads.load(Ordering::Relaxed))
    }

    fn jane() -> ActorIdentity {
        ActorIdentity::player("Jane Doe", 73)
    }

    fn host() -> HostSnapshot {
        HostSnapshot::default().with_actor(
            LiveActor::new(jane(), 0)
                .with_customize(Customize::new(Race::Viera, Clan::Veena, Gender::Female))
                .wearing(HumanSlot::Head, 5),
        )
    }

    fn select(profiles: &[Profile], host: &HostSnapshot) -> Option<ProfileId> {
        let registry = RegistrySnapshot::default();
        let env = HostEnv::from_snapshots(host, &registry);
        ProfileArbitrator::new(env)
            .select_effective(profiles, &jane())
            .expect("oracles present")
            .map(|profile| profile.id)
    }

    #[test]
    fn higher_priority_wins() {
        let profiles = vec![
            Profile::new(ProfileId(1), "Low").with_priority(5).with_character(jane()),
            Profile::new(ProfileId(2), "High").with_priority(10).with_character(jane()),
        ];
        assert_eq!(select(&profiles, &host()), Some(ProfileId(2)));
    }

    #[test]
    fn ties_keep_store_order() {
        let profiles = vec![
            Profile::new(ProfileId(1), "First").with_character(jane()),
            Profile::new(ProfileId(2), "Second").with_character(jane()),
        ];
        assert_eq!(select(&profiles, &host()), Some(ProfileId(1)));
    }

    #[test]
    fn temporary_wins_without_evaluation() {
        let mut temporary = Profile::temporary(ProfileId(1), "Injected", jane()).with_priority(-5);
        temporary.conditions.push(Condition::gear(GearSlot::Head, 999));
        let profiles = vec![
            temporary,
            Profile::new(ProfileId(2), "High").with_priority(10).with_character(jane()),
        ];
        assert_eq!(select(&profiles, &host()), Some(ProfileId(1)));
    }

    #[test]
    fn failing_candidate_falls_through() {
        let profiles = vec![
            Profile::new(ProfileId(1), "Helmet")
                .with_priority(10)
                .with_character(jane())
                .with_condition(Condition::gear(GearSlot::Head, 6)),
            Profile::new(ProfileId(2), "Fallback").with_character(jane()),
        ];
        assert_eq!(select(&profiles, &host()), Some(ProfileId(2)));
    }

    #[test]
    fn nothing_applies() {
        let profiles = vec![
            Profile::new(ProfileId(1), "Helmet")
                .with_character(jane())
                .with_condition(Condition::gear(GearSlot::Head, 6)),
        ];
        assert_eq!(select(&profiles, &host()), None);
        assert_eq!(select(&[], &host()), None);
    }

    #[test]
    fn disabled_binding_falls_back_to_defaults() {
        let profiles = vec![
            Profile::new(ProfileId(1), "Bound").with_character(jane()).with_enabled(false),
            Profile::new(ProfileId(2), "Default").as_default(),
            Profile::new(ProfileId(3), "Me").as_default_local_player(),
        ];
        assert_eq!(select(&profiles, &host()), Some(ProfileId(2)));

        let as_local = host().with_local_player(jane());
        assert_eq!(select(&profiles, &as_local), Some(ProfileId(3)));
    }

    #[test]
    fn default_skips_special_actors() {
        let retainer = ActorIdentity::new(ActorKind::Retainer, "Helper", 73);
        let profiles = vec![Profile::new(ProfileId(1), "Default").as_default()];
        let host = HostSnapshot::default();
        let registry = RegistrySnapshot::default();
        let arbitrator = ProfileArbitrator::new(HostEnv::from_snapshots(&host, &registry));

        let candidates = arbitrator.candidates(&profiles, &retainer).expect("oracles present");
        assert!(candidates.is_empty());
        let candidates = arbitrator.candidates(&profiles, &jane()).expect("oracles present");
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn later_candidates_are_not_evaluated_once_one_applies() {
        let emote_profile = Profile::new(ProfileId(2), "Dancing")
            .with_priority(1)
            .with_character(jane())
            .with_condition(Condition::emote(50));

        let hat_fits = vec![
            Profile::new(ProfileId(1), "Helmet")
                .with_priority(10)
                .with_character(jane())
                .with_condition(Condition::gear(GearSlot::Head, 5)),
            emote_profile.clone(),
        ];
        assert_eq!(select_counting_emotes(&hat_fits), (Some(ProfileId(1)), 0));

        let hat_differs = vec![
            Profile::new(ProfileId(1), "Helmet")
                .with_priority(10)
                .with_character(jane())
                .with_condition(Condition::gear(GearSlot::Head, 6)),
            emote_profile,
        ];
        assert_eq!(select_counting_emotes(&hat_differs), (None, 1));
    }
}
