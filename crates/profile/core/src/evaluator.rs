//! Activation policy evaluation.
//!
//! [`ConditionEvaluator::applies`] combines a profile's enabled conditions into
//! one verdict for one actor:
//!
//! - mod conditions: every one must resolve to enabled (AND);
//! - gear conditions: OR within a slot, AND across slots;
//! - race conditions: the actor must match at least one (OR);
//! - emote conditions: the actor must play at least one (OR);
//! - kinds combine with AND, and a kind without conditions is satisfied.
//!
//! Host and registry faults never escape: each one fails the affected kind,
//! and therefore the profile, closed. Only a missing oracle is reported.
use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::actor::ActorIdentity;
use crate::appearance::GearSlot;
use crate::condition::{
    Condition, ConditionPayload, EmoteCondition, GearCondition, ModCondition, RaceCondition,
};
use crate::env::{HostEnv, OracleError};
use crate::profile::Profile;
use crate::resolver::{ModIdentityResolver, ModResolution};
use crate::snapshot::{ActorStateSnapshot, LazySnapshot};

/// Enabled conditions of one profile, split by kind.
#[derive(Default)]
struct ConditionGroups<'p> {
    mods: Vec<&'p ModCondition>,
    gear: BTreeMap<GearSlot, Vec<u16>>,
    races: Vec<&'p RaceCondition>,
    emotes: Vec<&'p EmoteCondition>,
}

impl<'p> ConditionGroups<'p> {
    fn collect(conditions: impl Iterator<Item = &'p Condition>) -> Self {
        let mut groups = Self::default();
        for condition in conditions {
            match &condition.payload {
                ConditionPayload::Mod(m) => groups.mods.push(m),
                ConditionPayload::Gear(GearCondition { slot, model_id }) => {
                    groups.gear.entry(*slot).or_default().push(*model_id);
                }
                ConditionPayload::Race(r) => groups.races.push(r),
                ConditionPayload::Emote(e) => groups.emotes.push(e),
            }
        }
        groups
    }

    fn is_empty(&self) -> bool {
        self.mods.is_empty()
            && self.gear.is_empty()
            && self.races.is_empty()
            && self.emotes.is_empty()
    }
}

/// Evaluates profile conditions against live host and registry state.
pub struct ConditionEvaluator<'a> {
    env: HostEnv<'a>,
}

impl<'a> ConditionEvaluator<'a> {
    pub fn new(env: HostEnv<'a>) -> Self {
        Self { env }
    }

    /// True if `profile`'s activation policy is satisfied for `actor`.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError`] only if live state is needed and the
    /// environment lacks the actor or appearance oracle.
    pub fn applies(&self, profile: &Profile, actor: &ActorIdentity) -> Result<bool, OracleError> {
        let snapshot = LazySnapshot::new(self.env, actor);
        self.applies_with(profile, &snapshot)
    }

    /// Same as [`applies`](Self::applies), reusing a snapshot shared across
    /// the profiles of one arbitration.
    pub fn applies_with(
        &self,
        profile: &Profile,
        snapshot: &LazySnapshot<'a, '_>,
    ) -> Result<bool, OracleError> {
        let groups = ConditionGroups::collect(profile.active_conditions());
        if groups.is_empty() {
            trace!(
                target: "profile_core::evaluator",
                profile = %profile.id,
                "no active conditions"
            );
            return Ok(true);
        }

        let state = snapshot.get()?;
        if !state.is_live() {
            debug!(
                target: "profile_core::evaluator",
                profile = %profile.id,
                actor = %snapshot.actor().incognito(),
                "actor not live, conditions fail"
            );
            return Ok(false);
        }

        Ok(self.mods_satisfied(profile, state, &groups.mods)
            && gear_satisfied(profile, state, &groups.gear)
            && races_satisfied(profile, state, &groups.races)
            && emotes_satisfied(profile, state, &groups.emotes))
    }

    fn mods_satisfied(
        &self,
        profile: &Profile,
        state: &ActorStateSnapshot<'a>,
        mods: &[&ModCondition],
    ) -> bool {
        if mods.is_empty() {
            return true;
        }
        let Some(registry) = self.env.registry() else {
            debug!(
                target: "profile_core::evaluator",
                profile = %profile.id,
                actor = %state.identity().incognito(),
                "mod registry unavailable"
            );
            return false;
        };
        let Some(collection) = state.collection(registry) else {
            debug!(
                target: "profile_core::evaluator",
                profile = %profile.id,
                actor = %state.identity().incognito(),
                "no effective collection"
            );
            return false;
        };

        let resolver = ModIdentityResolver::new(registry);
        mods.iter().all(|condition| {
            let resolution = resolver.resolve_enabled(collection, &condition.mod_identifier);
            if resolution != ModResolution::Enabled {
                debug!(
                    target: "profile_core::evaluator",
                    profile = %profile.id,
                    actor = %state.identity().incognito(),
                    mod_identifier = %condition.mod_identifier,
                    %resolution,
                    "mod condition not met"
                );
            }
            resolution == ModResolution::Enabled
        })
    }
}

fn gear_satisfied(
    profile: &Profile,
    state: &ActorStateSnapshot<'_>,
    gear: &BTreeMap<GearSlot, Vec<u16>>,
) -> bool {
    gear.iter().all(|(slot, wanted)| {
        if slot.human_slot().is_none() {
            trace!(
                target: "profile_core::evaluator",
                profile = %profile.id,
                %slot,
                "slot not rendered by human model, skipped"
            );
            return true;
        }
        match state.equipped(*slot) {
            Some(model) if wanted.contains(&model) => true,
            Some(model) => {
                debug!(
                    target: "profile_core::evaluator",
                    profile = %profile.id,
                    actor = %state.identity().incognito(),
                    %slot,
                    model,
                    "gear condition not met"
                );
                false
            }
            None => false,
        }
    })
}

fn races_satisfied(
    profile: &Profile,
    state: &ActorStateSnapshot<'_>,
    races: &[&RaceCondition],
) -> bool {
    if races.is_empty() {
        return true;
    }
    let Some(customize) = state.customize() else {
        debug!(
            target: "profile_core::evaluator",
            profile = %profile.id,
            actor = %state.identity().incognito(),
            "non-human model, race conditions fail"
        );
        return false;
    };
    let satisfied = races.iter().any(|race| race.matches(&customize));
    if !satisfied {
        debug!(
            target: "profile_core::evaluator",
            profile = %profile.id,
            actor = %state.identity().incognito(),
            %customize,
            "race condition not met"
        );
    }
    satisfied
}

fn emotes_satisfied(
    profile: &Profile,
    state: &ActorStateSnapshot<'_>,
    emotes: &[&EmoteCondition],
) -> bool {
    if emotes.is_empty() {
        return true;
    }
    let Some(current) = state.emote() else {
        return false;
    };
    let satisfied = emotes.iter().any(|emote| emote.emote_id == current);
    if !satisfied {
        debug!(
            target: "profile_core::evaluator",
            profile = %profile.id,
            actor = %state.identity().incognito(),
            emote = %current,
            "emote condition not met"
        );
    }
    satisfied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appearance::{Clan, Customize, Gender, HumanSlot, Race};
    use crate::env::{CollectionSnapshot, HostSnapshot, LiveActor, RegistrySnapshot};
    use crate::profile::ProfileId;

    fn jane() -> ActorIdentity {
        ActorIdentity::player("Jane Doe", 73)
    }

    fn host() -> HostSnapshot {
        HostSnapshot::default().with_actor(
            LiveActor::new(jane(), 3)
                .with_customize(Customize::new(Race::Hyur, Clan::Midlander, Gender::Female))
                .wearing(HumanSlot::Head, 100)
                .wearing(HumanSlot::Feet, 7)
                .playing(50),
        )
    }

    fn registry() -> RegistrySnapshot {
        RegistrySnapshot::default()
            .with_mod("my_mod", "My Mod")
            .with_collection(
                CollectionSnapshot::new(1)
                    .assigned_to(3)
                    .with_setting("my_mod", true),
            )
    }

    fn applies(profile: &Profile, host: &HostSnapshot, registry: &RegistrySnapshot) -> bool {
        let env = HostEnv::from_snapshots(host, registry);
        ConditionEvaluator::new(env)
            .applies(profile, &jane())
            .expect("oracles present")
    }

    fn profile() -> Profile {
        Profile::new(ProfileId(1), "Test")
    }

    #[test]
    fn master_switch_off_applies() {
        let mut profile = profile().with_condition(Condition::gear(GearSlot::Head, 999));
        profile.conditions_enabled = false;
        assert!(applies(&profile, &HostSnapshot::default(), &registry()));
    }

    #[test]
    fn only_disabled_conditions_applies() {
        let profile = profile().with_condition(Condition::emote(1).with_enabled(false));
        assert!(applies(&profile, &HostSnapshot::default(), &registry()));
    }

    #[test]
    fn actor_not_live_fails() {
        let profile = profile().with_condition(Condition::emote(50));
        assert!(!applies(&profile, &HostSnapshot::default(), &registry()));
    }

    #[test]
    fn gear_or_within_slot() {
        let matching = profile()
            .with_condition(Condition::gear(GearSlot::Head, 100))
            .with_condition(Condition::gear(GearSlot::Head, 200));
        assert!(applies(&matching, &host(), &registry()));

        let other = profile()
            .with_condition(Condition::gear(GearSlot::Head, 300))
            .with_condition(Condition::gear(GearSlot::Head, 200));
        assert!(!applies(&other, &host(), &registry()));
    }

    #[test]
    fn gear_and_across_slots() {
        let both = profile()
            .with_condition(Condition::gear(GearSlot::Head, 100))
            .with_condition(Condition::gear(GearSlot::Feet, 7));
        assert!(applies(&both, &host(), &registry()));

        let one_wrong = profile()
            .with_condition(Condition::gear(GearSlot::Head, 100))
            .with_condition(Condition::gear(GearSlot::Feet, 8));
        assert!(!applies(&one_wrong, &host(), &registry()));
    }

    #[test]
    fn race_any_of() {
        let profile = profile()
            .with_condition(
                Condition::race(Race::Elezen, Clan::Wildwood, Gender::Male).expect("valid pair"),
            )
            .with_condition(
                Condition::race(Race::Hyur, Clan::Midlander, Gender::Female).expect("valid pair"),
            );
        assert!(applies(&profile, &host(), &registry()));
    }

    #[test]
    fn race_on_non_human_fails() {
        let host = HostSnapshot::default().with_actor(LiveActor::new(jane(), 3));
        let profile = profile().with_condition(
            Condition::race(Race::Hyur, Clan::Midlander, Gender::Female).expect("valid pair"),
        );
        assert!(!applies(&profile, &host, &registry()));
    }

    #[test]
    fn emote_any_of() {
        let sitting = profile()
            .with_condition(Condition::emote(95))
            .with_condition(Condition::emote(50));
        assert!(applies(&sitting, &host(), &registry()));
        let dancing = profile().with_condition(Condition::emote(7));
        assert!(!applies(&dancing, &host(), &registry()));
    }

    #[test]
    fn mods_require_every_condition() {
        let profile = profile().with_condition(Condition::mod_enabled("My Mod"));
        assert!(applies(&profile, &host(), &registry()));

        let with_missing = profile.with_condition(Condition::mod_enabled("missing"));
        assert!(!applies(&with_missing, &host(), &registry()));
    }

    #[test]
    fn mods_fail_without_registry_or_collection() {
        let profile = profile().with_condition(Condition::mod_enabled("my_mod"));
        assert!(!applies(&profile, &host(), &RegistrySnapshot::unavailable()));

        let unassigned = RegistrySnapshot::default()
            .with_mod("my_mod", "My Mod")
            .with_collection(CollectionSnapshot::new(1).with_setting("my_mod", true));
        assert!(!applies(&profile, &host(), &unassigned));
    }

    #[test]
    fn kinds_combine_with_and() {
        let profile = profile()
            .with_condition(Condition::mod_enabled("my_mod"))
            .with_condition(Condition::gear(GearSlot::Head, 100))
            .with_condition(Condition::emote(51));
        assert!(!applies(&profile, &host(), &registry()));
    }

    #[test]
    fn stale_handle_fails_closed() {
        let host = HostSnapshot::default().with_actor(
            LiveActor::new(jane(), 3)
                .with_customize(Customize::new(Race::Hyur, Clan::Midlander, Gender::Female))
                .playing(50)
                .stale(),
        );
        let profile = profile().with_condition(Condition::emote(50));
        assert!(!applies(&profile, &host, &registry()));
    }

    #[test]
    fn missing_oracle_is_an_error() {
        let profile = profile().with_condition(Condition::emote(50));
        let result = ConditionEvaluator::new(HostEnv::empty()).applies(&profile, &jane());
        assert_eq!(result, Err(OracleError::ActorsNotAvailable));

        let unconditional =
            ConditionEvaluator::new(HostEnv::empty()).applies(&Profile::default(), &jane());
        assert_eq!(unconditional, Ok(true));
    }
}
