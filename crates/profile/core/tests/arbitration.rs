use profile_core::condition::codec;
use profile_core::{
    ActorIdentity, Clan, CollectionSnapshot, Condition, ConditionEvaluator, ConditionRecord,
    Customize, FieldValue, Gender, GearSlot, HostEnv, HostSnapshot, HumanSlot, LiveActor,
    Profile, ProfileArbitrator, ProfileId, Race, RegistrySnapshot,
};

fn dancer() -> ActorIdentity {
    ActorIdentity::player("Aria Moonwhisper", 21)
}

fn host() -> HostSnapshot {
    HostSnapshot::default()
        .with_local_player(dancer())
        .with_actor(
            LiveActor::new(dancer(), 0)
                .with_customize(Customize::new(Race::Miqote, Clan::KeeperOfTheMoon, Gender::Female))
                .wearing(HumanSlot::Head, 10)
                .wearing(HumanSlot::Body, 20)
                .playing(50),
        )
}

fn registry() -> RegistrySnapshot {
    RegistrySnapshot::default()
        .with_mod("my_mod", "Fancy Outfit")
        .with_collection(CollectionSnapshot::new(1).assigned_to(0).with_setting("my_mod", true))
}

fn applies(profile: &Profile, registry: &RegistrySnapshot) -> bool {
    let host = host();
    let env = HostEnv::from_snapshots(&host, registry);
    ConditionEvaluator::new(env)
        .applies(profile, &dancer())
        .expect("oracles present")
}

/// Gear conditions: any listed model in a slot satisfies the slot, and every
/// slot mentioned must be satisfied.
#[test]
fn gear_slot_semantics() {
    let either = Profile::new(ProfileId(1), "Either hat")
        .with_condition(Condition::gear(GearSlot::Head, 10))
        .with_condition(Condition::gear(GearSlot::Head, 11));
    assert!(applies(&either, &registry()));

    let neither = Profile::new(ProfileId(2), "Other hats")
        .with_condition(Condition::gear(GearSlot::Head, 12))
        .with_condition(Condition::gear(GearSlot::Head, 11));
    assert!(!applies(&neither, &registry()));

    let outfit = Profile::new(ProfileId(3), "Outfit")
        .with_condition(Condition::gear(GearSlot::Head, 10))
        .with_condition(Condition::gear(GearSlot::Body, 21));
    assert!(!applies(&outfit, &registry()));
}

/// A directory name and a display name that lead to the same mod produce the
/// same verdict, regardless of case.
#[test]
fn mod_identifier_spellings_agree() {
    for identifier in ["my_mod", "MY_MOD", "Fancy Outfit", "fancy outfit"] {
        let profile =
            Profile::new(ProfileId(1), "Modded").with_condition(Condition::mod_enabled(identifier));
        assert!(applies(&profile, &registry()), "identifier {identifier:?}");
    }
}

#[test]
fn unavailable_registry_blocks_mod_conditions() {
    let profile = Profile::new(ProfileId(1), "Modded")
        .with_condition(Condition::mod_enabled("my_mod"))
        .with_condition(Condition::emote(50));
    assert!(!applies(&profile, &RegistrySnapshot::unavailable()));

    let disabled_mod_condition = Profile::new(ProfileId(2), "Emote only")
        .with_condition(Condition::mod_enabled("my_mod").with_enabled(false))
        .with_condition(Condition::emote(50));
    assert!(applies(&disabled_mod_condition, &RegistrySnapshot::unavailable()));
}

/// Arbitration end to end: priority order, temporary override, defaults and
/// the empty outcome.
#[test]
fn arbitration_outcomes() {
    let host = host();
    let registry = registry();
    let arbitrator = ProfileArbitrator::new(HostEnv::from_snapshots(&host, &registry));
    let actor = dancer();

    // 10 beats 5
    let mut profiles = vec![
        Profile::new(ProfileId(1), "Five").with_priority(5).with_character(actor.clone()),
        Profile::new(ProfileId(2), "Ten").with_priority(10).with_character(actor.clone()),
    ];
    let winner = arbitrator.select_effective(&profiles, &actor).expect("oracles present");
    assert_eq!(winner.map(|p| p.id), Some(ProfileId(2)));

    // a temporary profile beats both, whatever its priority
    profiles[0].temporary = true;
    let winner = arbitrator.select_effective(&profiles, &actor).expect("oracles present");
    assert_eq!(winner.map(|p| p.id), Some(ProfileId(1)));

    // all failing
    let failing = vec![
        Profile::new(ProfileId(3), "Dancing")
            .with_character(actor.clone())
            .with_condition(Condition::emote(7)),
    ];
    let winner = arbitrator.select_effective(&failing, &actor).expect("oracles present");
    assert!(winner.is_none());

    // no binding at all: local player default
    let defaults = vec![
        Profile::new(ProfileId(4), "Everyone").as_default().with_priority(100),
        Profile::new(ProfileId(5), "Me").as_default_local_player(),
    ];
    let winner = arbitrator.select_effective(&defaults, &actor).expect("oracles present");
    assert_eq!(winner.map(|p| p.id), Some(ProfileId(5)));

    // no candidates
    let winner = arbitrator.select_effective(&[], &actor).expect("oracles present");
    assert!(winner.is_none());
}

/// Stored conditions survive a round trip and bad records vanish without
/// taking their neighbours with them.
#[test]
fn stored_conditions() {
    let conditions = vec![
        Condition::mod_enabled("my_mod"),
        Condition::gear(GearSlot::RightRing, 4).with_enabled(false),
        Condition::race(Race::Hrothgar, Clan::Lost, Gender::Male).expect("valid pair"),
        Condition::emote(254),
    ];
    let records = codec::encode_all(&conditions);
    assert_eq!(codec::decode_all(&records), conditions);

    let mut bad_race = ConditionRecord::new();
    bad_race.insert("Type".into(), FieldValue::from("Race"));
    bad_race.insert("Race".into(), FieldValue::from("Hyur"));
    bad_race.insert("Clan".into(), FieldValue::from("Xaela"));
    bad_race.insert("Gender".into(), FieldValue::from("Male"));

    let mut mixed = records.clone();
    mixed.insert(1, bad_race);
    assert_eq!(codec::decode_all(&mixed), conditions);
}
