use profile_content::Scenario;
use profile_core::{
    ActorIdentity, Clan, CollectionId, CollectionSnapshot, Condition, Customize, EngineConfig,
    EngineError, Gender, GearSlot, HostSnapshot, HumanSlot, LiveActor, Profile, ProfileChange,
    ProfileError, ProfileId, Race, RegistryConfig, RegistrySnapshot,
};
use runtime::{
    ArbitrationService, Event, LinkState, ModSettingChange, ReevaluationRequest, RuntimeConfig,
    RuntimeError, SettingChangeKind,
};

fn dancer() -> ActorIdentity {
    ActorIdentity::player("Aria Moonwhisper", 21)
}

fn scenario() -> Scenario {
    Scenario {
        host: HostSnapshot::default().with_local_player(dancer()).with_actor(
            LiveActor::new(dancer(), 0)
                .with_customize(Customize::new(Race::Miqote, Clan::KeeperOfTheMoon, Gender::Female))
                .wearing(HumanSlot::Head, 10)
                .playing(50),
        ),
        registry: RegistrySnapshot::default()
            .with_mod("my_mod", "Fancy Outfit")
            .with_mod("Hair_Pack", "Hair Pack")
            .with_collection(
                CollectionSnapshot::new(1)
                    .assigned_to(0)
                    .with_setting("my_mod", true),
            ),
        profiles: vec![
            Profile::new(ProfileId(1), "Modded")
                .with_priority(10)
                .with_character(dancer())
                .with_condition(Condition::mod_enabled("Fancy Outfit")),
            Profile::new(ProfileId(2), "Casual").with_character(dancer()),
        ],
    }
}

fn selected(service: &ArbitrationService, scenario: &Scenario) -> Option<ProfileId> {
    service
        .select_effective(&scenario.profiles, &dancer())
        .expect("oracles wired")
        .map(|profile| profile.id)
}

fn setting_change() -> ModSettingChange {
    ModSettingChange::new(SettingChangeKind::Enabled, CollectionId(1), "my_mod")
}

#[test]
fn registry_lifecycle_drives_mod_conditions() {
    let scenario = scenario();
    let service = ArbitrationService::from_scenario(RuntimeConfig::default(), &scenario);
    assert_eq!(service.registry().state(), LinkState::Available);
    assert_eq!(selected(&service, &scenario), Some(ProfileId(1)));

    service.registry_disposed();
    assert_eq!(service.registry().state(), LinkState::Disabled);
    assert!(service.catalog().is_empty());
    assert_eq!(selected(&service, &scenario), Some(ProfileId(2)));

    assert_eq!(service.registry_initialized(), LinkState::Available);
    assert_eq!(service.catalog().len(), 2);
    assert_eq!(selected(&service, &scenario), Some(ProfileId(1)));
}

#[test]
fn unsupported_registry_version_keeps_link_disabled() {
    let scenario = scenario();
    let config = RuntimeConfig::default().with_engine(EngineConfig {
        registry: RegistryConfig::new(6, 0),
    });
    let service = ArbitrationService::from_scenario(config, &scenario);

    assert_eq!(service.registry().state(), LinkState::Disabled);
    assert!(!service.catalog().is_valid_mod("my_mod"));
    assert_eq!(selected(&service, &scenario), Some(ProfileId(2)));
    assert!(!service.notify_mod_setting_changed(setting_change()));
}

#[test]
fn applies_reports_evaluator_verdict() {
    let scenario = scenario();
    let service = ArbitrationService::from_scenario(RuntimeConfig::default(), &scenario);

    let hat = Profile::new(ProfileId(3), "Hat").with_condition(Condition::gear(GearSlot::Head, 10));
    let other_hat =
        Profile::new(ProfileId(4), "Other hat").with_condition(Condition::gear(GearSlot::Head, 11));

    assert!(service.applies(&hat, &dancer()).expect("oracles wired"));
    assert!(!service.applies(&other_hat, &dancer()).expect("oracles wired"));
}

#[test]
fn catalog_tracks_installed_mods() {
    let service = ArbitrationService::from_scenario(RuntimeConfig::default(), &scenario());

    let mods = service.catalog().available_mods();
    assert_eq!(mods[0].0, "Hair_Pack");
    assert_eq!(mods[1].0, "my_mod");
    assert!(service.catalog().is_valid_mod("hair_pack"));
    assert!(!service.catalog().is_valid_mod("Fancy Outfit"));
}

#[tokio::test]
async fn setting_changes_request_reevaluation_while_attached() {
    let service = ArbitrationService::from_scenario(RuntimeConfig::default(), &scenario());
    let mut requests = service.subscribe_reevaluation();

    assert!(service.notify_mod_setting_changed(setting_change()));
    assert_eq!(
        requests.recv().await.expect("request"),
        Event::Reevaluation(ReevaluationRequest::ModSettingChanged(setting_change()))
    );

    service.registry_disposed();
    assert_eq!(
        requests.recv().await.expect("request"),
        Event::Reevaluation(ReevaluationRequest::RegistryStateChanged)
    );

    assert!(!service.notify_mod_setting_changed(setting_change()));
    assert!(requests.try_recv().is_err());
}

#[tokio::test]
async fn only_relevant_profile_changes_are_published() {
    let service = ArbitrationService::from_scenario(RuntimeConfig::default(), &scenario());
    let mut requests = service.subscribe_reevaluation();

    assert!(!service.notify_profile_changed(ProfileChange::Renamed, ProfileId(1)));
    assert!(!service.notify_profile_changed(ProfileChange::ChangedTemplate, ProfileId(1)));
    assert!(service.notify_profile_changed(ProfileChange::PriorityChanged, ProfileId(1)));

    assert_eq!(
        requests.recv().await.expect("request"),
        Event::Reevaluation(ReevaluationRequest::ProfileChanged {
            profile: ProfileId(1),
            change: ProfileChange::PriorityChanged,
        })
    );
    assert!(requests.try_recv().is_err());
}

#[tokio::test]
async fn edits_notify_on_success_only() {
    let service = ArbitrationService::from_scenario(RuntimeConfig::default(), &scenario());
    let mut requests = service.subscribe_reevaluation();

    let mut profile = Profile::new(ProfileId(5), "Editable");
    let change = service
        .apply_edit(&mut profile, |p| p.add_condition(Condition::emote(50)))
        .expect("writable profile");
    assert_eq!(change, ProfileChange::ModifiedConditions);
    assert_eq!(
        requests.recv().await.expect("request"),
        Event::Reevaluation(ReevaluationRequest::ProfileChanged {
            profile: ProfileId(5),
            change: ProfileChange::ModifiedConditions,
        })
    );

    let mut temporary = Profile::temporary(ProfileId(6), "Injected", dancer());
    let error = service
        .apply_edit(&mut temporary, |p| p.set_conditions_enabled(false))
        .expect_err("write-protected");
    assert!(matches!(
        error,
        RuntimeError::Profile(ProfileError::WriteProtected(ProfileId(6)))
    ));
    assert_eq!(error.error_code(), "PROFILE_WRITE_PROTECTED");
    assert!(requests.try_recv().is_err());
}
