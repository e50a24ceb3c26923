use std::fs;

use profile_content::{ConfigLoader, ContentFactory, ScenarioLoader};
use profile_core::{
    ActorIdentity, ConditionEvaluator, ConditionKind, ProfileArbitrator, ProfileId, RegistryCall,
};
use tempfile::TempDir;

const WARDROBE: &str = r#"{
  "host": {
    "local_player": { "kind": "Player", "name": "Aria Moonwhisper", "home_world": 21 },
    "actors": [
      {
        "identity": { "kind": "Player", "name": "Aria Moonwhisper", "home_world": 21 },
        "index": 0,
        "gear": [{ "slot": "Head", "model_id": 10 }],
        "customize": { "race": "Miqote", "clan": "KeeperOfTheMoon", "gender": "Female" },
        "emote": 50
      }
    ]
  },
  "registry": {
    "api_version": { "major": 5, "minor": 9 },
    "mods": [{ "directory": "my_mod", "name": "Fancy Outfit" }],
    "collections": [
      { "id": 1, "actors": [0], "settings": [{ "directory": "my_mod", "enabled": true }] }
    ],
    "faults": ["InstalledMods"]
  },
  "profiles": [
    {
      "id": 1,
      "name": "Helmet",
      "priority": 20,
      "characters": [{ "kind": "Player", "name": "Aria Moonwhisper", "home_world": 21 }],
      "conditions": [
        { "Type": "Gear", "Slot": "Head", "ModelId": 11 },
        { "Type": "Teleport", "Zone": 4 }
      ]
    },
    {
      "id": 2,
      "name": "Outfit",
      "priority": 10,
      "characters": [{ "kind": "Player", "name": "Aria Moonwhisper", "home_world": 21 }],
      "conditions": [
        { "Type": "Mod", "ModName": "Fancy Outfit" },
        { "Type": "Race", "Race": "Hyur", "Clan": "Xaela", "Gender": "Male" },
        { "Type": "Emote", "EmoteId": 50, "Enabled": true },
        "not a record"
      ]
    }
  ]
}"#;

fn write_data_dir() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    fs::create_dir(dir.path().join("scenarios")).expect("scenarios dir");
    fs::write(dir.path().join("scenarios/wardrobe.json"), WARDROBE).expect("write scenario");
    fs::write(dir.path().join("scenarios/notes.txt"), "ignored").expect("write notes");
    fs::write(
        dir.path().join("config.toml"),
        "[registry]\nrequired_major = 5\nrequired_minor = 9\n",
    )
    .expect("write config");
    dir
}

#[test]
fn scenario_file_drives_arbitration() {
    let dir = write_data_dir();
    let scenario =
        ScenarioLoader::load(&dir.path().join("scenarios/wardrobe.json")).expect("scenario loads");

    // unknown kinds, invalid race pairs and non-records are dropped on load
    let helmet = scenario.profile(ProfileId(1)).expect("profile 1");
    assert_eq!(helmet.conditions.len(), 1);
    let outfit = scenario.profile(ProfileId(2)).expect("profile 2");
    let kinds: Vec<_> = outfit.conditions.iter().map(|c| c.kind()).collect();
    assert_eq!(kinds, vec![ConditionKind::Mod, ConditionKind::Emote]);
    assert!(scenario.registry.faults.contains(&RegistryCall::InstalledMods));

    let actor = ActorIdentity::player("Aria Moonwhisper", 21);
    let evaluator = ConditionEvaluator::new(scenario.env());
    assert_eq!(evaluator.applies(helmet, &actor), Ok(false));
    assert_eq!(evaluator.applies(outfit, &actor), Ok(true));

    let winner = ProfileArbitrator::new(scenario.env())
        .select_effective(&scenario.profiles, &actor)
        .expect("oracles present");
    assert_eq!(winner.map(|p| p.id), Some(ProfileId(2)));
}

#[test]
fn factory_reads_data_dir() {
    let dir = write_data_dir();
    let factory = ContentFactory::new(dir.path());

    let config = factory.load_config().expect("config loads");
    assert_eq!(config.registry.required_minor, 9);
    assert_eq!(factory.scenario_names().expect("listing"), vec!["wardrobe"]);
    assert_eq!(
        factory.load_scenario("wardrobe").expect("scenario loads").profiles.len(),
        2
    );
}

#[test]
fn missing_files_are_errors() {
    let dir = TempDir::new().expect("temp dir");
    assert!(ConfigLoader::load(&dir.path().join("config.toml")).is_err());
    assert!(ScenarioLoader::load(&dir.path().join("none.json")).is_err());

    let factory = ContentFactory::new(dir.path());
    assert!(factory.load_config().is_ok());
    assert!(factory.load_scenario("none").is_err());
}

#[test]
fn malformed_scenario_reports_path() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ \"profiles\": [ }").expect("write");
    let error = ScenarioLoader::load(&path).expect_err("broken json");
    assert!(error.to_string().contains("broken.json"));
}
