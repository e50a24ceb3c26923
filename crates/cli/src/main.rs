//! Command-line front end for the profile arbitration engine.
//!
//! Loads a scenario file (host actors, registry state, profile store) and
//! answers questions about it.
//!
//! ```bash
//! profile-cli --scenario demos/wardrobe.json select --actor "Aria Moonwhisper" --world 21
//! profile-cli --scenario demos/wardrobe.json applies --profile 2 --actor "Aria Moonwhisper" --world 21
//! profile-cli --scenario demos/wardrobe.json --config demos/config.toml mods
//! ```

mod logging;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use profile_content::{ConfigLoader, ScenarioLoader};
use profile_core::{ActorIdentity, ActorKind, ProfileId};
use runtime::{ArbitrationService, RuntimeConfig};

/// Profile arbitration over a scenario file
#[derive(Parser)]
#[command(name = "profile-cli")]
#[command(about = "Inspect which profile applies to an actor", long_about = None)]
#[command(version)]
struct Cli {
    /// Scenario JSON file
    #[arg(long, value_name = "FILE")]
    scenario: PathBuf,

    /// Engine configuration TOML, overriding environment settings
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Print the profile in effect for an actor
    Select(ActorArgs),

    /// Print whether one profile's conditions hold for an actor
    Applies {
        /// Profile id
        #[arg(long, value_name = "ID")]
        profile: u64,

        #[command(flatten)]
        actor: ActorArgs,
    },

    /// Print the installed-mod catalog
    Mods,
}

#[derive(clap::Args)]
struct ActorArgs {
    /// Actor name
    #[arg(long, value_name = "NAME")]
    actor: String,

    /// Home world id
    #[arg(long, default_value_t = 0)]
    world: u16,

    /// Actor kind (player, npc, owned, retainer, special)
    #[arg(long, default_value = "player")]
    kind: ActorKind,
}

impl ActorArgs {
    fn identity(&self) -> ActorIdentity {
        ActorIdentity::new(self.kind, self.actor.clone(), self.world)
    }
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let _guard = logging::setup_logging()?;
    let cli = Cli::parse();

    let mut config = RuntimeConfig::from_env();
    if let Some(path) = &cli.config {
        config = config.with_engine(ConfigLoader::load(path)?);
    }

    let scenario = ScenarioLoader::load(&cli.scenario)?;
    let service = ArbitrationService::from_scenario(config, &scenario);
    tracing::info!(
        profiles = scenario.profiles.len(),
        registry = %service.registry().state(),
        "scenario loaded"
    );

    match cli.command {
        Command::Select(args) => {
            let actor = args.identity();
            match service.select_effective(&scenario.profiles, &actor)? {
                Some(profile) => println!("{} {}", profile.id, profile.name),
                None => println!("no effective profile"),
            }
        }
        Command::Applies { profile, actor } => {
            let profile = scenario
                .profile(ProfileId(profile))
                .with_context(|| format!("No profile with id {profile}"))?;
            let verdict = service.applies(profile, &actor.identity())?;
            println!("{} {}: {}", profile.id, profile.name, verdict);
        }
        Command::Mods => {
            for (directory, name) in service.catalog().available_mods() {
                println!("{directory}\t{name}");
            }
        }
    }

    Ok(())
}
