//! Synergia roll analyzer.
//!
//! # Usage
//!
//! ```bash
//! # Odds, simulated average and an example roll for 2d6 against heavy armor
//! synergia analyze 2d6 --armor p --crit t
//!
//! # One roll with its full trace, as JSON
//! synergia roll 1d8 --advantage 1 --vicious --json
//!
//! # Sweep 1d..10d over the standard dice and export CSV
//! synergia scenario --max-dice 10 --output synergia_cenario_output.csv
//! ```
//!
//! Reports go to stdout, logs to stderr.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use synergia_cli::{
    export::export_scenario_csv,
    input::{validate_advantage, validate_max_dice, AttackArgs},
    report::{render_analysis, render_grid, render_outcome},
    CliError, CliResult,
};
use synergia_core::{
    analyze_configuration,
    config::{load_scenario_config, load_toml},
    default_scenario, resolve_attack, resolve_attack_with_rng,
    simulation::analyze_configuration_with_rng,
    SimulationConstants,
};

#[derive(Parser)]
#[command(name = "synergia")]
#[command(about = "Probability and damage analyzer for Synergia attack rolls")]
#[command(version)]
struct Cli {
    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// TOML file overriding the simulation constants
    #[arg(long, global = true)]
    constants: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one attack: exact odds, simulated average and an example roll
    Analyze {
        #[command(flatten)]
        attack: AttackArgs,

        /// Number of simulated rolls (default from constants)
        #[arg(short, long)]
        trials: Option<u32>,

        /// Seed for a reproducible analysis
        #[arg(long)]
        seed: Option<u64>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Resolve a single attack and print its trace
    Roll {
        #[command(flatten)]
        attack: AttackArgs,

        /// Seed for a reproducible roll
        #[arg(long)]
        seed: Option<u64>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Sweep dice counts and die sizes for one scenario and export CSV
    Scenario {
        /// Scenario TOML file (defaults to the bundled scenario)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Largest dice count to test
        #[arg(short, long)]
        max_dice: Option<u32>,

        /// Simulated rolls per grid cell
        #[arg(short, long)]
        trials: Option<u32>,

        /// Base seed for a reproducible sweep
        #[arg(long)]
        seed: Option<u64>,

        /// CSV output path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging to stderr (stdout is for reports); RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true),
        )
        .with(filter)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let constants = match &cli.constants {
        Some(path) => {
            let constants: SimulationConstants = load_toml(path)?;
            constants.validate()?;
            tracing::info!("Loaded simulation constants from {}", path.display());
            constants
        }
        None => SimulationConstants::default(),
    };

    match cli.command {
        Commands::Analyze {
            attack,
            trials,
            seed,
            json,
        } => cmd_analyze(&constants, &attack, trials, seed, json),
        Commands::Roll { attack, seed, json } => cmd_roll(&constants, &attack, seed, json),
        Commands::Scenario {
            config,
            max_dice,
            trials,
            seed,
            output,
        } => cmd_scenario(&constants, config, max_dice, trials, seed, output),
    }
}

/// Analyze a single attack configuration
fn cmd_analyze(
    constants: &SimulationConstants,
    attack: &AttackArgs,
    trials: Option<u32>,
    seed: Option<u64>,
    json: bool,
) -> CliResult<()> {
    let config = attack.to_configuration(constants)?;
    let trials = trials.unwrap_or(constants.trials.single_test);
    tracing::info!("Analyzing {} over {} trials", config, trials);

    let analysis = match seed {
        Some(seed) => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            analyze_configuration_with_rng(&config, trials, &mut rng)?
        }
        None => analyze_configuration(&config, trials)?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print!("{}", render_analysis(&analysis));
    }
    Ok(())
}

/// Resolve and print one attack
fn cmd_roll(
    constants: &SimulationConstants,
    attack: &AttackArgs,
    seed: Option<u64>,
    json: bool,
) -> CliResult<()> {
    let config = attack.to_configuration(constants)?;
    let outcome = match seed {
        Some(seed) => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            resolve_attack_with_rng(&config, &mut rng)?
        }
        None => resolve_attack(&config)?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("Roll: {config}");
        print!("{}", render_outcome(&outcome));
    }
    Ok(())
}

/// Sweep a scenario and export the grid
fn cmd_scenario(
    constants: &SimulationConstants,
    config_path: Option<PathBuf>,
    max_dice: Option<u32>,
    trials: Option<u32>,
    seed: Option<u64>,
    output: Option<PathBuf>,
) -> CliResult<()> {
    let mut scenario = match &config_path {
        Some(path) => load_scenario_config(path)?,
        None => {
            let mut scenario = default_scenario();
            scenario.die_sides = constants.dice.standard_die_sides.clone();
            scenario.trials_per_cell = constants.trials.scenario;
            scenario
        }
    };

    if let Some(max_dice) = max_dice {
        validate_max_dice(max_dice, constants)?;
        scenario.max_dice_count = max_dice;
    }
    if let Some(trials) = trials {
        if trials == 0 {
            return Err(CliError::Input("trials must be at least 1".to_string()));
        }
        scenario.trials_per_cell = trials;
    }
    if seed.is_some() {
        scenario.seed = seed;
    }
    validate_advantage(scenario.profile.advantage, constants)?;
    scenario.validate(constants.dice.max_dice_count)?;

    let grid = scenario.run()?;
    print!("{}", render_grid(&grid));

    let output = output.unwrap_or_else(|| PathBuf::from(&scenario.output));
    export_scenario_csv(&grid, &output)?;
    println!("\nResults exported to {}", output.display());
    Ok(())
}
