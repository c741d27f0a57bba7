#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Startup Survivor seasons headlessly.

mod season;
mod setup_transfer;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use startup_survivor_core::{GameState, Mode, StatKey, FOUNDERS, SCENARIOS, WELCOME_BANNER};
use startup_survivor_engine::{
    intent_to_option_spec, run_status, runway_months, tension_index, RunExport, RunSetup, TurnLog,
};
use startup_survivor_narrative::{intent_from_value, ScriptedDraftProvider};
use tracing_subscriber::EnvFilter;

use crate::season::{play_season, PlannedMove, SeasonOutcome};

#[derive(Debug, Parser)]
#[command(name = "startup-survivor")]
#[command(about = "Deterministic startup economy, played from the terminal")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plays a season with the scripted narrative, always taking the safest option.
    Simulate {
        #[command(flatten)]
        setup: SetupArgs,
        /// JSON file with the player's own plan.
        #[arg(long)]
        plan: Option<PathBuf>,
        /// Month in which the plan replaces the drafted options.
        #[arg(long, default_value = "1")]
        plan_month: u32,
        /// Writes the run export to this path.
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Prints status, stats and pending effects of a run export.
    Inspect {
        /// Export written by `simulate --export`.
        path: PathBuf,
    },
    /// Prints a one-line setup code that replays the run elsewhere.
    Share {
        #[command(flatten)]
        setup: SetupArgs,
    },
}

#[derive(Debug, Args)]
struct SetupArgs {
    /// TOML run file; flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Setup code printed by `share`; flags override its values.
    #[arg(long, conflicts_with = "config")]
    from_code: Option<String>,
    /// Base seed mixed into every random stream.
    #[arg(long, allow_negative_numbers = true)]
    seed: Option<i64>,
    /// Difficulty mode: realistic, hard, spartan, turkey or extreme.
    #[arg(long, value_parser = parse_mode)]
    mode: Option<Mode>,
    /// Scenario catalog key.
    #[arg(long, value_parser = parse_scenario)]
    scenario: Option<String>,
    /// Founder catalog key.
    #[arg(long, value_parser = parse_founder)]
    founder: Option<String>,
    /// Number of months in the season.
    #[arg(long)]
    season: Option<u32>,
}

impl SetupArgs {
    fn resolve(&self) -> Result<RunSetup> {
        let mut setup = if let Some(path) = &self.config {
            load_run_file(path)?
        } else if let Some(code) = &self.from_code {
            setup_transfer::decode_setup(code).context("failed to read setup code")?
        } else {
            RunSetup::default()
        };

        if let Some(seed) = self.seed {
            setup.base_seed = seed;
        }
        if let Some(mode) = self.mode {
            setup.mode_key = mode.key().to_owned();
        }
        if let Some(scenario) = &self.scenario {
            setup.scenario_key.clone_from(scenario);
        }
        if let Some(founder) = &self.founder {
            setup.founder_key.clone_from(founder);
        }
        if let Some(season) = self.season {
            setup.season_length = season;
        }
        Ok(setup)
    }
}

/// Entry point for the Startup Survivor command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Command::Simulate {
            setup,
            plan,
            plan_month,
            export,
        } => simulate(&setup.resolve()?, plan.as_deref(), plan_month, export.as_deref()),
        Command::Inspect { path } => inspect(&path),
        Command::Share { setup } => {
            println!("{}", setup_transfer::encode_setup(&setup.resolve()?)?);
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn simulate(
    setup: &RunSetup,
    plan: Option<&Path>,
    plan_month: u32,
    export: Option<&Path>,
) -> Result<()> {
    println!("{WELCOME_BANNER}");
    println!(
        "{} / {} / {}",
        setup.scenario().title(),
        setup.founder().name(),
        setup.mode_key
    );

    let planned = plan
        .map(|path| load_plan(path, plan_month, setup))
        .transpose()?;
    let SeasonOutcome {
        config,
        state,
        logs,
        status,
    } = play_season(setup, &mut ScriptedDraftProvider::new(), planned)?;

    for log in &logs {
        print_turn(log);
    }
    println!("Result: {status:?} after {} months", logs.len());
    print_state(&state, config.total_expenses());

    if let Some(path) = export {
        let text = RunExport::new(config, state, logs).to_json()?;
        fs::write(path, text)
            .with_context(|| format!("failed to write run export to {}", path.display()))?;
        println!("Export written to {}", path.display());
    }
    Ok(())
}

fn inspect(path: &Path) -> Result<()> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read run export at {}", path.display()))?;
    let export = RunExport::from_json(&text)
        .with_context(|| format!("failed to parse run export at {}", path.display()))?;

    let status = run_status(&export.state, &export.config);
    println!(
        "Month {} of {}: {status:?} ({} turns logged)",
        export.state.month(),
        export.config.season_length,
        export.logs.len()
    );
    print_state(&export.state, export.config.total_expenses());

    let queue = export.state.delayed_queue();
    if queue.is_empty() {
        println!("No pending effects");
    }
    for effect in queue {
        println!(
            "  due month {:>2} (from {:>2}): {}",
            effect.due_month(),
            effect.from_month(),
            effect.hint()
        );
    }
    Ok(())
}

fn load_run_file(path: &Path) -> Result<RunSetup> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read run file at {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("failed to parse run file at {}", path.display()))
}

fn load_plan(path: &Path, month: u32, setup: &RunSetup) -> Result<PlannedMove> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read plan at {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&contents)
        .with_context(|| format!("plan at {} is not JSON", path.display()))?;
    let intent = intent_from_value(&value)
        .with_context(|| format!("failed to interpret plan at {}", path.display()))?;
    Ok(PlannedMove {
        month,
        option: intent_to_option_spec(&intent, month, &setup.engine_config()),
    })
}

fn print_turn(log: &TurnLog) {
    println!(
        "Month {:>2}: {} {:<32} cash {:>12.0} -> {:>12.0}",
        log.month,
        log.choice,
        log.choice_label,
        log.before.cash(),
        log.after.cash()
    );
    for due in &log.due_effects {
        println!("          delayed from month {}: {}", due.from_month, due.hint);
    }
}

fn print_state(state: &GameState, burn: f64) {
    let stats = state.stats();
    for key in StatKey::ALL {
        println!("  {:<13} {:>12.3}", key.as_str(), stats.get(key));
    }
    println!(
        "  runway {:.1} months, tension {:.2}",
        runway_months(stats.cash(), burn),
        tension_index(stats, burn)
    );
}

fn parse_mode(value: &str) -> Result<Mode, String> {
    let lowered = value.trim().to_lowercase();
    let by_name = match lowered.as_str() {
        "realistic" => Some(Mode::Realistic),
        "hard" => Some(Mode::Hard),
        "spartan" => Some(Mode::Spartan),
        "turkey" => Some(Mode::Turkey),
        "extreme" => Some(Mode::Extreme),
        _ => None,
    };
    by_name
        .or_else(|| {
            Mode::ALL
                .into_iter()
                .find(|mode| mode.key().to_lowercase() == lowered)
        })
        .ok_or_else(|| format!("unknown mode '{value}'"))
}

fn parse_scenario(value: &str) -> Result<String, String> {
    SCENARIOS
        .iter()
        .find(|scenario| scenario.key() == value)
        .map(|scenario| scenario.key().to_owned())
        .ok_or_else(|| {
            let keys: Vec<&str> = SCENARIOS.iter().map(|scenario| scenario.key()).collect();
            format!("unknown scenario '{value}', expected one of {}", keys.join(", "))
        })
}

fn parse_founder(value: &str) -> Result<String, String> {
    FOUNDERS
        .iter()
        .find(|founder| founder.key() == value)
        .map(|founder| founder.key().to_owned())
        .ok_or_else(|| {
            let keys: Vec<&str> = FOUNDERS.iter().map(|founder| founder.key()).collect();
            format!("unknown founder '{value}', expected one of {}", keys.join(", "))
        })
}
