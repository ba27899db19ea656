//! Lucky Draw headless runner
//!
//! Usage:
//!   ld-sim run --roster roster.json [--config event.yml] [--seed 42] [--timing instant]
//!   ld-sim validate --roster roster.json [--config event.yml]
//!   ld-sim preset                 - Print the festival event config as JSON

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use ld_core::Roster;
use ld_engine::{
    DrawEngine, DrawError, DrawPhase, EventConfig, RngSource, SharedDrawEngine,
    load_roster_entries,
};
use ld_stage::{PresentationTiming, TimingProfile};

#[derive(Parser)]
#[command(name = "ld-sim", about = "Run a sequential lucky draw event")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw every category and write the report
    Run {
        /// Roster file (.json / .yaml) with coupon entries
        #[arg(short, long)]
        roster: PathBuf,
        /// Event config (.json / .yaml); festival preset when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Seed for a reproducible draw
        #[arg(short, long)]
        seed: Option<u64>,
        /// Pacing profile: ceremony, brisk or instant
        #[arg(short, long)]
        timing: Option<String>,
        /// Report destination; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check roster and config without drawing
    Validate {
        #[arg(short, long)]
        roster: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the built-in festival config
    Preset,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            roster,
            config,
            seed,
            timing,
            output,
        } => run(&roster, config.as_deref(), seed, timing.as_deref(), output.as_deref()),
        Commands::Validate { roster, config } => validate(&roster, config.as_deref()),
        Commands::Preset => {
            println!("{}", EventConfig::festival().to_json_pretty()?);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<EventConfig> {
    match path {
        Some(path) => EventConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(EventConfig::festival()),
    }
}

fn run(
    roster_path: &Path,
    config_path: Option<&Path>,
    seed: Option<u64>,
    timing: Option<&str>,
    output: Option<&Path>,
) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(name) = timing {
        let profile = TimingProfile::from_name(name)
            .with_context(|| format!("Unknown timing profile '{}'", name))?;
        config.timing = PresentationTiming::from_profile(profile);
    }

    let catalog = config.catalog()?;
    let engine = match seed.or(config.seed) {
        Some(seed) => {
            log::info!("Using seed {}", seed);
            DrawEngine::with_source(catalog, RngSource::seeded(seed))
        }
        None => DrawEngine::new(catalog),
    };
    let engine = SharedDrawEngine::new(engine);

    let entries = load_roster_entries(roster_path)
        .with_context(|| format!("Failed to read roster {}", roster_path.display()))?;
    engine.load_roster(entries)?;

    log::info!("Starting '{}'", config.name);
    drive(&engine, &config.timing)?;

    let report = engine.report();
    for shortfall in report.shortfalls() {
        log::warn!(
            "{} finished with {}/{} winners",
            shortfall.name,
            shortfall.winners,
            shortfall.required
        );
    }

    let json = report.to_json_pretty()?;
    match output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("Failed to write report {}", path.display()))?;
            log::info!("Report written to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Draw category by category until the event completes
fn drive(engine: &SharedDrawEngine, timing: &PresentationTiming) -> Result<()> {
    loop {
        match engine.phase() {
            DrawPhase::EventComplete => return Ok(()),
            DrawPhase::CategoryComplete => {
                thread::sleep(timing.category_pause());
                engine.advance()?;
            }
            DrawPhase::Idle | DrawPhase::CategoryActive => match engine.begin_draw() {
                Ok(pending) => {
                    log::info!(
                        "Drawing {} from {} eligible coupons",
                        pending.category_name,
                        pending.pool_size
                    );
                    thread::sleep(timing.reveal_delay());
                    engine.resolve_draw()?;
                }
                Err(DrawError::NoEligibleCandidates { category_id }) => {
                    log::warn!("Pool exhausted for {}; leaving it incomplete", category_id);
                    engine.advance_incomplete()?;
                }
                Err(e) => return Err(e.into()),
            },
            DrawPhase::Drawing => bail!("Draw already in flight"),
        }
    }
}

fn validate(roster_path: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let catalog = config.catalog()?;
    for warning in catalog.warnings() {
        log::warn!("{:?}", warning);
    }

    let entries = load_roster_entries(roster_path)?;
    let roster = Roster::new(entries).context("Roster rejected")?;

    println!(
        "{}: {} categories, {} winner slots",
        config.name,
        catalog.len(),
        catalog.total_winner_slots()
    );
    println!(
        "Roster: {} coupons, {} participants",
        roster.len(),
        roster.participant_count()
    );
    for category in catalog.iter() {
        let qualifying = roster
            .entries()
            .iter()
            .filter(|e| category.eligibility.allows(e))
            .count();
        println!(
            "  {:>2}. {:<32} x{:<3} {} qualifying coupons",
            category.order, category.name, category.winner_count, qualifying
        );
    }
    Ok(())
}
