//! Setup Randomiser - Entry Point
//!
//! Loads a setup scenario, runs one or more resolve passes over it and prints
//! the resulting seat table.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::Serialize;

use setup_randomiser::core::error::Result;
use setup_randomiser::data::load_setup;
use setup_randomiser::engine::{Randomiser, ResolveReport};
use setup_randomiser::state::GameStateProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Assign leaders, civilizations and mementos to computer seats
#[derive(Parser, Debug)]
#[command(name = "setup-randomiser")]
#[command(about = "Resolve random leaders, civilizations and mementos for a game setup")]
struct Args {
    /// Setup scenario (TOML)
    #[arg(long, default_value = "data/setup/antiquity.toml")]
    setup: PathBuf,

    /// Random seed for deterministic runs, overrides the scenario's seed
    #[arg(long)]
    seed: Option<u64>,

    /// Number of passes to run back to back
    #[arg(long, default_value_t = 1)]
    passes: u32,

    /// Run as an age transition pass
    #[arg(long)]
    age_transition: bool,

    /// Keep the seats' current leaders instead of drawing random ones
    #[arg(long)]
    keep_leaders: bool,

    /// Run with computer memento assignment switched off
    #[arg(long)]
    disable: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Serialize)]
struct RunOutput {
    seed: u64,
    passes: Vec<ResolveReport>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("setup_randomiser=info")
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut setup = load_setup(&args.setup)?;

    let seed = args
        .seed
        .or(setup.engine.seed)
        .unwrap_or_else(rand::random);
    setup.engine.seed = Some(seed);
    if args.disable {
        setup.table.set_mode_enabled(false);
    }

    tracing::info!("Setup Randomiser starting with seed {}", seed);
    let mut randomiser = Randomiser::new(setup.catalog, setup.engine)?;

    let mut passes = Vec::new();
    for _ in 0..args.passes.max(1) {
        let report = randomiser.resolve(&mut setup.table, !args.keep_leaders, args.age_transition);
        passes.push(report);
    }

    match args.format {
        OutputFormat::Json => {
            let output = RunOutput { seed, passes };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            for (i, report) in passes.iter().enumerate() {
                print_report(i + 1, report);
            }
            println!("Age: {}  Seed: {}", setup.table.age(), seed);
        }
    }

    Ok(())
}

fn print_report(pass: usize, report: &ResolveReport) {
    println!(
        "=== Pass {} ({}{}) ===",
        pass,
        if report.enabled { "enabled" } else { "disabled" },
        if report.age_transition { ", age transition" } else { "" }
    );
    println!(
        "{:<5} {:<10} {:<28} {:<28} {:<28} {:<28} {}",
        "Seat", "Status", "Leader", "Civilization", "Major memento", "Minor memento", "Source"
    );
    for seat in &report.seats {
        println!(
            "{:<5} {:<10} {:<28} {:<28} {:<28} {:<28} {:?}",
            seat.seat,
            format!("{:?}", seat.status),
            display_or_random(seat.leader.as_ref()),
            display_or_random(seat.faction.as_ref()),
            display_or_none(seat.major_memento.as_ref()),
            display_or_none(seat.minor_memento.as_ref()),
            seat.source
        );
    }
    println!(
        "Contests: {}  Relocated: {:?}  Deferred: {:?}",
        report.contests, report.relocated, report.deferred
    );
}

fn display_or_random<T: std::fmt::Display>(value: Option<&T>) -> String {
    value.map_or_else(|| "RANDOM".to_string(), |v| v.to_string())
}

fn display_or_none<T: std::fmt::Display>(value: Option<&T>) -> String {
    value.map_or_else(|| "NONE".to_string(), |v| v.to_string())
}
