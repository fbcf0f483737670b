//! `slots` CLI — check subscription requests against a teacher's weekly
//! availability and resolve booking conflicts from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Classify the requested intervals as available or conflicting
//! slots check -i scenario.json
//!
//! # Show each collision with its overlap in minutes
//! slots check -i scenario.json --details
//!
//! # List bookable units (60 minutes unless configured otherwise)
//! slots units -i scenario.json --unit-minutes 30
//!
//! # Free gaps on one day
//! slots free -i scenario.json --day mon
//!
//! # Accept the request, or pick replacement units when it conflicts
//! slots accept -i scenario.json --pick mon@9:00-10:00
//!
//! # Convert a clock time
//! slots clock 17:30 --12h
//! ```
//!
//! Logs go to stderr; set `RUST_LOG=info` to see workflow transitions.

mod scenario;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use slot_engine::{
    format_clock_12h, format_clock_24h, generate_day_units, parse_clock, AcceptanceWorkflow,
    AvailabilityIndex, DayOfWeek, EngineConfig, Interval, WorkflowState,
};
use std::io::{self, Read};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::scenario::{parse_pick, Scenario};

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Teacher availability matching and booking-conflict resolution"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON engine config file (e.g. {"unit_minutes": 45})
    #[arg(long, global = true)]
    config: Option<String>,

    /// Bookable unit length in minutes (overrides config and SLOTS_UNIT_MINUTES)
    #[arg(long, global = true)]
    unit_minutes: Option<u16>,
}

#[derive(Args)]
struct Io {
    /// Scenario file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify requested intervals as available or conflicting
    Check {
        #[command(flatten)]
        io: Io,
        /// List every colliding reservation with its overlap in minutes
        #[arg(long)]
        details: bool,
    },
    /// List bookable units for the week, or for one day
    Units {
        #[command(flatten)]
        io: Io,
        /// Restrict to one day (e.g. "mon", "friday")
        #[arg(long)]
        day: Option<String>,
    },
    /// Free gaps on one day after other owners' reservations
    Free {
        #[command(flatten)]
        io: Io,
        #[arg(long)]
        day: String,
    },
    /// Run the acceptance workflow and print the committed decision
    Accept {
        #[command(flatten)]
        io: Io,
        /// Replacement unit as DAY@START-END; repeat for several
        #[arg(long = "pick")]
        picks: Vec<String>,
    },
    /// Convert a clock time between 24h and 12h display
    Clock {
        time: String,
        /// Print as 12h with AM/PM
        #[arg(long = "12h")]
        twelve_hour: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(cli.config.as_deref(), cli.unit_minutes)?;

    match cli.command {
        Commands::Check { io, details } => {
            let scenario = read_scenario(io.input.as_deref())?;
            let json = if details {
                let conflicts =
                    slot_engine::find_conflicts(&scenario.request, &scenario.reservations, &scenario.owner);
                serde_json::to_string_pretty(&conflicts)?
            } else {
                let report =
                    slot_engine::check_all(&scenario.request, &scenario.reservations, &scenario.owner);
                serde_json::to_string_pretty(&report)?
            };
            write_output(io.output.as_deref(), &json)?;
        }
        Commands::Units { io, day } => {
            let scenario = read_scenario(io.input.as_deref())?;
            let index = AvailabilityIndex::new(scenario.slots.clone());
            let json = match day {
                Some(day) => {
                    let day: DayOfWeek = day.parse()?;
                    let units = generate_day_units(
                        &index,
                        day,
                        config.unit_minutes,
                        &scenario.reservations,
                        &scenario.owner,
                    );
                    serde_json::to_string_pretty(&units)?
                }
                None => {
                    let week = slot_engine::generate_week_units(
                        &index,
                        config.unit_minutes,
                        &scenario.reservations,
                        &scenario.owner,
                    );
                    serde_json::to_string_pretty(&week)?
                }
            };
            write_output(io.output.as_deref(), &json)?;
        }
        Commands::Free { io, day } => {
            let scenario = read_scenario(io.input.as_deref())?;
            let day: DayOfWeek = day.parse()?;
            let windows = AvailabilityIndex::new(scenario.slots.clone()).free_windows(
                day,
                &scenario.reservations,
                &scenario.owner,
            );
            write_output(io.output.as_deref(), &serde_json::to_string_pretty(&windows)?)?;
        }
        Commands::Accept { io, picks } => {
            let scenario = read_scenario(io.input.as_deref())?;
            let picks = picks
                .iter()
                .map(|p| parse_pick(p))
                .collect::<Result<Vec<Interval>>>()?;
            let json = run_acceptance(&scenario, &picks, config)?;
            write_output(io.output.as_deref(), &json)?;
        }
        Commands::Clock { time, twelve_hour } => {
            let t = parse_clock(&time).with_context(|| format!("Failed to parse clock time '{}'", time))?;
            if twelve_hour {
                println!("{}", format_clock_12h(t));
            } else {
                println!("{}", format_clock_24h(t));
            }
        }
    }

    Ok(())
}

/// Defaults, then the config file, then `SLOTS_UNIT_MINUTES`, then `--unit-minutes`.
fn resolve_config(path: Option<&str>, unit_minutes: Option<u16>) -> Result<EngineConfig> {
    let base = match path {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path))?,
        None => EngineConfig::default(),
    };
    let mut config = base.with_env_overrides()?;
    if let Some(minutes) = unit_minutes {
        config.unit_minutes = minutes;
    }
    let config = config.validate()?;
    debug!(
        unit_minutes = config.unit_minutes,
        file = path.unwrap_or("-"),
        "resolved engine config"
    );
    Ok(config)
}

/// Drive the workflow to a committed decision and render it as JSON.
///
/// A conflicting request with no picks fails with the conflicting intervals
/// and the units still free, so the operator can choose replacements. Picks
/// are rejected when the request is available as-is.
fn run_acceptance(scenario: &Scenario, picks: &[Interval], config: EngineConfig) -> Result<String> {
    let calendar = scenario.calendar()?;
    let mut workflow = AcceptanceWorkflow::start(
        &calendar,
        scenario.teacher.clone(),
        scenario.owner.clone(),
        scenario.request.clone(),
        config,
    )
    .context("Failed to start acceptance workflow")?;

    let decision = match workflow.state() {
        WorkflowState::Available => {
            if !picks.is_empty() {
                anyhow::bail!(
                    "Requested schedule is available as-is; --pick only applies when it conflicts"
                );
            }
            workflow.accept()?
        }
        _ => {
            let conflicting = join(&workflow.report().conflicting);
            let free: Vec<Interval> = workflow
                .begin_reselect()?
                .values()
                .flatten()
                .filter(|u| !u.reserved)
                .map(|u| u.interval())
                .collect();

            if picks.is_empty() {
                anyhow::bail!(
                    "Requested schedule conflicts: {}. Free units: {}. Re-run with --pick DAY@START-END",
                    conflicting,
                    if free.is_empty() { "none".to_string() } else { join(&free) }
                );
            }

            for pick in picks {
                workflow.toggle_unit(*pick)?;
            }
            workflow.confirm_selection()?
        }
    };

    Ok(serde_json::to_string_pretty(&decision)?)
}

fn join(intervals: &[Interval]) -> String {
    intervals
        .iter()
        .map(Interval::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn read_scenario(path: Option<&str>) -> Result<Scenario> {
    Scenario::from_json(&read_input(path)?)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
