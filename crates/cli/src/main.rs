#![deny(unsafe_code)]
//! Headless CLI driver for the flowfield simulation.
//!
//! Subcommands:
//! - `run` — execute a scenario's tick loop and report the live strokes
//! - `probe` — build the field (seeding + brushes) and print sampled vectors
//!
//! This binary plays the host-loop role: it owns the field and the stroke
//! system, derives tick timestamps, and hands results to stdout the way a
//! presentation layer would consume them.

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use flowfield_core::Scenario;
use glam::DVec2;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "flowfield", about = "Vector-field stroke simulation driver")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a scenario's tick loop and report the surviving strokes.
    Run {
        /// Scenario file (JSON). Omit to use the built-in default scenario.
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        /// Override the scenario's tick count.
        #[arg(short, long)]
        ticks: Option<usize>,

        /// Override the scenario's PRNG seed.
        #[arg(long)]
        seed: Option<u64>,

        /// Print the live-stroke count every N ticks (0 = summary only).
        #[arg(long, default_value_t = 0)]
        trace_every: usize,
    },
    /// Build the field (seeding + brushes) and print sampled force vectors.
    Probe {
        /// Scenario file (JSON). Omit to use the built-in default scenario.
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        /// Sample position x, in world units. Omit both coordinates to dump
        /// the whole grid.
        #[arg(short = 'x', long)]
        at_x: Option<f64>,

        /// Sample position y, in world units.
        #[arg(short = 'y', long)]
        at_y: Option<f64>,
    },
}

/// Loads a scenario from a file, or returns the built-in default.
fn load_scenario(path: Option<&Path>) -> Result<Scenario, CliError> {
    let Some(path) = path else {
        return Ok(Scenario::default());
    };
    let text = std::fs::read_to_string(path)?;
    let scenario: Scenario = serde_json::from_str(&text)
        .map_err(|e| CliError::Input(format!("invalid scenario {}: {e}", path.display())))?;
    Ok(scenario)
}

/// Summarizes the final stroke population as a JSON value.
fn run_summary(scenario: &Scenario, system: &flowfield_core::StrokeSystem) -> serde_json::Value {
    let strokes: Vec<serde_json::Value> = system
        .strokes()
        .iter()
        .map(|s| {
            serde_json::json!({
                "x": s.position().x,
                "y": s.position().y,
                "vx": s.velocity().x,
                "vy": s.velocity().y,
            })
        })
        .collect();
    serde_json::json!({
        "ticks": scenario.ticks,
        "seed": scenario.seed,
        "live": system.len(),
        "strokes": strokes,
    })
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Run {
            scenario,
            ticks,
            seed,
            trace_every,
        } => {
            let mut scenario = load_scenario(scenario.as_deref())?;
            if let Some(ticks) = ticks {
                scenario.ticks = ticks;
            }
            if let Some(seed) = seed {
                scenario.seed = seed;
            }
            scenario.validate()?;

            let field = scenario.build_field()?;
            let mut system = scenario.build_system()?;
            for tick in 0..scenario.ticks {
                system.update(&field, scenario.tick_time(tick));
                if trace_every > 0 && tick % trace_every == 0 {
                    eprintln!("tick {tick}: {} live strokes", system.len());
                }
            }

            if cli.json {
                let summary = run_summary(&scenario, &system);
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!(
                    "ran {} ticks (seed {}): {} live strokes",
                    scenario.ticks,
                    scenario.seed,
                    system.len()
                );
                for stroke in system.strokes() {
                    let p = stroke.position();
                    let v = stroke.velocity();
                    println!("  ({:.3}, {:.3}) v=({:.3}, {:.3})", p.x, p.y, v.x, v.y);
                }
            }
        }
        Command::Probe {
            scenario,
            at_x,
            at_y,
        } => {
            let scenario = load_scenario(scenario.as_deref())?;
            scenario.validate()?;
            let field = scenario.build_field()?;

            match (at_x, at_y) {
                (Some(x), Some(y)) => {
                    let force = field.get_force(DVec2::new(x, y));
                    if cli.json {
                        let sample = serde_json::json!({
                            "x": x, "y": y, "fx": force.x, "fy": force.y,
                        });
                        println!("{}", serde_json::to_string_pretty(&sample)?);
                    } else {
                        println!("({x}, {y}) -> ({}, {})", force.x, force.y);
                    }
                }
                (None, None) => {
                    if cli.json {
                        let cells: Vec<serde_json::Value> = field
                            .iter()
                            .map(|(row, column, center, force)| {
                                serde_json::json!({
                                    "row": row,
                                    "column": column,
                                    "cx": center.x,
                                    "cy": center.y,
                                    "fx": force.x,
                                    "fy": force.y,
                                })
                            })
                            .collect();
                        let grid = serde_json::json!({
                            "rows": field.rows(),
                            "columns": field.columns(),
                            "cells": cells,
                        });
                        println!("{}", serde_json::to_string_pretty(&grid)?);
                    } else {
                        for (row, column, center, force) in field.iter() {
                            println!(
                                "({row}, {column}) at ({:.1}, {:.1}) -> ({}, {})",
                                center.x, center.y, force.x, force.y
                            );
                        }
                    }
                }
                _ => {
                    return Err(CliError::Input(
                        "probe needs both --at-x and --at-y, or neither".into(),
                    ));
                }
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
