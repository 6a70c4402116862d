//! Abyss Lander headless shell
//!
//! Runs the deterministic simulation under the scripted autopilot, with a
//! synthetic 60 Hz clock by default or wall-clock time with `--realtime`.
//! Prints a JSON run summary on exit; the HUD text lines are logged so a
//! run can be followed without a renderer.

use std::fs;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use abyss_lander::autopilot::Autopilot;
use abyss_lander::consts::*;
use abyss_lander::hud;
use abyss_lander::sim::{GameState, Outcome, Stepper, trench_level};
use abyss_lander::tuning::Tuning;

#[derive(Parser)]
#[command(name = "abyss-lander")]
#[command(about = "Headless lander run: scripted pilot descends the trench")]
struct Args {
    /// Autopilot seed; same seed, same run
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Give up after this many frames
    #[arg(long, default_value_t = 20_000)]
    max_frames: u64,

    /// Log a HUD line every N frames; 0 disables
    #[arg(long, default_value_t = 60)]
    hud_every: u64,

    /// Pace frames with the wall clock instead of a synthetic 60 Hz clock
    #[arg(long)]
    realtime: bool,

    /// JSON file of tuning overrides; missing fields keep their defaults
    #[arg(long)]
    tuning: Option<String>,

    /// Write the run summary to this file instead of stdout
    #[arg(long)]
    summary: Option<String>,
}

/// Serialized at the end of every run
#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    frames: u64,
    ticks: u64,
    sim_seconds: f32,
    outcome: Option<Outcome>,
    fuel_remaining: i32,
    final_x: f32,
    final_y: f32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let tuning = match &args.tuning {
        Some(path) => {
            let json = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            Tuning::from_json(&json).with_context(|| format!("parsing {path}"))?
        }
        None => Tuning::default(),
    };

    log::info!(
        "abyss-lander starting: seed {}, {} clock",
        args.seed,
        if args.realtime { "wall" } else { "synthetic" }
    );

    let mut state = GameState::new(&trench_level(), tuning);
    let mut stepper = Stepper::new();
    let mut pilot = Autopilot::new(args.seed);
    let started = Instant::now();
    let mut frames: u64 = 0;

    loop {
        let input = pilot.next_input(&state);
        if input.quit {
            break;
        }

        if args.realtime {
            stepper.advance(&mut state, &input, started.elapsed().as_secs_f32());
        } else {
            stepper.accumulate(&mut state, &input, SIM_DT);
        }
        frames += 1;

        if args.hud_every > 0 && frames % args.hud_every == 0 {
            let model = hud::build(&state, frames);
            log::debug!(
                "{} | pos ({:.2}, {:.2}) | {} draws",
                model.fuel_line,
                state.player.pos.x,
                state.player.pos.y,
                model.draws.len()
            );
        }

        if frames >= args.max_frames {
            log::warn!("giving up after {} frames", args.max_frames);
            break;
        }
    }

    let model = hud::build(&state, frames);
    if let Some(line) = &model.outcome_line {
        log::info!("{line}");
    }

    let summary = RunSummary {
        seed: args.seed,
        frames,
        ticks: state.ticks,
        sim_seconds: state.sim_time(),
        outcome: state.outcome(),
        fuel_remaining: state.fuel,
        final_x: state.player.pos.x,
        final_y: state.player.pos.y,
    };
    let json = serde_json::to_string_pretty(&summary)?;
    match &args.summary {
        Some(path) => {
            fs::write(path, &json).with_context(|| format!("writing {path}"))?;
            log::info!("summary written to {path}");
        }
        None => println!("{json}"),
    }

    Ok(())
}
