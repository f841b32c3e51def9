// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Headless driver
//!
//! Runs a scenario frame by frame the way an interactive front end would:
//! each frame reads the elapsed wall-clock time, steps the simulation and
//! lets the trace recorder observe the result.
//!
//! ```bash
//! # Two-planet preset for 10 seconds at ~60 FPS
//! cargo run --release -- --frames 600
//!
//! # A scenario file, replayed with one simulated minute per frame
//! RUST_LOG=debug cargo run --release -- --scenario scenarios/three_body.yaml --fixed-dt 60
//! ```

use anyhow::{ensure, Context, Result};
use clap::Parser;
use gravity_sim::clock::FrameClock;
use gravity_sim::simulation::Simulation;
use gravity_sim::trace::TraceRecorder;
use gravity_sim::SimulationConfig;
use log::info;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "gravity-sim", about = "Planar N-body gravity simulation")]
struct Args {
    /// YAML scenario file; the two-planet preset is used when omitted
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Seed for the preset's random initial velocity
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Number of frames to run
    #[arg(short, long, default_value_t = 600)]
    frames: u64,

    /// Wall-clock pause between frames, in milliseconds
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,

    /// Advance by this many simulated seconds per frame instead of wall-clock time
    #[arg(long)]
    fixed_dt: Option<f64>,
}

fn load_config(args: &Args) -> Result<SimulationConfig> {
    match &args.scenario {
        Some(path) => SimulationConfig::from_path(path)
            .with_context(|| format!("failed to load scenario {}", path.display())),
        None => Ok(SimulationConfig::planets(args.seed)),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args)?;

    let mut sim = Simulation::new(&config).context("invalid scenario")?;
    let mut recorder = TraceRecorder::from_view(&config.view);
    let mut clock = FrameClock::from_config(&config.clock);
    if let Some(dt) = args.fixed_dt {
        ensure!(dt >= 0.0 && dt.is_finite(), "--fixed-dt must be non-negative and finite, got {}", dt);
        clock = clock.with_fixed_dt(dt);
    }

    info!(
        "Running {} bodies for {} frames (time multiplier {})",
        sim.bodies().len(),
        args.frames,
        clock.time_multiplier()
    );

    let initial_energy = sim.total_energy();
    let pause = Duration::from_millis(args.frame_ms);

    for _ in 0..args.frames {
        let tick = clock.tick();
        sim.run_frame(&tick, &mut recorder)?;
        if !pause.is_zero() {
            thread::sleep(pause);
        }
    }

    let final_energy = sim.total_energy();
    let drift = if initial_energy != 0.0 {
        (final_energy - initial_energy) / initial_energy.abs()
    } else {
        final_energy
    };
    info!(
        "Finished after {} steps, {:.1} simulated seconds; trace holds {} points; energy drift {:.3e}",
        sim.steps(),
        sim.elapsed(),
        recorder.trace().len(),
        drift
    );

    Ok(())
}
