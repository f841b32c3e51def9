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
//! Inner solar system
//!
//! Runs the Sun and the four inner planets for one Earth year with a fixed
//! one-hour timestep and reports energy drift and Earth's traced path.
//!
//! ```bash
//! cargo run --example solar_system --release
//! ```

use gravity_sim::body::BodyId;
use gravity_sim::config::{BodyConfig, SimulationConfig};
use gravity_sim::simulation::Simulation;
use gravity_sim::trace::{Projection, TraceRecorder, Tracked};

/// Astronomical Unit in meters
const AU: f64 = 1.495978707e11;

const HOUR: f64 = 3600.0;
const YEAR: f64 = 365.25 * 24.0 * HOUR;

/// (mass in kg, orbital distance in AU, orbital speed in m/s)
const BODIES: &[(&str, f64, f64, f64)] = &[
    ("Sun", 1.989e30, 0.0, 0.0),
    ("Mercury", 3.301e23, 0.387, 47_870.0),
    ("Venus", 4.867e24, 0.723, 35_020.0),
    ("Earth", 5.972e24, 1.0, 29_780.0),
    ("Mars", 6.417e23, 1.524, 24_070.0),
];

fn main() {
    env_logger::init();

    let mut config = SimulationConfig::new(
        BODIES
            .iter()
            .map(|&(_, mass, distance, speed)| BodyConfig::new(mass, [distance * AU, 0.0], [0.0, speed]))
            .collect(),
    );
    config.view.world_extent = 4.0 * AU;
    config.view.trace_capacity = 2_000;

    let mut sim = Simulation::new(&config).expect("valid solar system scenario");
    let mut earth = TraceRecorder::new(
        Tracked::Id(BodyId::new(3)),
        Projection::from_view(&config.view),
        config.view.trace_capacity,
    );

    let initial_energy = sim.total_energy();
    let steps = (YEAR / HOUR) as usize;
    for step in 0..steps {
        let log = step % (30 * 24) == 0;
        sim.step_observed(HOUR, log, &mut earth).expect("positive timestep");
    }

    println!("Simulated {:.2} days in {} steps", sim.elapsed() / (24.0 * HOUR), sim.steps());
    for (body, (name, ..)) in sim.bodies().iter().zip(BODIES.iter()) {
        println!(
            "{:>8}: x = {:+.4} AU, y = {:+.4} AU, speed = {:.0} m/s",
            name,
            body.position.x() / AU,
            body.position.y() / AU,
            body.velocity.magnitude()
        );
    }

    let drift = (sim.total_energy() - initial_energy) / initial_energy.abs();
    println!("Relative energy drift: {:.3e}", drift);
    println!(
        "Earth trace: {} of {} points kept, latest at ({:.1}, {:.1})",
        earth.trace().len(),
        earth.trace().capacity(),
        earth.trace().latest().map_or(0.0, |p| p.x),
        earth.trace().latest().map_or(0.0, |p| p.y)
    );
}
