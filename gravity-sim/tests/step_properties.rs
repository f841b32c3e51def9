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
//! Step-level properties of the simulation
//!
//! Order independence, zero timesteps, the distance floor and single bodies.

use gravity_sim::body::{Acceleration, Body, BodyId, Mass, Position, Velocity};
use gravity_sim::config::{BodyConfig, SimulationConfig};
use gravity_sim::force::{GravityField, GRAVITATIONAL_CONSTANT, MIN_DISTANCE};
use gravity_sim::integration::{Integrator, SemiImplicitEuler};
use gravity_sim::simulation::Simulation;
use gravity_sim::StepError;

/// Bodies on a jittered grid with explicit ids and varied masses
fn cluster(count: usize) -> Vec<BodyConfig> {
    (0..count)
        .map(|i| {
            let row = (i / 10) as f64;
            let col = (i % 10) as f64;
            let mass = 1.0e25 * (1.0 + (i % 7) as f64);
            let position = [
                1.0e8 + col * 8.0e7 + row * 3.0e6,
                1.0e8 + row * 8.0e7 - col * 2.0e6,
            ];
            let velocity = [(i % 5) as f64 * 1.0e3 - 2.0e3, (i % 3) as f64 * 1.5e3];
            BodyConfig::new(mass, position, velocity).with_id(i as u64)
        })
        .collect()
}

fn find(bodies: &[Body], id: BodyId) -> &Body {
    bodies.iter().find(|b| b.id() == id).expect("body present")
}

fn assert_close(a: f64, b: f64, scale: f64, what: &str) {
    let tolerance = 1e-9 * scale.max(1.0);
    assert!(
        (a - b).abs() <= tolerance,
        "{} differs: {} vs {} (tolerance {})",
        what,
        a,
        b,
        tolerance
    );
}

fn assert_same_state(expected: &[Body], actual: &[Body]) {
    assert_eq!(expected.len(), actual.len());
    for body in expected {
        let other = find(actual, body.id());
        let pos_scale = body.position.x().abs().max(body.position.y().abs());
        let vel_scale = body.velocity.magnitude();
        assert_close(body.position.x(), other.position.x(), pos_scale, "x");
        assert_close(body.position.y(), other.position.y(), pos_scale, "y");
        assert_close(body.velocity.dx(), other.velocity.dx(), vel_scale, "vx");
        assert_close(body.velocity.dy(), other.velocity.dy(), vel_scale, "vy");
    }
}

fn run(bodies: Vec<BodyConfig>, steps: usize, dt: f64) -> Vec<Body> {
    let mut sim = Simulation::new(&SimulationConfig::new(bodies)).unwrap();
    for _ in 0..steps {
        sim.step(dt).unwrap();
    }
    sim.bodies().to_vec()
}

#[test]
fn test_step_is_independent_of_body_order() {
    let forward = cluster(12);
    let mut reversed = forward.clone();
    reversed.reverse();
    let mut rotated = forward.clone();
    rotated.rotate_left(5);

    let expected = run(forward, 50, 20.0);
    assert_same_state(&expected, &run(reversed, 50, 20.0));
    assert_same_state(&expected, &run(rotated, 50, 20.0));
}

#[test]
fn test_large_step_is_independent_of_body_order() {
    // Enough bodies for the read phase to run on the thread pool
    let forward = cluster(80);
    let mut reversed = forward.clone();
    reversed.reverse();

    let expected = run(forward, 5, 20.0);
    assert_same_state(&expected, &run(reversed, 5, 20.0));
}

#[test]
fn test_step_differs_from_in_place_update() {
    // Updating in place lets the second body see the first one already moved
    let configs = cluster(2);
    let config = SimulationConfig::new(configs);
    let field = GravityField::default();
    let dt = 5_000.0;

    let mut in_place = config.build_bodies().unwrap();
    for i in 0..in_place.len() {
        let snapshot = in_place.clone();
        in_place[i].acceleration = field.acceleration_of(&snapshot[i], &snapshot);
        SemiImplicitEuler.advance(&mut in_place[i], dt);
    }

    let mut sim = Simulation::new(&config).unwrap();
    sim.step(dt).unwrap();

    assert_eq!(sim.bodies()[0], in_place[0]);
    assert_ne!(sim.bodies()[1].acceleration, in_place[1].acceleration);
}

#[test]
fn test_zero_dt_leaves_state_unchanged() {
    let config = SimulationConfig::new(cluster(6));
    let mut sim = Simulation::new(&config).unwrap();
    let before = sim.bodies().to_vec();

    sim.step(0.0).unwrap();

    for (body, old) in sim.bodies().iter().zip(before.iter()) {
        assert_eq!(body.position, old.position);
        assert_eq!(body.velocity, old.velocity);
    }
    // Accelerations are still refreshed from the current positions
    assert!(sim.bodies().iter().all(|b| b.acceleration != Acceleration::zero()));
    assert_eq!(sim.elapsed(), 0.0);
    assert_eq!(sim.steps(), 1);
}

#[test]
fn test_invalid_dt_rejected() {
    let mut sim = Simulation::new(&SimulationConfig::new(cluster(3))).unwrap();
    assert_eq!(sim.step(-1.0), Err(StepError::InvalidTimestep(-1.0)));
    assert!(sim.step(f64::INFINITY).is_err());
    assert_eq!(sim.steps(), 0);
}

#[test]
fn test_single_body_moves_in_a_straight_line() {
    let config = SimulationConfig::new(vec![BodyConfig::new(5.972e24, [0.0, 0.0], [100.0, -50.0])]);
    let mut sim = Simulation::new(&config).unwrap();

    for _ in 0..10 {
        sim.step(2.0).unwrap();
    }

    let body = &sim.bodies()[0];
    assert_eq!(body.acceleration, Acceleration::zero());
    assert_eq!(body.velocity, Velocity::new(100.0, -50.0));
    assert!((body.position.x() - 2000.0).abs() < 1e-9);
    assert!((body.position.y() + 1000.0).abs() < 1e-9);
}

#[test]
fn test_coincident_bodies_stay_finite() {
    let config = SimulationConfig::new(vec![
        BodyConfig::new(5.972e26, [3.0e8, 3.0e8], [0.0, 0.0]),
        BodyConfig::new(5.972e28, [3.0e8, 3.0e8], [0.0, 0.0]),
    ]);
    let mut sim = Simulation::new(&config).unwrap();

    for _ in 0..10 {
        sim.step(1_000.0).unwrap();
        assert!(sim.bodies().iter().all(Body::is_valid));
    }

    let bodies = sim.bodies();
    let force = sim.field().pairwise_force(&bodies[0], &bodies[1]);
    let expected = GRAVITATIONAL_CONSTANT * 5.972e26 * 5.972e28 / (MIN_DISTANCE * MIN_DISTANCE);
    assert!(force.is_finite());
    assert!((force - expected).abs() / expected < 1e-12);
}

#[test]
fn test_integrator_uses_updated_velocity() {
    let mut body = Body::new(BodyId::new(0), Mass::new(1.0), Position::zero(), Velocity::new(1.0, 0.0));
    body.acceleration = Acceleration::new(2.0, 0.0);

    SemiImplicitEuler.advance(&mut body, 1.0);

    assert_eq!(body.velocity, Velocity::new(3.0, 0.0));
    assert_eq!(body.position, Position::new(3.0, 0.0));
}
