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
//! Simulation stepping
//!
//! A step advances every body by one timestep in two phases that never
//! interleave:
//!
//! 1. **Read**: the acceleration of every body is computed from the
//!    positions and masses as they were before the step, into a pending
//!    buffer. No body is modified.
//! 2. **Write**: each body takes its pending acceleration and is integrated.
//!
//! Computing and applying per body in one pass would let later bodies see
//! already-moved earlier ones, making the result depend on iteration order.
//! With the split the outcome is the same for any ordering of the bodies.
//!
//! With the `parallel` feature the read phase runs on the Rayon thread pool
//! for larger body counts. The write phase is always sequential.

use crate::body::{Acceleration, Body, BodyId, Position};
use crate::clock::FrameTick;
use crate::config::SimulationConfig;
use crate::error::{ConfigError, StepError};
use crate::force::GravityField;
use crate::integration::{Integrator, SemiImplicitEuler};
use log::{debug, info, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Body count from which the read phase is split across threads
#[cfg(feature = "parallel")]
const PARALLEL_THRESHOLD: usize = 64;

/// Receives the body set after every completed step
///
/// Observers see the state but cannot change it. Rendering concerns such as
/// the trace of a tracked body live behind this trait so the physics can be
/// driven and tested without them.
pub trait StepObserver {
    /// Called once per step, after both phases have finished
    fn on_step(&mut self, bodies: &[Body], dt: f64);
}

/// Observer that ignores every step
impl StepObserver for () {
    fn on_step(&mut self, _bodies: &[Body], _dt: f64) {}
}

/// Owns the body set and advances it through time
pub struct Simulation<I: Integrator = SemiImplicitEuler> {
    bodies: Vec<Body>,
    pending: Vec<Acceleration>,
    field: GravityField,
    integrator: I,
    elapsed: f64,
    steps: u64,
}

impl Simulation<SemiImplicitEuler> {
    /// Build a simulation from a configuration using semi-implicit Euler
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the configuration violates any
    /// construction-time invariant.
    pub fn new(config: &SimulationConfig) -> Result<Self, ConfigError> {
        Self::with_integrator(config, SemiImplicitEuler)
    }
}

impl<I: Integrator> Simulation<I> {
    /// Build a simulation from a configuration with a specific integrator
    pub fn with_integrator(config: &SimulationConfig, integrator: I) -> Result<Self, ConfigError> {
        let bodies = config.build_bodies()?;
        let field = GravityField::from_constants(&config.physics);

        debug!(
            "Created simulation with {} bodies, integrator {}, G = {:e}, min distance = {:e} m",
            bodies.len(),
            integrator.name(),
            field.g_constant(),
            field.min_distance()
        );

        Ok(Simulation {
            pending: Vec::with_capacity(bodies.len()),
            bodies,
            field,
            integrator,
            elapsed: 0.0,
            steps: 0,
        })
    }

    /// Advance every body by `dt` seconds
    ///
    /// # Errors
    ///
    /// Returns `StepError::InvalidTimestep` for a negative or non-finite
    /// `dt`; the bodies are left untouched in that case.
    pub fn step(&mut self, dt: f64) -> Result<(), StepError> {
        self.step_with_log(dt, false)
    }

    /// Advance every body by `dt` seconds, logging the new state if `log` is set
    ///
    /// The log output is purely diagnostic and has no effect on the state.
    pub fn step_with_log(&mut self, dt: f64, log: bool) -> Result<(), StepError> {
        if let Err(err) = self.integrator.validate_timestep(dt) {
            warn!("{}, step skipped", err);
            return Err(err);
        }

        self.compute_accelerations();
        self.apply_accelerations(dt);

        self.elapsed += dt;
        self.steps += 1;

        if log {
            self.log_state();
        }

        Ok(())
    }

    /// Advance every body and hand the resulting state to `observer`
    pub fn step_observed<O>(&mut self, dt: f64, log: bool, observer: &mut O) -> Result<(), StepError>
    where
        O: StepObserver + ?Sized,
    {
        self.step_with_log(dt, log)?;
        observer.on_step(&self.bodies, dt);
        Ok(())
    }

    /// Run one frame described by a clock tick
    pub fn run_frame<O>(&mut self, tick: &FrameTick, observer: &mut O) -> Result<(), StepError>
    where
        O: StepObserver + ?Sized,
    {
        self.step_observed(tick.dt, tick.log, observer)
    }

    // Read phase: every acceleration comes from the same pre-step snapshot.
    fn compute_accelerations(&mut self) {
        let bodies = &self.bodies;
        let field = &self.field;

        #[cfg(feature = "parallel")]
        {
            if bodies.len() >= PARALLEL_THRESHOLD {
                bodies
                    .par_iter()
                    .map(|body| field.acceleration_of(body, bodies))
                    .collect_into_vec(&mut self.pending);
                return;
            }
        }

        self.pending.clear();
        self.pending
            .extend(bodies.iter().map(|body| field.acceleration_of(body, bodies)));
    }

    // Write phase: each body consumes only its own pending acceleration.
    fn apply_accelerations(&mut self, dt: f64) {
        debug_assert_eq!(self.pending.len(), self.bodies.len());

        for (body, acceleration) in self.bodies.iter_mut().zip(self.pending.iter()) {
            body.acceleration = *acceleration;
            self.integrator.advance(body, dt);
        }
    }

    fn log_state(&self) {
        for (index, body) in self.bodies.iter().enumerate() {
            info!(
                "Body #{} ({}): x = {:e}, y = {:e}, velocity: {:e}, {:e}, acceleration: {:e}, {:e}",
                index,
                body.id(),
                body.position.x(),
                body.position.y(),
                body.velocity.dx(),
                body.velocity.dy(),
                body.acceleration.ax(),
                body.acceleration.ay()
            );
        }
        info!("Step {} done, t = {:.3} s", self.steps, self.elapsed);
    }

    /// All bodies in construction order
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Look up a body by id
    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|body| body.id() == id)
    }

    /// Current positions in construction order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.bodies.iter().map(|body| body.position)
    }

    /// The gravitational field driving the simulation
    pub fn field(&self) -> &GravityField {
        &self.field
    }

    /// The integrator advancing the bodies
    pub fn integrator(&self) -> &I {
        &self.integrator
    }

    /// Total simulated time in seconds
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Number of completed steps
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Total kinetic energy in Joules
    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }

    /// Total softened potential energy in Joules
    pub fn potential_energy(&self) -> f64 {
        self.field.potential_energy(&self.bodies)
    }

    /// Kinetic plus potential energy
    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy() + self.potential_energy()
    }

    /// Total linear momentum
    pub fn momentum(&self) -> [f64; 2] {
        self.bodies.iter().fold([0.0, 0.0], |acc, body| {
            let p = body.momentum();
            [acc[0] + p[0], acc[1] + p[1]]
        })
    }
}
