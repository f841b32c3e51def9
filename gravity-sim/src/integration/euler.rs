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
//! Semi-implicit (symplectic) Euler integrator
//!
//! ```text
//! v(t + dt) = v(t) + a(t)*dt
//! x(t + dt) = x(t) + v(t + dt)*dt
//! ```
//!
//! The position update uses the velocity *after* it has been updated. Using
//! the old velocity instead gives explicit Euler, whose energy drifts
//! steadily upward on orbits.
//!
//! # Properties
//!
//! - **Symplectic**: bounded long-term energy error on periodic orbits
//! - **First-order accurate**: global error O(dt)
//! - **One force evaluation per step**

use super::Integrator;
use crate::body::Body;

/// Semi-implicit Euler integrator
///
/// # Example
///
/// ```
/// use gravity_sim::body::{Acceleration, Body, BodyId, Mass, Position, Velocity};
/// use gravity_sim::integration::{Integrator, SemiImplicitEuler};
///
/// let mut body = Body::new(BodyId::new(0), Mass::new(1.0), Position::zero(), Velocity::new(1.0, 0.0));
/// body.acceleration = Acceleration::new(2.0, 0.0);
///
/// SemiImplicitEuler.advance(&mut body, 1.0);
/// assert_eq!(body.velocity, Velocity::new(3.0, 0.0));
/// assert_eq!(body.position, Position::new(3.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SemiImplicitEuler;

impl Integrator for SemiImplicitEuler {
    fn name(&self) -> &str {
        "Semi-implicit Euler"
    }

    fn advance(&self, body: &mut Body, dt: f64) {
        let acceleration = body.acceleration;
        body.velocity.accelerate(&acceleration, dt);

        let velocity = body.velocity;
        body.position.advance(&velocity, dt);
    }
}
