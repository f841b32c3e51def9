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
//! Point bodies
//!
//! A [`Body`] is one gravitating point mass. Bodies are created once from the
//! scenario configuration and live as long as the simulation that owns them.

mod components;
mod id;

pub use components::{Acceleration, Mass, Position, Velocity};
pub use id::BodyId;

/// A gravitating point mass
///
/// The acceleration is zero at creation and is overwritten on every step
/// before the body is integrated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    id: BodyId,
    mass: Mass,
    /// Position in meters
    pub position: Position,
    /// Velocity in meters per second
    pub velocity: Velocity,
    /// Acceleration computed on the most recent step
    pub acceleration: Acceleration,
}

impl Body {
    /// Create a body with the given initial conditions and zero acceleration
    pub fn new(id: BodyId, mass: Mass, position: Position, velocity: Velocity) -> Self {
        Body {
            id,
            mass,
            position,
            velocity,
            acceleration: Acceleration::zero(),
        }
    }

    /// Get the body's identifier
    pub fn id(&self) -> BodyId {
        self.id
    }

    /// Get the body's mass
    pub fn mass(&self) -> Mass {
        self.mass
    }

    /// Kinetic energy, 0.5 * m * v²
    pub fn kinetic_energy(&self) -> f64 {
        let speed = self.velocity.magnitude();
        0.5 * self.mass.value() * speed * speed
    }

    /// Linear momentum `(m * vx, m * vy)`
    pub fn momentum(&self) -> [f64; 2] {
        let m = self.mass.value();
        [m * self.velocity.dx(), m * self.velocity.dy()]
    }

    /// Check that the kinematic state holds only finite values
    pub fn is_valid(&self) -> bool {
        self.position.is_valid() && self.velocity.is_valid() && self.acceleration.is_valid()
    }
}
