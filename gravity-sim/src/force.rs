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
//! Newtonian gravitational field between point bodies
//!
//! Every body attracts every other body with a force proportional to the
//! product of their masses and inversely proportional to the square of their
//! separation:
//!
//! **F = G * (m₁ * m₂) / r²**
//!
//! # Softening
//!
//! Separations are floored at a minimum distance before use:
//!
//! **r = max(r_min, |p₂ - p₁|)**
//!
//! Two bodies that coincide or pass very close therefore feel the bounded
//! force of bodies `r_min` apart instead of a singular one. The floor is
//! part of the physics, not an error path.
//!
//! # Decomposition
//!
//! The force on a body toward a neighbour is split along the planar offsets
//! divided by the floored distance, `(Δx / r, Δy / r)`. For separations above
//! the floor that is the unit vector toward the neighbour; below it the
//! components shrink with the offset and vanish for coincident bodies.
//!
//! The exact O(N²) pairwise sum is used; there is no tree approximation.

use crate::body::{Acceleration, Body};
use crate::config::PhysicsConstants;

/// Gravitational constant in m³/(kg⋅s²) used by default
pub const GRAVITATIONAL_CONSTANT: f64 = 6.6753015e-11;

/// Default softening floor for pair separations, in meters
pub const MIN_DISTANCE: f64 = 5_000_000.0;

/// Pairwise gravitational field with a softening floor
///
/// # Example
///
/// ```
/// use gravity_sim::body::{Body, BodyId, Mass, Position, Velocity};
/// use gravity_sim::force::GravityField;
///
/// let field = GravityField::default();
/// let sun = Body::new(BodyId::new(0), Mass::new(2.0e30), Position::zero(), Velocity::zero());
///
/// // A lone body feels nothing
/// assert_eq!(field.acceleration_of(&sun, &[sun]).as_array(), [0.0, 0.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityField {
    g_constant: f64,
    min_distance: f64,
}

impl GravityField {
    /// Create a field with the given gravitational constant and distance floor
    ///
    /// # Panics
    ///
    /// Panics if either `g_constant` or `min_distance` is not positive and
    /// finite.
    pub fn new(g_constant: f64, min_distance: f64) -> Self {
        assert!(
            g_constant > 0.0 && g_constant.is_finite(),
            "Gravitational constant must be positive and finite"
        );
        assert!(
            min_distance > 0.0 && min_distance.is_finite(),
            "Minimum distance must be positive and finite"
        );

        GravityField {
            g_constant,
            min_distance,
        }
    }

    /// Create a field from configured physical constants
    pub fn from_constants(constants: &PhysicsConstants) -> Self {
        Self::new(constants.gravitational_constant, constants.min_distance)
    }

    /// Get the gravitational constant
    pub fn g_constant(&self) -> f64 {
        self.g_constant
    }

    /// Get the softening floor in meters
    pub fn min_distance(&self) -> f64 {
        self.min_distance
    }

    /// Separation between two bodies after applying the softening floor
    pub fn softened_distance(&self, a: &Body, b: &Body) -> f64 {
        a.position.distance_to(&b.position).max(self.min_distance)
    }

    /// Magnitude of the attraction between two bodies, in Newtons
    ///
    /// Symmetric in its arguments.
    pub fn pairwise_force(&self, a: &Body, b: &Body) -> f64 {
        let dist = self.softened_distance(a, b);
        self.g_constant * a.mass().value() * b.mass().value() / (dist * dist)
    }

    /// Net acceleration on `body` from every other body in `all_bodies`
    ///
    /// Bodies sharing `body`'s id are skipped, so `all_bodies` may (and
    /// usually does) contain `body` itself. The result depends only on the
    /// positions and masses in `all_bodies`; nothing is mutated.
    pub fn acceleration_of(&self, body: &Body, all_bodies: &[Body]) -> Acceleration {
        let mass = body.mass().value();
        let mut total = Acceleration::zero();

        for other in all_bodies {
            if other.id() == body.id() {
                continue;
            }

            let dist = self.softened_distance(body, other);
            let force = self.pairwise_force(body, other);
            let sin_f = (other.position.x() - body.position.x()) / dist;
            let cos_f = (other.position.y() - body.position.y()) / dist;

            total += Acceleration::new(force * sin_f / mass, force * cos_f / mass);
        }

        total
    }

    /// Softened gravitational potential energy of the whole set, in Joules
    ///
    /// Sums `-G * m_i * m_j / max(r_min, r_ij)` over unordered pairs.
    pub fn potential_energy(&self, bodies: &[Body]) -> f64 {
        let mut energy = 0.0;
        for (i, a) in bodies.iter().enumerate() {
            for b in &bodies[i + 1..] {
                let dist = self.softened_distance(a, b);
                energy -= self.g_constant * a.mass().value() * b.mass().value() / dist;
            }
        }
        energy
    }
}

impl Default for GravityField {
    fn default() -> Self {
        GravityField::new(GRAVITATIONAL_CONSTANT, MIN_DISTANCE)
    }
}
