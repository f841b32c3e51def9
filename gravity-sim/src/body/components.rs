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
//! Planar kinematic quantities
//!
//! Position, velocity, acceleration and mass of a point body. All values are
//! double precision SI units: meters, meters per second, meters per second
//! squared and kilograms.

use std::ops::{Add, AddAssign};

/// 2D position in meters
///
/// # Examples
///
/// ```
/// use gravity_sim::body::Position;
///
/// let pos = Position::new(3.0, 4.0);
/// assert_eq!(pos.distance_to(&Position::zero()), 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    x: f64,
    y: f64,
}

impl Position {
    /// Create a new position with the given coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }

    /// Create a position at the origin
    pub fn zero() -> Self {
        Position::new(0.0, 0.0)
    }

    /// Get the x coordinate
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Get the y coordinate
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Euclidean distance to another position
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Move the position by `velocity * dt`
    pub fn advance(&mut self, velocity: &Velocity, dt: f64) {
        self.x += velocity.dx() * dt;
        self.y += velocity.dy() * dt;
    }

    /// Check if both coordinates are finite (not NaN or infinite)
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Get the position as an array
    pub fn as_array(&self) -> [f64; 2] {
        [self.x, self.y]
    }

    /// Create a position from an array
    pub fn from_array(arr: [f64; 2]) -> Self {
        Position::new(arr[0], arr[1])
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::zero()
    }
}

/// 2D velocity in meters per second
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Velocity {
    dx: f64,
    dy: f64,
}

impl Velocity {
    /// Create a new velocity with the given components
    pub fn new(dx: f64, dy: f64) -> Self {
        Velocity { dx, dy }
    }

    /// Create a zero velocity (at rest)
    pub fn zero() -> Self {
        Velocity::new(0.0, 0.0)
    }

    /// Get the x component
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Get the y component
    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// Change the velocity by `acceleration * dt`
    pub fn accelerate(&mut self, acceleration: &Acceleration, dt: f64) {
        self.dx += acceleration.ax() * dt;
        self.dy += acceleration.ay() * dt;
    }

    /// Check if both components are finite (not NaN or infinite)
    pub fn is_valid(&self) -> bool {
        self.dx.is_finite() && self.dy.is_finite()
    }

    /// Get the velocity as an array
    pub fn as_array(&self) -> [f64; 2] {
        [self.dx, self.dy]
    }

    /// Create a velocity from an array
    pub fn from_array(arr: [f64; 2]) -> Self {
        Velocity::new(arr[0], arr[1])
    }

    /// Speed, the magnitude of the velocity vector
    pub fn magnitude(&self) -> f64 {
        (self.dx * self.dx + self.dy * self.dy).sqrt()
    }
}

impl Default for Velocity {
    fn default() -> Self {
        Velocity::zero()
    }
}

/// 2D acceleration in meters per second squared
///
/// Recomputed from the gravitational field on every step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Acceleration {
    ax: f64,
    ay: f64,
}

impl Acceleration {
    /// Create a new acceleration with the given components
    pub fn new(ax: f64, ay: f64) -> Self {
        Acceleration { ax, ay }
    }

    /// Create a zero acceleration
    pub fn zero() -> Self {
        Acceleration::new(0.0, 0.0)
    }

    /// Get the x component
    pub fn ax(&self) -> f64 {
        self.ax
    }

    /// Get the y component
    pub fn ay(&self) -> f64 {
        self.ay
    }

    /// Check if both components are finite (not NaN or infinite)
    pub fn is_valid(&self) -> bool {
        self.ax.is_finite() && self.ay.is_finite()
    }

    /// Get the acceleration as an array
    pub fn as_array(&self) -> [f64; 2] {
        [self.ax, self.ay]
    }

    /// Magnitude of the acceleration vector
    pub fn magnitude(&self) -> f64 {
        (self.ax * self.ax + self.ay * self.ay).sqrt()
    }
}

impl Default for Acceleration {
    fn default() -> Self {
        Acceleration::zero()
    }
}

impl Add for Acceleration {
    type Output = Acceleration;

    fn add(self, other: Acceleration) -> Acceleration {
        Acceleration::new(self.ax + other.ax, self.ay + other.ay)
    }
}

impl AddAssign for Acceleration {
    fn add_assign(&mut self, other: Acceleration) {
        self.ax += other.ax;
        self.ay += other.ay;
    }
}

/// Mass in kilograms
///
/// The gravitational field divides by mass, so only strictly positive,
/// finite values can be constructed.
///
/// # Examples
///
/// ```
/// use gravity_sim::body::Mass;
///
/// let mass = Mass::new(5.972e24);
/// assert!(mass.is_valid());
/// assert!(Mass::try_new(0.0).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mass {
    value: f64,
}

impl Mass {
    /// Create a new mass with the given value in kilograms
    ///
    /// # Panics
    ///
    /// Panics if the mass is zero, negative, NaN or infinite. For fallible
    /// construction, use `try_new`.
    pub fn new(value: f64) -> Self {
        assert!(Self::accepts(value), "Mass must be positive and finite");
        Mass { value }
    }

    /// Try to create a new mass with the given value in kilograms
    ///
    /// Returns `None` if the value is not strictly positive and finite.
    pub fn try_new(value: f64) -> Option<Self> {
        if Self::accepts(value) {
            Some(Mass { value })
        } else {
            None
        }
    }

    fn accepts(value: f64) -> bool {
        value > 0.0 && value.is_finite()
    }

    /// Get the mass value
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Check if the mass is valid (positive and finite)
    pub fn is_valid(&self) -> bool {
        Self::accepts(self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_distance() {
        let a = Position::new(1.0, 1.0);
        let b = Position::new(4.0, 5.0);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(b.distance_to(&a), 5.0);
        assert_eq!(a.distance_to(&a), 0.0);
    }

    #[test]
    fn test_position_validation() {
        assert!(Position::new(1.0, 2.0).is_valid());
        assert!(!Position::new(f64::NAN, 2.0).is_valid());
        assert!(!Position::new(1.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn test_position_array_conversion() {
        let pos = Position::from_array([4.0, 5.0]);
        assert_eq!(pos.x(), 4.0);
        assert_eq!(pos.y(), 5.0);
        assert_eq!(pos.as_array(), [4.0, 5.0]);
    }

    #[test]
    fn test_velocity_accelerate_then_advance() {
        let mut vel = Velocity::new(1.0, -1.0);
        vel.accelerate(&Acceleration::new(2.0, 0.5), 2.0);
        assert_eq!(vel, Velocity::new(5.0, 0.0));

        let mut pos = Position::zero();
        pos.advance(&vel, 0.5);
        assert_eq!(pos, Position::new(2.5, 0.0));
    }

    #[test]
    fn test_velocity_magnitude() {
        assert_eq!(Velocity::new(3.0, 4.0).magnitude(), 5.0);
    }

    #[test]
    fn test_acceleration_sum() {
        let mut acc = Acceleration::new(1.0, 2.0);
        acc += Acceleration::new(0.5, -2.0);
        assert_eq!(acc, Acceleration::new(1.5, 0.0));
        assert_eq!(acc + Acceleration::zero(), acc);
        assert!(!Acceleration::new(f64::INFINITY, 0.0).is_valid());
    }

    #[test]
    fn test_mass_try_new() {
        assert_eq!(Mass::try_new(10.5).map(|m| m.value()), Some(10.5));
        assert!(Mass::try_new(0.0).is_none());
        assert!(Mass::try_new(-1.0).is_none());
        assert!(Mass::try_new(f64::NAN).is_none());
        assert!(Mass::try_new(f64::INFINITY).is_none());
    }

    #[test]
    #[should_panic(expected = "Mass must be positive and finite")]
    fn test_mass_zero_panics() {
        Mass::new(0.0);
    }

    #[test]
    #[should_panic(expected = "Mass must be positive and finite")]
    fn test_mass_negative_panics() {
        Mass::new(-1.0);
    }

    #[test]
    fn test_component_defaults() {
        let pos: Position = Default::default();
        assert_eq!(pos, Position::zero());

        let vel: Velocity = Default::default();
        assert_eq!(vel, Velocity::zero());

        let acc: Acceleration = Default::default();
        assert_eq!(acc, Acceleration::zero());
    }
}
