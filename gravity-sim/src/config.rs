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
//! Simulation configuration
//!
//! A [`SimulationConfig`] carries everything fixed at construction time: the
//! bodies' initial state, the physical constants, the clock's time
//! multiplier and the view parameters used to project positions for the
//! trace. It deserializes from YAML:
//!
//! ```yaml
//! physics:
//!   gravitational_constant: 6.6753015e-11
//!   min_distance: 5.0e6          # softening floor in meters
//!
//! clock:
//!   time_multiplier: 1000.0      # simulated seconds per wall-clock second
//!   log_interval_secs: 0.1
//!
//! view:
//!   world_extent: 1.0e9          # meters shown across the display
//!   display_size: 2000.0
//!   trace_capacity: 10000
//!
//! bodies:
//!   - mass: 5.972e26
//!     position: [2.53012e8, 2.62842e8]
//!     velocity: [12000.0, -4000.0]
//!   - id: 7
//!     mass: 5.972e28
//!     position: [5.78754e8, 5.2458e8]
//! ```
//!
//! Every section except `bodies` may be omitted and falls back to its
//! defaults. Bodies without an explicit `id` are numbered by position in the
//! list. Nothing is checked during deserialization; [`SimulationConfig::validate`]
//! rejects invalid scenarios before a simulation is built.

use crate::body::{Body, BodyId, Mass, Position, Velocity};
use crate::error::{ConfigError, Result};
use crate::force::{GRAVITATIONAL_CONSTANT, MIN_DISTANCE};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Default number of points kept in the trace buffer
pub const DEFAULT_TRACE_CAPACITY: usize = 10_000;

/// Default ratio of simulated time to wall-clock time
pub const DEFAULT_TIME_MULTIPLIER: f64 = 1000.0;

/// Default minimum wall-clock time between diagnostic emissions
pub const DEFAULT_LOG_INTERVAL_SECS: f64 = 0.1;

/// Default physical width of the visible world in meters
pub const DEFAULT_WORLD_EXTENT: f64 = 1.0e9;

/// Default display width in points
pub const DEFAULT_DISPLAY_SIZE: f64 = 2000.0;

/// Physical constants used by the gravitational field
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct PhysicsConstants {
    /// Gravitational constant in m³/(kg⋅s²)
    pub gravitational_constant: f64,
    /// Softening floor applied to pair separations, in meters
    pub min_distance: f64,
}

impl Default for PhysicsConstants {
    fn default() -> Self {
        PhysicsConstants {
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            min_distance: MIN_DISTANCE,
        }
    }
}

/// Timing parameters for the frame clock
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ClockConfig {
    /// Simulated seconds per elapsed wall-clock second
    pub time_multiplier: f64,
    /// Minimum wall-clock seconds between diagnostic emissions
    pub log_interval_secs: f64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        ClockConfig {
            time_multiplier: DEFAULT_TIME_MULTIPLIER,
            log_interval_secs: DEFAULT_LOG_INTERVAL_SECS,
        }
    }
}

/// Display-side parameters: projection and trace length
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ViewConfig {
    /// Physical extent of the visible world in meters
    pub world_extent: f64,
    /// Size of the display in points
    pub display_size: f64,
    /// Maximum number of points kept for the tracked body's path
    pub trace_capacity: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            world_extent: DEFAULT_WORLD_EXTENT,
            display_size: DEFAULT_DISPLAY_SIZE,
            trace_capacity: DEFAULT_TRACE_CAPACITY,
        }
    }
}

/// Initial state of a single body
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BodyConfig {
    /// Explicit identifier; defaults to the body's index in the list
    #[serde(default)]
    pub id: Option<BodyId>,
    /// Mass in kilograms
    pub mass: f64,
    /// Initial position in meters
    pub position: [f64; 2],
    /// Initial velocity in meters per second
    #[serde(default)]
    pub velocity: [f64; 2],
}

impl BodyConfig {
    /// Create a body description with an index-derived identifier
    pub fn new(mass: f64, position: [f64; 2], velocity: [f64; 2]) -> Self {
        BodyConfig {
            id: None,
            mass,
            position,
            velocity,
        }
    }

    /// Attach an explicit identifier
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(BodyId::new(id));
        self
    }
}

/// Complete construction-time configuration of a simulation
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Physical constants
    #[serde(default)]
    pub physics: PhysicsConstants,
    /// Frame clock parameters
    #[serde(default)]
    pub clock: ClockConfig,
    /// Projection and trace parameters
    #[serde(default)]
    pub view: ViewConfig,
    /// Initial state of every body
    pub bodies: Vec<BodyConfig>,
}

impl SimulationConfig {
    /// Create a configuration with default constants for the given bodies
    pub fn new(bodies: Vec<BodyConfig>) -> Self {
        SimulationConfig {
            physics: PhysicsConstants::default(),
            clock: ClockConfig::default(),
            view: ViewConfig::default(),
            bodies,
        }
    }

    /// Two-planet preset
    ///
    /// A light planet starts with a random velocity of up to 150 km/s per
    /// axis, drawn from a generator seeded with `seed`, while a hundred times
    /// heavier planet starts at rest.
    pub fn planets(seed: u64) -> Self {
        const INITIAL_SPEED: f64 = 300_000.0;

        let mut rng = StdRng::seed_from_u64(seed);
        let velocity = [
            rng.gen_range(-0.5..0.5) * INITIAL_SPEED,
            rng.gen_range(-0.5..0.5) * INITIAL_SPEED,
        ];

        SimulationConfig::new(vec![
            BodyConfig::new(5.972e26, [2.53012e8, 2.62842e8], velocity),
            BodyConfig::new(5.972e28, [5.78754e8, 5.2458e8], [0.0, 0.0]),
        ])
    }

    /// Parse a configuration from YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a configuration from a YAML file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    // Callers only pass indices of `self.bodies`.
    fn body_id(&self, index: usize) -> BodyId {
        self.bodies[index].id.unwrap_or(BodyId::new(index as u64))
    }

    /// Check every construction-time invariant
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant: an empty body list, a
    /// non-positive or non-finite mass, a non-finite initial state, a
    /// duplicated id, a zero trace capacity, or an out-of-range parameter.
    pub fn validate(&self) -> Result<()> {
        if self.bodies.is_empty() {
            return Err(ConfigError::NoBodies);
        }

        let g = self.physics.gravitational_constant;
        if !(g > 0.0 && g.is_finite()) {
            return Err(ConfigError::InvalidParameter { name: "gravitational_constant", value: g });
        }

        positive_finite("min_distance", self.physics.min_distance)?;

        positive_finite("time_multiplier", self.clock.time_multiplier)?;
        if !(self.clock.log_interval_secs >= 0.0 && self.clock.log_interval_secs.is_finite()) {
            return Err(ConfigError::InvalidParameter {
                name: "log_interval_secs",
                value: self.clock.log_interval_secs,
            });
        }
        positive_finite("world_extent", self.view.world_extent)?;
        positive_finite("display_size", self.view.display_size)?;
        positive_finite(
            "display_size / world_extent",
            self.view.display_size / self.view.world_extent,
        )?;

        if self.view.trace_capacity == 0 {
            return Err(ConfigError::InvalidTraceCapacity);
        }

        let mut seen = HashSet::with_capacity(self.bodies.len());
        for (index, body) in self.bodies.iter().enumerate() {
            let id = self.body_id(index);
            if !seen.insert(id) {
                return Err(ConfigError::DuplicateId(id));
            }
            if Mass::try_new(body.mass).is_none() {
                return Err(ConfigError::InvalidMass { id, mass: body.mass });
            }
            if !body.position.iter().all(|v| v.is_finite()) {
                return Err(ConfigError::NonFiniteState { id, field: "position" });
            }
            if !body.velocity.iter().all(|v| v.is_finite()) {
                return Err(ConfigError::NonFiniteState { id, field: "velocity" });
            }
        }

        Ok(())
    }

    /// Validate the configuration and create its bodies in list order
    pub fn build_bodies(&self) -> Result<Vec<Body>> {
        self.validate()?;

        let bodies = self
            .bodies
            .iter()
            .enumerate()
            .map(|(index, body)| {
                Body::new(
                    self.body_id(index),
                    Mass::new(body.mass),
                    Position::from_array(body.position),
                    Velocity::from_array(body.velocity),
                )
            })
            .collect();

        Ok(bodies)
    }
}

fn positive_finite(name: &'static str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> SimulationConfig {
        SimulationConfig::new(vec![
            BodyConfig::new(1.0e24, [0.0, 0.0], [0.0, 0.0]),
            BodyConfig::new(2.0e24, [1.0e8, 0.0], [0.0, 1.0e3]),
        ])
    }

    #[test]
    fn test_defaults() {
        let config = pair();
        assert_eq!(config.physics.gravitational_constant, 6.6753015e-11);
        assert_eq!(config.physics.min_distance, 5_000_000.0);
        assert_eq!(config.view.trace_capacity, 10_000);
        assert_eq!(config.clock.time_multiplier, 1000.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_build_bodies_assigns_index_ids() {
        let bodies = pair().build_bodies().unwrap();
        assert_eq!(bodies.len(), 2);
        assert_eq!(bodies[0].id(), BodyId::new(0));
        assert_eq!(bodies[1].id(), BodyId::new(1));
        assert_eq!(bodies[1].velocity, Velocity::new(0.0, 1.0e3));
    }

    #[test]
    fn test_empty_scenario_rejected() {
        let config = SimulationConfig::new(Vec::new());
        assert!(matches!(config.validate(), Err(ConfigError::NoBodies)));
    }

    #[test]
    fn test_non_positive_mass_rejected() {
        let mut config = pair();
        config.bodies[1].mass = 0.0;
        match config.validate() {
            Err(ConfigError::InvalidMass { id, mass }) => {
                assert_eq!(id, BodyId::new(1));
                assert_eq!(mass, 0.0);
            }
            other => panic!("expected InvalidMass, got {:?}", other),
        }

        config.bodies[1].mass = -5.0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidMass { .. })));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut config = pair();
        config.bodies[0] = config.bodies[0].clone().with_id(1);
        assert!(matches!(config.validate(), Err(ConfigError::DuplicateId(id)) if id == BodyId::new(1)));
    }

    #[test]
    fn test_zero_trace_capacity_rejected() {
        let mut config = pair();
        config.view.trace_capacity = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidTraceCapacity)));
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let mut config = pair();
        config.clock.time_multiplier = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParameter { name: "time_multiplier", .. })
        ));

        let mut config = pair();
        config.physics.min_distance = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParameter { name: "min_distance", .. })
        ));
    }

    #[test]
    fn test_zero_min_distance_rejected() {
        let mut config = SimulationConfig::new(vec![
            BodyConfig::new(1.0e24, [1.0e8, 1.0e8], [0.0, 0.0]),
            BodyConfig::new(1.0e24, [1.0e8, 1.0e8], [0.0, 0.0]),
        ]);
        config.physics.min_distance = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParameter { name: "min_distance", value }) if value == 0.0
        ));
        assert!(config.build_bodies().is_err());
    }

    #[test]
    fn test_unrepresentable_view_scale_rejected() {
        let mut config = pair();
        config.view.display_size = 1.0e300;
        config.view.world_extent = 1.0e-300;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParameter { name: "display_size / world_extent", .. })
        ));
    }

    #[test]
    fn test_non_finite_state_rejected() {
        let mut config = pair();
        config.bodies[0].velocity = [f64::INFINITY, 0.0];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFiniteState { field: "velocity", .. })
        ));
    }

    #[test]
    fn test_yaml_loading() {
        let yaml = r#"
clock:
  time_multiplier: 500.0
view:
  trace_capacity: 32
bodies:
  - mass: 5.972e26
    position: [2.5e8, 2.6e8]
    velocity: [1.0, -1.0]
  - id: 9
    mass: 5.972e28
    position: [5.7e8, 5.2e8]
"#;
        let config = SimulationConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.clock.time_multiplier, 500.0);
        assert_eq!(config.clock.log_interval_secs, DEFAULT_LOG_INTERVAL_SECS);
        assert_eq!(config.view.trace_capacity, 32);
        assert_eq!(config.view.world_extent, DEFAULT_WORLD_EXTENT);
        assert_eq!(config.physics, PhysicsConstants::default());
        assert_eq!(config.bodies[1].velocity, [0.0, 0.0]);
        assert_eq!(config.body_id(0), BodyId::new(0));
        assert_eq!(config.body_id(1), BodyId::new(9));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_missing_bodies_is_parse_error() {
        let result = SimulationConfig::from_yaml_str("physics:\n  min_distance: 1.0\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_from_path() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios/three_body.yaml");
        let config = SimulationConfig::from_path(&path).unwrap();
        assert_eq!(config.bodies.len(), 3);
        assert_eq!(config.view.trace_capacity, DEFAULT_TRACE_CAPACITY);
        assert!(config.validate().is_ok());

        let missing = SimulationConfig::from_path(path.with_file_name("missing.yaml"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_planets_preset_is_seeded() {
        let a = SimulationConfig::planets(42);
        let b = SimulationConfig::planets(42);
        assert_eq!(a, b);
        assert!(a.validate().is_ok());

        let light = &a.bodies[0];
        assert!(light.velocity.iter().all(|v| v.abs() <= 150_000.0));
        assert_eq!(a.bodies[1].velocity, [0.0, 0.0]);
        assert!(a.bodies[1].mass > light.mass);
    }
}
