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
//! # Gravity Sim
//!
//! A real-time simulation of point masses attracting each other under
//! Newtonian gravity in the plane.
//!
//! ## Features
//!
//! - **Exact pairwise gravity**: O(N²) accumulation with a softening floor
//!   on pair separations
//! - **Semi-implicit Euler**: velocity first, then position from the new
//!   velocity
//! - **Order-independent steps**: accelerations for all bodies are computed
//!   from one snapshot before any body moves
//! - **Variable timestep**: wall-clock frame time scaled by a time multiplier
//! - **Bounded trace**: FIFO history of one tracked body's projected path
//! - **Parallelization**: optional Rayon acceleration of the read phase
//!
//! ## Example
//!
//! ```rust
//! use gravity_sim::config::{BodyConfig, SimulationConfig};
//! use gravity_sim::simulation::Simulation;
//! use gravity_sim::trace::TraceRecorder;
//!
//! let config = SimulationConfig::new(vec![
//!     BodyConfig::new(5.972e26, [2.5e8, 2.6e8], [1.0e4, 0.0]),
//!     BodyConfig::new(5.972e28, [5.8e8, 5.2e8], [0.0, 0.0]),
//! ]);
//!
//! let mut sim = Simulation::new(&config).unwrap();
//! let mut recorder = TraceRecorder::from_view(&config.view);
//!
//! for _ in 0..10 {
//!     sim.step_observed(16.0, false, &mut recorder).unwrap();
//! }
//! assert_eq!(recorder.trace().len(), 10);
//! ```

#![warn(missing_docs)]

/// Point bodies and their kinematic quantities
pub mod body;

/// Frame timing and log cadence
pub mod clock;

/// Construction-time configuration
pub mod config;

/// Error types
pub mod error;

/// Gravitational field
pub mod force;

/// Numerical integration methods
pub mod integration;

/// Two-phase simulation stepping
pub mod simulation;

/// Trace buffer and projection for the tracked body
pub mod trace;

pub use body::{Body, BodyId};
pub use config::SimulationConfig;
pub use error::{ConfigError, StepError};
pub use simulation::{Simulation, StepObserver};
