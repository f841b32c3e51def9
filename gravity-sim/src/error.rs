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
//! Error types for simulation construction and stepping

use crate::body::BodyId;
use thiserror::Error;

/// Reasons a scenario cannot be turned into a simulation
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The scenario lists no bodies
    #[error("scenario contains no bodies")]
    NoBodies,

    /// A body's mass is zero, negative or not finite
    #[error("body {id} has invalid mass {mass}: mass must be positive and finite")]
    InvalidMass {
        /// Offending body
        id: BodyId,
        /// Configured mass
        mass: f64,
    },

    /// A body's initial position or velocity is NaN or infinite
    #[error("body {id} has a non-finite initial {field}")]
    NonFiniteState {
        /// Offending body
        id: BodyId,
        /// Name of the non-finite quantity
        field: &'static str,
    },

    /// Two bodies share an id
    #[error("body id {0} is used more than once")]
    DuplicateId(BodyId),

    /// The trace buffer would hold no points
    #[error("trace capacity must be greater than zero")]
    InvalidTraceCapacity,

    /// A scalar parameter is outside its valid range
    ///
    /// The gravitational constant, minimum distance, time multiplier, world
    /// extent, display size and the display scale they imply must all be
    /// positive and finite. The log interval may be zero.
    #[error("invalid parameter {name}: {value}")]
    InvalidParameter {
        /// Parameter name as written in the configuration
        name: &'static str,
        /// Configured value
        value: f64,
    },

    /// The configuration file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid YAML for a scenario
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Reasons a single step is refused
#[derive(Debug, Error, PartialEq)]
pub enum StepError {
    /// The timestep is negative, NaN or infinite
    #[error("invalid timestep {0}: must be non-negative and finite")]
    InvalidTimestep(f64),
}

/// Result alias for configuration handling
pub type Result<T> = std::result::Result<T, ConfigError>;
