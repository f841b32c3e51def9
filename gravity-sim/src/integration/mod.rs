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
//! Numerical time integration
//!
//! An integrator advances one body's velocity and position over an elapsed
//! interval, given the acceleration computed for it on the current step.
//!
//! # Timesteps
//!
//! The timestep is not fixed: the driver derives it from wall-clock time
//! elapsed since the previous frame, scaled by the time multiplier. A zero
//! timestep is legal and leaves the body unchanged. Negative or non-finite
//! timesteps are rejected before any body is touched.

use crate::body::Body;
use crate::error::StepError;

mod euler;

pub use euler::SemiImplicitEuler;

/// Trait for numerical integration methods
pub trait Integrator: Send + Sync {
    /// Get the name of this integrator
    fn name(&self) -> &str;

    /// Check that `dt` can be integrated
    ///
    /// # Errors
    ///
    /// Returns `StepError::InvalidTimestep` if `dt` is negative, NaN or
    /// infinite.
    fn validate_timestep(&self, dt: f64) -> Result<(), StepError> {
        if dt >= 0.0 && dt.is_finite() {
            Ok(())
        } else {
            Err(StepError::InvalidTimestep(dt))
        }
    }

    /// Advance `body` by `dt` seconds using its current acceleration
    fn advance(&self, body: &mut Body, dt: f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestep_validation() {
        let integrator = SemiImplicitEuler;
        assert!(integrator.validate_timestep(0.0).is_ok());
        assert!(integrator.validate_timestep(1.0e6).is_ok());
        assert_eq!(
            integrator.validate_timestep(-0.01),
            Err(StepError::InvalidTimestep(-0.01))
        );
        assert!(integrator.validate_timestep(f64::INFINITY).is_err());
        assert!(integrator.validate_timestep(f64::NAN).is_err());
    }
}
