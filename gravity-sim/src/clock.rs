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
//! Frame timing
//!
//! The simulation runs with a variable timestep: each frame advances the
//! bodies by the wall-clock time elapsed since the previous frame, multiplied
//! by a fixed time multiplier. The clock also decides when a frame should
//! emit diagnostics, at most once per log interval.

use crate::config::{ClockConfig, DEFAULT_LOG_INTERVAL_SECS};
use std::time::{Duration, Instant};

/// Timing of one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    /// Simulated seconds to advance
    pub dt: f64,
    /// Whether this frame should emit diagnostics
    pub log: bool,
}

/// Converts elapsed wall-clock time into simulated timesteps
///
/// # Example
///
/// ```
/// use gravity_sim::clock::FrameClock;
/// use std::time::{Duration, Instant};
///
/// let start = Instant::now();
/// let mut clock = FrameClock::starting_at(1000.0, Duration::from_millis(100), start);
///
/// let tick = clock.tick_at(start + Duration::from_millis(16));
/// assert!((tick.dt - 16.0).abs() < 1e-9);
/// assert!(tick.log); // the first frame always logs
/// ```
#[derive(Debug, Clone)]
pub struct FrameClock {
    time_multiplier: f64,
    log_interval: Duration,
    fixed_dt: Option<f64>,
    last_frame: Instant,
    last_log: Option<Instant>,
}

impl FrameClock {
    /// Create a clock whose first frame is measured from now
    ///
    /// # Panics
    ///
    /// Panics if `time_multiplier` is not positive and finite.
    pub fn new(time_multiplier: f64, log_interval: Duration) -> Self {
        Self::starting_at(time_multiplier, log_interval, Instant::now())
    }

    /// Create a clock whose first frame is measured from `start`
    pub fn starting_at(time_multiplier: f64, log_interval: Duration, start: Instant) -> Self {
        assert!(
            time_multiplier > 0.0 && time_multiplier.is_finite(),
            "Time multiplier must be positive and finite"
        );

        FrameClock {
            time_multiplier,
            log_interval,
            fixed_dt: None,
            last_frame: start,
            last_log: None,
        }
    }

    /// Create a clock from configuration
    pub fn from_config(config: &ClockConfig) -> Self {
        let log_interval = Duration::try_from_secs_f64(config.log_interval_secs)
            .unwrap_or_else(|_| Duration::from_secs_f64(DEFAULT_LOG_INTERVAL_SECS));
        Self::new(config.time_multiplier, log_interval)
    }

    /// Replace wall-clock timesteps with a constant simulated timestep
    ///
    /// The log cadence still follows wall-clock time.
    ///
    /// # Panics
    ///
    /// Panics if `dt` is negative or not finite.
    pub fn with_fixed_dt(mut self, dt: f64) -> Self {
        assert!(dt >= 0.0 && dt.is_finite(), "Fixed timestep must be non-negative and finite");
        self.fixed_dt = Some(dt);
        self
    }

    /// Get the time multiplier
    pub fn time_multiplier(&self) -> f64 {
        self.time_multiplier
    }

    /// Get the minimum wall-clock time between logging frames
    pub fn log_interval(&self) -> Duration {
        self.log_interval
    }

    /// Produce the tick for a frame starting now
    pub fn tick(&mut self) -> FrameTick {
        self.tick_at(Instant::now())
    }

    /// Produce the tick for a frame starting at `now`
    ///
    /// An instant earlier than the previous frame counts as zero elapsed time.
    pub fn tick_at(&mut self, now: Instant) -> FrameTick {
        let elapsed = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;

        let dt = match self.fixed_dt {
            Some(dt) => dt,
            None => elapsed.as_secs_f64() * self.time_multiplier,
        };

        let log = match self.last_log {
            Some(last) => now.saturating_duration_since(last) >= self.log_interval,
            None => true,
        };
        if log {
            self.last_log = Some(now);
        }

        FrameTick { dt, log }
    }
}
