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
//! Path tracing for a tracked body
//!
//! The trace is display state, not simulation state. [`TraceRecorder`]
//! watches the simulation through [`StepObserver`], projects the tracked
//! body's position into display space and keeps the most recent points in a
//! bounded [`TraceBuffer`].

use crate::body::{Body, BodyId, Position};
use crate::config::ViewConfig;
use crate::simulation::StepObserver;
use std::collections::{vec_deque, VecDeque};

/// A point in display space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TracePoint {
    /// Horizontal display coordinate
    pub x: f32,
    /// Vertical display coordinate
    pub y: f32,
}

impl TracePoint {
    /// Create a new display point
    pub fn new(x: f32, y: f32) -> Self {
        TracePoint { x, y }
    }
}

/// Fixed-capacity FIFO history of display points
///
/// Once full, every new point evicts the oldest one. Iteration runs from
/// oldest to newest.
///
/// # Example
///
/// ```
/// use gravity_sim::trace::{TraceBuffer, TracePoint};
///
/// let mut trace = TraceBuffer::new(2);
/// for i in 0..3 {
///     trace.record(TracePoint::new(i as f32, 0.0));
/// }
/// let xs: Vec<f32> = trace.iter().map(|p| p.x).collect();
/// assert_eq!(xs, vec![1.0, 2.0]);
/// ```
#[derive(Debug, Clone)]
pub struct TraceBuffer {
    points: VecDeque<TracePoint>,
    limit_size: usize,
}

impl TraceBuffer {
    /// Create an empty buffer holding at most `limit_size` points
    ///
    /// # Panics
    ///
    /// Panics if `limit_size` is zero. For fallible construction, use
    /// `try_new`.
    pub fn new(limit_size: usize) -> Self {
        assert!(limit_size > 0, "Trace capacity must be greater than zero");
        TraceBuffer {
            points: VecDeque::with_capacity(limit_size),
            limit_size,
        }
    }

    /// Try to create a buffer; returns `None` for a zero capacity
    pub fn try_new(limit_size: usize) -> Option<Self> {
        if limit_size > 0 {
            Some(Self::new(limit_size))
        } else {
            None
        }
    }

    /// Append a point, evicting the oldest points first if the buffer is full
    pub fn record(&mut self, point: TracePoint) {
        self.evict_if_full();
        self.points.push_back(point);
    }

    /// Drop oldest points until one more fits
    pub fn evict_if_full(&mut self) {
        while self.points.len() >= self.limit_size {
            self.points.pop_front();
        }
    }

    /// Maximum number of points kept
    pub fn capacity(&self) -> usize {
        self.limit_size
    }

    /// Number of points currently held
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check whether no point has been recorded
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The most recently recorded point
    pub fn latest(&self) -> Option<&TracePoint> {
        self.points.back()
    }

    /// Iterate from oldest to newest
    pub fn iter(&self) -> vec_deque::Iter<'_, TracePoint> {
        self.points.iter()
    }

    /// Remove every point
    pub fn clear(&mut self) {
        self.points.clear();
    }
}

impl<'a> IntoIterator for &'a TraceBuffer {
    type Item = &'a TracePoint;
    type IntoIter = vec_deque::Iter<'a, TracePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Uniform scaling from physical meters to display points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    scale: f64,
}

impl Projection {
    /// Create a projection with an explicit points-per-meter scale
    ///
    /// # Panics
    ///
    /// Panics if `scale` is not positive and finite.
    pub fn new(scale: f64) -> Self {
        assert!(scale > 0.0 && scale.is_finite(), "Projection scale must be positive and finite");
        Projection { scale }
    }

    /// Fit `physical_extent` meters onto `display_size` points
    ///
    /// # Panics
    ///
    /// Panics if the resulting scale is not positive and finite.
    pub fn fit(display_size: f64, physical_extent: f64) -> Self {
        Self::new(display_size / physical_extent)
    }

    /// Create the projection described by a view configuration
    ///
    /// # Panics
    ///
    /// Panics on a view that [`SimulationConfig::validate`] rejects.
    ///
    /// [`SimulationConfig::validate`]: crate::config::SimulationConfig::validate
    pub fn from_view(view: &ViewConfig) -> Self {
        Self::fit(view.display_size, view.world_extent)
    }

    /// Points per meter
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Map a physical position to display space
    pub fn project(&self, position: &Position) -> TracePoint {
        TracePoint::new(
            (position.x() * self.scale) as f32,
            (position.y() * self.scale) as f32,
        )
    }
}

/// Which body a [`TraceRecorder`] follows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tracked {
    /// The body at this index in the simulation's body list
    Index(usize),
    /// The body with this id
    Id(BodyId),
}

impl Default for Tracked {
    fn default() -> Self {
        Tracked::Index(0)
    }
}

/// Step observer that records the tracked body's projected path
pub struct TraceRecorder {
    tracked: Tracked,
    projection: Projection,
    trace: TraceBuffer,
}

impl TraceRecorder {
    /// Follow `tracked`, projecting through `projection` into a buffer of `limit_size`
    ///
    /// # Panics
    ///
    /// Panics if `limit_size` is zero.
    pub fn new(tracked: Tracked, projection: Projection, limit_size: usize) -> Self {
        TraceRecorder {
            tracked,
            projection,
            trace: TraceBuffer::new(limit_size),
        }
    }

    /// Follow the first body using a view configuration
    ///
    /// # Panics
    ///
    /// Panics on a view that [`SimulationConfig::validate`] rejects.
    ///
    /// [`SimulationConfig::validate`]: crate::config::SimulationConfig::validate
    pub fn from_view(view: &ViewConfig) -> Self {
        Self::new(Tracked::default(), Projection::from_view(view), view.trace_capacity)
    }

    /// The recorded path
    pub fn trace(&self) -> &TraceBuffer {
        &self.trace
    }

    /// The projection applied to recorded positions
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Record the tracked body's current position, if it is present
    pub fn observe(&mut self, bodies: &[Body]) {
        let body = match self.tracked {
            Tracked::Index(index) => bodies.get(index),
            Tracked::Id(id) => bodies.iter().find(|body| body.id() == id),
        };

        if let Some(body) = body {
            self.trace.record(self.projection.project(&body.position));
        }
    }
}

impl StepObserver for TraceRecorder {
    fn on_step(&mut self, bodies: &[Body], _dt: f64) {
        self.observe(bodies);
    }
}
