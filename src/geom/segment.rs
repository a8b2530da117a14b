//! Vertical wall segments standing on the site plan.

use serde::{Deserialize, Serialize};

use crate::Point2;

/// An opaque vertical wall between two plan points, rising from the ground to `height`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallSegment {
    pub start: Point2,
    pub end: Point2,
    /// Wall height above the ground plane [m].
    pub height: f64,
}

impl WallSegment {
    pub fn new(start: Point2, end: Point2, height: f64) -> Self {
        Self { start, end, height }
    }

    /// Length of the wall base [m].
    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }

    /// Height of the wall above an observation plane at `z` [m].
    ///
    /// Non-positive when the wall does not reach the observation plane.
    pub fn effective_height(&self, z: f64) -> f64 {
        self.height - z
    }
}
