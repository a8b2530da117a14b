//! Ray casting against axis-aligned planes.
//!
//! Rays here are not normalized: the enclosed-space tracer parameterizes them
//! by horizontal distance, so `t` is measured along the ground plan.

use serde::{Deserialize, Serialize};

use crate::{Point, Vector};

/// Smallest direction component and ray parameter treated as non-zero.
///
/// Guards the divisions below against rays grazing a plane, and keeps the
/// origin itself from registering as a hit.
pub const RAY_EPS: f64 = 1e-6;

/// Coordinate axis of site space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

/// A ray defined by an origin point and a direction vector.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Origin point of the ray
    pub origin: Point,
    /// Direction vector (not normalized)
    pub direction: Vector,
}

impl Ray {
    pub fn new(origin: Point, direction: Vector) -> Self {
        Self { origin, direction }
    }

    /// Ray from `origin` towards the sun.
    ///
    /// `azimuth_deg` is measured clockwise from the plan's north (-y) and
    /// `altitude_deg` above the horizon. The horizontal part of the direction
    /// has unit length, the vertical part is `tan(altitude)`.
    pub fn toward_sun(origin: Point, azimuth_deg: f64, altitude_deg: f64) -> Self {
        let az = azimuth_deg.to_radians();
        let alt = altitude_deg.to_radians();
        Self::new(origin, Vector::new(az.sin(), -az.cos(), alt.tan()))
    }

    /// Returns the point along the ray at parameter t.
    ///
    /// point = origin + t * direction
    pub fn point_at(&self, t: f64) -> Point {
        self.origin + self.direction * t
    }

    /// Ray parameter where the ray crosses the plane `axis = coord`.
    ///
    /// Returns `None` when the ray is (nearly) parallel to the plane or the
    /// plane lies behind the origin (t <= RAY_EPS).
    pub fn axis_crossing(&self, axis: Axis, coord: f64) -> Option<f64> {
        let d = self.direction.component(axis);
        if d.abs() <= RAY_EPS {
            return None;
        }
        let t = (coord - self.origin.coord(axis)) / d;
        if t > RAY_EPS { Some(t) } else { None }
    }
}
