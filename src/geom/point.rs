use crate::Vector;
use crate::geom::EPS;
use crate::geom::ray::Axis;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// Point in site space.
///
/// `x` grows to the local east, `y` to the local south and `z` is the height
/// above the ground plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn is_close(&self, other: &Self) -> bool {
        self.plan().is_close(&other.plan()) && (self.z - other.z).abs() < EPS
    }

    /// Drops the height and returns the plan position.
    pub fn plan(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }

    /// Coordinate along the given axis.
    pub fn coord(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

impl Add<Vector> for Point {
    type Output = Point;
    fn add(self, v: Vector) -> Self {
        Self::new(self.x + v.dx, self.y + v.dy, self.z + v.dz)
    }
}

/// Point on the site plan (ground projection).
///
/// Serialized as a `[x, y]` pair so that layouts stay readable in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_close(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < EPS && (self.y - other.y).abs() < EPS
    }

    /// Returns a copy moved by `(dx, dy)`.
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn distance(&self, other: &Self) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }

    /// Lifts the plan point to height `z`.
    pub fn at_height(&self, z: f64) -> Point {
        Point::new(self.x, self.y, z)
    }
}

impl From<[f64; 2]> for Point2 {
    fn from(xy: [f64; 2]) -> Self {
        Self::new(xy[0], xy[1])
    }
}

impl From<Point2> for [f64; 2] {
    fn from(pt: Point2) -> Self {
        [pt.x, pt.y]
    }
}

impl fmt::Display for Point2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = f.precision().unwrap_or(2);
        write!(f, "({:.prec$}, {:.prec$})", self.x, self.y, prec = prec)
    }
}
