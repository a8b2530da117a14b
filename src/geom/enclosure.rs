//! Partially enclosed volumes and the obstacles outside them.
//!
//! An [`EnclosedVolume`] is an axis-aligned box (e.g. a covered area below a
//! balcony) with one vertical face left open. Every other face, the ceiling
//! included, is opaque. [`ExternalOccluder`]s are walls beyond the opening
//! that can still block a sight line leaving through it.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::Point;
use crate::geom::ray::{Axis, Ray};

/// Vertical face of an axis-aligned box, named after the plan direction it faces.
///
/// The plan's north is -y, so the north face lies at `y_min`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    North,
    South,
    East,
    West,
}

impl Face {
    pub const ALL: [Face; 4] = [Face::North, Face::South, Face::East, Face::West];

    /// Axis normal to the face.
    pub fn axis(self) -> Axis {
        match self {
            Face::North | Face::South => Axis::Y,
            Face::East | Face::West => Axis::X,
        }
    }
}

/// Plan axis running along a vertical plane normal to `axis`.
fn transverse(axis: Axis) -> Axis {
    match axis {
        Axis::X => Axis::Y,
        _ => Axis::X,
    }
}

/// Axis-aligned box with a single opening face.
///
/// The opening spans the whole face, floor to ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnclosedVolume {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    #[serde(default)]
    pub z_min: f64,
    /// Ceiling height [m].
    pub z_max: f64,
    pub opening: Face,
}

impl EnclosedVolume {
    pub fn new(min: Point, max: Point, opening: Face) -> Self {
        Self {
            x_min: min.x,
            x_max: max.x,
            y_min: min.y,
            y_max: max.y,
            z_min: min.z,
            z_max: max.z,
            opening,
        }
    }

    /// Checks that all ranges are non-empty.
    pub fn validate(&self) -> Result<()> {
        if !(self.x_min < self.x_max && self.y_min < self.y_max && self.z_min < self.z_max) {
            bail!(
                "Enclosed volume has an empty range: x {}..{}, y {}..{}, z {}..{}",
                self.x_min,
                self.x_max,
                self.y_min,
                self.y_max,
                self.z_min,
                self.z_max
            );
        }
        Ok(())
    }

    /// Fixed coordinate of the face plane.
    pub fn face_coord(&self, face: Face) -> f64 {
        match face {
            Face::North => self.y_min,
            Face::South => self.y_max,
            Face::West => self.x_min,
            Face::East => self.x_max,
        }
    }

    /// Distance from height `z` up to the ceiling. Non-positive at or above it.
    pub fn ceiling_clearance(&self, z: f64) -> f64 {
        self.z_max - z
    }

    /// Returns true if `pt` lies on the physical extent of the given face.
    pub fn face_contains(&self, face: Face, pt: Point) -> bool {
        let along = pt.coord(transverse(face.axis()));
        let (lo, hi) = match face.axis() {
            Axis::Y => (self.x_min, self.x_max),
            _ => (self.y_min, self.y_max),
        };
        (lo..=hi).contains(&along) && (self.z_min..=self.z_max).contains(&pt.z)
    }
}

/// Opaque vertical wall outside an enclosed volume.
///
/// It lies in the plane `axis = pos`, spans `min..=max` along the other plan
/// axis and rises from the ground to `height`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExternalOccluder {
    pub axis: Axis,
    pub pos: f64,
    pub min: f64,
    pub max: f64,
    pub height: f64,
}

impl ExternalOccluder {
    pub fn validate(&self) -> Result<()> {
        if self.axis == Axis::Z {
            bail!("External occluder must be a vertical plane (axis x or y)");
        }
        if self.min > self.max {
            bail!("External occluder span is inverted: {}..{}", self.min, self.max);
        }
        Ok(())
    }

    /// Returns true if the ray passes through the occluder below its top edge.
    ///
    /// Only crossings in front of the ray origin count.
    pub fn blocks(&self, ray: &Ray) -> bool {
        if self.axis == Axis::Z {
            return false;
        }
        let Some(t) = ray.axis_crossing(self.axis, self.pos) else {
            return false;
        };
        let hit = ray.point_at(t);
        let along = hit.coord(transverse(self.axis));
        along >= self.min && along <= self.max && hit.z < self.height
    }
}
