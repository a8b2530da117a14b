use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::Point2;

pub mod containment;

use containment::is_point_inside_polygon;

/// Closed plan outline of a zone (courtyard, covered area, ...).
///
/// Vertices are stored in the order given; the outline is implicitly closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub name: String,
    pub pts: Vec<Point2>,
}

impl Polygon {
    pub fn new(name: &str, pts: Vec<Point2>) -> Result<Self> {
        if pts.len() < 3 {
            bail!(
                "Polygon '{}' needs at least 3 vertices, got {}",
                name,
                pts.len()
            );
        }
        Ok(Self {
            name: name.to_string(),
            pts,
        })
    }

    /// Axis-aligned rectangle spanning `min`..`max`.
    pub fn rectangle(name: &str, min: Point2, max: Point2) -> Self {
        Self {
            name: name.to_string(),
            pts: vec![
                min,
                Point2::new(max.x, min.y),
                max,
                Point2::new(min.x, max.y),
            ],
        }
    }

    /// Returns true if the point lies inside the outline (even-odd rule).
    pub fn is_point_inside(&self, ptest: Point2) -> bool {
        is_point_inside_polygon(ptest, &self.pts)
    }

    /// Returns the (min, max) corners of the bounding box.
    pub fn bbox(&self) -> (Point2, Point2) {
        let mut min = Point2::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in &self.pts {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        (min, max)
    }
}
