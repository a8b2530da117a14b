//! Shadows cast by walls onto open ground.

use serde::Serialize;

use crate::Point2;
use crate::geom::polygon::containment::is_point_inside_polygon;
use crate::geom::segment::WallSegment;
use crate::sim::solar::SUN_CUTOFF_DEG;

/// Upper bound on shadow length [m].
///
/// Keeps shadows finite as the altitude approaches the cutoff. Tuned for the
/// courtyard layout together with [`SUN_CUTOFF_DEG`].
pub const MAX_SHADOW_LENGTH: f64 = 25.0;

/// Ground area shaded by one wall at one instant.
///
/// Vertices are the wall base followed by the base displaced along the
/// shadow: `start, end, end + d, start + d`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShadowPolygon {
    pub pts: [Point2; 4],
}

impl ShadowPolygon {
    pub fn contains(&self, pt: Point2) -> bool {
        is_point_inside_polygon(pt, &self.pts)
    }

    /// Length of the shadow, measured from the wall base [m].
    pub fn length(&self) -> f64 {
        self.pts[0].distance(&self.pts[3])
    }
}

/// Shadow of a wall on the observation plane at height `observation_height`.
///
/// - `true_azimuth`: solar azimuth in degrees from true north, clockwise
/// - `altitude`: solar altitude in degrees
/// - `north_offset`: rotation of the site plan from true north [deg]
///
/// Returns `None` when the sun is at or below [`SUN_CUTOFF_DEG`] or the wall
/// does not reach above the observation plane.
pub fn wall_shadow(
    wall: &WallSegment,
    true_azimuth: f64,
    altitude: f64,
    observation_height: f64,
    north_offset: f64,
) -> Option<ShadowPolygon> {
    if altitude <= SUN_CUTOFF_DEG {
        return None;
    }
    let eff_height = wall.effective_height(observation_height);
    if eff_height <= 0.0 {
        return None;
    }

    let az = (true_azimuth - north_offset).to_radians();
    let length = (eff_height / altitude.to_radians().tan()).min(MAX_SHADOW_LENGTH);

    // Shadow points away from the sun; the plan's north is -y
    let dx = -length * az.sin();
    let dy = length * az.cos();

    Some(ShadowPolygon {
        pts: [
            wall.start,
            wall.end,
            wall.end.offset(dx, dy),
            wall.start.offset(dx, dy),
        ],
    })
}

/// Shadow polygons of all walls that cast one.
pub fn wall_shadows(
    walls: &[WallSegment],
    true_azimuth: f64,
    altitude: f64,
    observation_height: f64,
    north_offset: f64,
) -> Vec<ShadowPolygon> {
    walls
        .iter()
        .filter_map(|w| wall_shadow(w, true_azimuth, altitude, observation_height, north_offset))
        .collect()
}

/// Returns true if the point lies outside every shadow polygon.
pub fn is_outside_shadows(pt: Point2, shadows: &[ShadowPolygon]) -> bool {
    !shadows.iter().any(|s| s.contains(pt))
}

/// Returns true if a point on open ground receives direct sun.
///
/// The sun must be above [`SUN_CUTOFF_DEG`] and no wall may shade the point.
pub fn is_point_lit_open(
    pt: Point2,
    walls: &[WallSegment],
    true_azimuth: f64,
    altitude: f64,
    observation_height: f64,
    north_offset: f64,
) -> bool {
    if altitude <= SUN_CUTOFF_DEG {
        return false;
    }
    walls.iter().all(|w| {
        wall_shadow(w, true_azimuth, altitude, observation_height, north_offset)
            .is_none_or(|s| !s.contains(pt))
    })
}
