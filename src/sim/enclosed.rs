//! Direct sun inside a partially enclosed volume.
//!
//! A ray is cast from the sample point towards the sun. It has to leave the
//! box through the opening face (not a wall or the ceiling), inside the
//! opening's physical extent, and then clear every external occluder.

use crate::Point;
use crate::geom::enclosure::{EnclosedVolume, ExternalOccluder, Face};
use crate::geom::ray::{Axis, Ray};
use crate::sim::solar::SUN_CUTOFF_DEG;

/// Two face hits closer than this (in ray parameter) count as a tie.
///
/// Ties are resolved as "not lit": a ray grazing a corner of the opening is
/// treated as hitting the opaque face.
pub const TIE_EPS: f64 = 1e-9;

/// Boundary of an enclosed volume a ray can leave through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Face(Face),
    Ceiling,
}

/// Ray parameters of the boundary crossings in front of the ray origin.
pub fn boundary_hits(ray: &Ray, volume: &EnclosedVolume) -> Vec<(Boundary, f64)> {
    let mut hits: Vec<(Boundary, f64)> = Face::ALL
        .iter()
        .filter_map(|&face| {
            ray.axis_crossing(face.axis(), volume.face_coord(face))
                .map(|t| (Boundary::Face(face), t))
        })
        .collect();
    if let Some(t) = ray.axis_crossing(Axis::Z, volume.z_max) {
        hits.push((Boundary::Ceiling, t));
    }
    hits
}

/// Ray parameter where the ray first leaves the volume, if that is through the opening.
///
/// Returns `None` when any other face or the ceiling is hit first or at the
/// same parameter (within [`TIE_EPS`]).
pub fn exit_through_opening(ray: &Ray, volume: &EnclosedVolume) -> Option<f64> {
    let hits = boundary_hits(ray, volume);
    let opening = Boundary::Face(volume.opening);
    let t_open = hits.iter().find(|(b, _)| *b == opening).map(|&(_, t)| t)?;
    let blocked = hits
        .iter()
        .any(|&(b, t)| b != opening && t <= t_open + TIE_EPS);
    if blocked { None } else { Some(t_open) }
}

/// Returns true if a point inside the volume receives direct sun.
///
/// - `pt`: sample point; `pt.z` is the observation height
/// - `local_azimuth`: solar azimuth in the site plan frame [deg]
/// - `altitude`: solar altitude [deg]
pub fn is_point_lit_enclosed(
    pt: Point,
    volume: &EnclosedVolume,
    occluders: &[ExternalOccluder],
    local_azimuth: f64,
    altitude: f64,
) -> bool {
    if altitude <= SUN_CUTOFF_DEG {
        return false;
    }
    if volume.ceiling_clearance(pt.z) <= 0.0 {
        return false;
    }

    let ray = Ray::toward_sun(pt, local_azimuth, altitude);

    // Nearest boundary must be the opening
    let Some(t_exit) = exit_through_opening(&ray, volume) else {
        return false;
    };

    // Exit point must be on the opening itself
    if !volume.face_contains(volume.opening, ray.point_at(t_exit)) {
        return false;
    }

    // Nothing outside may block the ray
    !occluders.iter().any(|o| o.blocks(&ray))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Covered area under a 2.2 m balcony, open to the north (y = 2.7).
    fn covered_area() -> EnclosedVolume {
        EnclosedVolume::new(
            Point::new(0.0, 2.7, 0.0),
            Point::new(2.6, 4.2, 2.2),
            Face::North,
        )
    }

    /// Courtyard walls north of the opening.
    fn courtyard_walls() -> Vec<ExternalOccluder> {
        vec![
            ExternalOccluder {
                axis: Axis::Y,
                pos: 0.0,
                min: 0.0,
                max: 5.0,
                height: 1.8,
            },
            ExternalOccluder {
                axis: Axis::X,
                pos: 5.0,
                min: 0.0,
                max: 1.0,
                height: 1.8,
            },
            ExternalOccluder {
                axis: Axis::Y,
                pos: 1.0,
                min: 5.0,
                max: 6.0,
                height: 1.8,
            },
            ExternalOccluder {
                axis: Axis::X,
                pos: 6.0,
                min: 1.0,
                max: 2.7,
                height: 1.8,
            },
            ExternalOccluder {
                axis: Axis::X,
                pos: 0.0,
                min: 0.0,
                max: 2.7,
                height: 1.8,
            },
        ]
    }

    #[test]
    fn test_no_clearance_never_lit() {
        let vol = covered_area();
        for z in [2.2, 2.5, 10.0] {
            for az in [0.0, 45.0, 180.0, 300.0] {
                for alt in [5.0, 30.0, 60.0, 89.0] {
                    let pt = Point::new(1.3, 2.8, z);
                    assert!(!is_point_lit_enclosed(pt, &vol, &[], az, alt));
                }
            }
        }
    }

    #[test]
    fn test_below_cutoff_never_lit() {
        let vol = covered_area();
        let pt = Point::new(1.3, 2.8, 0.0);
        assert!(!is_point_lit_enclosed(pt, &vol, &[], 0.0, SUN_CUTOFF_DEG));
        assert!(!is_point_lit_enclosed(pt, &vol, &[], 0.0, SUN_CUTOFF_DEG - 1e-9));
        assert!(!is_point_lit_enclosed(pt, &vol, &[], 0.0, -20.0));
    }

    #[test]
    fn test_low_northern_sun_reaches_inside() {
        let vol = covered_area();
        // 1 m inside the opening, sun due north at 30 degrees: exits at 0.58 m
        let pt = Point::new(1.3, 3.7, 0.0);
        assert!(is_point_lit_enclosed(pt, &vol, &[], 0.0, 30.0));
    }

    #[test]
    fn test_high_sun_hits_ceiling() {
        let vol = covered_area();
        // 1 m inside, tan(70) * 1 = 2.75 m > 2.2 m ceiling
        let pt = Point::new(1.3, 3.7, 0.0);
        assert!(!is_point_lit_enclosed(pt, &vol, &[], 0.0, 70.0));
    }

    #[test]
    fn test_southern_sun_hits_back_wall() {
        let vol = covered_area();
        let pt = Point::new(1.3, 3.0, 0.0);
        assert!(!is_point_lit_enclosed(pt, &vol, &[], 180.0, 20.0));
    }

    #[test]
    fn test_side_wall_hit_first() {
        let vol = covered_area();
        // Close to the west wall, sun from the north-west: leaves through the west wall
        let pt = Point::new(0.1, 3.5, 0.0);
        assert!(!is_point_lit_enclosed(pt, &vol, &[], 315.0, 20.0));
        // From the north-east the same point sees out through the opening
        assert!(is_point_lit_enclosed(pt, &vol, &[], 45.0, 20.0));
    }

    #[test]
    fn test_corner_tie_is_unlit() {
        let vol = covered_area();
        // Ray aimed exactly at the north-west vertical edge (0, 2.7)
        let pt = Point::new(1.0, 3.7, 0.0);
        let ray = Ray::toward_sun(pt, 315.0, 10.0);
        let hits = boundary_hits(&ray, &vol);
        let t_north = hits.iter().find(|(b, _)| *b == Boundary::Face(Face::North)).unwrap().1;
        let t_west = hits.iter().find(|(b, _)| *b == Boundary::Face(Face::West)).unwrap().1;
        assert!((t_north - t_west).abs() < 1e-9);
        assert!(exit_through_opening(&ray, &vol).is_none());
        assert!(!is_point_lit_enclosed(pt, &vol, &[], 315.0, 10.0));
    }

    #[test]
    fn test_courtyard_wall_blocks_low_sun() {
        let vol = covered_area();
        let walls = courtyard_walls();
        // At the opening, sun due north at 20 deg: the 1.8 m north wall is 2.8 m away,
        // the ray is only 1.0 m high there
        let pt = Point::new(1.3, 2.8, 0.0);
        assert!(is_point_lit_enclosed(pt, &vol, &[], 0.0, 20.0));
        assert!(!is_point_lit_enclosed(pt, &vol, &walls, 0.0, 20.0));
        // At 45 deg the ray clears the wall (2.8 m high at y = 0)
        assert!(is_point_lit_enclosed(pt, &vol, &walls, 0.0, 45.0));
    }

    #[test]
    fn test_monotonic_without_occluders() {
        let vol = covered_area();
        // Point right behind the opening: once lit, stays lit until the ceiling takes over
        let pt = Point::new(1.3, 2.75, 0.0);
        let mut alt = 1.0;
        while alt < 88.0 {
            assert!(is_point_lit_enclosed(pt, &vol, &[], 0.0, alt), "alt {}", alt);
            alt += 1.0;
        }
    }
}
