//! Sun and shadows at a single instant.
//!
//! Each call is independent. An animation is just a loop over clock times
//! calling [`Snapshot::compute`].

use serde::Serialize;

use crate::Point2;
use crate::sim::enclosed::is_point_lit_enclosed;
use crate::sim::shadow::{ShadowPolygon, is_outside_shadows, wall_shadows};
use crate::sim::solar::SolarPosition;
use crate::site::{SiteConfig, SiteZone, ZoneKind};
use crate::time::{ClockTime, LocalDate};

/// Sample spacing for the open-ground lit fraction [m].
pub const OPEN_SAMPLE_SPACING: f64 = 0.05;
/// Sample spacing for the enclosed-ground lit fraction [m].
pub const ENCLOSED_SAMPLE_SPACING: f64 = 0.1;

/// Sample points at cell centres over the zones of one kind.
fn zone_samples<'a>(zones: impl Iterator<Item = &'a SiteZone>, spacing: f64) -> Vec<Point2> {
    let mut pts = Vec::new();
    for zone in zones {
        let (min, max) = zone.outline.bbox();
        let mut x = min.x + spacing * 0.5;
        while x < max.x {
            let mut y = min.y + spacing * 0.5;
            while y < max.y {
                let pt = Point2::new(x, y);
                if zone.outline.is_point_inside(pt) {
                    pts.push(pt);
                }
                y += spacing;
            }
            x += spacing;
        }
    }
    pts
}

fn percent(lit: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        lit as f64 / total as f64 * 100.0
    }
}

/// State of the site at one instant.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub sun: SolarPosition,
    /// Solar azimuth in the site plan frame [deg].
    pub local_azimuth: f64,
    /// Wall shadows on the observation plane. Empty with the sun below the cutoff.
    pub shadows: Vec<ShadowPolygon>,
    /// Share of open ground in direct sun [%].
    pub open_lit_percent: f64,
    /// Share of enclosed ground in direct sun [%].
    pub enclosed_lit_percent: f64,
    /// Enclosed sample points in direct sun.
    pub lit_enclosed_points: Vec<Point2>,
}

impl Snapshot {
    pub fn compute(
        site: &SiteConfig,
        date: &LocalDate,
        clock: ClockTime,
        dst: bool,
        observation_height: f64,
    ) -> Self {
        let height = site.clamp_height(observation_height);
        let sun = SolarPosition::at_local(
            date,
            clock,
            site.utc_offset(dst),
            site.latitude,
            site.longitude,
        );
        let local_azimuth = sun.local_azimuth(site.north_offset);

        if !sun.is_usable() {
            return Self {
                sun,
                local_azimuth,
                shadows: Vec::new(),
                open_lit_percent: 0.0,
                enclosed_lit_percent: 0.0,
                lit_enclosed_points: Vec::new(),
            };
        }

        let shadows = wall_shadows(
            &site.walls,
            sun.azimuth,
            sun.altitude,
            height,
            site.north_offset,
        );

        let open = zone_samples(site.zones_of(ZoneKind::Open), OPEN_SAMPLE_SPACING);
        let open_lit = open
            .iter()
            .filter(|&&pt| is_outside_shadows(pt, &shadows))
            .count();

        let enclosed = zone_samples(site.zones_of(ZoneKind::Enclosed), ENCLOSED_SAMPLE_SPACING);
        let lit_enclosed_points: Vec<Point2> = match &site.enclosure {
            Some(volume) => enclosed
                .iter()
                .copied()
                .filter(|pt| {
                    is_point_lit_enclosed(
                        pt.at_height(height),
                        volume,
                        &site.occluders,
                        local_azimuth,
                        sun.altitude,
                    )
                })
                .collect(),
            None => Vec::new(),
        };

        Self {
            sun,
            local_azimuth,
            shadows,
            open_lit_percent: percent(open_lit, open.len()),
            enclosed_lit_percent: percent(lit_enclosed_points.len(), enclosed.len()),
            lit_enclosed_points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::tests::test_site;
    use anyhow::Result;

    #[test]
    fn test_night_is_dark() -> Result<()> {
        let site = test_site();
        let date = LocalDate::new(2025, 6, 21)?;
        let snap = Snapshot::compute(&site, &date, ClockTime::from_hm(22, 0)?, false, 0.0);
        assert!(!snap.sun.is_usable());
        assert!(snap.shadows.is_empty());
        assert_eq!(snap.open_lit_percent, 0.0);
        assert_eq!(snap.enclosed_lit_percent, 0.0);
        assert!(snap.lit_enclosed_points.is_empty());
        Ok(())
    }

    #[test]
    fn test_summer_noon_mostly_lit() -> Result<()> {
        let site = test_site();
        let date = LocalDate::new(2025, 12, 21)?;
        let snap = Snapshot::compute(&site, &date, ClockTime::from_hm(13, 0)?, true, 0.0);
        assert!(snap.sun.altitude > 70.0);
        assert_eq!(snap.shadows.len(), site.walls.len());
        assert!(snap.open_lit_percent > 70.0, "open {}", snap.open_lit_percent);
        // High sun only reaches a strip behind the opening
        assert!(snap.enclosed_lit_percent > 0.0);
        assert!(
            snap.enclosed_lit_percent < 50.0,
            "enclosed {}",
            snap.enclosed_lit_percent
        );
        Ok(())
    }

    #[test]
    fn test_winter_noon_reaches_covered_area() -> Result<()> {
        let site = test_site();
        let date = LocalDate::new(2025, 6, 21)?;
        let snap = Snapshot::compute(&site, &date, ClockTime::from_hm(12, 0)?, false, 1.0);
        assert!(snap.enclosed_lit_percent > 0.0);
        assert_eq!(
            snap.enclosed_lit_percent,
            percent(snap.lit_enclosed_points.len(), 26 * 15)
        );
        Ok(())
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(0, 0), 0.0);
        assert_eq!(percent(1, 4), 25.0);
    }
}
