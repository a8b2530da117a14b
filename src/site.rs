//! Site configuration: location, time zone and layout.
//!
//! Everything the engine knows about a site is passed in through a
//! [`SiteConfig`]; nothing about a particular layout is built in.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::Point2;
use crate::geom::enclosure::{EnclosedVolume, ExternalOccluder};
use crate::geom::polygon::Polygon;
use crate::geom::segment::WallSegment;

/// How ground in a zone is tested for sun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneKind {
    /// Open to the sky; shaded only by wall shadows.
    Open,
    /// Inside the site's enclosed volume; lit only through its opening.
    Enclosed,
}

/// Named ground zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteZone {
    pub name: String,
    pub kind: ZoneKind,
    pub outline: Polygon,
}

fn default_max_observation_height() -> f64 {
    1.5
}

/// Complete description of a site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub name: String,
    /// Latitude in degrees (positive north).
    pub latitude: f64,
    /// Longitude in degrees (positive east).
    pub longitude: f64,
    /// Clockwise rotation of the plan's north from true north [deg].
    #[serde(default)]
    pub north_offset: f64,
    /// UTC offset during standard time [h].
    pub standard_utc_offset: f64,
    /// UTC offset during daylight-saving time [h].
    pub daylight_utc_offset: f64,
    /// Highest observation plane accepted [m].
    #[serde(default = "default_max_observation_height")]
    pub max_observation_height: f64,
    /// Zones in priority order: a point in several zones belongs to the first one.
    pub zones: Vec<SiteZone>,
    /// Walls casting shadows on open zones.
    #[serde(default)]
    pub walls: Vec<WallSegment>,
    /// Volume containing the enclosed zones.
    #[serde(default)]
    pub enclosure: Option<EnclosedVolume>,
    /// Obstacles beyond the enclosure's opening.
    #[serde(default)]
    pub occluders: Vec<ExternalOccluder>,
}

impl SiteConfig {
    /// Checks the layout for values the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            bail!("Latitude out of range: {}", self.latitude);
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            bail!("Longitude out of range: {}", self.longitude);
        }
        if self.max_observation_height < 0.0 {
            bail!(
                "Negative maximum observation height: {}",
                self.max_observation_height
            );
        }
        if self.zones.is_empty() {
            bail!("Site '{}' has no zones", self.name);
        }
        for zone in &self.zones {
            if zone.outline.pts.len() < 3 {
                bail!(
                    "Zone '{}' outline needs at least 3 vertices, got {}",
                    zone.name,
                    zone.outline.pts.len()
                );
            }
        }
        for (i, wall) in self.walls.iter().enumerate() {
            if wall.height < 0.0 {
                bail!("Wall {} has negative height: {}", i, wall.height);
            }
        }
        let has_enclosed = self.zones.iter().any(|z| z.kind == ZoneKind::Enclosed);
        match &self.enclosure {
            Some(vol) => vol.validate()?,
            None if has_enclosed => bail!("Site has enclosed zones but no enclosure"),
            None => {}
        }
        for occ in &self.occluders {
            occ.validate()?;
        }
        Ok(())
    }

    /// UTC offset [h] for standard (`dst = false`) or daylight time.
    pub fn utc_offset(&self, dst: bool) -> f64 {
        if dst {
            self.daylight_utc_offset
        } else {
            self.standard_utc_offset
        }
    }

    /// Clamps an observation height into `0..=max_observation_height`.
    pub fn clamp_height(&self, height: f64) -> f64 {
        height.clamp(0.0, self.max_observation_height.max(0.0))
    }

    /// First zone containing the point.
    pub fn zone_at(&self, pt: Point2) -> Option<&SiteZone> {
        self.zones.iter().find(|z| z.outline.is_point_inside(pt))
    }

    /// Zones of the given kind.
    pub fn zones_of(&self, kind: ZoneKind) -> impl Iterator<Item = &SiteZone> {
        self.zones.iter().filter(move |z| z.kind == kind)
    }

    /// Bounding box (min, max) of all zone outlines.
    pub fn zone_bbox(&self) -> (Point2, Point2) {
        let mut min = Point2::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for zone in &self.zones {
            let (zmin, zmax) = zone.outline.bbox();
            min.x = min.x.min(zmin.x);
            min.y = min.y.min(zmin.y);
            max.x = max.x.max(zmax.x);
            max.y = max.y.max(zmax.y);
        }
        (min, max)
    }
}
