//! Day-long sun-hour accumulation over a grid of ground samples.

use log::debug;
use rayon::prelude::*;
use serde::Serialize;

use crate::Point2;
use crate::sim::enclosed::is_point_lit_enclosed;
use crate::sim::shadow::{ShadowPolygon, is_outside_shadows, wall_shadows};
use crate::sim::solar::SolarPosition;
use crate::site::{SiteConfig, ZoneKind};
use crate::time::{ClockTime, LocalDate};

/// Configuration for a day sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    /// Grid spacing [m].
    pub spacing: f64,
    /// Time step [min].
    pub time_step: u32,
    /// First sampled clock time [min since midnight].
    pub window_start: u32,
    /// Last sampled clock time, inclusive [min since midnight].
    pub window_end: u32,
    /// Margin added around the zones' bounding box when laying out the grid [m].
    pub margin: f64,
    /// Calendar year used for seasonal reference days.
    pub year: i32,
}

impl SweepConfig {
    pub fn new() -> Self {
        Self {
            spacing: 0.15,
            time_step: 15,
            window_start: 360,
            window_end: 1080,
            margin: 0.5,
            year: 2025,
        }
    }

    /// Sampled clock times.
    pub fn instants(&self) -> impl Iterator<Item = u32> {
        (self.window_start..=self.window_end.min(1439)).step_by(self.time_step.max(1) as usize)
    }

    /// Ground area represented by one grid cell [m^2].
    pub fn cell_area(&self) -> f64 {
        self.spacing * self.spacing
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A ground sample and the direct sun it received.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridCell {
    pub x: f64,
    pub y: f64,
    /// Name of the zone the sample falls in.
    pub zone: String,
    pub kind: ZoneKind,
    /// Accumulated direct sun [min].
    pub minutes: u32,
}

impl GridCell {
    pub fn position(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }

    pub fn hours(&self) -> f64 {
        self.minutes as f64 / 60.0
    }
}

/// Lays out grid cells over the site's zones.
///
/// Samples sit at cell centres, starting half a spacing from the zones'
/// minimum corner and running up to the maximum corner plus `margin`. Only
/// samples inside a zone are kept, tagged with the first zone containing them.
pub fn grid_cells(site: &SiteConfig, spacing: f64, margin: f64) -> Vec<GridCell> {
    let mut cells = Vec::new();
    if spacing <= 0.0 || site.zones.is_empty() {
        return cells;
    }
    let (min, max) = site.zone_bbox();

    let mut x = min.x + spacing * 0.5;
    while x < max.x + margin {
        let mut y = min.y + spacing * 0.5;
        while y < max.y + margin {
            if let Some(zone) = site.zone_at(Point2::new(x, y)) {
                cells.push(GridCell {
                    x,
                    y,
                    zone: zone.name.clone(),
                    kind: zone.kind,
                    minutes: 0,
                });
            }
            y += spacing;
        }
        x += spacing;
    }
    cells
}

/// Sun state at one sampled instant, shared by all cells.
#[derive(Debug, Clone)]
pub struct SunInstant {
    pub clock: ClockTime,
    pub sun: SolarPosition,
    /// Azimuth in the site plan frame [deg].
    pub local_azimuth: f64,
    /// Wall shadows on the observation plane.
    pub shadows: Vec<ShadowPolygon>,
}

impl SunInstant {
    pub fn new(
        site: &SiteConfig,
        date: &LocalDate,
        clock: ClockTime,
        dst: bool,
        observation_height: f64,
    ) -> Self {
        let sun = SolarPosition::at_local(
            date,
            clock,
            site.utc_offset(dst),
            site.latitude,
            site.longitude,
        );
        let shadows = wall_shadows(
            &site.walls,
            sun.azimuth,
            sun.altitude,
            observation_height,
            site.north_offset,
        );
        Self {
            clock,
            sun,
            local_azimuth: sun.local_azimuth(site.north_offset),
            shadows,
        }
    }
}

/// Sun instants for a day, dropping those with the sun at or below the cutoff.
pub fn sun_instants(
    site: &SiteConfig,
    date: &LocalDate,
    dst: bool,
    observation_height: f64,
    config: &SweepConfig,
) -> Vec<SunInstant> {
    config
        .instants()
        .filter_map(|m| ClockTime::new(m).ok())
        .map(|clock| SunInstant::new(site, date, clock, dst, observation_height))
        .filter(|inst| inst.sun.is_usable())
        .collect()
}

/// Per-cell sun test at a fixed observation height.
struct Occlusion<'a> {
    site: &'a SiteConfig,
    observation_height: f64,
}

impl Occlusion<'_> {
    fn is_lit(&self, cell: &GridCell, inst: &SunInstant) -> bool {
        if !inst.sun.is_usable() {
            return false;
        }
        match cell.kind {
            ZoneKind::Open => is_outside_shadows(cell.position(), &inst.shadows),
            ZoneKind::Enclosed => self.site.enclosure.as_ref().is_some_and(|volume| {
                is_point_lit_enclosed(
                    cell.position().at_height(self.observation_height),
                    volume,
                    &self.site.occluders,
                    inst.local_azimuth,
                    inst.sun.altitude,
                )
            }),
        }
    }
}

/// Adds `time_step` minutes to every cell lit at each of the given instants.
///
/// Cells are independent, so they are processed in parallel. The result does
/// not depend on the order of `instants`.
pub fn accumulate(
    cells: &mut [GridCell],
    instants: &[SunInstant],
    site: &SiteConfig,
    observation_height: f64,
    time_step: u32,
) {
    let occlusion = Occlusion {
        site,
        observation_height,
    };
    cells.par_iter_mut().for_each(|cell| {
        for inst in instants {
            if occlusion.is_lit(cell, inst) {
                cell.minutes += time_step;
            }
        }
    });
}

/// Result of a day sweep.
#[derive(Debug, Clone, Serialize)]
pub struct DaySweep {
    pub cells: Vec<GridCell>,
    /// Grid spacing [m].
    pub spacing: f64,
}

/// Summary statistics of a day sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeatmapStats {
    /// Largest accumulated sun of any cell [min], at least 1.
    pub peak_minutes: u32,
    pub peak_hours: f64,
    /// Mean sun hours over open cells (0 if none).
    pub avg_open_hours: f64,
    /// Mean sun hours over enclosed cells (0 if none).
    pub avg_enclosed_hours: f64,
}

impl DaySweep {
    pub fn stats(&self) -> HeatmapStats {
        let peak_minutes = self.cells.iter().map(|c| c.minutes).max().unwrap_or(0).max(1);
        let avg = |kind: ZoneKind| {
            let (sum, n) = self
                .cells
                .iter()
                .filter(|c| c.kind == kind)
                .fold((0u64, 0usize), |(s, n), c| (s + u64::from(c.minutes), n + 1));
            if n == 0 {
                0.0
            } else {
                sum as f64 / n as f64 / 60.0
            }
        };
        HeatmapStats {
            peak_minutes,
            peak_hours: peak_minutes as f64 / 60.0,
            avg_open_hours: avg(ZoneKind::Open),
            avg_enclosed_hours: avg(ZoneKind::Enclosed),
        }
    }
}

/// Accumulates direct sun over one day for every grid cell of the site.
///
/// - `date`: local calendar date
/// - `dst`: whether daylight-saving time applies
/// - `observation_height`: height of the sampled plane [m], clamped to the site's range
pub fn sweep_day(
    date: &LocalDate,
    dst: bool,
    observation_height: f64,
    site: &SiteConfig,
    config: &SweepConfig,
) -> DaySweep {
    let height = site.clamp_height(observation_height);
    let mut cells = grid_cells(site, config.spacing, config.margin);
    let instants = sun_instants(site, date, dst, height, config);
    debug!(
        "Sweeping {} at {:.2} m: {} cells, {} sunlit instants",
        date,
        height,
        cells.len(),
        instants.len()
    );
    accumulate(&mut cells, &instants, site, height, config.time_step);
    DaySweep {
        cells,
        spacing: config.spacing,
    }
}
