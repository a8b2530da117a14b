//! Planting suitability from summer and winter sun hours.

use anyhow::{Result, bail};
use log::info;
use serde::Serialize;

use crate::sim::sweep::{SweepConfig, sweep_day};
use crate::site::SiteConfig;
use crate::time::LocalDate;

/// Sun-exposure class of a patch of ground.
///
/// Variants are listed in evaluation priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneClassification {
    /// Plenty of sun in summer and in winter.
    FullSun,
    /// Plenty of sun in summer only.
    SummerSun,
    /// A few hours of summer sun.
    PartSun,
    /// Little summer sun, some winter sun.
    WinterSun,
    Shade,
}

impl ZoneClassification {
    pub const ALL: [ZoneClassification; 5] = [
        ZoneClassification::FullSun,
        ZoneClassification::SummerSun,
        ZoneClassification::PartSun,
        ZoneClassification::WinterSun,
        ZoneClassification::Shade,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ZoneClassification::FullSun => "fullsun",
            ZoneClassification::SummerSun => "summersun",
            ZoneClassification::PartSun => "partsun",
            ZoneClassification::WinterSun => "wintersun",
            ZoneClassification::Shade => "shade",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ZoneClassification::FullSun => "Full Sun",
            ZoneClassification::SummerSun => "Summer Sun",
            ZoneClassification::PartSun => "Part Sun",
            ZoneClassification::WinterSun => "Winter Sun",
            ZoneClassification::Shade => "Shade",
        }
    }

    /// Suggested plantings.
    pub fn plants(self) -> &'static str {
        match self {
            ZoneClassification::FullSun => "Tomato, capsicum, banksia, fruit trees",
            ZoneClassification::SummerSun => "Warm-season veggies, basil, zucchini",
            ZoneClassification::PartSun => "Lettuce, herbs, strawberries, silverbeet",
            ZoneClassification::WinterSun => "Cool-season greens, coriander, parsley",
            ZoneClassification::Shade => "Very limited: ferns, moss",
        }
    }
}

/// Classifies ground by its summer and winter reference sun hours.
///
/// Rules are tried in order and the first match wins.
pub fn classify_zone(summer_hours: f64, winter_hours: f64) -> ZoneClassification {
    if summer_hours >= 6.0 && winter_hours >= 4.0 {
        ZoneClassification::FullSun
    } else if summer_hours >= 6.0 {
        ZoneClassification::SummerSun
    } else if summer_hours >= 3.0 {
        ZoneClassification::PartSun
    } else if winter_hours >= 2.0 {
        ZoneClassification::WinterSun
    } else {
        ZoneClassification::Shade
    }
}

/// Reference days: Dec 21 under daylight time and Aug 1 under standard time.
pub const SUMMER_REFERENCE: (u32, u32, bool) = (12, 21, true);
pub const WINTER_REFERENCE: (u32, u32, bool) = (8, 1, false);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlantingCell {
    pub x: f64,
    pub y: f64,
    pub zone: String,
    pub class: ZoneClassification,
    pub summer_hours: f64,
    pub winter_hours: f64,
}

/// Area covered by one class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneTally {
    pub class: ZoneClassification,
    pub count: usize,
    /// [m^2]
    pub area: f64,
}

/// Planting classes for every grid cell of a site.
#[derive(Debug, Clone, Serialize)]
pub struct PlantingMap {
    pub cells: Vec<PlantingCell>,
    pub spacing: f64,
    /// Ground area of one cell [m^2].
    pub cell_area: f64,
}

impl PlantingMap {
    /// Sweeps the summer and winter reference days and classifies every cell.
    pub fn compute(
        site: &SiteConfig,
        observation_height: f64,
        config: &SweepConfig,
    ) -> Result<Self> {
        let (sm, sd, sdst) = SUMMER_REFERENCE;
        let (wm, wd, wdst) = WINTER_REFERENCE;
        let summer = sweep_day(
            &LocalDate::new(config.year, sm, sd)?,
            sdst,
            observation_height,
            site,
            config,
        );
        let winter = sweep_day(
            &LocalDate::new(config.year, wm, wd)?,
            wdst,
            observation_height,
            site,
            config,
        );
        if summer.cells.len() != winter.cells.len() {
            bail!(
                "Reference sweeps disagree on grid size: {} vs {}",
                summer.cells.len(),
                winter.cells.len()
            );
        }

        let cells: Vec<PlantingCell> = summer
            .cells
            .iter()
            .zip(&winter.cells)
            .map(|(s, w)| PlantingCell {
                x: s.x,
                y: s.y,
                zone: s.zone.clone(),
                class: classify_zone(s.hours(), w.hours()),
                summer_hours: s.hours(),
                winter_hours: w.hours(),
            })
            .collect();
        info!("Classified {} cells for planting", cells.len());

        Ok(Self {
            cells,
            spacing: config.spacing,
            cell_area: config.cell_area(),
        })
    }

    /// Cell count and area per class, in priority order.
    pub fn tally(&self) -> Vec<ZoneTally> {
        ZoneClassification::ALL
            .iter()
            .map(|&class| {
                let count = self.cells.iter().filter(|c| c.class == class).count();
                ZoneTally {
                    class,
                    count,
                    area: count as f64 * self.cell_area,
                }
            })
            .collect()
    }
}
