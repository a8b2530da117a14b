//! Sun hours for a catalog of seasonal days and observation heights.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use log::info;

use crate::sim::sweep::{SweepConfig, sweep_day};
use crate::site::SiteConfig;
use crate::time::LocalDate;

/// Named reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonPreset {
    pub label: &'static str,
    pub month: u32,
    pub day: u32,
    /// Daylight-saving time in effect on that day.
    pub dst: bool,
}

/// Solstices and equinoxes.
pub const PRESETS: [SeasonPreset; 4] = [
    SeasonPreset {
        label: "jun21",
        month: 6,
        day: 21,
        dst: false,
    },
    SeasonPreset {
        label: "sep21",
        month: 9,
        day: 21,
        dst: false,
    },
    SeasonPreset {
        label: "dec21",
        month: 12,
        day: 21,
        dst: true,
    },
    SeasonPreset {
        label: "mar21",
        month: 3,
        day: 21,
        dst: true,
    },
];

/// Observation heights [m].
pub const HEIGHTS: [f64; 3] = [0.0, 0.5, 1.0];

/// Column name for a preset at a height, e.g. `dec21_50cm`.
pub fn column_name(preset: &SeasonPreset, height: f64) -> String {
    format!("{}_{}cm", preset.label, (height * 100.0).round() as i64)
}

/// Formats a coordinate to two decimals, rounding exact half-cent ties away from zero.
///
/// `{:.2}` rounds such ties to even (`1.125` gives `1.12`). A tie is only
/// exact for odd multiples of 1/8, where `v * 100` is exact and `round`
/// resolves it away from zero.
fn fixed2(v: f64) -> String {
    let eighths = v * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        format!("{:.2}", (v * 100.0).round() / 100.0)
    } else {
        format!("{:.2}", v)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub x: f64,
    pub y: f64,
    pub zone: String,
    /// Sun hours, one entry per column.
    pub hours: Vec<f64>,
}

/// Grid cells by (preset, height) sun hours.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportTable {
    pub columns: Vec<String>,
    pub rows: Vec<ExportRow>,
}

impl ExportTable {
    /// Renders the table as CSV with `\n` line endings.
    pub fn to_csv(&self) -> String {
        let mut s = String::from("x,y,zone");
        for col in &self.columns {
            s.push(',');
            s.push_str(col);
        }
        s.push('\n');
        for row in &self.rows {
            // Writing to a String cannot fail
            let _ = write!(s, "{},{},{}", fixed2(row.x), fixed2(row.y), row.zone);
            for h in &row.hours {
                let _ = write!(s, ",{:.2}", h);
            }
            s.push('\n');
        }
        s
    }

    pub fn write_csv(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_csv())
            .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
        info!("Wrote {} rows to {}", self.rows.len(), path.display());
        Ok(())
    }
}

/// Sweeps every preset at every height.
///
/// Columns are ordered by preset first, then by height. All sweeps share the
/// same grid, so row `i` is the same sample in every column.
pub fn export_table(site: &SiteConfig, config: &SweepConfig) -> Result<ExportTable> {
    let mut columns = Vec::with_capacity(PRESETS.len() * HEIGHTS.len());
    let mut rows: Vec<ExportRow> = Vec::new();

    for preset in &PRESETS {
        let date = LocalDate::new(config.year, preset.month, preset.day)?;
        for &height in &HEIGHTS {
            let sweep = sweep_day(&date, preset.dst, height, site, config);
            if rows.is_empty() && columns.is_empty() {
                rows = sweep
                    .cells
                    .iter()
                    .map(|c| ExportRow {
                        x: c.x,
                        y: c.y,
                        zone: c.zone.clone(),
                        hours: Vec::new(),
                    })
                    .collect();
            } else if sweep.cells.len() != rows.len() {
                bail!(
                    "Sweep for {} has {} cells, expected {}",
                    column_name(preset, height),
                    sweep.cells.len(),
                    rows.len()
                );
            }
            for (row, cell) in rows.iter_mut().zip(&sweep.cells) {
                row.hours.push(cell.hours());
            }
            columns.push(column_name(preset, height));
        }
    }

    info!("Exported {} cells across {} columns", rows.len(), columns.len());
    Ok(ExportTable { columns, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::tests::test_site;

    #[test]
    fn test_column_names() {
        assert_eq!(column_name(&PRESETS[0], 0.0), "jun21_0cm");
        assert_eq!(column_name(&PRESETS[2], 0.5), "dec21_50cm");
        assert_eq!(column_name(&PRESETS[3], 1.0), "mar21_100cm");
    }

    #[test]
    fn test_to_csv_format() {
        let table = ExportTable {
            columns: vec!["jun21_0cm".to_string(), "jun21_50cm".to_string()],
            rows: vec![ExportRow {
                x: 0.075,
                y: 1.5,
                zone: "open".to_string(),
                hours: vec![2.25, 10.0 / 3.0],
            }],
        };
        let csv = table.to_csv();
        assert_eq!(csv, "x,y,zone,jun21_0cm,jun21_50cm\n0.07,1.50,open,2.25,3.33\n");
    }

    #[test]
    fn test_coordinate_ties_round_up() {
        assert_eq!(fixed2(1.125), "1.13");
        assert_eq!(fixed2(0.375), "0.38");
        assert_eq!(fixed2(-1.125), "-1.13");
        assert_eq!(fixed2(2.0), "2.00");
        assert_eq!(fixed2(1.5), "1.50");
        // Not an exact tie in binary
        assert_eq!(fixed2(0.075), "0.07");
        assert_eq!(fixed2(1.005), "1.00");

        let table = ExportTable {
            columns: vec!["dec21_0cm".to_string()],
            rows: vec![ExportRow {
                x: 1.125,
                y: 0.375,
                zone: "open".to_string(),
                hours: vec![4.25],
            }],
        };
        assert_eq!(table.to_csv(), "x,y,zone,dec21_0cm\n1.13,0.38,open,4.25\n");
    }

    #[test]
    fn test_export_table() -> Result<()> {
        let site = test_site();
        let config = SweepConfig {
            spacing: 0.5,
            ..SweepConfig::new()
        };
        let table = export_table(&site, &config)?;
        assert_eq!(table.columns.len(), 12);
        assert_eq!(table.columns[0], "jun21_0cm");
        assert_eq!(table.columns[11], "mar21_100cm");
        assert!(!table.rows.is_empty());
        for row in &table.rows {
            assert_eq!(row.hours.len(), 12);
            assert!(row.hours.iter().all(|h| (0.0..=12.25).contains(h)));
        }

        let csv = table.to_csv();
        let mut lines = csv.lines();
        let header = "x,y,zone,\
            jun21_0cm,jun21_50cm,jun21_100cm,\
            sep21_0cm,sep21_50cm,sep21_100cm,\
            dec21_0cm,dec21_50cm,dec21_100cm,\
            mar21_0cm,mar21_50cm,mar21_100cm";
        assert_eq!(lines.next(), Some(header));
        assert_eq!(lines.count(), table.rows.len());
        assert!(csv.ends_with('\n'));
        assert!(!csv.contains('\r'));

        // Same inputs, same bytes
        assert_eq!(csv, export_table(&site, &config)?.to_csv());
        Ok(())
    }

    #[test]
    fn test_write_csv() -> Result<()> {
        let table = ExportTable {
            columns: vec!["sep21_0cm".to_string()],
            rows: vec![],
        };
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("sun-hours.csv");
        table.write_csv(&path)?;
        assert_eq!(fs::read_to_string(&path)?, "x,y,zone,sep21_0cm\n");
        Ok(())
    }
}
