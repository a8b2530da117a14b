use anyhow::Result;
use std::path::PathBuf;
use sunplan::io::{from_site_string, read_site};
use sunplan::sim::export::export_table;
use sunplan::sim::shadow::{is_point_lit_open, wall_shadow};
use sunplan::sim::snapshot::Snapshot;
use sunplan::sim::sweep::{SweepConfig, grid_cells, sweep_day};
use sunplan::sim::zones::{PlantingMap, ZoneClassification};
use sunplan::{ClockTime, LocalDate, Point2, SiteConfig, SolarPosition, WallSegment, ZoneKind};

fn courtyard() -> Result<SiteConfig> {
    from_site_string(include_str!("../sites/courtyard.json"))
}

#[test]
fn test_bundled_site_loads() -> Result<()> {
    let site = courtyard()?;
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("sites/courtyard.json");
    assert_eq!(read_site(&path)?, site);

    assert_eq!(site.zones.len(), 2);
    assert_eq!(site.walls.len(), 7);
    assert_eq!(site.occluders.len(), 5);
    assert!(site.enclosure.is_some());
    assert_eq!(site.zone_at(Point2::new(3.0, 1.5)).map(|z| z.kind), Some(ZoneKind::Open));
    assert_eq!(
        site.zone_at(Point2::new(1.0, 3.5)).map(|z| z.kind),
        Some(ZoneKind::Enclosed)
    );
    Ok(())
}

#[test]
fn test_wall_shadow_cutoff_distance() -> Result<()> {
    let site = courtyard()?;
    // North courtyard wall only, 1.8 m high; sun square to it at 40 degrees
    let walls: Vec<WallSegment> = site.walls[..1].to_vec();
    let az = site.north_offset;
    let lit = |y: f64| {
        is_point_lit_open(Point2::new(2.5, y), &walls, az, 40.0, 0.0, site.north_offset)
    };

    assert!(!lit(1.0));
    assert!(lit(3.0));
    let reach = 1.8 / 40f64.to_radians().tan();
    assert!((reach - 2.145).abs() < 0.01);
    assert!(!lit(reach - 0.01));
    assert!(lit(reach + 0.01));

    let shadow = wall_shadow(&walls[0], az, 40.0, 0.0, site.north_offset);
    assert!(shadow.is_some_and(|s| (s.length() - reach).abs() < 1e-9));
    Ok(())
}

#[test]
fn test_noon_sun_is_northern() -> Result<()> {
    let site = courtyard()?;
    for month in [3, 6, 9, 12] {
        let date = LocalDate::new(2025, month, 21)?;
        let sun = SolarPosition::at_local(
            &date,
            ClockTime::from_hm(12, 0)?,
            site.standard_utc_offset,
            site.latitude,
            site.longitude,
        );
        assert!(sun.altitude > 0.0);
        assert!(sun.azimuth < 15.0 || sun.azimuth > 345.0, "azimuth {}", sun.azimuth);
    }
    Ok(())
}

#[test]
fn test_summer_sunnier_than_winter() -> Result<()> {
    let site = courtyard()?;
    let config = SweepConfig::new();
    let summer = sweep_day(&LocalDate::new(2025, 12, 21)?, true, 0.0, &site, &config);
    let winter = sweep_day(&LocalDate::new(2025, 6, 21)?, false, 0.0, &site, &config);
    let (s, w) = (summer.stats(), winter.stats());
    assert!(s.avg_open_hours > w.avg_open_hours);
    assert!(s.peak_hours <= 12.25);
    // Low winter sun reaches further under the balcony
    assert!(w.avg_enclosed_hours > 0.0);
    Ok(())
}

#[test]
fn test_snapshot_matches_sweep_sampling() -> Result<()> {
    let site = courtyard()?;
    let date = LocalDate::new(2025, 9, 21)?;
    let night = Snapshot::compute(&site, &date, ClockTime::from_hm(3, 0)?, false, 0.0);
    assert_eq!(night.open_lit_percent, 0.0);
    assert!(night.shadows.is_empty());

    let noon = Snapshot::compute(&site, &date, ClockTime::from_hm(12, 0)?, false, 5.0);
    assert!(noon.sun.is_usable());
    assert!(noon.open_lit_percent > 0.0 && noon.open_lit_percent <= 100.0);
    assert!(noon.enclosed_lit_percent <= 100.0);
    Ok(())
}

#[test]
fn test_planting_map_covers_grid() -> Result<()> {
    let site = courtyard()?;
    let config = SweepConfig::new();
    let map = PlantingMap::compute(&site, 0.0, &config)?;
    assert_eq!(map.cells.len(), grid_cells(&site, config.spacing, config.margin).len());
    let tally = map.tally();
    let area: f64 = tally.iter().map(|t| t.area).sum();
    // Courtyard and covered area together are 19.1 m^2
    assert!((area - 19.1).abs() < 0.8, "area {}", area);
    // Centre of the courtyard is sunny in summer
    assert!(
        map.cells
            .iter()
            .any(|c| matches!(c.class, ZoneClassification::FullSun | ZoneClassification::SummerSun))
    );
    Ok(())
}

#[test]
fn test_export_csv() -> Result<()> {
    let site = courtyard()?;
    let config = SweepConfig::new();
    let table = export_table(&site, &config)?;
    let csv = table.to_csv();

    let header = csv.lines().next().unwrap_or_default();
    assert!(header.starts_with("x,y,zone,jun21_0cm,jun21_50cm,jun21_100cm,sep21_0cm"));
    assert!(header.ends_with("mar21_100cm"));
    assert_eq!(csv.lines().count(), 1 + grid_cells(&site, config.spacing, config.margin).len());

    // The grid row at y = 1.125 sits on a half-cent tie and rounds up
    let ys: Vec<&str> = csv.lines().skip(1).filter_map(|l| l.split(',').nth(1)).collect();
    assert!(ys.contains(&"1.13"));
    assert!(!ys.contains(&"1.12"));

    for line in csv.lines().skip(1) {
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields.len(), 15);
        assert!(fields[2] == "open" || fields[2] == "covered");
        for f in &fields[3..] {
            let hours: f64 = f.parse()?;
            assert!((0.0..=12.25).contains(&hours));
        }
    }
    Ok(())
}
