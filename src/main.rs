use anyhow::{Result, anyhow};
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::path::PathBuf;

use sunplan::io::read_site;
use sunplan::sim::export::export_table;
use sunplan::sim::snapshot::Snapshot;
use sunplan::sim::sweep::{SweepConfig, sweep_day};
use sunplan::sim::zones::PlantingMap;
use sunplan::time::default_dst;
use sunplan::{ClockTime, LocalDate, SolarPosition};

#[derive(Parser)]
#[command(name = "sunplan")]
#[command(about = "Direct sun and shadows for a courtyard site", long_about = None)]
struct Cli {
    /// Site layout (JSON)
    site: PathBuf,

    /// More logging (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Local calendar day.
#[derive(Args)]
struct DayArgs {
    #[arg(long, default_value_t = 2025)]
    year: i32,

    #[arg(long)]
    month: u32,

    #[arg(long)]
    day: u32,

    /// Daylight-saving time (defaults to standard time May to October)
    #[arg(long)]
    dst: Option<bool>,
}

impl DayArgs {
    fn date(&self) -> Result<LocalDate> {
        LocalDate::new(self.year, self.month, self.day)
    }

    fn dst(&self) -> bool {
        self.dst.unwrap_or_else(|| default_dst(self.month))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Solar altitude and azimuth
    Sun {
        #[command(flatten)]
        day: DayArgs,

        /// Local clock time, HH:MM
        #[arg(long, value_parser = parse_clock)]
        time: ClockTime,
    },
    /// Shadows and lit fractions at one instant
    Snapshot {
        #[command(flatten)]
        day: DayArgs,

        /// Local clock time, HH:MM
        #[arg(long, value_parser = parse_clock)]
        time: ClockTime,

        /// Observation height [m]
        #[arg(long, default_value_t = 0.0)]
        height: f64,

        /// Print JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Sun hours over one day
    Sweep {
        #[command(flatten)]
        day: DayArgs,

        /// Observation height [m]
        #[arg(long, default_value_t = 0.0)]
        height: f64,

        /// Grid spacing [m]
        #[arg(long, default_value_t = 0.15)]
        spacing: f64,

        /// Print every cell as JSON
        #[arg(long)]
        json: bool,
    },
    /// Planting classes from summer and winter sun
    Zones {
        /// Observation height [m]
        #[arg(long, default_value_t = 0.0)]
        height: f64,
    },
    /// Sun hours for the seasonal presets as CSV
    Export {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_clock(s: &str) -> Result<ClockTime, String> {
    let parse = || -> Result<ClockTime> {
        let (h, m) = s
            .split_once(':')
            .ok_or_else(|| anyhow!("Expected HH:MM, got '{}'", s))?;
        ClockTime::from_hm(h.trim().parse()?, m.trim().parse()?)
    };
    parse().map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    SimpleLogger::new().with_level(level).init()?;

    let site = read_site(&cli.site)?;

    match cli.command {
        Commands::Sun { day, time } => {
            let date = day.date()?;
            let sun = SolarPosition::at_local(
                &date,
                time,
                site.utc_offset(day.dst()),
                site.latitude,
                site.longitude,
            );
            println!("{} {}", date, time);
            println!("Altitude: {:.2} deg", sun.altitude);
            println!("Azimuth:  {:.2} deg", sun.azimuth);
            println!("Local azimuth: {:.2} deg", sun.local_azimuth(site.north_offset));
        }
        Commands::Snapshot {
            day,
            time,
            height,
            json,
        } => {
            let date = day.date()?;
            let snap = Snapshot::compute(&site, &date, time, day.dst(), height);
            if json {
                println!("{}", serde_json::to_string_pretty(&snap)?);
            } else {
                println!("{} {}", date, time);
                println!(
                    "Sun: altitude {:.2} deg, azimuth {:.2} deg",
                    snap.sun.altitude, snap.sun.azimuth
                );
                println!("Wall shadows: {}", snap.shadows.len());
                println!("Open ground lit: {:.1}%", snap.open_lit_percent);
                println!("Covered ground lit: {:.1}%", snap.enclosed_lit_percent);
            }
        }
        Commands::Sweep {
            day,
            height,
            spacing,
            json,
        } => {
            let date = day.date()?;
            let config = SweepConfig {
                spacing,
                ..SweepConfig::new()
            };
            let sweep = sweep_day(&date, day.dst(), height, &site, &config);
            if json {
                println!("{}", serde_json::to_string_pretty(&sweep)?);
            } else {
                let stats = sweep.stats();
                println!("{} ({} cells)", date, sweep.cells.len());
                println!("Peak: {:.2} h", stats.peak_hours);
                println!("Average open: {:.2} h", stats.avg_open_hours);
                println!("Average covered: {:.2} h", stats.avg_enclosed_hours);
            }
        }
        Commands::Zones { height } => {
            let map = PlantingMap::compute(&site, height, &SweepConfig::new())?;
            for tally in map.tally() {
                println!(
                    "{:<11} {:>6.2} m2  {}",
                    tally.class.label(),
                    tally.area,
                    tally.class.plants()
                );
            }
        }
        Commands::Export { output } => {
            let table = export_table(&site, &SweepConfig::new())?;
            match output {
                Some(path) => {
                    table.write_csv(&path)?;
                    println!("Saved {} rows to {:?}", table.rows.len(), path);
                }
                None => print!("{}", table.to_csv()),
            }
        }
    }

    Ok(())
}
