//! Site layout JSON I/O.
//!
//! Layouts are checked with [`SiteConfig::validate`] on the way in, so a site
//! returned from here is ready for the engine.

use crate::SiteConfig;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Writes a site layout to a JSON file.
///
/// # Example
/// ```no_run
/// use sunplan::io::{read_site, write_site};
/// use std::path::Path;
///
/// let site = read_site(Path::new("sites/courtyard.json")).unwrap();
/// write_site(Path::new("copy.json"), &site).unwrap();
/// ```
pub fn write_site(path: &Path, site: &SiteConfig) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, site)
        .with_context(|| format!("Failed to serialize site to: {}", path.display()))?;

    Ok(())
}

/// Reads and validates a site layout from a JSON file.
pub fn read_site(path: &Path) -> Result<SiteConfig> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;
    let reader = BufReader::new(file);

    let site: SiteConfig = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to deserialize site from: {}", path.display()))?;
    site.validate()
        .with_context(|| format!("Invalid site layout in: {}", path.display()))?;

    Ok(site)
}

pub fn to_site_string(site: &SiteConfig) -> Result<String> {
    serde_json::to_string_pretty(site).context("Failed to serialize site to string")
}

/// Parses and validates a site layout from a JSON string.
pub fn from_site_string(json: &str) -> Result<SiteConfig> {
    let site: SiteConfig =
        serde_json::from_str(json).context("Failed to deserialize site from string")?;
    site.validate().context("Invalid site layout")?;
    Ok(site)
}
