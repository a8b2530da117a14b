//! File I/O for site layouts.

pub mod site;

pub use site::{from_site_string, read_site, to_site_string, write_site};
