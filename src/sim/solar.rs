use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::Serialize;

use crate::time::{ClockTime, LocalDate, MINUTES_PER_DAY, to_utc};

/// Altitude [deg] at or below which the sun is treated as casting no usable light.
///
/// Shadow lengths diverge as tan(altitude) -> 0.
pub const SUN_CUTOFF_DEG: f64 = 0.5;

/// Below this cosine of altitude the sun counts as overhead and azimuth is 0.
const OVERHEAD_COS_EPS: f64 = 0.001;

/// Julian Day number for a UTC calendar instant.
///
/// `hour` is the fractional UTC hour. January and February count as months
/// 13 and 14 of the previous year, with the Gregorian century correction.
pub fn julian_day(year: i32, month: u32, day: u32, hour: f64) -> f64 {
    let (mut yr, mut mo) = (year as f64, month as f64);
    if month <= 2 {
        yr -= 1.0;
        mo += 12.0;
    }
    let a = (yr / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (yr + 4716.0)).floor() + (30.6001 * (mo + 1.0)).floor() + day as f64 + hour / 24.0
        + b
        - 1524.5
}

/// Solar position (azimuth and elevation angles).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolarPosition {
    /// Solar altitude angle in degrees (0 = horizon, 90 = zenith, negative below the horizon).
    pub altitude: f64,
    /// Solar azimuth angle in degrees from true north, clockwise (0=N, 90=E, 180=S, 270=W).
    pub azimuth: f64,
}

impl SolarPosition {
    /// Calculates the solar position using the NOAA solar geometry approximation.
    ///
    /// - `utc`: the instant, in UTC
    /// - `latitude`: in degrees (positive north)
    /// - `longitude`: in degrees (positive east)
    pub fn calculate(utc: NaiveDateTime, latitude: f64, longitude: f64) -> Self {
        let hour = utc.hour() as f64 + utc.minute() as f64 / 60.0 + utc.second() as f64 / 3600.0;
        let jd = julian_day(utc.year(), utc.month(), utc.day(), hour);
        let jc = (jd - 2451545.0) / 36525.0;

        // Geometric mean longitude, mean anomaly, eccentricity
        let l0 = (280.46646 + jc * (36000.76983 + 0.0003032 * jc)) % 360.0;
        let m = 357.52911 + jc * (35999.05029 - 0.0001537 * jc);
        let e = 0.016708634 - jc * (0.000042037 + 0.0000001267 * jc);
        let m_rad = m.to_radians();

        // Equation of center
        let c = m_rad.sin() * (1.914602 - jc * (0.004817 + 0.000014 * jc))
            + (2.0 * m_rad).sin() * (0.019993 - 0.000101 * jc)
            + (3.0 * m_rad).sin() * 0.000289;

        // Apparent longitude (nutation and aberration)
        let omega = (125.04 - 1934.136 * jc).to_radians();
        let apparent_lon = l0 + c - 0.00569 - 0.00478 * omega.sin();

        // Corrected obliquity of the ecliptic
        let mean_obliquity =
            23.0 + (26.0 + (21.448 - jc * (46.815 + jc * (0.00059 - jc * 0.001813))) / 60.0) / 60.0;
        let obliquity = mean_obliquity + 0.00256 * omega.cos();

        let declination = (obliquity.to_radians().sin() * apparent_lon.to_radians().sin()).asin();

        // Equation of time [min]
        let y = (obliquity / 2.0).to_radians().tan().powi(2);
        let l0_rad = l0.to_radians();
        let eot = 4.0
            * (y * (2.0 * l0_rad).sin() - 2.0 * e * m_rad.sin()
                + 4.0 * e * y * m_rad.sin() * (2.0 * l0_rad).cos()
                - 0.5 * y * y * (4.0 * l0_rad).sin()
                - 1.25 * e * e * (2.0 * m_rad).sin())
                .to_degrees();

        // True solar time [min] and hour angle [deg]
        let tst = (hour * 60.0 + eot + 4.0 * longitude).rem_euclid(MINUTES_PER_DAY as f64);
        let hour_angle = tst / 4.0 - 180.0;

        // Solar altitude
        let lat = latitude.to_radians();
        let sin_alt = lat.sin() * declination.sin()
            + lat.cos() * declination.cos() * hour_angle.to_radians().cos();
        let altitude = sin_alt.clamp(-1.0, 1.0).asin().to_degrees();

        // Solar azimuth
        let cos_alt = altitude.to_radians().cos();
        let mut azimuth = 0.0;
        if cos_alt > OVERHEAD_COS_EPS {
            let cos_az = (lat.sin() * sin_alt - declination.sin()) / (lat.cos() * cos_alt);
            let ac = cos_az.clamp(-1.0, 1.0).acos().to_degrees();
            azimuth = if hour_angle > 0.0 {
                (ac + 180.0) % 360.0
            } else {
                (540.0 - ac) % 360.0
            };
        }

        Self { altitude, azimuth }
    }

    /// Solar position at a local date and clock time.
    ///
    /// `utc_offset_hours` selects standard or daylight time for the site.
    pub fn at_local(
        date: &LocalDate,
        clock: ClockTime,
        utc_offset_hours: f64,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self::calculate(to_utc(date, clock, utc_offset_hours), latitude, longitude)
    }

    /// Returns true if the sun is above the given altitude [deg].
    pub fn is_above(&self, cutoff_deg: f64) -> bool {
        self.altitude > cutoff_deg
    }

    /// Returns true if the sun is high enough to cast usable light.
    pub fn is_usable(&self) -> bool {
        self.is_above(SUN_CUTOFF_DEG)
    }

    /// Azimuth in the site's plan frame, which is rotated `north_offset` degrees from true north.
    pub fn local_azimuth(&self, north_offset: f64) -> f64 {
        self.azimuth - north_offset
    }
}
