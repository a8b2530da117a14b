//! Calendar dates, local clock times and their conversion to UTC.

use anyhow::{Result, anyhow, bail};
use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use std::fmt;

/// Days per month used to validate dates. February always allows 29 days.
pub const DAYS_IN_MONTH: [u32; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Abbreviated month names.
pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Minutes in a day.
pub const MINUTES_PER_DAY: u32 = 1440;

/// Calendar date in the site's local time zone.
///
/// A day past the real end of the month (Feb 29 in a common year) rolls
/// over into the following month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalDate {
    year: i32,
    month: u32,
    day: u32,
    naive: NaiveDate,
}

impl LocalDate {
    /// Creates a date, checking month and day against [`DAYS_IN_MONTH`].
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            bail!("Invalid month: {} (expected 1-12)", month);
        }
        let max_day = DAYS_IN_MONTH[(month - 1) as usize];
        if !(1..=max_day).contains(&day) {
            bail!(
                "Invalid day {} for {} (expected 1-{})",
                day,
                MONTH_NAMES[(month - 1) as usize],
                max_day
            );
        }
        let naive = NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|first| first.checked_add_days(Days::new(u64::from(day - 1))))
            .ok_or_else(|| anyhow!("Date out of range: {}-{:02}-{:02}", year, month, day))?;
        Ok(Self {
            year,
            month,
            day,
            naive,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Actual calendar day (after any month rollover).
    pub fn naive(&self) -> NaiveDate {
        self.naive
    }
}

impl fmt::Display for LocalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            MONTH_NAMES[(self.month - 1) as usize],
            self.day,
            self.year
        )
    }
}

/// Local clock time as minutes since midnight (0-1439).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u32);

impl ClockTime {
    pub fn new(minutes: u32) -> Result<Self> {
        if minutes >= MINUTES_PER_DAY {
            bail!("Invalid clock time: {} minutes (expected 0-1439)", minutes);
        }
        Ok(Self(minutes))
    }

    pub fn from_hm(hour: u32, minute: u32) -> Result<Self> {
        if minute >= 60 {
            bail!("Invalid minute: {}", minute);
        }
        let Some(minutes) = hour.checked_mul(60).and_then(|m| m.checked_add(minute)) else {
            bail!("Invalid hour: {}", hour);
        };
        Self::new(minutes)
    }

    pub fn minutes(&self) -> u32 {
        self.0
    }

    pub fn hour(&self) -> u32 {
        self.0 / 60
    }

    pub fn minute(&self) -> u32 {
        self.0 % 60
    }
}

impl fmt::Display for ClockTime {
    /// 12-hour clock, e.g. `6:15 am`, `12:00 pm`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = self.hour();
        let suffix = if h >= 12 { "pm" } else { "am" };
        let h12 = match h {
            0 => 12,
            13.. => h - 12,
            _ => h,
        };
        write!(f, "{}:{:02} {}", h12, self.minute(), suffix)
    }
}

/// Converts a local date and clock time to a UTC instant.
///
/// `utc_offset_hours` is the site's offset from UTC (e.g. `10.0` for UTC+10).
/// The calendar day rolls back or forward when the offset crosses midnight.
pub fn to_utc(date: &LocalDate, clock: ClockTime, utc_offset_hours: f64) -> NaiveDateTime {
    let offset_minutes = (utc_offset_hours * 60.0).round() as i64;
    date.naive().and_time(NaiveTime::MIN) + TimeDelta::minutes(i64::from(clock.minutes()))
        - TimeDelta::minutes(offset_minutes)
}

/// Whether daylight-saving time is assumed for a month (1-12) at a
/// southern-hemisphere site: standard time from May to October.
pub fn default_dst(month: u32) -> bool {
    !(5..=10).contains(&month)
}
