//! # Temporal Values and the Calendar Context
//!
//! Temporal values use the storage encodings of the record layer:
//!
//! | Type | Encoding |
//! |------|----------|
//! | `Date` | days since the Unix epoch (i32) |
//! | `Time` | microseconds since midnight (i64) |
//! | `Timestamp` | microseconds since the epoch, UTC instant (i64) |
//! | `TimestampTz` | UTC instant plus the zone offset it was written in |
//!
//! [`Calendar`] carries the zone offset used by the calendrical coercion
//! family: an instant is shifted into the calendar's wall clock before its
//! date or time-of-day fields are derived. `Date` and `Time` carry no
//! instant and are unaffected by a calendar.
//!
//! Civil (year/month/day) conversion uses the standard era-based algorithm
//! over 400-year cycles and is exact over the full i32 day range.

use std::fmt;

pub const MICROS_PER_SEC: i64 = 1_000_000;
pub const MICROS_PER_DAY: i64 = 86_400 * MICROS_PER_SEC;

/// Days since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(i32);

impl Date {
    pub fn from_days(days: i32) -> Self {
        Date(days)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Self {
        Date(days_from_civil(year, month, day) as i32)
    }

    pub fn days(self) -> i32 {
        self.0
    }

    /// Civil (year, month, day) of this date.
    pub fn ymd(self) -> (i32, u32, u32) {
        civil_from_days(self.0 as i64)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (y, m, d) = self.ymd();
        write!(f, "{:04}-{:02}-{:02}", y, m, d)
    }
}

/// Microseconds since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time(i64);

impl Time {
    pub fn from_micros(micros: i64) -> Self {
        Time(micros)
    }

    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Self {
        Time((hour as i64 * 3600 + minute as i64 * 60 + second as i64) * MICROS_PER_SEC)
    }

    pub fn micros(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0.div_euclid(MICROS_PER_SEC);
        let sub = self.0.rem_euclid(MICROS_PER_SEC);
        let (h, m, s) = (secs / 3600, (secs / 60) % 60, secs % 60);
        if sub == 0 {
            write!(f, "{:02}:{:02}:{:02}", h, m, s)
        } else {
            write!(f, "{:02}:{:02}:{:02}.{:06}", h, m, s, sub)
        }
    }
}

/// Microseconds since the Unix epoch, as a UTC instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn from_micros(micros: i64) -> Self {
        Timestamp(micros)
    }

    pub fn from_date_time(date: Date, time: Time) -> Self {
        Timestamp(date.days() as i64 * MICROS_PER_DAY + time.micros())
    }

    pub fn micros(self) -> i64 {
        self.0
    }

    /// Calendar day containing this instant. Floors, so pre-epoch instants
    /// land on the correct earlier day.
    pub fn date(self) -> Date {
        Date(self.0.div_euclid(MICROS_PER_DAY) as i32)
    }

    /// Time of day within the instant's calendar day.
    pub fn time(self) -> Time {
        Time(self.0.rem_euclid(MICROS_PER_DAY))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date(), self.time())
    }
}

/// A UTC instant plus the zone offset it was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimestampTz {
    pub micros: i64,
    pub offset_secs: i32,
}

impl TimestampTz {
    pub fn new(micros: i64, offset_secs: i32) -> Self {
        Self {
            micros,
            offset_secs,
        }
    }

    /// Drops the zone, keeping the UTC instant.
    pub fn instant(self) -> Timestamp {
        Timestamp(self.micros)
    }
}

impl fmt::Display for TimestampTz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let local = Timestamp(self.micros + self.offset_secs as i64 * MICROS_PER_SEC);
        let sign = if self.offset_secs < 0 { '-' } else { '+' };
        let abs = self.offset_secs.unsigned_abs();
        write!(f, "{}{}{:02}:{:02}", local, sign, abs / 3600, (abs / 60) % 60)
    }
}

/// Zone context for the calendrical coercion family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Calendar {
    offset_secs: i32,
}

impl Calendar {
    pub fn utc() -> Self {
        Calendar { offset_secs: 0 }
    }

    pub fn fixed_offset(offset_secs: i32) -> Self {
        Calendar { offset_secs }
    }

    pub fn offset_secs(self) -> i32 {
        self.offset_secs
    }

    pub fn offset_micros(self) -> i64 {
        self.offset_secs as i64 * MICROS_PER_SEC
    }
}

/// (year, month, day) from days since the epoch. Era-based algorithm over
/// 400-year (146097-day) cycles.
fn civil_from_days(z: i64) -> (i32, u32, u32) {
    let z = z + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let m = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let y = if m <= 2 { y + 1 } else { y };
    (y as i32, m, d)
}

/// Days since the epoch from a civil (year, month, day).
fn days_from_civil(year: i32, month: u32, day: u32) -> i64 {
    let y = year as i64 - if month <= 2 { 1 } else { 0 };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let mp = (if month > 2 { month - 3 } else { month + 9 }) as i64;
    let doy = (153 * mp + 2) / 5 + day as i64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}
