//! Wall-clock time of day with 24-hour and 12-hour text forms

use crate::error::{Error, Result};
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Minutes in a full day; also the offset of the `24:00` sentinel
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Display format for time labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeFormat {
    /// `hh:mm A`, e.g. `09:30 PM`
    #[default]
    #[serde(rename = "12h", alias = "hh:mm A")]
    Hour12,
    /// `HH:mm`, e.g. `21:30`
    #[serde(rename = "24h", alias = "HH:mm")]
    Hour24,
}

impl TimeFormat {
    /// Pattern string describing this format
    pub fn pattern(&self) -> &'static str {
        match self {
            TimeFormat::Hour12 => "hh:mm A",
            TimeFormat::Hour24 => "HH:mm",
        }
    }
}

/// A time of day without date or timezone.
///
/// Stored as minutes since midnight. `24:00` is representable as the
/// exclusive end-of-day bound and sorts after every other time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    minutes: u16,
}

impl TimeOfDay {
    /// `00:00`
    pub const MIDNIGHT: TimeOfDay = TimeOfDay { minutes: 0 };

    /// `24:00`
    pub const END_OF_DAY: TimeOfDay = TimeOfDay {
        minutes: MINUTES_PER_DAY,
    };

    /// Build from hour and minute components
    pub fn new(hour: u8, minute: u8) -> Result<Self> {
        if minute > 59 || hour > 24 || (hour == 24 && minute != 0) {
            return Err(Error::invalid_time(
                format!("{:02}:{:02}", hour, minute),
                TimeFormat::Hour24.pattern(),
            ));
        }
        Ok(TimeOfDay {
            minutes: hour as u16 * 60 + minute as u16,
        })
    }

    /// Build from an offset in minutes since midnight, `None` past `24:00`
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        if minutes > MINUTES_PER_DAY as u32 {
            return None;
        }
        Some(TimeOfDay {
            minutes: minutes as u16,
        })
    }

    /// Like `from_minutes`, but offsets past the end of day become `24:00`
    pub fn saturating_from_minutes(minutes: u32) -> Self {
        Self::from_minutes(minutes).unwrap_or(Self::END_OF_DAY)
    }

    pub fn hour(&self) -> u8 {
        (self.minutes / 60) as u8
    }

    pub fn minute(&self) -> u8 {
        (self.minutes % 60) as u8
    }

    /// Offset in minutes since midnight
    pub fn minutes_since_midnight(&self) -> u32 {
        self.minutes as u32
    }

    /// Whether this is the `24:00` sentinel
    pub fn is_end_of_day(&self) -> bool {
        self.minutes == MINUTES_PER_DAY
    }

    /// Advance by `minutes`, `None` if the result would pass `24:00`
    pub fn checked_add_minutes(&self, minutes: u32) -> Option<Self> {
        self.minutes_since_midnight()
            .checked_add(minutes)
            .and_then(Self::from_minutes)
    }

    /// Parse `HH:mm` (a single-digit hour is accepted)
    pub fn parse_24h(input: &str) -> Result<Self> {
        let expected = TimeFormat::Hour24.pattern();
        let (hour, minute) =
            split_components(input.trim()).ok_or_else(|| Error::invalid_time(input, expected))?;
        Self::new(hour, minute).map_err(|_| Error::invalid_time(input, expected))
    }

    /// Parse `hh:mm A` with an `AM`/`PM` suffix in any case
    pub fn parse_12h(input: &str) -> Result<Self> {
        let expected = TimeFormat::Hour12.pattern();
        let invalid = || Error::invalid_time(input, expected);

        let (clock, meridiem) = input.trim().rsplit_once(' ').ok_or_else(invalid)?;
        let pm = match meridiem.to_ascii_uppercase().as_str() {
            "AM" => false,
            "PM" => true,
            _ => return Err(invalid()),
        };

        let (hour, minute) = split_components(clock.trim_end()).ok_or_else(invalid)?;
        if !(1..=12).contains(&hour) {
            return Err(invalid());
        }

        let hour = match (hour, pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, false) => h,
            (h, true) => h + 12,
        };
        Self::new(hour, minute).map_err(|_| invalid())
    }

    /// Parse in the given representation
    pub fn parse(input: &str, format: TimeFormat) -> Result<Self> {
        match format {
            TimeFormat::Hour12 => Self::parse_12h(input),
            TimeFormat::Hour24 => Self::parse_24h(input),
        }
    }

    /// Canonical `HH:mm` text
    pub fn to_24h(&self) -> String {
        format!("{:02}:{:02}", self.hour(), self.minute())
    }

    /// `hh:mm A` text; both midnight and `24:00` read as `12:00 AM`
    pub fn to_12h(&self) -> String {
        let hour = self.hour() % 24;
        let meridiem = if hour < 12 { "AM" } else { "PM" };
        let hour12 = match hour % 12 {
            0 => 12,
            h => h,
        };
        format!("{:02}:{:02} {}", hour12, self.minute(), meridiem)
    }

    /// Render in the given representation
    pub fn format(&self, format: TimeFormat) -> String {
        match format {
            TimeFormat::Hour12 => self.to_12h(),
            TimeFormat::Hour24 => self.to_24h(),
        }
    }
}

/// Split `H:mm` / `HH:mm` into numeric components
fn split_components(text: &str) -> Option<(u8, u8)> {
    let (hour, minute) = text.split_once(':')?;
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    if !digits(hour) || hour.len() > 2 || !digits(minute) || minute.len() != 2 {
        return None;
    }
    Some((hour.parse().ok()?, minute.parse().ok()?))
}

impl Default for TimeOfDay {
    fn default() -> Self {
        Self::MIDNIGHT
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_24h(s)
    }
}

impl From<NaiveTime> for TimeOfDay {
    /// Seconds and sub-second precision are dropped
    fn from(time: NaiveTime) -> Self {
        TimeOfDay {
            minutes: (time.hour() * 60 + time.minute()) as u16,
        }
    }
}
