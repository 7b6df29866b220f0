//! Time-slot engine - option generation, value clamping and default selection
//!
//! Everything here is a pure function of the configured range, interval and
//! format. The TimePicker component recomputes its options and effective
//! value through this engine whenever its configuration changes.
//!
//! # Example
//!
//! ```
//! use plasma::time::{TimeFormat, TimeSlotEngine};
//!
//! let engine = TimeSlotEngine::from_strs("09:00", "10:00", 30, TimeFormat::Hour12).unwrap();
//! let labels: Vec<_> = engine.generate_options().into_iter().map(|o| o.label).collect();
//! assert_eq!(labels, ["09:00 AM", "09:30 AM", "10:00 AM"]);
//! ```

use crate::error::{Error, Result};
use crate::time::clock::Clock;
use crate::time::of_day::{TimeFormat, TimeOfDay};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace, warn};

/// Default spacing between generated options
pub const DEFAULT_INTERVAL_MINUTES: u32 = 30;

/// Rule for picking a value when none is supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DefaultOption {
    /// Select the range minimum
    #[default]
    Minimum,
    /// Round the current time up to the next interval boundary, e.g. 11:26 -> 11:30
    NextInterval,
}

/// Closed range `[min, max]` of selectable times
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    min: TimeOfDay,
    max: TimeOfDay,
}

impl TimeRange {
    /// Build a range; `min` after `max` is rejected
    pub fn new(min: TimeOfDay, max: TimeOfDay) -> Result<Self> {
        if min > max {
            warn!(%min, %max, "time range minimum is after maximum");
            return Err(Error::InvalidConfiguration(format!(
                "minimum time {} is after maximum time {}",
                min, max
            )));
        }
        Ok(TimeRange { min, max })
    }

    pub fn min(&self) -> TimeOfDay {
        self.min
    }

    pub fn max(&self) -> TimeOfDay {
        self.max
    }

    pub fn contains(&self, time: TimeOfDay) -> bool {
        self.min <= time && time <= self.max
    }

    /// Restrict `time` to `[min, max]`
    pub fn clamp(&self, time: TimeOfDay) -> TimeOfDay {
        if time < self.min {
            self.min
        } else if time > self.max {
            self.max
        } else {
            time
        }
    }
}

impl Default for TimeRange {
    /// The whole day, `00:00` through `24:00`
    fn default() -> Self {
        TimeRange {
            min: TimeOfDay::MIDNIGHT,
            max: TimeOfDay::END_OF_DAY,
        }
    }
}

/// One selectable slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeOption {
    /// Slot time, rendered as `value` in `HH:mm`
    pub time: TimeOfDay,
    /// Canonical 24-hour value reported to change handlers
    pub value: String,
    /// Text shown to the user in the configured display format
    pub label: String,
}

impl TimeOption {
    pub fn new(time: TimeOfDay, format: TimeFormat) -> Self {
        TimeOption {
            time,
            value: time.to_24h(),
            label: time.format(format),
        }
    }
}

impl fmt::Display for TimeOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Generates time slots for a range and resolves effective values within it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlotEngine {
    range: TimeRange,
    interval_minutes: u32,
    format: TimeFormat,
    default_option: DefaultOption,
}

impl TimeSlotEngine {
    /// Build an engine, validating the interval eagerly
    pub fn new(range: TimeRange, interval_minutes: u32, format: TimeFormat) -> Result<Self> {
        if interval_minutes == 0 {
            warn!("time slot interval of zero rejected");
            return Err(Error::InvalidConfiguration(
                "time interval must be a positive number of minutes".into(),
            ));
        }

        Ok(TimeSlotEngine {
            range,
            interval_minutes,
            format,
            default_option: DefaultOption::default(),
        })
    }

    /// Build from `HH:mm` bounds
    pub fn from_strs(
        min_time: &str,
        max_time: &str,
        interval_minutes: u32,
        format: TimeFormat,
    ) -> Result<Self> {
        let range = TimeRange::new(TimeOfDay::parse_24h(min_time)?, TimeOfDay::parse_24h(max_time)?)?;
        Self::new(range, interval_minutes, format)
    }

    /// Set the policy used when no value is supplied
    pub fn with_default_option(mut self, default_option: DefaultOption) -> Self {
        self.default_option = default_option;
        self
    }

    pub fn range(&self) -> TimeRange {
        self.range
    }

    pub fn interval_minutes(&self) -> u32 {
        self.interval_minutes
    }

    pub fn format(&self) -> TimeFormat {
        self.format
    }

    pub fn default_option(&self) -> DefaultOption {
        self.default_option
    }

    /// All slots from the minimum up to and including the maximum, ascending
    pub fn generate_options(&self) -> Vec<TimeOption> {
        let span = self.range.max.minutes_since_midnight() - self.range.min.minutes_since_midnight();
        let mut options = Vec::with_capacity((span / self.interval_minutes) as usize + 1);

        let mut cursor = Some(self.range.min);
        while let Some(time) = cursor.filter(|time| *time <= self.range.max) {
            options.push(TimeOption::new(time, self.format));
            cursor = time.checked_add_minutes(self.interval_minutes);
        }

        debug!(
            count = options.len(),
            min = %self.range.min,
            max = %self.range.max,
            interval = self.interval_minutes,
            "generated time options"
        );
        options
    }

    /// Effective value for an externally supplied `HH:mm` string.
    ///
    /// Absent or blank input falls back to `resolve_default`. Values outside
    /// the range clamp to the nearest bound; values inside it pass through
    /// without snapping to an interval boundary.
    pub fn resolve_value(&self, raw: Option<&str>, clock: &dyn Clock) -> Result<TimeOfDay> {
        match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
            None => Ok(self.range.clamp(self.resolve_default(clock))),
            Some(raw) => {
                let time = TimeOfDay::parse_24h(raw)?;
                let resolved = self.range.clamp(time);
                if resolved != time {
                    trace!(%time, %resolved, "value clamped into range");
                }
                Ok(resolved)
            }
        }
    }

    /// Value used when none is supplied, according to the default policy
    pub fn resolve_default(&self, clock: &dyn Clock) -> TimeOfDay {
        match self.default_option {
            DefaultOption::Minimum => self.range.min,
            DefaultOption::NextInterval => {
                let now = TimeOfDay::from(clock.now());
                let interval = u64::from(self.interval_minutes);
                let rounded = u64::from(now.minute()).div_ceil(interval) * interval;
                let total = u64::from(now.hour()) * 60 + rounded;
                // Rounding past the hour rolls over; past midnight saturates at 24:00.
                TimeOfDay::saturating_from_minutes(u32::try_from(total).unwrap_or(u32::MAX))
            }
        }
    }
}

/// Slots for `HH:mm` bounds without keeping an engine around
pub fn generate_options(
    min_time: &str,
    max_time: &str,
    interval_minutes: u32,
    format: TimeFormat,
) -> Result<Vec<TimeOption>> {
    Ok(TimeSlotEngine::from_strs(min_time, max_time, interval_minutes, format)?.generate_options())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::clock::FixedClock;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn engine(min: &str, max: &str, interval: u32) -> TimeSlotEngine {
        TimeSlotEngine::from_strs(min, max, interval, TimeFormat::Hour24).unwrap()
    }

    #[test]
    fn test_full_day_has_49_half_hour_slots() {
        let options = engine("00:00", "24:00", 30).generate_options();

        assert_eq!(options.len(), 49);
        assert_eq!(options[0].value, "00:00");
        assert_eq!(options[1].value, "00:30");
        assert_eq!(options[47].value, "23:30");
        assert_eq!(options[48].value, "24:00");
    }

    #[test]
    fn test_options_ascending_and_bounded() {
        let cases = [
            ("00:00", "24:00", 30),
            ("09:00", "17:00", 60),
            ("09:10", "10:00", 7),
            ("08:00", "08:00", 15),
            ("22:45", "24:00", 25),
            ("00:00", "23:59", 1),
        ];

        for (min, max, interval) in cases {
            let engine = engine(min, max, interval);
            let options = engine.generate_options();
            let (min, max) = (t(min), t(max));

            assert_eq!(options.first().map(|o| o.time), Some(min));
            assert!(options.windows(2).all(|w| w[0].time < w[1].time));

            let last = options.last().unwrap().time.minutes_since_midnight();
            assert!(last <= max.minutes_since_midnight());
            assert!(last + interval > max.minutes_since_midnight());
        }
    }

    #[test]
    fn test_labels_follow_display_format() {
        let engine = TimeSlotEngine::from_strs("11:30", "12:30", 30, TimeFormat::Hour12).unwrap();
        let options = engine.generate_options();

        let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();
        let values: Vec<_> = options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(labels, ["11:30 AM", "12:00 PM", "12:30 PM"]);
        assert_eq!(values, ["11:30", "12:00", "12:30"]);
        assert_eq!(options[1].to_string(), "12:00 PM");
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let err = TimeSlotEngine::from_strs("00:00", "24:00", 0, TimeFormat::Hour12).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));

        let err = generate_options("00:00", "24:00", 0, TimeFormat::Hour24).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
        assert_eq!(
            generate_options("09:00", "09:30", 15, TimeFormat::Hour24)
                .unwrap()
                .len(),
            3
        );
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let err = TimeSlotEngine::from_strs("17:00", "09:00", 30, TimeFormat::Hour12).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn test_malformed_bounds_are_rejected() {
        let err = TimeSlotEngine::from_strs("nine", "17:00", 30, TimeFormat::Hour12).unwrap_err();
        assert!(matches!(err, Error::InvalidTimeFormat { .. }));
    }

    #[test]
    fn test_resolve_value_clamps() {
        let engine = engine("09:00", "17:00", 60);
        let clock = FixedClock::at(12, 0);

        assert_eq!(engine.resolve_value(Some("08:00"), &clock).unwrap(), t("09:00"));
        assert_eq!(engine.resolve_value(Some("18:00"), &clock).unwrap(), t("17:00"));
        assert_eq!(engine.resolve_value(Some("17:00"), &clock).unwrap(), t("17:00"));
    }

    #[test]
    fn test_resolve_value_keeps_off_interval_values() {
        let engine = engine("09:00", "17:00", 60);
        let clock = FixedClock::at(12, 0);

        assert_eq!(engine.resolve_value(Some("10:17"), &clock).unwrap(), t("10:17"));
    }

    #[test]
    fn test_resolve_value_rejects_malformed() {
        let engine = engine("09:00", "17:00", 60);
        let clock = FixedClock::at(12, 0);

        let err = engine.resolve_value(Some("10:7"), &clock).unwrap_err();
        assert!(matches!(err, Error::InvalidTimeFormat { .. }));
    }

    #[test]
    fn test_resolve_value_is_idempotent() {
        let engine = engine("09:00", "17:00", 60).with_default_option(DefaultOption::NextInterval);
        let clock = FixedClock::at(20, 10);

        for raw in [None, Some(""), Some("00:00"), Some("09:00"), Some("12:34"), Some("24:00")] {
            let once = engine.resolve_value(raw, &clock).unwrap();
            let twice = engine
                .resolve_value(Some(once.to_24h().as_str()), &clock)
                .unwrap();
            assert_eq!(once, twice, "input {raw:?}");
        }
    }

    #[test]
    fn test_missing_value_uses_minimum_default() {
        let engine = engine("09:00", "17:00", 60);
        let clock = FixedClock::at(12, 0);

        assert_eq!(engine.resolve_default(&clock), t("09:00"));
        assert_eq!(engine.resolve_value(None, &clock).unwrap(), t("09:00"));
        assert_eq!(engine.resolve_value(Some("  "), &clock).unwrap(), t("09:00"));
    }

    #[test]
    fn test_next_interval_rounds_up() {
        let engine = engine("00:00", "24:00", 15).with_default_option(DefaultOption::NextInterval);

        assert_eq!(engine.resolve_default(&FixedClock::at(10, 7)), t("10:15"));
        assert_eq!(engine.resolve_default(&FixedClock::at(10, 15)), t("10:15"));
        assert_eq!(engine.resolve_default(&FixedClock::at(10, 0)), t("10:00"));
    }

    #[test]
    fn test_next_interval_rolls_over_hour() {
        let engine = engine("00:00", "24:00", 30).with_default_option(DefaultOption::NextInterval);

        assert_eq!(engine.resolve_default(&FixedClock::at(10, 50)), t("11:00"));
        assert_eq!(engine.resolve_default(&FixedClock::at(23, 50)), TimeOfDay::END_OF_DAY);
    }

    #[test]
    fn test_next_interval_with_interval_longer_than_hour() {
        let engine = engine("00:00", "24:00", 90).with_default_option(DefaultOption::NextInterval);

        // ceil(20 / 90) * 90 = 90 minutes past 14:00
        assert_eq!(engine.resolve_default(&FixedClock::at(14, 20)), t("15:30"));
    }

    #[test]
    fn test_next_interval_with_huge_interval_saturates() {
        let engine =
            engine("00:00", "24:00", u32::MAX).with_default_option(DefaultOption::NextInterval);
        let clock = FixedClock::at(10, 7);

        assert_eq!(engine.resolve_default(&clock), TimeOfDay::END_OF_DAY);
        assert_eq!(engine.resolve_value(None, &clock).unwrap(), t("24:00"));
    }

    #[test]
    fn test_default_value_clamped_into_range() {
        let engine = engine("09:00", "17:00", 30).with_default_option(DefaultOption::NextInterval);

        assert_eq!(engine.resolve_value(None, &FixedClock::at(20, 10)).unwrap(), t("17:00"));
        assert_eq!(engine.resolve_value(None, &FixedClock::at(6, 10)).unwrap(), t("09:00"));
    }

    #[test]
    fn test_range_defaults_to_whole_day() {
        let range = TimeRange::default();
        assert_eq!(range.min(), TimeOfDay::MIDNIGHT);
        assert_eq!(range.max(), TimeOfDay::END_OF_DAY);
        assert!(range.contains(t("12:00")));
    }
}
