//! Clock abstraction so default selection can read "now" deterministically in tests

use chrono::{Local, NaiveTime};

/// Source of the current local wall-clock time
pub trait Clock {
    fn now(&self) -> NaiveTime;
}

/// Reads the system's local time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// Always reports the same time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveTime);

impl FixedClock {
    /// Fixed clock at `hour:minute:00`; out-of-range components clamp to `23:59`
    pub fn at(hour: u32, minute: u32) -> Self {
        let time = NaiveTime::from_hms_opt(hour.min(23), minute.min(59), 0).unwrap_or_default();
        FixedClock(time)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::at(10, 7);
        assert_eq!(clock.now().hour(), 10);
        assert_eq!(clock.now().minute(), 7);
        assert_eq!(clock.now().second(), 0);
    }

    #[test]
    fn test_fixed_clock_clamps_components() {
        let clock = FixedClock::at(30, 75);
        assert_eq!(clock.now(), NaiveTime::from_hms_opt(23, 59, 0).unwrap());
    }
}
