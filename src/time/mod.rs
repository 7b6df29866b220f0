//! Time-of-day values and the time-slot engine behind the TimePicker

mod clock;
mod of_day;
mod slots;

pub use clock::{Clock, FixedClock, SystemClock};
pub use of_day::{TimeFormat, TimeOfDay, MINUTES_PER_DAY};
pub use slots::{
    generate_options, DefaultOption, TimeOption, TimeRange, TimeSlotEngine, DEFAULT_INTERVAL_MINUTES,
};
