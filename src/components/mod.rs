//! Built-in UI components

pub mod checkbox;
pub mod list;
pub mod tabs;
pub mod text;
pub mod time_picker;
pub mod top_nav_bar;

pub use checkbox::{Checkbox, CheckboxChange, OnCheckboxChange};
pub use list::List;
pub use tabs::{OnTabChange, TabItem, TabPosition, Tabs};
pub use text::{Text, TextAlign};
pub use time_picker::{OnTimeChange, TimePicker, TimePickerConfig, CLOCK_GLYPH};
pub use top_nav_bar::TopNavBar;
