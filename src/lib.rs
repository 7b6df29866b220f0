//! plasma - presentational terminal UI components
//!
//! A small component library built on a retained component tree with
//! immediate-mode rendering:
//! - Tabs, TopNavBar, Checkbox and TimePicker components
//! - A pure time-slot engine behind the TimePicker (`time`)
//! - Flex-based row/column layout
//! - Theme colors degraded to what the terminal supports
//! - A headless renderer for inspecting output in tests

pub mod component;
pub mod components;
pub mod context;
pub mod error;
pub mod event;
pub mod layout;
pub mod render;
pub mod terminal;
pub mod theme;
pub mod time;

// Re-export commonly used types
pub use component::{propagate_event, Component};
pub use components::{
    Checkbox, CheckboxChange, List, TabItem, TabPosition, Tabs, Text, TextAlign, TimePicker,
    TimePickerConfig, TopNavBar,
};
pub use context::{RenderContext, UseTheme};
pub use error::{Error, Result};
pub use event::{Event, EventHandler, Key, MouseButton, MouseEvent};
pub use layout::{FlexDirection, FlexLayout, Rect, Size};
pub use render::Renderer;
pub use terminal::{TerminalCapabilities, TerminalContext, TerminalGeometry};
pub use theme::{Color, Theme};
pub use time::{
    Clock, DefaultOption, FixedClock, SystemClock, TimeFormat, TimeOfDay, TimeOption, TimeRange,
    TimeSlotEngine,
};

#[cfg(feature = "tui")]
pub use event::EventPoller;
