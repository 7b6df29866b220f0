//! TimePicker - a closed field showing the selected time that opens into a
//! list of time slots
//!
//! The picker is controlled: selecting an option reports the new `HH:mm`
//! value through `on_change`, and the host feeds it back with `set_value`.
//!
//! # Example
//!
//! ```ignore
//! let config = TimePickerConfig {
//!     min_time: "09:00".into(),
//!     max_time: "17:00".into(),
//!     time_interval_minutes: 60,
//!     ..Default::default()
//! };
//!
//! let picker = TimePicker::new(config)?.on_change(|value| {
//!     tx.send(value.to_string()).ok();
//! });
//! ```

use crate::component::Component;
use crate::components::list::List;
use crate::components::text::truncate;
use crate::context::RenderContext;
use crate::error::Result as PlasmaResult;
use crate::event::{Event, EventHandler, Key, MouseEvent};
use crate::layout::Rect;
use crate::render::Renderer;
use crate::time::{
    Clock, DefaultOption, SystemClock, TimeFormat, TimeOfDay, TimeOption, TimeSlotEngine,
    DEFAULT_INTERVAL_MINUTES,
};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Drawn at the right edge of the closed field
pub const CLOCK_GLYPH: &str = "◷";

/// Most option rows shown at once when open
const MAX_DROPDOWN_ROWS: u16 = 8;

/// Change callback, receives the selected value as `HH:mm`
pub type OnTimeChange = Box<dyn FnMut(&str)>;

/// Configuration of a TimePicker
///
/// Deserializes from camelCase keys (`minTime`, `timeIntervalMinutes`, ...);
/// every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimePickerConfig {
    /// Earliest selectable time, `HH:mm`
    pub min_time: String,
    /// Latest selectable time, `HH:mm`; `24:00` is allowed
    pub max_time: String,
    pub time_interval_minutes: u32,
    pub time_format: TimeFormat,
    pub default_option: DefaultOption,
    /// Current value, `HH:mm`
    pub value: Option<String>,
    pub disabled: bool,
    /// Shown while no value can be resolved
    pub placeholder: String,
    pub transparent_background: bool,
    /// Form field name, used in logs
    pub name: Option<String>,
}

impl Default for TimePickerConfig {
    fn default() -> Self {
        TimePickerConfig {
            min_time: "00:00".to_string(),
            max_time: "24:00".to_string(),
            time_interval_minutes: DEFAULT_INTERVAL_MINUTES,
            time_format: TimeFormat::default(),
            default_option: DefaultOption::default(),
            value: None,
            disabled: false,
            placeholder: "Select time".to_string(),
            transparent_background: false,
            name: None,
        }
    }
}

impl TimePickerConfig {
    /// Validate the range and interval and build the slot engine
    pub fn engine(&self) -> PlasmaResult<TimeSlotEngine> {
        Ok(TimeSlotEngine::from_strs(
            &self.min_time,
            &self.max_time,
            self.time_interval_minutes,
            self.time_format,
        )?
        .with_default_option(self.default_option))
    }
}

/// TimePicker component
pub struct TimePicker {
    config: TimePickerConfig,
    engine: TimeSlotEngine,
    clock: Box<dyn Clock>,

    /// Effective value, None when the configured value did not parse
    value: Option<TimeOfDay>,

    /// Dropdown with one row per slot
    options: List<TimeOption>,
    open: bool,
    focused: bool,
    dirty: bool,

    /// Field and dropdown areas from the last render, for mouse hit-testing
    field_bounds: Rect,
    dropdown_bounds: Rect,

    on_change: Option<OnTimeChange>,
}

impl TimePicker {
    /// Build a picker, failing on an invalid range or interval
    pub fn new(config: TimePickerConfig) -> PlasmaResult<Self> {
        let engine = config.engine()?;
        let options = List::new(engine.generate_options());

        let mut picker = TimePicker {
            config,
            engine,
            clock: Box::new(SystemClock),
            value: None,
            options,
            open: false,
            focused: false,
            dirty: true,
            field_bounds: Rect::default(),
            dropdown_bounds: Rect::default(),
            on_change: None,
        };
        picker.resolve();
        Ok(picker)
    }

    /// Replace the clock used for the `nextInterval` default
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self.resolve();
        self
    }

    /// Set change callback
    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&str) + 'static,
    {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Recompute the effective value from the configured one
    fn resolve(&mut self) {
        self.value = match self
            .engine
            .resolve_value(self.config.value.as_deref(), self.clock.as_ref())
        {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(name = ?self.config.name, %err, "time picker value not resolved");
                None
            }
        };
        self.dirty = true;
    }

    /// Accept a new value from the host. Out-of-range values clamp; a
    /// malformed value leaves the picker showing its placeholder.
    pub fn set_value(&mut self, value: Option<&str>) -> PlasmaResult<()> {
        self.config.value = value.map(str::to_string);
        let resolved = self.engine.resolve_value(value, self.clock.as_ref());
        self.value = resolved.as_ref().ok().copied();
        self.dirty = true;
        resolved.map(|_| ())
    }

    /// Effective value
    pub fn value(&self) -> Option<TimeOfDay> {
        self.value
    }

    /// Effective value in the display format
    pub fn value_label(&self) -> Option<String> {
        self.value.map(|value| value.format(self.engine.format()))
    }

    pub fn options(&self) -> &[TimeOption] {
        self.options.items()
    }

    pub fn config(&self) -> &TimePickerConfig {
        &self.config
    }

    pub fn engine(&self) -> &TimeSlotEngine {
        &self.engine
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_disabled(&self) -> bool {
        self.config.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.config.disabled = disabled;
        if disabled {
            self.close();
        }
        self.dirty = true;
    }

    pub fn set_focused(&mut self, focused: bool) {
        if self.focused != focused {
            self.focused = focused;
            if !focused {
                self.close();
            }
            self.dirty = true;
        }
    }

    /// Highlighted option while open
    pub fn highlighted(&self) -> Option<&TimeOption> {
        self.open.then(|| self.options.selected()).flatten()
    }

    /// Open the dropdown with the cursor on the current value, or the first
    /// slot after it
    pub fn open(&mut self) {
        if self.open || self.config.disabled || self.options.is_empty() {
            return;
        }

        let value = self.value;
        let placed = value.is_some_and(|value| self.options.select_where(|o| o.time >= value));
        if !placed {
            self.options.select_first();
        }

        self.options.set_focused(true);
        self.open = true;
        self.dirty = true;
        debug!(name = ?self.config.name, value = ?self.value, "time picker opened");
    }

    /// Close without selecting
    pub fn close(&mut self) {
        if self.open {
            self.open = false;
            self.options.set_focused(false);
            self.dirty = true;
        }
    }

    /// Report the highlighted option to the host and close
    fn select_highlighted(&mut self) {
        let Some(option) = self.options.selected() else {
            return;
        };
        let value = option.value.clone();

        debug!(name = ?self.config.name, %value, "time selected");
        if let Some(ref mut callback) = self.on_change {
            callback(&value);
        }
        self.close();
    }

    fn handle_key(&mut self, key: Key) -> bool {
        if !self.open {
            if self.focused && key.is_activation() {
                self.open();
                return true;
            }
            return false;
        }

        match key {
            Key::Enter => {
                self.select_highlighted();
                true
            }
            Key::Esc => {
                self.close();
                true
            }
            // Let focus move on
            Key::Tab | Key::BackTab => {
                self.close();
                false
            }
            _ => {
                let moved = self.options.handle_event(&Event::Key(key));
                if moved {
                    self.dirty = true;
                }
                moved
            }
        }
    }

    fn handle_click(&mut self, col: u16, row: u16) -> bool {
        if self.field_bounds.contains(col, row) {
            if self.open {
                self.close();
            } else {
                self.open();
            }
            return true;
        }

        if self.open && self.dropdown_bounds.contains(col, row) {
            let index = self.options.scroll_offset() + (row - self.dropdown_bounds.y) as usize;
            if self.options.select(index) {
                self.select_highlighted();
            }
            return true;
        }

        // Clicking elsewhere dismisses
        self.close();
        false
    }

    /// Wheel over the open dropdown moves the cursor
    fn handle_scroll(&mut self, col: u16, row: u16, down: bool) -> bool {
        if !self.open || !self.dropdown_bounds.contains(col, row) {
            return false;
        }

        let moved = if down {
            self.options.select_next()
        } else {
            self.options.select_prev()
        };
        if moved {
            self.dirty = true;
        }
        true
    }
}

impl EventHandler for TimePicker {
    fn handle_event(&mut self, event: &Event) -> bool {
        if self.config.disabled {
            return false;
        }

        match event {
            Event::Key(key) => self.handle_key(*key),
            Event::Mouse(MouseEvent::ScrollDown(col, row)) => self.handle_scroll(*col, *row, true),
            Event::Mouse(MouseEvent::ScrollUp(col, row)) => self.handle_scroll(*col, *row, false),
            Event::Mouse(mouse) => match mouse.left_click() {
                Some((col, row)) => self.handle_click(col, row),
                None => false,
            },
            _ => false,
        }
    }

    fn on_focus(&mut self) {
        self.set_focused(true);
    }

    fn on_blur(&mut self) {
        self.set_focused(false);
    }
}

impl Component for TimePicker {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()> {
        if bounds.is_empty() {
            return Ok(());
        }

        let theme = ctx.theme;
        self.field_bounds = bounds.row(0);

        let field_style = if self.config.disabled {
            theme.disabled_style()
        } else if self.focused {
            format!(
                "{}{}",
                theme.field_style(self.config.transparent_background),
                theme.focus_style()
            )
        } else {
            theme.field_style(self.config.transparent_background)
        };

        // Closed field: text on the left, clock glyph on the right
        let width = bounds.width;
        let text_width = width.saturating_sub(2);
        let (text, text_style) = match self.value_label() {
            Some(label) => (label, field_style.clone()),
            None => (self.config.placeholder.clone(), theme.label_style()),
        };
        let shown = truncate(&text, text_width);
        let pad = text_width as usize - shown.chars().count();

        renderer.move_cursor(bounds.x, bounds.y)?;
        renderer.write_styled(shown, &text_style)?;
        renderer.fill(pad as u16, &field_style)?;
        if width >= 2 {
            renderer.write_styled(" ", &field_style)?;
            renderer.write_styled(CLOCK_GLYPH, &field_style)?;
        }

        if self.open {
            let (_, screen_rows) = renderer.context().char_dimensions();
            let top = bounds.y.saturating_add(1);
            let rows = self
                .options
                .preferred_height(MAX_DROPDOWN_ROWS)
                .min(screen_rows.saturating_sub(top));

            self.dropdown_bounds = Rect::new(bounds.x, top, width, rows);
            if !self.dropdown_bounds.is_empty() {
                self.options.render(renderer, self.dropdown_bounds, ctx)?;
            }
        } else {
            self.dropdown_bounds = Rect::default();
        }

        self.dirty = false;
        Ok(())
    }

    fn min_size(&self) -> (u16, u16) {
        let widest = self
            .options()
            .iter()
            .map(|option| option.label.chars().count())
            .chain(std::iter::once(self.config.placeholder.chars().count()))
            .max()
            .unwrap_or(0);
        ((widest + 2).min(u16::MAX as usize) as u16, 1)
    }

    fn focusable(&self) -> bool {
        !self.config.disabled
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn name(&self) -> &str {
        "TimePicker"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::event::MouseButton;
    use crate::terminal::{TerminalCapabilities, TerminalGeometry};
    use crate::theme::Theme;
    use crate::time::FixedClock;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn office_hours() -> TimePickerConfig {
        TimePickerConfig {
            min_time: "09:00".into(),
            max_time: "17:00".into(),
            time_interval_minutes: 60,
            ..Default::default()
        }
    }

    fn recorder(picker: TimePicker) -> (TimePicker, Rc<RefCell<Vec<String>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let picker = picker.on_change(move |value| sink.borrow_mut().push(value.to_string()));
        (picker, seen)
    }

    fn render(picker: &mut TimePicker, bounds: Rect) -> Vec<String> {
        let mut renderer =
            Renderer::headless_with(TerminalGeometry::new(20, 6), TerminalCapabilities::plain());
        let theme = Theme::new(TerminalCapabilities::plain());
        picker
            .render(&mut renderer, bounds, &RenderContext::new(&theme))
            .unwrap();
        renderer.screen()
    }

    fn key(picker: &mut TimePicker, key: Key) -> bool {
        picker.handle_event(&Event::Key(key))
    }

    #[test]
    fn test_config_defaults() {
        let config = TimePickerConfig::default();
        assert_eq!(config.min_time, "00:00");
        assert_eq!(config.max_time, "24:00");
        assert_eq!(config.time_interval_minutes, 30);
        assert_eq!(config.time_format, TimeFormat::Hour12);
        assert_eq!(config.default_option, DefaultOption::Minimum);
        assert_eq!(config.placeholder, "Select time");
        assert!(!config.disabled);
        assert!(!config.transparent_background);

        let picker = TimePicker::new(config).unwrap();
        assert_eq!(picker.options().len(), 49);
        assert_eq!(picker.value_label().as_deref(), Some("12:00 AM"));
    }

    #[test]
    fn test_config_from_json() {
        let config: TimePickerConfig = serde_json::from_str(
            r#"{
                "minTime": "08:00",
                "maxTime": "10:00",
                "timeIntervalMinutes": 15,
                "timeFormat": "24h",
                "defaultOption": "nextInterval",
                "value": "09:10"
            }"#,
        )
        .unwrap();

        assert_eq!(config.time_interval_minutes, 15);
        assert_eq!(config.time_format, TimeFormat::Hour24);
        assert_eq!(config.default_option, DefaultOption::NextInterval);
        assert_eq!(config.placeholder, "Select time");

        let picker = TimePicker::new(config).unwrap();
        assert_eq!(picker.options().len(), 9);
        assert_eq!(picker.value_label().as_deref(), Some("09:10"));

        let empty: TimePickerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, TimePickerConfig::default());

        assert!(serde_json::from_str::<TimePickerConfig>(r#"{"timeIntervalMinutes": -5}"#).is_err());
    }

    #[test]
    fn test_invalid_configuration_fails_fast() {
        let zero = TimePickerConfig {
            time_interval_minutes: 0,
            ..Default::default()
        };
        assert!(matches!(
            TimePicker::new(zero).err(),
            Some(Error::InvalidConfiguration(_))
        ));

        let inverted = TimePickerConfig {
            min_time: "18:00".into(),
            max_time: "08:00".into(),
            ..Default::default()
        };
        assert!(matches!(
            TimePicker::new(inverted).err(),
            Some(Error::InvalidConfiguration(_))
        ));

        let malformed = TimePickerConfig {
            max_time: "late".into(),
            ..Default::default()
        };
        assert!(matches!(
            TimePicker::new(malformed).err(),
            Some(Error::InvalidTimeFormat { .. })
        ));
    }

    #[test]
    fn test_value_clamped_into_range() {
        let mut early = office_hours();
        early.value = Some("08:00".into());
        assert_eq!(TimePicker::new(early).unwrap().value(), "09:00".parse().ok());

        let mut late = office_hours();
        late.value = Some("18:00".into());
        assert_eq!(TimePicker::new(late).unwrap().value(), "17:00".parse().ok());
    }

    #[test]
    fn test_next_interval_default_uses_clock() {
        let config = TimePickerConfig {
            time_interval_minutes: 15,
            time_format: TimeFormat::Hour24,
            default_option: DefaultOption::NextInterval,
            ..Default::default()
        };
        let picker = TimePicker::new(config)
            .unwrap()
            .with_clock(FixedClock::at(10, 7));

        assert_eq!(picker.value_label().as_deref(), Some("10:15"));
    }

    #[test]
    fn test_malformed_value_shows_placeholder() {
        let mut config = office_hours();
        config.value = Some("noon".into());
        let mut picker = TimePicker::new(config).unwrap();

        assert_eq!(picker.value(), None);
        assert_eq!(render(&mut picker, Rect::new(0, 0, 16, 1))[0], "Select time    ◷");
    }

    #[test]
    fn test_closed_field_renders_label_and_glyph() {
        let mut picker = TimePicker::new(office_hours()).unwrap();
        let screen = render(&mut picker, Rect::new(0, 0, 12, 3));

        assert_eq!(screen[0], "09:00 AM   ◷");
        assert_eq!(screen[1], "");
        assert!(!picker.is_dirty());
    }

    #[test]
    fn test_keyboard_flow_reports_selection() {
        let (mut picker, seen) = recorder(TimePicker::new(office_hours()).unwrap());

        // Unfocused pickers ignore activation
        assert!(!key(&mut picker, Key::Enter));

        picker.on_focus();
        assert!(key(&mut picker, Key::Char(' ')));
        assert!(picker.is_open());
        assert_eq!(picker.highlighted().map(|o| o.value.as_str()), Some("09:00"));

        assert!(key(&mut picker, Key::Down));
        assert!(key(&mut picker, Key::Char('j')));
        assert!(key(&mut picker, Key::Char('k')));
        assert!(key(&mut picker, Key::Enter));

        assert!(!picker.is_open());
        assert_eq!(*seen.borrow(), vec!["10:00".to_string()]);

        // Controlled: the value only moves when the host says so
        assert_eq!(picker.value_label().as_deref(), Some("09:00 AM"));
        picker.set_value(Some("10:00")).unwrap();
        assert_eq!(picker.value_label().as_deref(), Some("10:00 AM"));
    }

    #[test]
    fn test_escape_closes_without_selecting() {
        let (mut picker, seen) = recorder(TimePicker::new(office_hours()).unwrap());
        picker.on_focus();

        key(&mut picker, Key::Enter);
        key(&mut picker, Key::Down);
        assert!(key(&mut picker, Key::Esc));

        assert!(!picker.is_open());
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_open_highlights_current_or_next_slot() {
        let mut config = office_hours();
        config.value = Some("13:20".into());
        let mut picker = TimePicker::new(config).unwrap();

        picker.open();
        assert_eq!(picker.highlighted().map(|o| o.value.as_str()), Some("14:00"));

        picker.close();
        picker.set_value(Some("11:00")).unwrap();
        picker.open();
        assert_eq!(picker.highlighted().map(|o| o.value.as_str()), Some("11:00"));
    }

    #[test]
    fn test_open_dropdown_renders_below_field() {
        let mut picker = TimePicker::new(office_hours()).unwrap();
        picker.open();
        let screen = render(&mut picker, Rect::new(0, 0, 12, 1));

        assert_eq!(screen[0], "09:00 AM   ◷");
        assert_eq!(screen[1], "09:00 AM");
        assert_eq!(screen[2], "10:00 AM");
        assert_eq!(screen[5], "01:00 PM");
    }

    #[test]
    fn test_mouse_opens_and_selects() {
        let (mut picker, seen) = recorder(TimePicker::new(office_hours()).unwrap());
        render(&mut picker, Rect::new(0, 0, 12, 1));

        let click = |col, row| Event::Mouse(MouseEvent::Press(MouseButton::Left, col, row));
        assert!(picker.handle_event(&click(3, 0)));
        assert!(picker.is_open());

        render(&mut picker, Rect::new(0, 0, 12, 1));
        assert!(picker.handle_event(&click(2, 3)));

        assert!(!picker.is_open());
        assert_eq!(*seen.borrow(), vec!["11:00".to_string()]);

        // Clicks outside are not consumed
        assert!(!picker.handle_event(&click(15, 0)));
    }

    #[test]
    fn test_scroll_over_dropdown_moves_cursor() {
        let mut picker = TimePicker::new(office_hours()).unwrap();
        picker.open();
        render(&mut picker, Rect::new(0, 0, 12, 1));
        assert!(!picker.is_dirty());

        // Wheel elsewhere is left for other components
        assert!(!picker.handle_event(&Event::Mouse(MouseEvent::ScrollDown(15, 2))));
        assert!(!picker.handle_event(&Event::Mouse(MouseEvent::ScrollDown(3, 0))));
        assert_eq!(picker.highlighted().map(|o| o.value.as_str()), Some("09:00"));
        assert!(!picker.is_dirty());

        assert!(picker.handle_event(&Event::Mouse(MouseEvent::ScrollDown(3, 2))));
        assert_eq!(picker.highlighted().map(|o| o.value.as_str()), Some("10:00"));
        assert!(picker.is_dirty());

        render(&mut picker, Rect::new(0, 0, 12, 1));
        assert!(picker.handle_event(&Event::Mouse(MouseEvent::ScrollUp(3, 2))));
        assert_eq!(picker.highlighted().map(|o| o.value.as_str()), Some("09:00"));
        assert!(picker.is_dirty());
    }

    #[test]
    fn test_disabled_ignores_input() {
        let mut config = office_hours();
        config.disabled = true;
        let (mut picker, seen) = recorder(TimePicker::new(config).unwrap());
        picker.on_focus();
        render(&mut picker, Rect::new(0, 0, 12, 1));

        assert!(!key(&mut picker, Key::Enter));
        assert!(!picker.handle_event(&Event::Mouse(MouseEvent::Press(MouseButton::Left, 1, 0))));
        assert!(!picker.is_open());
        assert!(!picker.focusable());
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_set_value_rejects_malformed() {
        let mut picker = TimePicker::new(office_hours()).unwrap();

        assert!(matches!(
            picker.set_value(Some("9am")),
            Err(Error::InvalidTimeFormat { .. })
        ));
        assert_eq!(picker.value(), None);

        picker.set_value(None).unwrap();
        assert_eq!(picker.value_label().as_deref(), Some("09:00 AM"));
    }

    #[test]
    fn test_min_size_fits_widest_label() {
        let picker = TimePicker::new(office_hours()).unwrap();
        // "Select time" is wider than "09:00 AM"
        assert_eq!(picker.min_size(), (13, 1));
    }
}
