//! Checkbox with optional text, description and an indeterminate state

use crate::component::Component;
use crate::components::text::truncate;
use crate::context::RenderContext;
use crate::event::{Event, EventHandler};
use crate::layout::Rect;
use crate::render::Renderer;
use crate::theme::Theme;
use anyhow::Result;
use tracing::debug;

/// Columns taken by the glyph and the space after it
const GLYPH_WIDTH: u16 = 4;

/// Reported to the change callback after a toggle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckboxChange {
    pub name: Option<String>,
    pub checked: bool,
}

/// Change callback type
pub type OnCheckboxChange = Box<dyn FnMut(&CheckboxChange)>;

/// Checkbox component
pub struct Checkbox {
    name: Option<String>,
    text: Option<String>,
    description: Option<String>,
    checked: bool,
    indeterminate: bool,
    disabled: bool,
    fancy: bool,
    focused: bool,
    dirty: bool,
    /// Area from the last render, for mouse hit-testing
    bounds: Rect,
    on_change: Option<OnCheckboxChange>,
}

impl Default for Checkbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Checkbox {
    pub fn new() -> Self {
        Checkbox {
            name: None,
            text: None,
            description: None,
            checked: false,
            indeterminate: false,
            disabled: false,
            fancy: false,
            focused: false,
            dirty: true,
            bounds: Rect::default(),
            on_change: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Hint rendered dimmed below the text
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    /// Neither checked nor unchecked; cleared by the next toggle
    pub fn with_indeterminate(mut self, indeterminate: bool) -> Self {
        self.indeterminate = indeterminate;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Round radio-style glyphs
    pub fn with_fancy(mut self, fancy: bool) -> Self {
        self.fancy = fancy;
        self
    }

    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&CheckboxChange) + 'static,
    {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn is_indeterminate(&self) -> bool {
        self.indeterminate
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn field_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set state from the host without notifying
    pub fn set_checked(&mut self, checked: bool) {
        if self.checked != checked {
            self.checked = checked;
            self.dirty = true;
        }
    }

    pub fn set_indeterminate(&mut self, indeterminate: bool) {
        if self.indeterminate != indeterminate {
            self.indeterminate = indeterminate;
            self.dirty = true;
        }
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        self.dirty = true;
    }

    pub fn glyph(&self) -> &'static str {
        match (self.fancy, self.indeterminate, self.checked) {
            (false, true, _) => "[-]",
            (false, false, true) => "[x]",
            (false, false, false) => "[ ]",
            (true, true, _) => "(-)",
            (true, false, true) => "(●)",
            (true, false, false) => "( )",
        }
    }

    /// Flip the checked state and notify; no-op when disabled
    pub fn toggle(&mut self) -> bool {
        if self.disabled {
            return false;
        }

        self.checked = !self.checked;
        self.indeterminate = false;
        self.dirty = true;
        debug!(name = ?self.name, checked = self.checked, "checkbox toggled");

        let change = CheckboxChange {
            name: self.name.clone(),
            checked: self.checked,
        };
        if let Some(ref mut callback) = self.on_change {
            callback(&change);
        }
        true
    }

    fn glyph_style(&self, theme: &Theme) -> String {
        if self.disabled {
            theme.disabled_style()
        } else if self.focused {
            theme.focus_style()
        } else if self.checked || self.indeterminate {
            theme.active_style()
        } else {
            theme.text_style()
        }
    }
}

impl EventHandler for Checkbox {
    fn handle_event(&mut self, event: &Event) -> bool {
        if self.disabled {
            return false;
        }

        match event {
            Event::Key(key) if self.focused && key.is_activation() => self.toggle(),
            Event::Mouse(mouse) => match mouse.left_click() {
                Some((col, row)) if self.bounds.contains(col, row) => self.toggle(),
                _ => false,
            },
            _ => false,
        }
    }

    fn on_focus(&mut self) {
        self.focused = true;
        self.dirty = true;
    }

    fn on_blur(&mut self) {
        self.focused = false;
        self.dirty = true;
    }
}

impl Component for Checkbox {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()> {
        if bounds.is_empty() {
            self.bounds = bounds;
            return Ok(());
        }

        let theme = ctx.theme;
        let glyph = truncate(self.glyph(), bounds.width);
        renderer.move_cursor(bounds.x, bounds.y)?;
        renderer.write_styled(glyph, &self.glyph_style(theme))?;

        let text_x = bounds.x.saturating_add(GLYPH_WIDTH);
        let text_width = bounds.right().saturating_sub(text_x);
        let text_style = if self.disabled {
            theme.disabled_style()
        } else {
            theme.text_style()
        };

        let mut used = bounds.row(0);
        if let Some(text) = self.text.as_deref().filter(|_| text_width > 0) {
            renderer.move_cursor(text_x, bounds.y)?;
            renderer.write_styled(truncate(text, text_width), &text_style)?;
        }

        if let Some(description) = self.description.as_deref() {
            let row = bounds.row(1);
            if !row.is_empty() && text_width > 0 {
                renderer.move_cursor(text_x, row.y)?;
                renderer.write_styled(truncate(description, text_width), &theme.label_style())?;
                used.height = 2;
            }
        }

        self.bounds = used;
        self.dirty = false;
        Ok(())
    }

    fn min_size(&self) -> (u16, u16) {
        let text = self.text.as_deref().map_or(0, |t| t.chars().count());
        let description = self.description.as_deref().map_or(0, |d| d.chars().count());
        let widest = text.max(description);

        let width = if widest == 0 {
            3
        } else {
            GLYPH_WIDTH as usize + widest
        };
        let height = if self.description.is_some() { 2 } else { 1 };
        (width.min(u16::MAX as usize) as u16, height)
    }

    fn focusable(&self) -> bool {
        !self.disabled
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn name(&self) -> &str {
        "Checkbox"
    }
}
