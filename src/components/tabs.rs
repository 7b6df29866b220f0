//! Tabs - a row of selectable tab headers
//!
//! Exactly one tab is active. Clicking a tab, or pressing Enter while it
//! holds keyboard focus, activates it and reports `(label, index)` to the
//! change callback.

use crate::component::Component;
use crate::components::text::truncate;
use crate::context::RenderContext;
use crate::event::{Event, EventHandler, Key};
use crate::layout::Rect;
use crate::render::Renderer;
use crate::theme::{Theme, DEFAULT_ITEM_GAP};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Change callback, receives the activated tab's label and index
pub type OnTabChange = Box<dyn FnMut(&str, usize)>;

/// One tab header
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TabItem {
    /// Displayed text
    pub title: String,
    /// Identifier reported on activation
    pub label: String,
    /// Initially active
    pub selected: bool,
}

impl TabItem {
    pub fn new(title: impl Into<String>, label: impl Into<String>) -> Self {
        TabItem {
            title: title.into(),
            label: label.into(),
            selected: false,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

/// Where a tab sits in the row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TabPosition {
    pub first: bool,
    pub last: bool,
    pub active: bool,
}

/// Tabs component
pub struct Tabs {
    items: Vec<TabItem>,
    selected_index: usize,
    /// Tab holding keyboard focus
    focused_index: usize,
    focused: bool,
    /// Columns between headers
    gap: u16,
    dirty: bool,
    /// Header areas from the last render, for mouse hit-testing
    tab_bounds: Vec<Rect>,
    on_change: Option<OnTabChange>,
}

impl Tabs {
    /// Create tabs; the first item marked `selected` starts active, else the first
    pub fn new(items: Vec<TabItem>) -> Self {
        let selected_index = items.iter().position(|item| item.selected).unwrap_or(0);
        Tabs {
            items,
            selected_index,
            focused_index: selected_index,
            focused: false,
            gap: DEFAULT_ITEM_GAP,
            dirty: true,
            tab_bounds: Vec::new(),
            on_change: None,
        }
    }

    /// Set change callback
    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&str, usize) + 'static,
    {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn with_gap(mut self, gap: u16) -> Self {
        self.gap = gap;
        self.dirty = true;
        self
    }

    pub fn items(&self) -> &[TabItem] {
        &self.items
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn selected(&self) -> Option<&TabItem> {
        self.items.get(self.selected_index)
    }

    pub fn focused_index(&self) -> usize {
        self.focused_index
    }

    pub fn position(&self, index: usize) -> Option<TabPosition> {
        (index < self.items.len()).then(|| TabPosition {
            first: index == 0,
            last: index + 1 == self.items.len(),
            active: index == self.selected_index,
        })
    }

    /// Make `index` the active tab and notify the callback
    pub fn activate(&mut self, index: usize) -> bool {
        let Some(tab) = self.items.get(index) else {
            return false;
        };

        debug!(label = %tab.label, index, "tab activated");
        self.selected_index = index;
        self.focused_index = index;
        self.dirty = true;

        if let Some(ref mut callback) = self.on_change {
            callback(&tab.label, index);
        }
        true
    }

    fn focus_next(&mut self) {
        if self.focused_index + 1 < self.items.len() {
            self.focused_index += 1;
            self.dirty = true;
        }
    }

    fn focus_prev(&mut self) {
        if self.focused_index > 0 {
            self.focused_index -= 1;
            self.dirty = true;
        }
    }

    fn tab_style(&self, theme: &Theme, index: usize, position: TabPosition) -> String {
        let focused = self.focused && index == self.focused_index;
        match (position.active, focused) {
            (true, true) => format!("{}{}", theme.active_style(), theme.focus_style()),
            (true, false) => theme.active_style(),
            (false, true) => theme.focus_style(),
            (false, false) => theme.text_style(),
        }
    }

    /// Header text; the active tab is bracketed
    fn cell(title: &str, active: bool) -> String {
        if active {
            format!("[{}]", title)
        } else {
            format!(" {} ", title)
        }
    }

    fn handle_key(&mut self, key: Key) -> bool {
        if !self.focused {
            return false;
        }

        let last = self.items.len() - 1;
        match key {
            Key::Left | Key::Char('h') => self.focus_prev(),
            Key::Right | Key::Char('l') => self.focus_next(),
            // Tab past either end leaves the component
            Key::Tab if self.focused_index < last => self.focus_next(),
            Key::BackTab if self.focused_index > 0 => self.focus_prev(),
            Key::Enter => {
                return self.activate(self.focused_index);
            }
            _ => return false,
        }
        true
    }
}

impl EventHandler for Tabs {
    fn handle_event(&mut self, event: &Event) -> bool {
        if self.items.is_empty() {
            return false;
        }

        match event {
            Event::Key(key) => self.handle_key(*key),
            Event::Mouse(mouse) => {
                let Some((col, row)) = mouse.left_click() else {
                    return false;
                };
                match self.tab_bounds.iter().position(|rect| rect.contains(col, row)) {
                    Some(index) => self.activate(index),
                    None => false,
                }
            }
            _ => false,
        }
    }

    fn on_focus(&mut self) {
        self.focused = true;
        self.focused_index = self.selected_index;
        self.dirty = true;
    }

    fn on_blur(&mut self) {
        self.focused = false;
        self.dirty = true;
    }
}

impl Component for Tabs {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()> {
        self.tab_bounds.clear();
        if self.items.is_empty() || bounds.is_empty() {
            return Ok(());
        }

        let gap = self.gap;
        let mut x = bounds.x;
        for index in 0..self.items.len() {
            let Some(position) = self.position(index) else {
                break;
            };
            if !position.first {
                x = x.saturating_add(gap);
            }

            let available = bounds.right().saturating_sub(x);
            let cell = Self::cell(&self.items[index].title, position.active);
            let shown = truncate(&cell, available);
            let width = shown.chars().count() as u16;

            let rect = Rect::new(x, bounds.y, width, 1);
            if !rect.is_empty() {
                let style = self.tab_style(ctx.theme, index, position);
                renderer.move_cursor(x, bounds.y)?;
                renderer.write_styled(shown, &style)?;
            }
            self.tab_bounds.push(rect);
            x = x.saturating_add(width);
        }

        self.dirty = false;
        Ok(())
    }

    fn min_size(&self) -> (u16, u16) {
        if self.items.is_empty() {
            return (0, 0);
        }
        let cells: usize = self
            .items
            .iter()
            .map(|item| item.title.chars().count() + 2)
            .sum();
        let gaps = (self.items.len() - 1) * self.gap as usize;
        let width = cells + gaps;
        (width.min(u16::MAX as usize) as u16, 1)
    }

    fn focusable(&self) -> bool {
        !self.items.is_empty()
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn name(&self) -> &str {
        "Tabs"
    }
}
