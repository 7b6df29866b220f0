//! Navigable list with a highlighted cursor row
//!
//! Used as the dropdown of the TimePicker, but generic over any displayable
//! item.
//!
//! # Example
//!
//! ```ignore
//! let mut list = List::new(vec!["09:00", "09:30", "10:00"]);
//! list.select(0);
//!
//! // In event handler:
//! match key {
//!     Key::Char('j') => list.select_next(),
//!     Key::Char('k') => list.select_prev(),
//!     Key::Enter => {
//!         if let Some(item) = list.selected() {
//!             // Handle selection
//!         }
//!     }
//!     _ => {}
//! }
//! ```

use crate::component::Component;
use crate::context::RenderContext;
use crate::components::text::truncate;
use crate::event::{Event, EventHandler, Key};
use crate::layout::Rect;
use crate::render::Renderer;
use anyhow::Result;
use std::fmt::Display;

/// Rows shown before the first render reports the real viewport
const DEFAULT_VIEWPORT_HEIGHT: u16 = 10;

/// Generic list component with virtual scrolling
#[derive(Debug)]
pub struct List<T> {
    items: Vec<T>,

    /// Highlighted index (None if nothing highlighted)
    selected_index: Option<usize>,

    /// First visible row
    scroll_offset: usize,

    focused: bool,
    dirty: bool,

    /// Viewport height (set during render)
    viewport_height: u16,
}

impl<T> List<T> {
    pub fn new(items: Vec<T>) -> Self {
        List {
            items,
            selected_index: None,
            scroll_offset: 0,
            focused: false,
            dirty: true,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn selected(&self) -> Option<&T> {
        self.selected_index.and_then(|i| self.items.get(i))
    }

    /// Highlight an item by index
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }
        self.selected_index = Some(index);
        self.ensure_visible(index);
        self.dirty = true;
        true
    }

    /// Highlight the first item matching `predicate`
    pub fn select_where(&mut self, predicate: impl Fn(&T) -> bool) -> bool {
        match self.items.iter().position(predicate) {
            Some(index) => self.select(index),
            None => false,
        }
    }

    /// Move down one row, staying on the last
    pub fn select_next(&mut self) -> bool {
        if self.items.is_empty() {
            return false;
        }
        let next = match self.selected_index {
            Some(i) => (i + 1).min(self.items.len() - 1),
            None => 0,
        };
        self.select(next)
    }

    /// Move up one row, staying on the first
    pub fn select_prev(&mut self) -> bool {
        if self.items.is_empty() {
            return false;
        }
        let prev = match self.selected_index {
            Some(i) => i.saturating_sub(1),
            None => self.items.len() - 1,
        };
        self.select(prev)
    }

    pub fn select_first(&mut self) -> bool {
        !self.items.is_empty() && self.select(0)
    }

    pub fn select_last(&mut self) -> bool {
        !self.items.is_empty() && self.select(self.items.len() - 1)
    }

    pub fn page_down(&mut self) -> bool {
        if self.items.is_empty() {
            return false;
        }
        let page = self.viewport_height.max(1) as usize;
        let target = self
            .selected_index
            .map_or(0, |i| (i + page).min(self.items.len() - 1));
        self.select(target)
    }

    pub fn page_up(&mut self) -> bool {
        if self.items.is_empty() {
            return false;
        }
        let page = self.viewport_height.max(1) as usize;
        let target = self.selected_index.map_or(0, |i| i.saturating_sub(page));
        self.select(target)
    }

    /// Scroll so that `index` lies inside the viewport
    fn ensure_visible(&mut self, index: usize) {
        let height = self.viewport_height.max(1) as usize;
        if index < self.scroll_offset {
            self.scroll_offset = index;
        } else if index >= self.scroll_offset + height {
            self.scroll_offset = index + 1 - height;
        }
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn set_focused(&mut self, focused: bool) {
        if self.focused != focused {
            self.focused = focused;
            self.dirty = true;
        }
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Number of rows the list wants, capped at `max_rows`
    pub fn preferred_height(&self, max_rows: u16) -> u16 {
        self.items.len().min(max_rows as usize) as u16
    }
}

impl<T: Display> List<T> {
    fn render_rows(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()> {
        self.viewport_height = bounds.height;
        if let Some(index) = self.selected_index {
            self.ensure_visible(index);
        }

        if self.items.is_empty() {
            renderer.move_cursor(bounds.x, bounds.y)?;
            renderer.write_styled(truncate("(empty)", bounds.width), &ctx.theme.label_style())?;
            return Ok(());
        }

        let highlight = ctx.theme.highlight_style();
        let width = bounds.width as usize;
        let visible = self
            .items
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(bounds.height as usize);

        for (row, (i, item)) in visible.enumerate() {
            let text = item.to_string();
            let line = format!("{:width$}", truncate(&text, bounds.width), width = width);

            renderer.move_cursor(bounds.x, bounds.y + row as u16)?;
            if self.selected_index == Some(i) {
                renderer.write_styled(&line, &highlight)?;
            } else {
                renderer.write_text(&line)?;
            }
        }

        Ok(())
    }
}

impl<T: Display + 'static> EventHandler for List<T> {
    fn handle_event(&mut self, event: &Event) -> bool {
        if !self.focused {
            return false;
        }

        let Event::Key(key) = event else {
            return false;
        };
        match key {
            Key::Char('j') | Key::Down => self.select_next(),
            Key::Char('k') | Key::Up => self.select_prev(),
            Key::Char('g') | Key::Home => self.select_first(),
            Key::Char('G') | Key::End => self.select_last(),
            Key::Ctrl('d') | Key::PageDown => self.page_down(),
            Key::Ctrl('u') | Key::PageUp => self.page_up(),
            _ => return false,
        };
        true
    }

    fn on_focus(&mut self) {
        self.set_focused(true);
    }

    fn on_blur(&mut self) {
        self.set_focused(false);
    }
}

impl<T: Display + 'static> Component for List<T> {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()> {
        self.render_rows(renderer, bounds, ctx)?;
        self.dirty = false;
        Ok(())
    }

    fn min_size(&self) -> (u16, u16) {
        (10, 1)
    }

    fn focusable(&self) -> bool {
        true
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn name(&self) -> &str {
        "List"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::{TerminalCapabilities, TerminalGeometry};
    use crate::theme::Theme;

    #[test]
    fn test_selection() {
        let mut list = List::new(vec!["a", "b", "c"]);
        assert_eq!(list.selected(), None);

        assert!(list.select(1));
        assert_eq!(list.selected(), Some(&"b"));
        assert!(!list.select(3));
        assert_eq!(list.selected_index(), Some(1));
    }

    #[test]
    fn test_navigation_stops_at_ends() {
        let mut list = List::new(vec!["a", "b", "c"]);

        list.select_next();
        assert_eq!(list.selected(), Some(&"a"));
        list.select_next();
        list.select_next();
        list.select_next();
        assert_eq!(list.selected(), Some(&"c"));

        list.select_prev();
        assert_eq!(list.selected(), Some(&"b"));
        list.select_first();
        list.select_prev();
        assert_eq!(list.selected(), Some(&"a"));
    }

    #[test]
    fn test_select_where() {
        let mut list = List::new(vec![10, 20, 30]);
        assert!(list.select_where(|v| *v == 30));
        assert_eq!(list.selected_index(), Some(2));
        assert!(!list.select_where(|v| *v == 40));
    }

    #[test]
    fn test_empty_list() {
        let mut list: List<String> = List::empty();

        assert!(list.is_empty());
        assert!(!list.select_next());
        assert!(!list.select_prev());
        assert!(!list.select_last());
        assert_eq!(list.selected(), None);
    }

    #[test]
    fn test_keys_ignored_without_focus() {
        let mut list = List::new(vec!["a", "b"]);
        assert!(!list.handle_event(&Event::Key(Key::Down)));

        list.on_focus();
        assert!(list.is_focused());
        assert!(list.handle_event(&Event::Key(Key::Down)));
        assert_eq!(list.selected_index(), Some(0));
        assert!(!list.handle_event(&Event::Key(Key::Enter)));

        list.on_blur();
        assert!(!list.is_focused());
        assert!(!list.handle_event(&Event::Key(Key::Down)));
    }

    #[test]
    fn test_scrolls_to_keep_selection_visible() {
        let items: Vec<String> = (0..20).map(|i| format!("item {}", i)).collect();
        let mut list = List::new(items);

        let mut renderer =
            Renderer::headless_with(TerminalGeometry::new(10, 3), TerminalCapabilities::plain());
        let theme = Theme::new(TerminalCapabilities::plain());
        let ctx = RenderContext::new(&theme);

        list.select(5);
        list.render(&mut renderer, Rect::new(0, 0, 10, 3), &ctx)
            .unwrap();

        assert_eq!(list.scroll_offset(), 3);
        assert_eq!(renderer.screen(), vec!["item 3", "item 4", "item 5"]);
    }
}
