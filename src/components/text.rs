//! Text component for displaying a single line of styled text

use crate::component::Component;
use crate::context::RenderContext;
use crate::event::EventHandler;
use crate::layout::Rect;
use crate::render::Renderer;
use anyhow::Result;

/// Horizontal placement within the bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Text component
pub struct Text {
    content: String,
    style: String,
    align: TextAlign,
    dirty: bool,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Text {
            content: content.into(),
            style: String::new(),
            align: TextAlign::Left,
            dirty: true,
        }
    }

    /// Set text style (ANSI codes)
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self.dirty = true;
        self
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self.dirty = true;
        self
    }

    pub fn set_text(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.dirty = true;
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    /// Width in cells (one per char)
    pub fn width(&self) -> u16 {
        self.content.chars().count().min(u16::MAX as usize) as u16
    }
}

/// Cut `text` to at most `width` chars
pub(crate) fn truncate(text: &str, width: u16) -> &str {
    match text.char_indices().nth(width as usize) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

impl EventHandler for Text {}

impl Component for Text {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, _ctx: &RenderContext) -> Result<()> {
        self.dirty = false;
        if self.content.is_empty() || bounds.is_empty() {
            return Ok(());
        }

        let visible = truncate(&self.content, bounds.width);
        let slack = bounds.width - visible.chars().count() as u16;
        let x = match self.align {
            TextAlign::Left => bounds.x,
            TextAlign::Center => bounds.x + slack / 2,
            TextAlign::Right => bounds.x + slack,
        };

        renderer.move_cursor(x, bounds.y)?;
        renderer.write_styled(visible, &self.style)?;
        Ok(())
    }

    fn min_size(&self) -> (u16, u16) {
        (self.width(), 1)
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn name(&self) -> &str {
        "Text"
    }
}
