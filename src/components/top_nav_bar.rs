//! Top navigation bar - lays out its children in a row on the bar background

use crate::component::{propagate_event, Component};
use crate::context::RenderContext;
use crate::event::{Event, EventHandler};
use crate::layout::{FlexDirection, FlexLayout, Rect, Size};
use crate::render::Renderer;
use crate::theme::{DEFAULT_ITEM_GAP, DEFAULT_NAV_BAR_PADDING};
use anyhow::Result;
use tracing::warn;

/// Navigation bar wrapping a row of child components
pub struct TopNavBar {
    children: Vec<Box<dyn Component>>,
    sizes: Vec<Size>,
    dirty: bool,
}

impl TopNavBar {
    /// Create a bar; each child gets its minimum width
    pub fn new(children: Vec<Box<dyn Component>>) -> Self {
        if children.is_empty() {
            warn!("navigation bar created without children");
        }
        let sizes = children
            .iter()
            .map(|child| Size::Fixed(child.min_size().0))
            .collect();
        TopNavBar {
            children,
            sizes,
            dirty: true,
        }
    }

    /// Add a child with specified size
    pub fn add_child_with_size(&mut self, child: Box<dyn Component>, size: Size) {
        self.children.push(child);
        self.sizes.push(size);
        self.dirty = true;
    }

    /// Let the child at `index` grow into the remaining width
    pub fn with_flex(mut self, index: usize, flex: u16) -> Self {
        if let Some(size) = self.sizes.get_mut(index) {
            *size = Size::Flex(flex);
            self.dirty = true;
        }
        self
    }

    pub fn children(&self) -> &[Box<dyn Component>] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Box<dyn Component>] {
        &mut self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl EventHandler for TopNavBar {
    fn handle_event(&mut self, event: &Event) -> bool {
        propagate_event(&mut self.children, event)
    }
}

impl Component for TopNavBar {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()> {
        if bounds.is_empty() {
            return Ok(());
        }

        let style = ctx.theme.nav_bar_style();
        for offset in 0..bounds.height {
            renderer.move_cursor(bounds.x, bounds.y + offset)?;
            renderer.fill(bounds.width, &style)?;
        }

        let inner = bounds.inset_x(ctx.theme.nav_bar_padding);
        let child_bounds = FlexLayout::new(FlexDirection::Row)
            .gap(ctx.theme.item_gap)
            .layout(inner, &self.sizes);

        for (child, rect) in self.children.iter_mut().zip(child_bounds) {
            if !rect.is_empty() {
                child.render(renderer, rect, ctx)?;
            }
        }

        self.dirty = false;
        Ok(())
    }

    /// Measured with the default theme spacing
    fn min_size(&self) -> (u16, u16) {
        let widths: u16 = self
            .children
            .iter()
            .map(|child| child.min_size().0)
            .fold(0, u16::saturating_add);
        let gaps = (self.children.len().saturating_sub(1) as u16).saturating_mul(DEFAULT_ITEM_GAP);
        let height = self
            .children
            .iter()
            .map(|child| child.min_size().1)
            .max()
            .unwrap_or(0)
            .max(1);
        let padding = DEFAULT_NAV_BAR_PADDING.saturating_mul(2);
        (widths.saturating_add(gaps).saturating_add(padding), height)
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
        for child in &mut self.children {
            child.mark_dirty();
        }
    }

    fn is_dirty(&self) -> bool {
        self.dirty || self.children.iter().any(|c| c.is_dirty())
    }

    fn name(&self) -> &str {
        "TopNavBar"
    }
}
