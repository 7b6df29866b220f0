//! Component system - trait and lifecycle for UI elements

use crate::context::RenderContext;
use crate::event::{Event, EventHandler};
use crate::layout::Rect;
use crate::render::Renderer;
use anyhow::Result;

/// Core component trait for all UI elements
///
/// Components use a hybrid approach:
/// - Retained: configuration and interaction state live in the component
/// - Immediate: rendering happens fresh each frame via `render()`
pub trait Component: EventHandler {
    /// Render the component within the given rectangle
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()>;

    /// Minimum `(width, height)` in cells
    fn min_size(&self) -> (u16, u16) {
        (0, 0)
    }

    /// Whether the component accepts keyboard focus
    fn focusable(&self) -> bool {
        false
    }

    /// Mark component as needing redraw
    fn mark_dirty(&mut self) {}

    /// Check if component needs redraw
    fn is_dirty(&self) -> bool {
        true
    }

    /// Component name for debugging
    fn name(&self) -> &str {
        "Component"
    }
}

/// Propagate an event to children in order until one consumes it
pub fn propagate_event(children: &mut [Box<dyn Component>], event: &Event) -> bool {
    children.iter_mut().any(|child| child.handle_event(event))
}
