//! Rendering context - provides the theme to components

use crate::theme::Theme;

/// Context passed down the component tree during rendering
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    /// Current theme
    pub theme: &'a Theme,
}

impl<'a> RenderContext<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        RenderContext { theme }
    }

    /// Create a child context with a different theme
    pub fn with_theme(&self, theme: &'a Theme) -> Self {
        RenderContext { theme }
    }
}

/// Hook trait for accessing theme from context
pub trait UseTheme {
    fn use_theme<'a>(&self, ctx: &'a RenderContext) -> &'a Theme {
        ctx.theme
    }
}

impl<T> UseTheme for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::TerminalCapabilities;

    #[test]
    fn test_context_creation() {
        let theme = Theme::new(TerminalCapabilities::plain());
        let ctx = RenderContext::new(&theme);

        assert_eq!(ctx.theme as *const _, &theme as *const _);
    }

    #[test]
    fn test_hook_trait() {
        let theme = Theme::new(TerminalCapabilities::plain());
        let other = Theme::new(TerminalCapabilities::truecolor());
        let ctx = RenderContext::new(&theme);

        struct TestComponent;

        let component = TestComponent;
        assert_eq!(component.use_theme(&ctx) as *const _, &theme as *const _);

        let child = ctx.with_theme(&other);
        assert_eq!(component.use_theme(&child) as *const _, &other as *const _);
    }
}
