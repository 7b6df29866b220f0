//! Theming system with automatic color degradation

mod color;

pub use color::{AnsiColor, Color};

use crate::terminal::TerminalCapabilities;

pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const UNDERLINE: &str = "\x1b[4m";
pub const REVERSE: &str = "\x1b[7m";

/// Columns between sibling items unless a component overrides it
pub const DEFAULT_ITEM_GAP: u16 = 1;
/// Columns of padding at each end of the navigation bar
pub const DEFAULT_NAV_BAR_PADDING: u16 = 1;

/// Colors and spacing shared by all components
#[derive(Debug, Clone)]
pub struct Theme {
    pub text_fg: Color,
    pub label_fg: Color,
    pub accent_fg: Color,
    pub disabled_fg: Color,

    pub field_bg: Color,
    pub nav_bar_fg: Color,
    pub nav_bar_bg: Option<Color>,

    /// Columns between navigation bar children
    pub item_gap: u16,
    /// Columns of padding inside the navigation bar
    pub nav_bar_padding: u16,

    caps: TerminalCapabilities,
}

impl Theme {
    /// Create a new theme with terminal capabilities
    pub fn new(caps: TerminalCapabilities) -> Self {
        Theme {
            text_fg: Color::white(),
            label_fg: Color::dark_gray(),
            accent_fg: Color::rgb(100, 150, 255),
            disabled_fg: Color::rgb(90, 90, 90),

            field_bg: Color::rgb(30, 30, 35),
            nav_bar_fg: Color::white(),
            nav_bar_bg: Some(Color::dark_purple()),

            item_gap: DEFAULT_ITEM_GAP,
            nav_bar_padding: DEFAULT_NAV_BAR_PADDING,

            caps,
        }
    }

    pub fn capabilities(&self) -> &TerminalCapabilities {
        &self.caps
    }

    pub fn text_style(&self) -> String {
        self.text_fg.degrade(&self.caps)
    }

    /// Secondary text such as checkbox descriptions and placeholders
    pub fn label_style(&self) -> String {
        format!("{}{}", self.label_fg.degrade(&self.caps), DIM)
    }

    /// Selected tab, checked fancy checkbox
    pub fn active_style(&self) -> String {
        format!("{}{}", self.accent_fg.degrade(&self.caps), BOLD)
    }

    /// Element holding keyboard focus
    pub fn focus_style(&self) -> String {
        format!("{}{}", self.accent_fg.degrade(&self.caps), UNDERLINE)
    }

    /// Highlighted row of an open option list
    pub fn highlight_style(&self) -> String {
        REVERSE.to_string()
    }

    pub fn disabled_style(&self) -> String {
        format!("{}{}", self.disabled_fg.degrade(&self.caps), DIM)
    }

    /// Input field background; transparent fields only set the foreground
    pub fn field_style(&self, transparent: bool) -> String {
        if transparent {
            self.text_style()
        } else {
            format!("{}{}", self.text_style(), self.field_bg.bg(&self.caps))
        }
    }

    pub fn nav_bar_style(&self) -> String {
        match &self.nav_bar_bg {
            Some(bg) => format!("{}{}", self.nav_bar_fg.degrade(&self.caps), bg.bg(&self.caps)),
            None => REVERSE.to_string(),
        }
    }
}
