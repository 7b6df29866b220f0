//! Terminal abstraction - geometry and color capabilities

use anyhow::Result;

/// Fallback size when the terminal cannot be queried
const FALLBACK_COLS: u16 = 80;
const FALLBACK_ROWS: u16 = 24;

/// Terminal size in character cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalGeometry {
    pub cols: u16,
    pub rows: u16,
}

impl TerminalGeometry {
    pub fn new(cols: u16, rows: u16) -> Self {
        TerminalGeometry { cols, rows }
    }

    /// Query the attached terminal
    #[cfg(feature = "tui")]
    pub fn detect() -> Result<Self> {
        use anyhow::Context;

        let (cols, rows) = crossterm::terminal::size().context("Failed to get terminal size")?;
        Ok(TerminalGeometry { cols, rows })
    }

    /// Without a terminal backend, read `COLUMNS`/`LINES` or fall back to 80x24
    #[cfg(not(feature = "tui"))]
    pub fn detect() -> Result<Self> {
        let read = |name: &str, fallback: u16| {
            std::env::var(name)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(fallback)
        };
        Ok(TerminalGeometry {
            cols: read("COLUMNS", FALLBACK_COLS),
            rows: read("LINES", FALLBACK_ROWS),
        })
    }
}

impl Default for TerminalGeometry {
    fn default() -> Self {
        TerminalGeometry::new(FALLBACK_COLS, FALLBACK_ROWS)
    }
}

/// Color and input support of the attached terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalCapabilities {
    /// Any color output at all (`NO_COLOR` turns this off)
    pub color: bool,
    /// Supports 24-bit true color
    pub truecolor: bool,
    /// Supports 256 colors
    pub colors_256: bool,
    /// Inside tmux/screen multiplexer
    pub in_multiplexer: bool,
}

impl TerminalCapabilities {
    /// Detect capabilities from the environment
    pub fn detect() -> Self {
        let term = std::env::var("TERM").unwrap_or_default();
        let colorterm = std::env::var("COLORTERM").unwrap_or_default();

        let color = std::env::var_os("NO_COLOR").is_none() && term != "dumb";
        let truecolor = colorterm.contains("truecolor")
            || colorterm.contains("24bit")
            || std::env::var("KITTY_WINDOW_ID").is_ok();
        let colors_256 = term.contains("256") || truecolor;

        TerminalCapabilities {
            color,
            truecolor,
            colors_256,
            in_multiplexer: std::env::var("TMUX").is_ok(),
        }
    }

    /// No color support; styles reduce to plain text attributes
    pub fn plain() -> Self {
        TerminalCapabilities {
            color: false,
            truecolor: false,
            colors_256: false,
            in_multiplexer: false,
        }
    }

    /// Full 24-bit color support
    pub fn truecolor() -> Self {
        TerminalCapabilities {
            color: true,
            truecolor: true,
            colors_256: true,
            in_multiplexer: false,
        }
    }
}

/// Geometry plus capabilities
#[derive(Debug, Clone)]
pub struct TerminalContext {
    pub geometry: TerminalGeometry,
    pub capabilities: TerminalCapabilities,
}

impl TerminalContext {
    /// Detect the current environment
    pub fn detect() -> Result<Self> {
        Ok(TerminalContext {
            geometry: TerminalGeometry::detect()?,
            capabilities: TerminalCapabilities::detect(),
        })
    }

    /// Fixed context that does not touch the environment
    pub fn fixed(geometry: TerminalGeometry, capabilities: TerminalCapabilities) -> Self {
        TerminalContext {
            geometry,
            capabilities,
        }
    }

    /// Refresh geometry (e.g., after terminal resize)
    pub fn refresh_geometry(&mut self) -> Result<()> {
        self.geometry = TerminalGeometry::detect()?;
        Ok(())
    }

    /// Character dimensions as `(cols, rows)`
    pub fn char_dimensions(&self) -> (u16, u16) {
        (self.geometry.cols, self.geometry.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_context() {
        let ctx = TerminalContext::fixed(TerminalGeometry::new(100, 30), TerminalCapabilities::plain());
        assert_eq!(ctx.char_dimensions(), (100, 30));
        assert!(!ctx.capabilities.color);
    }

    #[test]
    fn test_capabilities_detect() {
        let caps = TerminalCapabilities::detect();
        // 256 colors always accompany truecolor
        assert!(caps.colors_256 || !caps.truecolor);
    }
}
