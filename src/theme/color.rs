//! Colors that degrade to what the terminal supports

use crate::terminal::TerminalCapabilities;

/// A color, either true RGB or one of the 16 ANSI slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Rgb(u8, u8, u8),
    Ansi16(AnsiColor),
}

/// 16-color ANSI palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnsiColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl AnsiColor {
    const ALL: [AnsiColor; 16] = [
        AnsiColor::Black,
        AnsiColor::Red,
        AnsiColor::Green,
        AnsiColor::Yellow,
        AnsiColor::Blue,
        AnsiColor::Magenta,
        AnsiColor::Cyan,
        AnsiColor::White,
        AnsiColor::BrightBlack,
        AnsiColor::BrightRed,
        AnsiColor::BrightGreen,
        AnsiColor::BrightYellow,
        AnsiColor::BrightBlue,
        AnsiColor::BrightMagenta,
        AnsiColor::BrightCyan,
        AnsiColor::BrightWhite,
    ];

    fn index(self) -> u8 {
        self as u8
    }

    fn to_rgb(self) -> (u8, u8, u8) {
        let i = self.index();
        let level = |on: bool| match (on, i >= 8) {
            (false, false) => 0,
            (false, true) => 85,
            (true, false) => 170,
            (true, true) => 255,
        };
        match self {
            AnsiColor::White => (170, 170, 170),
            AnsiColor::BrightBlack => (85, 85, 85),
            _ => (level(i & 1 != 0), level(i & 2 != 0), level(i & 4 != 0)),
        }
    }

    /// SGR parameter for foreground (`30..=37`, `90..=97`)
    fn fg_code(self) -> u8 {
        let i = self.index();
        if i < 8 {
            30 + i
        } else {
            90 + (i - 8)
        }
    }

    /// Closest palette entry by squared RGB distance
    fn nearest(r: u8, g: u8, b: u8) -> Self {
        let distance = |c: &AnsiColor| {
            let (cr, cg, cb) = c.to_rgb();
            let d = |a: u8, b: u8| (a as i32 - b as i32).pow(2);
            d(r, cr) + d(g, cg) + d(b, cb)
        };
        Self::ALL
            .iter()
            .copied()
            .min_by_key(distance)
            .unwrap_or(AnsiColor::White)
    }
}

impl Color {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb(r, g, b)
    }

    pub fn white() -> Self {
        Color::Rgb(255, 255, 255)
    }

    pub fn black() -> Self {
        Color::Rgb(0, 0, 0)
    }

    pub fn dark_gray() -> Self {
        Color::Rgb(128, 128, 128)
    }

    pub fn dark_purple() -> Self {
        Color::Rgb(58, 48, 68)
    }

    fn to_rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Rgb(r, g, b) => (r, g, b),
            Color::Ansi16(a) => a.to_rgb(),
        }
    }

    fn to_ansi16(self) -> AnsiColor {
        match self {
            Color::Ansi16(a) => a,
            Color::Rgb(r, g, b) => AnsiColor::nearest(r, g, b),
        }
    }

    /// Foreground escape sequence, empty when the terminal has no color
    pub fn degrade(&self, caps: &TerminalCapabilities) -> String {
        self.sgr(caps, false)
    }

    /// Background escape sequence, empty when the terminal has no color
    pub fn bg(&self, caps: &TerminalCapabilities) -> String {
        self.sgr(caps, true)
    }

    fn sgr(&self, caps: &TerminalCapabilities, background: bool) -> String {
        if !caps.color {
            return String::new();
        }

        let layer = if background { 48 } else { 38 };
        if caps.truecolor {
            let (r, g, b) = self.to_rgb();
            format!("\x1b[{};2;{};{};{}m", layer, r, g, b)
        } else if caps.colors_256 {
            let (r, g, b) = self.to_rgb();
            format!("\x1b[{};5;{}m", layer, rgb_to_256(r, g, b))
        } else {
            let code = self.to_ansi16().fg_code() + if background { 10 } else { 0 };
            format!("\x1b[{}m", code)
        }
    }
}

/// Map RGB onto the 6x6x6 cube or the grayscale ramp of the 256-color palette
pub(crate) fn rgb_to_256(r: u8, g: u8, b: u8) -> u8 {
    if r == g && g == b {
        return match r {
            0..=7 => 16,
            249..=255 => 231,
            _ => 232 + (r - 8) / 10,
        };
    }

    let step = |c: u8| (c as u16 * 5 / 255) as u8;
    16 + 36 * step(r) + 6 * step(g) + step(b)
}
