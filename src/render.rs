//! Rendering backend - buffered ANSI output to the terminal or to memory
//!
//! A headless renderer records everything into a byte buffer and can replay it
//! into a grid of characters, which is how component tests inspect output.

use crate::terminal::{TerminalCapabilities, TerminalContext, TerminalGeometry};
use anyhow::Result;
use std::io::{self, BufWriter, Write};
use tracing::debug;

/// Default buffer capacity for write batching (16KB)
const WRITE_BUFFER_CAPACITY: usize = 16 * 1024;

enum Output {
    Terminal(BufWriter<io::Stdout>),
    Memory(Vec<u8>),
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Terminal(w) => w.write(buf),
            Output::Memory(v) => v.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Terminal(w) => w.flush(),
            Output::Memory(_) => Ok(()),
        }
    }
}

/// Terminal renderer issuing cursor moves and styled text
///
/// Uses internal write buffering to minimize syscalls.
/// Call `flush()` after a batch of operations to ensure output is displayed.
pub struct Renderer {
    writer: Output,
    context: TerminalContext,
    in_alt_screen: bool,
}

impl Renderer {
    /// Create a renderer writing to stdout with detected terminal context
    pub fn new() -> Result<Self> {
        let context = TerminalContext::detect()?;
        debug!(
            cols = context.geometry.cols,
            rows = context.geometry.rows,
            truecolor = context.capabilities.truecolor,
            "terminal renderer created"
        );

        Ok(Renderer {
            writer: Output::Terminal(BufWriter::with_capacity(WRITE_BUFFER_CAPACITY, io::stdout())),
            context,
            in_alt_screen: false,
        })
    }

    /// In-memory 80x24 renderer without color
    pub fn headless() -> Self {
        Self::headless_with(TerminalGeometry::default(), TerminalCapabilities::plain())
    }

    /// In-memory renderer with explicit geometry and capabilities
    pub fn headless_with(geometry: TerminalGeometry, capabilities: TerminalCapabilities) -> Self {
        Renderer {
            writer: Output::Memory(Vec::new()),
            context: TerminalContext::fixed(geometry, capabilities),
            in_alt_screen: false,
        }
    }

    pub fn is_headless(&self) -> bool {
        matches!(self.writer, Output::Memory(_))
    }

    /// Enter alternative screen buffer
    pub fn enter_alt_screen(&mut self) -> Result<()> {
        if !self.in_alt_screen {
            write!(self.writer, "\x1b[?1049h")?;
            self.writer.flush()?;
            self.in_alt_screen = true;
        }
        Ok(())
    }

    /// Exit alternative screen buffer
    pub fn exit_alt_screen(&mut self) -> Result<()> {
        if self.in_alt_screen {
            write!(self.writer, "\x1b[?1049l")?;
            self.writer.flush()?;
            self.in_alt_screen = false;
        }
        Ok(())
    }

    /// Clear the screen
    pub fn clear(&mut self) -> Result<()> {
        write!(self.writer, "\x1b[2J")?;
        Ok(())
    }

    /// Move cursor to position (0-indexed)
    #[inline]
    pub fn move_cursor(&mut self, col: u16, row: u16) -> Result<()> {
        write!(self.writer, "\x1b[{};{}H", row + 1, col + 1)?;
        Ok(())
    }

    pub fn hide_cursor(&mut self) -> Result<()> {
        write!(self.writer, "\x1b[?25l")?;
        Ok(())
    }

    pub fn show_cursor(&mut self) -> Result<()> {
        write!(self.writer, "\x1b[?25h")?;
        Ok(())
    }

    /// Write text at current cursor position
    #[inline]
    pub fn write_text(&mut self, text: &str) -> Result<()> {
        self.writer.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Write text wrapped in an ANSI style and a reset; an empty style writes plain text
    #[inline]
    pub fn write_styled(&mut self, text: &str, style: &str) -> Result<()> {
        if style.is_empty() {
            return self.write_text(text);
        }
        write!(self.writer, "{}{}\x1b[0m", style, text)?;
        Ok(())
    }

    /// Write a repeated character
    #[inline]
    pub fn write_repeated(&mut self, ch: char, count: usize) -> Result<()> {
        let mut buf = [0u8; 4];
        let encoded = ch.encode_utf8(&mut buf);
        for _ in 0..count {
            self.writer.write_all(encoded.as_bytes())?;
        }
        Ok(())
    }

    /// Fill `width` cells at the cursor with spaces in the given style
    pub fn fill(&mut self, width: u16, style: &str) -> Result<()> {
        let blank = " ".repeat(width as usize);
        self.write_styled(&blank, style)
    }

    /// Flush output buffer to terminal
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn context(&self) -> &TerminalContext {
        &self.context
    }

    pub fn capabilities(&self) -> TerminalCapabilities {
        self.context.capabilities
    }

    /// Refresh terminal geometry (call after resize)
    pub fn refresh_geometry(&mut self) -> Result<()> {
        if !self.is_headless() {
            self.context.refresh_geometry()?;
        }
        Ok(())
    }

    pub fn in_alt_screen(&self) -> bool {
        self.in_alt_screen
    }

    /// Raw bytes recorded by a headless renderer (lossy UTF-8)
    pub fn output(&self) -> String {
        match &self.writer {
            Output::Memory(buf) => String::from_utf8_lossy(buf).into_owned(),
            Output::Terminal(_) => String::new(),
        }
    }

    /// Discard recorded output of a headless renderer
    pub fn reset_output(&mut self) {
        if let Output::Memory(buf) = &mut self.writer {
            buf.clear();
        }
    }

    /// Replay recorded output into rows of characters.
    ///
    /// Cursor positioning and clear-screen are honored; style sequences are
    /// dropped. Trailing spaces are trimmed from each row.
    pub fn screen(&self) -> Vec<String> {
        let (cols, rows) = self.context.char_dimensions();
        let mut grid = vec![vec![' '; cols as usize]; rows as usize];
        let (mut col, mut row) = (0usize, 0usize);

        let output = self.output();
        let mut chars = output.chars().peekable();
        while let Some(ch) = chars.next() {
            if ch != '\x1b' {
                if let Some(cell) = grid.get_mut(row).and_then(|r| r.get_mut(col)) {
                    *cell = ch;
                }
                col += 1;
                continue;
            }

            if chars.peek() != Some(&'[') {
                continue;
            }
            chars.next();

            let mut params = String::new();
            let mut command = None;
            for c in chars.by_ref() {
                if ('\x40'..='\x7e').contains(&c) {
                    command = Some(c);
                    break;
                }
                params.push(c);
            }

            match command {
                Some('H') => {
                    let mut parts = params.split(';').map(|p| p.parse::<usize>().unwrap_or(1));
                    row = parts.next().unwrap_or(1).saturating_sub(1);
                    col = parts.next().unwrap_or(1).saturating_sub(1);
                }
                Some('J') if params == "2" => {
                    grid.iter_mut().for_each(|r| r.fill(' '));
                }
                _ => {}
            }
        }

        grid.into_iter()
            .map(|r| r.into_iter().collect::<String>().trim_end().to_string())
            .collect()
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        // Restore terminal state even during panics
        let _ = self.exit_alt_screen();
        if !self.is_headless() {
            let _ = self.show_cursor();
        }
        let _ = self.writer.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_records_output() {
        let mut renderer = Renderer::headless();
        renderer.move_cursor(2, 1).unwrap();
        renderer.write_styled("hi", "\x1b[1m").unwrap();

        assert_eq!(renderer.output(), "\x1b[2;3H\x1b[1mhi\x1b[0m");
    }

    #[test]
    fn test_screen_replays_cursor_moves() {
        let mut renderer = Renderer::headless_with(
            TerminalGeometry::new(10, 3),
            TerminalCapabilities::plain(),
        );
        renderer.move_cursor(0, 0).unwrap();
        renderer.write_text("abc").unwrap();
        renderer.move_cursor(4, 2).unwrap();
        renderer.write_styled("xy", "\x1b[7m").unwrap();
        renderer.move_cursor(1, 0).unwrap();
        renderer.write_repeated('-', 2).unwrap();

        assert_eq!(renderer.screen(), vec!["a--", "", "    xy"]);
    }

    #[test]
    fn test_screen_clips_and_clears() {
        let mut renderer = Renderer::headless_with(
            TerminalGeometry::new(4, 1),
            TerminalCapabilities::plain(),
        );
        renderer.write_text("overflow").unwrap();
        assert_eq!(renderer.screen(), vec!["over"]);

        renderer.clear().unwrap();
        renderer.move_cursor(0, 0).unwrap();
        renderer.write_text("ok").unwrap();
        assert_eq!(renderer.screen(), vec!["ok"]);
    }

    #[test]
    fn test_empty_style_writes_plain_text() {
        let mut renderer = Renderer::headless();
        renderer.write_styled("plain", "").unwrap();
        assert_eq!(renderer.output(), "plain");

        renderer.reset_output();
        assert!(renderer.output().is_empty());
    }
}
