//! Event system - keyboard, mouse, and terminal events

#[cfg(feature = "tui")]
use anyhow::Result;
#[cfg(feature = "tui")]
use std::time::Duration;

/// Keyboard key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Ctrl(char),
    Alt(char),
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Enter,
    Esc,
    Null,
}

impl Key {
    /// Enter or Space, the keys that activate a focused control
    pub fn is_activation(&self) -> bool {
        matches!(self, Key::Enter | Key::Char(' '))
    }
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Mouse event types, positions are `(col, row)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEvent {
    Press(MouseButton, u16, u16),
    Release(u16, u16),
    Hold(u16, u16),
    ScrollUp(u16, u16),
    ScrollDown(u16, u16),
}

impl MouseEvent {
    /// Position of a left-button press, if this is one
    pub fn left_click(&self) -> Option<(u16, u16)> {
        match *self {
            MouseEvent::Press(MouseButton::Left, col, row) => Some((col, row)),
            _ => None,
        }
    }
}

/// UI events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(Key),
    Mouse(MouseEvent),
    /// Terminal resized (new cols, new rows)
    Resize(u16, u16),
    FocusGained,
    FocusLost,
    Paste(String),
}

/// Event handler trait for components
pub trait EventHandler {
    /// Handle an event, return true if consumed (stops propagation)
    fn handle_event(&mut self, _event: &Event) -> bool {
        false
    }

    /// Called when component gains focus
    fn on_focus(&mut self) {}

    /// Called when component loses focus
    fn on_blur(&mut self) {}
}

/// Raw-mode event source backed by crossterm
#[cfg(feature = "tui")]
pub struct EventPoller {
    _enabled: bool,
}

#[cfg(feature = "tui")]
impl EventPoller {
    /// Enable raw mode and mouse capture
    pub fn new() -> Result<Self> {
        crossterm::terminal::enable_raw_mode()?;

        // Mouse capture is best-effort
        let _ = crossterm::execute!(std::io::stdout(), crossterm::event::EnableMouseCapture);

        Ok(EventPoller { _enabled: true })
    }

    /// Wait up to `timeout` for the next event
    pub fn poll(&self, timeout: Duration) -> Result<Option<Event>> {
        if crossterm::event::poll(timeout)? {
            Ok(Some(crossterm::event::read()?.into()))
        } else {
            Ok(None)
        }
    }

    /// Block until the next event
    pub fn read(&self) -> Result<Event> {
        Ok(crossterm::event::read()?.into())
    }
}

#[cfg(feature = "tui")]
impl Drop for EventPoller {
    fn drop(&mut self) {
        let _ = crossterm::execute!(std::io::stdout(), crossterm::event::DisableMouseCapture);
        let _ = crossterm::terminal::disable_raw_mode();
    }
}

#[cfg(feature = "tui")]
impl From<crossterm::event::Event> for Event {
    fn from(event: crossterm::event::Event) -> Self {
        use crossterm::event::{Event as CEvent, MouseEventKind};

        match event {
            CEvent::Key(key) => Event::Key(Key::from(key)),
            CEvent::Mouse(me) => {
                let (col, row) = (me.column, me.row);
                Event::Mouse(match me.kind {
                    MouseEventKind::Down(button) => {
                        let button = match button {
                            crossterm::event::MouseButton::Left => MouseButton::Left,
                            crossterm::event::MouseButton::Right => MouseButton::Right,
                            crossterm::event::MouseButton::Middle => MouseButton::Middle,
                        };
                        MouseEvent::Press(button, col, row)
                    }
                    MouseEventKind::Drag(_) | MouseEventKind::Moved => MouseEvent::Hold(col, row),
                    MouseEventKind::ScrollUp => MouseEvent::ScrollUp(col, row),
                    MouseEventKind::ScrollDown => MouseEvent::ScrollDown(col, row),
                    _ => MouseEvent::Release(col, row),
                })
            }
            CEvent::Resize(cols, rows) => Event::Resize(cols, rows),
            CEvent::FocusGained => Event::FocusGained,
            CEvent::FocusLost => Event::FocusLost,
            CEvent::Paste(data) => Event::Paste(data),
        }
    }
}

#[cfg(feature = "tui")]
impl From<crossterm::event::KeyEvent> for Key {
    fn from(event: crossterm::event::KeyEvent) -> Self {
        use crossterm::event::{KeyCode, KeyModifiers};

        match (event.code, event.modifiers) {
            (KeyCode::Char(c), m) if m.contains(KeyModifiers::CONTROL) => Key::Ctrl(c),
            (KeyCode::Char(c), m) if m.contains(KeyModifiers::ALT) => Key::Alt(c),
            (KeyCode::Char(c), _) => Key::Char(c),
            (KeyCode::Up, _) => Key::Up,
            (KeyCode::Down, _) => Key::Down,
            (KeyCode::Left, _) => Key::Left,
            (KeyCode::Right, _) => Key::Right,
            (KeyCode::Home, _) => Key::Home,
            (KeyCode::End, _) => Key::End,
            (KeyCode::PageUp, _) => Key::PageUp,
            (KeyCode::PageDown, _) => Key::PageDown,
            (KeyCode::Tab, _) => Key::Tab,
            (KeyCode::BackTab, _) => Key::BackTab,
            (KeyCode::Backspace, _) => Key::Backspace,
            (KeyCode::Delete, _) => Key::Delete,
            (KeyCode::Enter, _) => Key::Enter,
            (KeyCode::Esc, _) => Key::Esc,
            _ => Key::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activation_keys() {
        assert!(Key::Enter.is_activation());
        assert!(Key::Char(' ').is_activation());
        assert!(!Key::Char('x').is_activation());
        assert!(!Key::Tab.is_activation());
    }

    #[test]
    fn test_left_click() {
        let press = MouseEvent::Press(MouseButton::Left, 3, 4);
        assert_eq!(press.left_click(), Some((3, 4)));
        assert_eq!(MouseEvent::Press(MouseButton::Right, 3, 4).left_click(), None);
        assert_eq!(MouseEvent::Release(3, 4).left_click(), None);
    }

    #[cfg(feature = "tui")]
    #[test]
    fn test_crossterm_key_conversion() {
        use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(Key::from(ctrl_c), Key::Ctrl('c'));

        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(Event::from(crossterm::event::Event::Key(enter)), Event::Key(Key::Enter));
    }
}
