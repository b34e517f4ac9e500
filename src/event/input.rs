//! Input event types wrapping crossterm for decoupling.
//!
//! Defines [`InputEvent`], [`KeyEvent`], [`Key`] and [`Modifiers`]. Crossterm
//! events are converted at the edge so the rest of the toolkit never depends
//! on crossterm directly. Keys can also be written and parsed as text
//! (`"Ctrl-l"`, `"Shift-Tab"`, `"PageDown"`) for binding configuration.

use std::fmt;
use std::ops::{BitAnd, BitOr};

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Keyboard key, decoupled from crossterm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Insert,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
}

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

/// Modifier key bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(1);
    pub const CTRL: Modifiers = Modifiers(2);
    pub const ALT: Modifiers = Modifiers(4);

    /// Check whether `self` contains all the bits in `other`.
    pub fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check whether no modifier bits are set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// `self` with the bits of `other` cleared.
    pub fn without(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 & !other.0)
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;
    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

impl BitAnd for Modifiers {
    type Output = Modifiers;
    fn bitand(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 & rhs.0)
    }
}

// ---------------------------------------------------------------------------
// KeyEvent
// ---------------------------------------------------------------------------

/// A keyboard event with key and modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a new key event.
    pub fn new(code: Key, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// A key without modifiers.
    pub fn plain(code: Key) -> Self {
        Self::new(code, Modifiers::NONE)
    }

    /// `Ctrl` + a character.
    pub fn ctrl(c: char) -> Self {
        Self::new(Key::Char(c), Modifiers::CTRL)
    }

    /// Drop modifier bits that are already implied by the key itself.
    ///
    /// Terminals report Shift-Tab as `BackTab` and upper-case letters as the
    /// letter itself, sometimes with and sometimes without the Shift bit.
    pub fn normalized(self) -> Self {
        match self.code {
            Key::BackTab | Key::Char(_) => Self {
                code: self.code,
                modifiers: self.modifiers.without(Modifiers::SHIFT),
            },
            _ => self,
        }
    }

    /// Parse a key specification such as `"Ctrl-l"`, `"Alt-x"`, `"Shift-Tab"`,
    /// `"PageUp"`, `"F5"` or a single character.
    pub fn parse(spec: &str) -> Result<KeyEvent> {
        let invalid = || Error::InvalidKey(spec.to_owned());
        if spec.is_empty() {
            return Err(invalid());
        }

        let mut modifiers = Modifiers::NONE;
        let mut rest = spec;
        loop {
            let lower = rest.to_ascii_lowercase();
            let (bit, len) = if lower.starts_with("ctrl-") {
                (Modifiers::CTRL, 5)
            } else if lower.starts_with("alt-") {
                (Modifiers::ALT, 4)
            } else if lower.starts_with("shift-") {
                (Modifiers::SHIFT, 6)
            } else {
                break;
            };
            // A bare "-" after a prefix is the minus key, not another prefix.
            if rest.len() == len {
                return Err(invalid());
            }
            modifiers = modifiers | bit;
            rest = &rest[len..];
        }

        let mut chars = rest.chars();
        let code = match (chars.next(), chars.next()) {
            (Some(c), None) => Key::Char(c),
            _ => match rest.to_ascii_lowercase().as_str() {
                "enter" | "return" => Key::Enter,
                "escape" | "esc" => Key::Escape,
                "tab" => Key::Tab,
                "backtab" => Key::BackTab,
                "backspace" => Key::Backspace,
                "delete" | "del" => Key::Delete,
                "insert" | "ins" => Key::Insert,
                "left" => Key::Left,
                "right" => Key::Right,
                "up" => Key::Up,
                "down" => Key::Down,
                "home" => Key::Home,
                "end" => Key::End,
                "pageup" | "pgup" => Key::PageUp,
                "pagedown" | "pgdn" => Key::PageDown,
                "space" => Key::Char(' '),
                other => match other.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                    Some(n @ 1..=24) => Key::F(n),
                    _ => return Err(invalid()),
                },
            },
        };

        let event = if code == Key::Tab && modifiers.contains(Modifiers::SHIFT) {
            KeyEvent::new(Key::BackTab, modifiers)
        } else {
            KeyEvent::new(code, modifiers)
        };
        Ok(event.normalized())
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = self.normalized();
        if key.modifiers.contains(Modifiers::CTRL) {
            f.write_str("Ctrl-")?;
        }
        if key.modifiers.contains(Modifiers::ALT) {
            f.write_str("Alt-")?;
        }
        if key.modifiers.contains(Modifiers::SHIFT) || key.code == Key::BackTab {
            f.write_str("Shift-")?;
        }
        match key.code {
            Key::Char(' ') => f.write_str("Space"),
            Key::Char(c) => write!(f, "{c}"),
            Key::Enter => f.write_str("Enter"),
            Key::Escape => f.write_str("Escape"),
            Key::Tab | Key::BackTab => f.write_str("Tab"),
            Key::Backspace => f.write_str("Backspace"),
            Key::Delete => f.write_str("Delete"),
            Key::Insert => f.write_str("Insert"),
            Key::Left => f.write_str("Left"),
            Key::Right => f.write_str("Right"),
            Key::Up => f.write_str("Up"),
            Key::Down => f.write_str("Down"),
            Key::Home => f.write_str("Home"),
            Key::End => f.write_str("End"),
            Key::PageUp => f.write_str("PageUp"),
            Key::PageDown => f.write_str("PageDown"),
            Key::F(n) => write!(f, "F{n}"),
        }
    }
}

// ---------------------------------------------------------------------------
// InputEvent
// ---------------------------------------------------------------------------

/// Top-level input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Resize { width: u16, height: u16 },
    Paste(String),
}

// ---------------------------------------------------------------------------
// From<crossterm> conversions
// ---------------------------------------------------------------------------

/// Convert crossterm key modifiers to our `Modifiers`.
fn convert_modifiers(m: crossterm::event::KeyModifiers) -> Modifiers {
    let mut out = Modifiers::NONE;
    if m.contains(crossterm::event::KeyModifiers::SHIFT) {
        out = out | Modifiers::SHIFT;
    }
    if m.contains(crossterm::event::KeyModifiers::CONTROL) {
        out = out | Modifiers::CTRL;
    }
    if m.contains(crossterm::event::KeyModifiers::ALT) {
        out = out | Modifiers::ALT;
    }
    out
}

impl KeyEvent {
    /// Convert a crossterm key event. Keys with no counterpart (media keys,
    /// bare modifier presses, ...) and release events yield `None`.
    pub fn from_crossterm(ct: crossterm::event::KeyEvent) -> Option<KeyEvent> {
        use crossterm::event::{KeyCode, KeyEventKind};

        if ct.kind == KeyEventKind::Release {
            return None;
        }
        let code = match ct.code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Insert => Key::Insert,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::F(n) => Key::F(n),
            _ => return None,
        };
        Some(KeyEvent::new(code, convert_modifiers(ct.modifiers)).normalized())
    }
}

impl InputEvent {
    /// Convert a crossterm event. Mouse and terminal focus events are not
    /// used by the toolkit and yield `None`.
    pub fn from_crossterm(ct: crossterm::event::Event) -> Option<InputEvent> {
        match ct {
            crossterm::event::Event::Key(ke) => KeyEvent::from_crossterm(ke).map(InputEvent::Key),
            crossterm::event::Event::Resize(width, height) => {
                Some(InputEvent::Resize { width, height })
            }
            crossterm::event::Event::Paste(s) => Some(InputEvent::Paste(s)),
            _ => None,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
