//! Terminal output backends.
//!
//! [`Backend`] is the seam between the manager and the physical screen: it
//! reports the terminal size and receives the cell updates produced by each
//! flip. [`Driver`] implements it with crossterm over a buffered stdout
//! writer. Colour strings use the console palette: basic names, palette
//! indices and `#rrggbb`.

use std::io::{self, Write, BufWriter, Stdout};
use crossterm::{
    cursor, execute, queue,
    style::{SetForegroundColor, SetBackgroundColor, SetAttribute, ResetColor, Print, Color, Attribute},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};

use super::cell::CellStyle;
use super::compositor::CellUpdate;
use crate::geometry::Size;

// ---------------------------------------------------------------------------
// Backend
// ---------------------------------------------------------------------------

/// Where flipped frames go.
pub trait Backend {
    /// Current screen size in cells.
    fn size(&self) -> io::Result<Size>;

    /// Queue cell updates for output.
    fn apply_updates(&mut self, updates: &[CellUpdate]) -> io::Result<()>;

    /// Send everything queued to the screen.
    fn flush(&mut self) -> io::Result<()>;

    /// Restore the terminal to its original state.
    fn shutdown(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Terminal output backend using crossterm.
///
/// Cell updates are queued on a buffered stdout and written on `flush`.
/// Creating a driver leaves the terminal alone; call `enter_alt_screen` to
/// switch to raw mode and the alternate screen.
pub struct Driver {
    writer: BufWriter<Stdout>,
    active: bool,
}

impl Driver {
    /// Create a new driver wrapping stdout.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            writer: BufWriter::new(io::stdout()),
            active: false,
        })
    }

    /// Enter alternate screen, enable raw mode and hide the cursor.
    pub fn enter_alt_screen(&mut self) -> io::Result<()> {
        execute!(self.writer, EnterAlternateScreen, cursor::Hide)?;
        terminal::enable_raw_mode()?;
        self.active = true;
        Ok(())
    }

    /// Leave alternate screen, disable raw mode and show the cursor.
    pub fn leave_alt_screen(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        terminal::disable_raw_mode()?;
        execute!(self.writer, cursor::Show, LeaveAlternateScreen)?;
        Ok(())
    }

    /// Get the terminal size (columns, rows) via crossterm.
    pub fn terminal_size() -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Queue crossterm style commands for a given `CellStyle`.
    fn apply_cell_style(&mut self, style: &CellStyle) -> io::Result<()> {
        if let Some(ref fg) = style.fg {
            if let Some(color) = parse_color(fg) {
                queue!(self.writer, SetForegroundColor(color))?;
            }
        }
        if let Some(ref bg) = style.bg {
            if let Some(color) = parse_color(bg) {
                queue!(self.writer, SetBackgroundColor(color))?;
            }
        }
        if style.bold {
            queue!(self.writer, SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            queue!(self.writer, SetAttribute(Attribute::Dim))?;
        }
        if style.italic {
            queue!(self.writer, SetAttribute(Attribute::Italic))?;
        }
        if style.underline {
            queue!(self.writer, SetAttribute(Attribute::Underlined))?;
        }
        if style.strikethrough {
            queue!(self.writer, SetAttribute(Attribute::CrossedOut))?;
        }
        if style.reverse {
            queue!(self.writer, SetAttribute(Attribute::Reverse))?;
        }
        Ok(())
    }
}

impl Backend for Driver {
    fn size(&self) -> io::Result<Size> {
        let (width, height) = Driver::terminal_size()?;
        Ok(Size::new(width as i32, height as i32))
    }

    /// Updates arrive in row-major order. The cursor is only moved when the
    /// next cell is not adjacent to the previous one, and attributes are only
    /// re-sent when the style changes.
    fn apply_updates(&mut self, updates: &[CellUpdate]) -> io::Result<()> {
        let mut cursor_at: Option<(u16, u16)> = None;
        let mut current: Option<&CellStyle> = None;
        for update in updates {
            if cursor_at != Some((update.x, update.y)) {
                queue!(self.writer, cursor::MoveTo(update.x, update.y))?;
            }
            if current != Some(&update.cell.style) {
                queue!(self.writer, SetAttribute(Attribute::Reset), ResetColor)?;
                self.apply_cell_style(&update.cell.style)?;
                current = Some(&update.cell.style);
            }
            queue!(self.writer, Print(update.cell.ch))?;
            cursor_at = Some((update.x.saturating_add(1), update.y));
        }
        if current.is_some() {
            queue!(self.writer, SetAttribute(Attribute::Reset), ResetColor)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    fn shutdown(&mut self) -> io::Result<()> {
        self.leave_alt_screen()
    }
}

impl Drop for Driver {
    fn drop(&mut self) {
        if let Err(err) = self.leave_alt_screen() {
            tracing::error!(%err, "failed to restore terminal");
        }
    }
}

// ---------------------------------------------------------------------------
// Color parsing
// ---------------------------------------------------------------------------

/// The eight basic console colours, in palette order.
const BASIC_COLORS: [(&str, Color, Color); 8] = [
    ("black", Color::Black, Color::DarkGrey),
    ("red", Color::DarkRed, Color::Red),
    ("green", Color::DarkGreen, Color::Green),
    ("yellow", Color::DarkYellow, Color::Yellow),
    ("blue", Color::DarkBlue, Color::Blue),
    ("magenta", Color::DarkMagenta, Color::Magenta),
    ("cyan", Color::DarkCyan, Color::Cyan),
    ("white", Color::Grey, Color::White),
];

/// Parse a colour name as used in colour schemes.
///
/// Accepted forms: `default` (the terminal's own colour), a basic colour
/// name optionally prefixed with `bright_`, a palette index `0`-`255`, or
/// `#rrggbb`. Names are case-insensitive. Anything else is `None`.
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim().to_ascii_lowercase();
    if s == "default" {
        return Some(Color::Reset);
    }
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        return Some(Color::Rgb { r: channel(0)?, g: channel(2)?, b: channel(4)? });
    }
    if let Ok(index) = s.parse::<u8>() {
        return Some(Color::AnsiValue(index));
    }

    let (name, bright) = match s.strip_prefix("bright_") {
        Some(rest) => (rest, true),
        None => (s.as_str(), false),
    };
    BASIC_COLORS
        .iter()
        .find(|(n, _, _)| *n == name)
        .map(|&(_, normal, light)| if bright { light } else { normal })
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_names_and_bright_variants() {
        assert_eq!(parse_color("red"), Some(Color::DarkRed));
        assert_eq!(parse_color("Bright_Red"), Some(Color::Red));
        assert_eq!(parse_color("white"), Some(Color::Grey));
        assert_eq!(parse_color("bright_black"), Some(Color::DarkGrey));
        assert_eq!(parse_color(" blue "), Some(Color::DarkBlue));
    }

    #[test]
    fn default_index_and_hex() {
        assert_eq!(parse_color("default"), Some(Color::Reset));
        assert_eq!(parse_color("208"), Some(Color::AnsiValue(208)));
        assert_eq!(parse_color("#ff8800"), Some(Color::Rgb { r: 255, g: 136, b: 0 }));
    }

    #[test]
    fn unknown_colors_are_rejected() {
        for bad in ["mauve", "", "256", "-1", "#fff", "#gghhii", "bright_", "bright_default"] {
            assert_eq!(parse_color(bad), None, "{bad}");
        }
    }

    #[test]
    fn driver_new_does_not_touch_terminal() {
        let driver = Driver::new();
        assert!(driver.is_ok_and(|d| !d.active));
    }
}
