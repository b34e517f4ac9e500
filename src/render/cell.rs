//! Styled terminal cells.
//!
//! A `StyledCell` is one character plus its display attributes. The
//! compositor's buffers are grids of these.

// ---------------------------------------------------------------------------
// CellStyle
// ---------------------------------------------------------------------------

/// Visual style for a single terminal cell.
///
/// Colors are stored as optional strings, parsed as named colors or `#rrggbb`
/// hex values when the colour scheme resolves them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CellStyle {
    pub fg: Option<String>,
    pub bg: Option<String>,
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub reverse: bool,
}

impl CellStyle {
    /// Create a new `CellStyle` with all attributes unset/false.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the foreground color (builder).
    pub fn with_fg(mut self, color: impl Into<String>) -> Self {
        self.fg = Some(color.into());
        self
    }

    /// Set the background color (builder).
    pub fn with_bg(mut self, color: impl Into<String>) -> Self {
        self.bg = Some(color.into());
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn reversed(mut self) -> Self {
        self.reverse = true;
        self
    }

    pub fn underlined(mut self) -> Self {
        self.underline = true;
        self
    }
}

// ---------------------------------------------------------------------------
// StyledCell
// ---------------------------------------------------------------------------

/// A single terminal cell: one character with associated style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledCell {
    pub ch: char,
    pub style: CellStyle,
}

impl StyledCell {
    /// Create a new styled cell.
    pub fn new(ch: char, style: CellStyle) -> Self {
        Self { ch, style }
    }

    /// A blank (space) cell with default style.
    pub fn blank() -> Self {
        Self {
            ch: ' ',
            style: CellStyle::default(),
        }
    }

    /// A blank (space) cell with the given style.
    pub fn blank_styled(style: CellStyle) -> Self {
        Self { ch: ' ', style }
    }
}

impl Default for StyledCell {
    fn default() -> Self {
        Self::blank()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_attributes() {
        let style = CellStyle::new().with_fg("red").with_bg("#000000").bold().reversed();
        assert_eq!(style.fg.as_deref(), Some("red"));
        assert_eq!(style.bg.as_deref(), Some("#000000"));
        assert!(style.bold);
        assert!(style.reverse);
        assert!(!style.underline);
    }

    #[test]
    fn blank_cells() {
        assert_eq!(StyledCell::blank().ch, ' ');
        assert_eq!(StyledCell::default(), StyledCell::blank());
        let styled = StyledCell::blank_styled(CellStyle::new().underlined());
        assert!(styled.style.underline);
    }
}
