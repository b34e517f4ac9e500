//! Drawing primitives clipped to a viewport.
//!
//! A [`Canvas`] pairs the compositor's back buffer with the [`ViewPort`] of
//! the widget being drawn. All coordinates are widget-local; anything outside
//! the visible window is silently discarded, so drawing into a zero-sized or
//! fully clipped area is a successful no-op.

use super::cell::{CellStyle, StyledCell};
use super::compositor::Compositor;
use crate::geometry::ViewPort;

// ---------------------------------------------------------------------------
// LineElement
// ---------------------------------------------------------------------------

/// Single-cell line-drawing characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineElement {
    Horizontal,
    Vertical,
    TopLeftCorner,
    TopRightCorner,
    BottomLeftCorner,
    BottomRightCorner,
    TeeLeft,
    TeeRight,
    TeeUp,
    TeeDown,
    Cross,
}

impl LineElement {
    /// The glyph drawn for this element.
    pub const fn glyph(self) -> char {
        match self {
            LineElement::Horizontal => '─',
            LineElement::Vertical => '│',
            LineElement::TopLeftCorner => '┌',
            LineElement::TopRightCorner => '┐',
            LineElement::BottomLeftCorner => '└',
            LineElement::BottomRightCorner => '┘',
            LineElement::TeeLeft => '┤',
            LineElement::TeeRight => '├',
            LineElement::TeeUp => '┴',
            LineElement::TeeDown => '┬',
            LineElement::Cross => '┼',
        }
    }
}

// ---------------------------------------------------------------------------
// Canvas
// ---------------------------------------------------------------------------

/// Back-buffer access restricted to one widget's visible area.
pub struct Canvas<'a> {
    surface: &'a mut Compositor,
    view: ViewPort,
}

impl<'a> Canvas<'a> {
    pub fn new(surface: &'a mut Compositor, view: ViewPort) -> Self {
        Self { surface, view }
    }

    pub fn view(&self) -> ViewPort {
        self.view
    }

    /// Put one character at a widget-local cell.
    pub fn put_char(&mut self, x: i32, y: i32, ch: char, style: &CellStyle) {
        if let Some(p) = self.view.to_screen(x, y) {
            self.surface.set_cell(p.x, p.y, StyledCell::new(ch, style.clone()));
        }
    }

    /// Fill the whole visible area with blanks of `style`.
    pub fn fill(&mut self, style: &CellStyle) {
        let r = self.view.view_rect();
        self.fill_rect(r.x, r.y, r.width, r.height, style);
    }

    /// Fill a widget-local rectangle with blanks of `style`.
    pub fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, style: &CellStyle) {
        for row in y..y + height {
            for col in x..x + width {
                self.put_char(col, row, ' ', style);
            }
        }
    }

    /// Blank the visible area with the default style.
    pub fn erase(&mut self) {
        self.fill(&CellStyle::default());
    }

    /// Print a run of text starting at (x, y). Returns the number of cells
    /// the text occupies, whether visible or not.
    pub fn print(&mut self, x: i32, y: i32, text: &str, style: &CellStyle) -> i32 {
        let mut col = x;
        for ch in text.chars() {
            let ch = if ch.is_control() { ' ' } else { ch };
            self.put_char(col, y, ch, style);
            col += 1;
        }
        col - x
    }

    /// Print at most `width` cells of text.
    pub fn print_clipped(&mut self, x: i32, y: i32, width: i32, text: &str, style: &CellStyle) -> i32 {
        let n = width.max(0) as usize;
        let end = text.char_indices().nth(n).map_or(text.len(), |(i, _)| i);
        self.print(x, y, &text[..end], style)
    }

    /// Draw one line-drawing character.
    pub fn put_line(&mut self, x: i32, y: i32, element: LineElement, style: &CellStyle) {
        self.put_char(x, y, element.glyph(), style);
    }

    /// Modify the attributes of `len` cells starting at (x, y), keeping
    /// their characters.
    pub fn change_at(&mut self, x: i32, y: i32, len: i32, mut f: impl FnMut(&mut CellStyle)) {
        for col in x..x + len {
            if let Some(p) = self.view.to_screen(col, y) {
                if let Some(cell) = self.surface.cell_mut(p.x, p.y) {
                    f(&mut cell.style);
                }
            }
        }
    }

    /// Draw a rectangular frame around a widget-local rectangle.
    pub fn frame(&mut self, x: i32, y: i32, width: i32, height: i32, style: &CellStyle) {
        if width < 2 || height < 2 {
            return;
        }
        let right = x + width - 1;
        let bottom = y + height - 1;
        for col in x + 1..right {
            self.put_line(col, y, LineElement::Horizontal, style);
            self.put_line(col, bottom, LineElement::Horizontal, style);
        }
        for row in y + 1..bottom {
            self.put_line(x, row, LineElement::Vertical, style);
            self.put_line(right, row, LineElement::Vertical, style);
        }
        self.put_line(x, y, LineElement::TopLeftCorner, style);
        self.put_line(right, y, LineElement::TopRightCorner, style);
        self.put_line(x, bottom, LineElement::BottomLeftCorner, style);
        self.put_line(right, bottom, LineElement::BottomRightCorner, style);
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Size};
    use crate::testing::snapshot::compositor_to_string;
    use pretty_assertions::assert_eq;

    fn surface() -> Compositor {
        Compositor::new(8, 3)
    }

    #[test]
    fn print_is_clipped_to_view() {
        let mut c = surface();
        let view = ViewPort::new(2, 1, 1, 0, 3, 1);
        let mut canvas = Canvas::new(&mut c, view);
        let n = canvas.print(0, 0, "abcdef", &CellStyle::default());
        assert_eq!(n, 6);
        // Only columns 1..4 of the text are visible, starting at screen x=2.
        assert_eq!(compositor_to_string(&c), "\n  bcd\n");
    }

    #[test]
    fn empty_view_draws_nothing() {
        let mut c = surface();
        let mut canvas = Canvas::new(&mut c, ViewPort::new(0, 0, 0, 0, 0, 5));
        canvas.fill(&CellStyle::new().reversed());
        canvas.print(0, 0, "x", &CellStyle::default());
        assert!(c.get_cell(0, 0).is_some_and(|cell| cell.ch == ' ' && !cell.style.reverse));
    }

    #[test]
    fn fill_covers_visible_area_only() {
        let mut c = surface();
        let view = ViewPort::at(Point::new(1, 1), Size::new(2, 1));
        Canvas::new(&mut c, view).fill(&CellStyle::new().with_bg("red"));
        assert_eq!(c.get_cell(1, 1).unwrap().style.bg.as_deref(), Some("red"));
        assert_eq!(c.get_cell(2, 1).unwrap().style.bg.as_deref(), Some("red"));
        assert!(c.get_cell(3, 1).unwrap().style.bg.is_none());
        assert!(c.get_cell(1, 0).unwrap().style.bg.is_none());
    }

    #[test]
    fn print_clipped_limits_width() {
        let mut c = surface();
        let mut canvas = Canvas::new(&mut c, ViewPort::at(Point::ZERO, Size::new(8, 1)));
        assert_eq!(canvas.print_clipped(0, 0, 3, "héllo", &CellStyle::default()), 3);
        assert_eq!(compositor_to_string(&c), "hél\n\n");
    }

    #[test]
    fn change_at_keeps_characters() {
        let mut c = surface();
        let mut canvas = Canvas::new(&mut c, ViewPort::at(Point::ZERO, Size::new(8, 3)));
        canvas.print(0, 0, "ab", &CellStyle::default());
        canvas.change_at(1, 0, 1, |s| s.reverse = true);
        assert_eq!(c.get_cell(1, 0).unwrap().ch, 'b');
        assert!(c.get_cell(1, 0).unwrap().style.reverse);
        assert!(!c.get_cell(0, 0).unwrap().style.reverse);
    }

    #[test]
    fn frame_draws_box() {
        let mut c = Compositor::new(4, 3);
        let mut canvas = Canvas::new(&mut c, ViewPort::at(Point::ZERO, Size::new(4, 3)));
        canvas.frame(0, 0, 4, 3, &CellStyle::default());
        assert_eq!(compositor_to_string(&c), "┌──┐\n│  │\n└──┘");
    }
}
