//! Snapshot rendering helpers.
//!
//! Convert the compositor's back buffer into plain text suitable for
//! snapshot testing and assertions. Styles are ignored.

use crate::render::compositor::Compositor;

/// One back-buffer row as text, trailing spaces trimmed.
///
/// Rows outside the buffer yield an empty string.
pub fn compositor_row(compositor: &Compositor, y: u16) -> String {
    let row: String = (0..compositor.width())
        .filter_map(|x| compositor.get_cell(x, y))
        .map(|cell| cell.ch)
        .collect();
    row.trim_end().to_owned()
}

/// The whole back buffer as text.
///
/// Each row is right-trimmed and rows are joined with `'\n'`. The final row
/// has no trailing newline, so a screen of `h` rows always yields `h - 1`
/// newlines.
pub fn compositor_to_string(compositor: &Compositor) -> String {
    (0..compositor.height())
        .map(|y| compositor_row(compositor, y))
        .collect::<Vec<_>>()
        .join("\n")
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::cell::{CellStyle, StyledCell};

    #[test]
    fn blank_screen_is_only_newlines() {
        let c = Compositor::new(5, 3);
        assert_eq!(compositor_to_string(&c), "\n\n");
    }

    #[test]
    fn rows_are_right_trimmed() {
        let mut c = Compositor::new(6, 2);
        c.set_cell(1, 1, StyledCell::new('x', CellStyle::new()));
        assert_eq!(compositor_row(&c, 0), "");
        assert_eq!(compositor_row(&c, 1), " x");
        assert_eq!(compositor_row(&c, 9), "");
        assert_eq!(compositor_to_string(&c), "\n x");
    }

    #[test]
    fn zero_height_is_empty() {
        assert_eq!(compositor_to_string(&Compositor::new(4, 0)), "");
    }
}
