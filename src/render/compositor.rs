//! Double-buffered screen with atomic flip.
//!
//! The `Compositor` holds two grids of `StyledCell`s. Windows draw into the
//! back buffer; [`Compositor::flip`] compares it with the front buffer (what
//! the terminal currently shows), returns only the `CellUpdate`s needed to
//! transition, and makes the back buffer the new front.

use super::cell::{CellStyle, StyledCell};
use crate::geometry::Size;

// ---------------------------------------------------------------------------
// CellUpdate
// ---------------------------------------------------------------------------

/// A single cell that changed between frames.
///
/// Used by the backend to emit minimal terminal escape sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellUpdate {
    pub x: u16,
    pub y: u16,
    pub cell: StyledCell,
}

// ---------------------------------------------------------------------------
// Compositor
// ---------------------------------------------------------------------------

/// Virtual screen: back buffer for drawing, front buffer for what is shown.
#[derive(Debug, Clone)]
pub struct Compositor {
    /// `back[y][x]` is the cell at column x, row y.
    back: Vec<Vec<StyledCell>>,
    front: Vec<Vec<StyledCell>>,
    width: u16,
    height: u16,
    /// Next flip re-sends every cell.
    full_refresh: bool,
}

impl Compositor {
    /// Create a new compositor with blank buffers of the given dimensions.
    ///
    /// The first flip is a full refresh.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            back: Self::blank_screen(width, height),
            front: Self::blank_screen(width, height),
            width,
            height,
            full_refresh: true,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width as i32, self.height as i32)
    }

    /// Resize both buffers. All cells are reset to blank and the next flip
    /// repaints everything.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.back = Self::blank_screen(width, height);
        self.front = Self::blank_screen(width, height);
        self.full_refresh = true;
    }

    /// Make the next flip re-send every cell regardless of the front buffer.
    pub fn force_full_refresh(&mut self) {
        self.full_refresh = true;
    }

    pub fn needs_full_refresh(&self) -> bool {
        self.full_refresh
    }

    /// Blank the back buffer.
    pub fn erase(&mut self) {
        for row in &mut self.back {
            for cell in row.iter_mut() {
                *cell = StyledCell::blank();
            }
        }
    }

    /// Write one cell of the back buffer. Out-of-screen writes are ignored.
    pub fn set_cell(&mut self, x: i32, y: i32, cell: StyledCell) {
        if let Some(slot) = self.cell_mut(x, y) {
            *slot = cell;
        }
    }

    /// Mutable access to a back buffer cell, `None` outside the screen.
    pub fn cell_mut(&mut self, x: i32, y: i32) -> Option<&mut StyledCell> {
        if x < 0 || y < 0 {
            return None;
        }
        self.back
            .get_mut(y as usize)
            .and_then(|row| row.get_mut(x as usize))
    }

    /// Get a reference to the back buffer cell at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_cell(&self, x: u16, y: u16) -> Option<&StyledCell> {
        self.back
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
    }

    /// The cell the terminal currently shows at (x, y).
    pub fn front_cell(&self, x: u16, y: u16) -> Option<&StyledCell> {
        self.front
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
    }

    /// Fill the entire back buffer with a given style.
    pub fn fill(&mut self, style: CellStyle) {
        for row in &mut self.back {
            for cell in row.iter_mut() {
                *cell = StyledCell::blank_styled(style.clone());
            }
        }
    }

    /// Cells where the back buffer differs from the front buffer.
    ///
    /// After a resize or a forced refresh every cell is reported.
    pub fn diff(&self) -> Vec<CellUpdate> {
        let mut updates = Vec::new();
        for (y, row) in self.back.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if self.full_refresh || *cell != self.front[y][x] {
                    updates.push(CellUpdate {
                        x: x as u16,
                        y: y as u16,
                        cell: cell.clone(),
                    });
                }
            }
        }
        updates
    }

    /// Publish the back buffer: return the updates the terminal needs and
    /// copy the back buffer into the front buffer. The back buffer keeps its
    /// content.
    pub fn flip(&mut self) -> Vec<CellUpdate> {
        let updates = self.diff();
        self.front.clone_from(&self.back);
        self.full_refresh = false;
        updates
    }

    /// Create a blank screen buffer.
    fn blank_screen(width: u16, height: u16) -> Vec<Vec<StyledCell>> {
        (0..height as usize)
            .map(|_| {
                (0..width as usize)
                    .map(|_| StyledCell::blank())
                    .collect()
            })
            .collect()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
