//! Rendering pipeline: cells, double-buffered compositor, clipped canvas,
//! the tree draw pass, and the terminal backend.

pub mod canvas;
pub mod cell;
pub mod compositor;
pub mod draw;
pub mod driver;

pub use canvas::{Canvas, LineElement};
pub use cell::{CellStyle, StyledCell};
pub use compositor::{CellUpdate, Compositor};
pub use driver::{Backend, Driver};
