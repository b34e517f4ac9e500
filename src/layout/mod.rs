//! Layout: real-size computation, positions, scrolling.
//!
//! Each submodule adds an `impl WidgetTree` block; the free functions hold
//! the arithmetic so it can be tested without a tree.

pub mod area;
pub mod position;
pub mod scroll;

pub use area::{child_area, resolve_extent, window_area};
pub use scroll::make_point_visible;
