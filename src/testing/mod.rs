//! Headless testing framework: in-memory backend, Pilot, snapshot helpers.
//!
//! Use the [`Pilot`] to drive a [`CoreManager`](crate::manager::CoreManager)
//! without a real terminal. Use [`compositor_to_string`] to capture what a
//! frame looks like as plain text for snapshot-style assertions.

pub mod backend;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod pilot;
pub mod snapshot;

pub use backend::HeadlessBackend;
pub use pilot::Pilot;
pub use snapshot::{compositor_row, compositor_to_string};
