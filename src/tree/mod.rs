//! Widget tree: arena, node state, identifiers.

pub mod arena;
pub mod node;

pub use arena::WidgetTree;
pub use node::{ContainerState, FocusCycle, Node, StackingClass, WidgetId, WindowState};
