//! Widget system: behaviour trait and callback contexts.

pub mod context;
pub mod traits;

pub use context::{DrawContext, KeyContext};
pub use traits::{Widget, WidgetKind};
