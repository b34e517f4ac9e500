//! Widget trait: kind, natural size, draw, key handling.
//!
//! A `Widget` is the behaviour half of a tree node. Geometry, visibility and
//! focus state live in the [`WidgetTree`](crate::tree::WidgetTree); the
//! behaviour object only answers questions about content and reacts to keys.

use std::any::Any;

use crate::error::Result;
use crate::event::input::KeyEvent;
use crate::geometry::Extents;
use crate::render::canvas::Canvas;

use super::context::{DrawContext, KeyContext};

// ---------------------------------------------------------------------------
// WidgetKind
// ---------------------------------------------------------------------------

/// Structural capability of a widget.
///
/// Containers own children, scroll, and take part in the focus chain only as
/// ancestors of focusable leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Leaf,
    Container,
}

// ---------------------------------------------------------------------------
// Widget trait
// ---------------------------------------------------------------------------

/// Core trait implemented by all widgets.
///
/// Object-safe: the tree stores `Box<dyn Widget>`.
pub trait Widget {
    /// Type name, also used as the colour scheme widget key (e.g. "button").
    fn widget_type(&self) -> &str;

    /// Leaf or container. Defaults to leaf.
    fn kind(&self) -> WidgetKind {
        WidgetKind::Leaf
    }

    /// Whether the widget starts out focusable.
    fn can_focus(&self) -> bool {
        false
    }

    /// Natural content size, used when the requested size is auto.
    fn wish_size(&self) -> Extents {
        Extents::AUTO
    }

    /// Draw the widget's own content. Children of containers are drawn
    /// afterwards by the tree.
    fn draw(&self, _canvas: &mut Canvas<'_>, _ctx: &DrawContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Draw on top of the children (decorations).
    fn draw_overlay(&self, _canvas: &mut Canvas<'_>, _ctx: &DrawContext<'_>) -> Result<()> {
        Ok(())
    }

    /// React to a key. Return `true` if it was consumed.
    fn handle_key(&mut self, _key: &KeyEvent, _ctx: &mut KeyContext<'_>) -> bool {
        false
    }

    /// Downcast to `&dyn Any` for runtime type inspection.
    fn as_any(&self) -> &dyn Any;

    /// Downcast to `&mut dyn Any` for mutable runtime type inspection.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
