//! The draw pass: walk a window's subtree and paint it through viewports.
//!
//! Each node paints itself into its own viewport. A container then shifts
//! that viewport by its scroll offset and derives one child viewport per
//! visible child, so clipping composes all the way down. Decorations are
//! painted last, over the children.

use super::canvas::Canvas;
use super::compositor::Compositor;
use crate::error::Result;
use crate::geometry::{Point, Rect, ViewPort};
use crate::theme::ColorScheme;
use crate::tree::{WidgetId, WidgetTree};
use crate::widget::DrawContext;

impl WidgetTree {
    /// Paint `window` and everything inside it onto `surface`.
    pub fn draw_window(&self, window: WidgetId, surface: &mut Compositor, colors: &ColorScheme) -> Result<()> {
        let node = &self.nodes[window];
        let view = ViewPort::at(node.position.unwrap_or(Point::ZERO), node.real_size);
        self.draw_node(window, view, surface, colors)
    }

    /// Paint `id` into `view`; children are reached through the container's
    /// scrolled viewport.
    pub fn draw_node(&self, id: WidgetId, view: ViewPort, surface: &mut Compositor, colors: &ColorScheme) -> Result<()> {
        let node = &self.nodes[id];
        if node.real_size.is_empty() || view.is_empty() {
            return Ok(());
        }
        let Some(widget) = node.widget.as_deref() else {
            return Ok(());
        };

        let root = self.root_of(id);
        let ctx = DrawContext {
            id,
            size: node.real_size,
            has_focus: node.has_focus,
            input_window: self.input_root == Some(root),
            window_has_focus: self.nodes[root]
                .container
                .as_ref()
                .is_some_and(|c| c.focus_child.is_some()),
            scheme: self.effective_color_scheme(id),
            colors,
        };

        widget.draw(&mut Canvas::new(surface, view), &ctx)?;

        if let Some(state) = node.container.as_ref() {
            let mut inner = view;
            inner.scroll(state.scroll.x, state.scroll.y);
            for &child in &state.children {
                let cnode = &self.nodes[child];
                if !cnode.visible {
                    continue;
                }
                let rect = Rect::from_parts(cnode.position.unwrap_or(Point::ZERO), cnode.real_size);
                self.draw_node(child, inner.child_viewport(rect), surface, colors)?;
            }
        }

        widget.draw_overlay(&mut Canvas::new(surface, view), &ctx)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
