//! Real-size computation for children and windows.
//!
//! A child's real size comes from its requested size (or its natural size
//! when the request is auto), shrunk to the space left between its position
//! and the parent's inner edge. A window's real size is its requested size
//! clamped to the screen area right/below its position.

use crate::geometry::{Extent, Point, Size};
use crate::tree::{WidgetId, WidgetTree};

/// Resolve one dimension of a child.
///
/// `requested` falls back to `wish` when auto; an auto wish takes all of
/// `available`. A larger request is shrunk to `available`.
pub fn resolve_extent(requested: Extent, wish: Extent, available: i32) -> i32 {
    let wanted = match requested {
        Extent::Fixed(n) => Extent::Fixed(n),
        Extent::Auto => wish,
    };
    match wanted {
        Extent::Fixed(n) if n <= available => n,
        _ => available,
    }
}

/// Compute a child's real size inside a parent of `parent_size` with the
/// given `border`. Unplaced children and non-positive results get zero size.
pub fn child_area(
    position: Option<Point>,
    requested: (Extent, Extent),
    wish: (Extent, Extent),
    parent_size: Size,
    border: i32,
) -> Size {
    let Some(pos) = position else {
        return Size::ZERO;
    };
    let max_width = parent_size.width - border;
    let max_height = parent_size.height - border;

    let width = resolve_extent(requested.0, wish.0, max_width - pos.x);
    let height = resolve_extent(requested.1, wish.1, max_height - pos.y);
    if width > 0 && height > 0 {
        Size::new(width, height)
    } else {
        Size::ZERO
    }
}

/// Compute a window's real size on a screen of `screen` cells.
pub fn window_area(position: Point, requested: (Extent, Extent), screen: Size) -> Size {
    let max_width = screen.width - position.x;
    let max_height = screen.height - position.y;
    let clamp = |extent: Extent, max: i32| match extent {
        Extent::Fixed(n) => n.min(max),
        Extent::Auto => max,
    };
    let width = clamp(requested.0, max_width);
    let height = clamp(requested.1, max_height);
    if width > 0 && height > 0 {
        Size::new(width, height)
    } else {
        Size::ZERO
    }
}

impl WidgetTree {
    /// Recompute the real size of `child` from its parent's current area.
    pub fn update_child_area(&mut self, child: WidgetId) {
        let node = &self.nodes[child];
        let Some(parent) = node.parent else {
            return;
        };
        let pnode = &self.nodes[parent];
        let border = pnode.container.as_ref().map_or(0, |c| c.border);
        let size = child_area(
            node.position,
            (node.width, node.height),
            (node.wish.width, node.wish.height),
            pnode.real_size,
            border,
        );
        self.set_real_size(child, size);
    }

    /// Recompute the real size of a window from the screen size.
    pub fn update_window_area(&mut self, window: WidgetId) {
        let node = &self.nodes[window];
        let size = window_area(
            node.position.unwrap_or(Point::ZERO),
            (node.width, node.height),
            self.screen,
        );
        self.set_real_size(window, size);
    }

    /// Recompute the areas of every child of a container.
    pub fn update_area(&mut self, container: WidgetId) {
        let children = self.children(container).to_vec();
        for child in children {
            self.update_child_area(child);
        }
    }

    /// Recompute the area of `id`, whether it is a window or a child.
    pub(crate) fn update_area_of(&mut self, id: WidgetId) {
        let node = &self.nodes[id];
        if node.parent.is_some() {
            self.update_child_area(id);
        } else if node.window.is_some() {
            self.update_window_area(id);
        }
    }

    /// Apply a new real size.
    ///
    /// A container that grows reveals content scrolled off to the left/top,
    /// then recomputes its children.
    pub(crate) fn set_real_size(&mut self, id: WidgetId, size: Size) {
        let node = &mut self.nodes[id];
        let old = node.real_size;
        if old == size {
            return;
        }
        node.real_size = size;

        let is_container = match node.container.as_mut() {
            Some(c) => {
                let grow_x = size.width - old.width;
                if c.scroll.x > 0 && grow_x > 0 {
                    c.scroll.x -= grow_x.min(c.scroll.x);
                }
                let grow_y = size.height - old.height;
                if c.scroll.y > 0 && grow_y > 0 {
                    c.scroll.y -= grow_y.min(c.scroll.y);
                }
                true
            }
            None => false,
        };
        if is_container {
            self.update_area(id);
        }
        self.redraw(id);
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::TreeFixture;
    use crate::widgets::Label;

    // ── Pure computation ─────────────────────────────────────────────

    #[test]
    fn fixed_request_is_clamped_to_remaining_space() {
        // Parent width 10, child at x=8 asking for 5 cells.
        let size = child_area(
            Some(Point::new(8, 0)),
            (Extent::Fixed(5), Extent::Fixed(3)),
            (Extent::Auto, Extent::Auto),
            Size::new(10, 10),
            0,
        );
        assert_eq!(size, Size::new(2, 3));
    }

    #[test]
    fn auto_request_uses_wish_then_fills() {
        assert_eq!(resolve_extent(Extent::Auto, Extent::Fixed(4), 10), 4);
        assert_eq!(resolve_extent(Extent::Auto, Extent::Auto, 10), 10);
        assert_eq!(resolve_extent(Extent::Fixed(12), Extent::Fixed(4), 10), 10);
    }

    #[test]
    fn border_shrinks_available_space() {
        let size = child_area(
            Some(Point::new(1, 1)),
            (Extent::Auto, Extent::Auto),
            (Extent::Auto, Extent::Auto),
            Size::new(10, 5),
            1,
        );
        assert_eq!(size, Size::new(8, 3));
    }

    #[test]
    fn unplaced_or_degenerate_child_gets_zero() {
        let auto = (Extent::Auto, Extent::Auto);
        assert_eq!(child_area(None, auto, auto, Size::new(10, 10), 0), Size::ZERO);
        assert_eq!(
            child_area(Some(Point::new(10, 0)), auto, auto, Size::new(10, 10), 0),
            Size::ZERO
        );
        assert_eq!(
            child_area(Some(Point::new(0, 0)), (Extent::Fixed(0), Extent::Auto), auto, Size::new(10, 10), 0),
            Size::ZERO
        );
    }

    #[test]
    fn window_area_is_clamped_to_screen() {
        let screen = Size::new(80, 24);
        assert_eq!(
            window_area(Point::new(70, 20), (Extent::Fixed(20), Extent::Fixed(2)), screen),
            Size::new(10, 2)
        );
        assert_eq!(
            window_area(Point::new(10, 4), (Extent::Auto, Extent::Auto), screen),
            Size::new(70, 20)
        );
        assert_eq!(
            window_area(Point::new(90, 0), (Extent::Auto, Extent::Auto), screen),
            Size::ZERO
        );
    }

    // ── Tree integration ─────────────────────────────────────────────

    #[test]
    fn growing_container_reveals_scrolled_content() {
        let mut fx = TreeFixture::new();
        let inner = fx.container(fx.window, 0, 0, 5, 5);
        fx.tree.container_mut(inner).scroll = Point::new(3, 1);

        fx.tree.set_size(inner, 7, 10);
        assert_eq!(fx.tree.container(inner).scroll(), Point::new(1, 0));
    }

    #[test]
    fn resizing_parent_reflows_children() {
        let mut fx = TreeFixture::new();
        let inner = fx.container(fx.window, 0, 0, 10, 3);
        let label = fx.tree.create_sized(Label::new("long label"), Extent::Auto, 1);
        fx.tree.add_widget(inner, label, 2, 0);
        assert_eq!(fx.tree.node(label).real_size(), Size::new(8, 1));

        fx.tree.set_size(inner, 20, 3);
        assert_eq!(fx.tree.node(label).real_size(), Size::new(10, 1));
    }

    #[test]
    fn unset_position_collapses_widget() {
        let mut fx = TreeFixture::new();
        let label = fx.label(fx.window, 0, 0, "abc");
        fx.tree.unset_position(label);
        assert_eq!(fx.tree.node(label).real_size(), Size::ZERO);
        assert_eq!(fx.tree.node(label).position(), None);
    }
}
