//! Scrolling a container so its focused descendant stays in view.

use crate::event::signal::Signal;
use crate::geometry::{Point, Size};
use crate::tree::{WidgetId, WidgetTree};

/// Adjust one scroll coordinate so that `target` falls inside `[scroll,
/// scroll + extent)`. An empty extent resets the scroll to zero.
fn reveal(scroll: &mut i32, target: i32, extent: i32) -> bool {
    let old = *scroll;
    if extent == 0 {
        *scroll = 0;
    } else if target < *scroll {
        *scroll = target;
    } else if target > *scroll + extent - 1 {
        *scroll = target - extent + 1;
    }
    *scroll != old
}

/// Move `scroll` by the minimum amount that makes `point` visible in a view of
/// `size`. Returns whether the scroll changed.
pub fn make_point_visible(scroll: &mut Point, size: Size, point: Point) -> bool {
    let x = reveal(&mut scroll.x, point.x, size.width);
    let y = reveal(&mut scroll.y, point.y, size.height);
    x || y
}

impl WidgetTree {
    /// Scroll `container` to show `point` (in its content coordinates).
    ///
    /// Returns whether the scroll offset changed.
    pub fn make_point_visible(&mut self, container: WidgetId, point: Point) -> bool {
        let size = self.nodes[container].real_size;
        make_point_visible(&mut self.container_mut(container).scroll, size, point)
    }

    /// Scroll `container` to the given offset without any clamping.
    pub fn scroll_to(&mut self, container: WidgetId, scroll: Point) {
        let state = self.container_mut(container);
        if state.scroll == scroll {
            return;
        }
        state.scroll = scroll;
        self.redraw(container);
        self.signals.emit(container, Signal::AbsolutePositionChanged);
    }

    /// Keep the container's focus child in view.
    ///
    /// The bottom-right corner is revealed first, then the top-left, so a
    /// child larger than the view shows its top-left part.
    pub fn update_scroll(&mut self, container: WidgetId) {
        let Some(child) = self.container(container).focus_child else {
            return;
        };
        let node = &self.nodes[child];
        let Some(pos) = node.position else {
            return;
        };
        let size = node.real_size;
        let bottom_right = Point::new(
            pos.x + (size.width - 1).max(0),
            pos.y + (size.height - 1).max(0),
        );

        let mut changed = self.make_point_visible(container, bottom_right);
        changed |= self.make_point_visible(container, pos);
        if changed {
            self.redraw(container);
            self.signals.emit(container, Signal::AbsolutePositionChanged);
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
