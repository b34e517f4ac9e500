//! Relative and absolute positions, recursive visibility.
//!
//! Positions are relative to the parent's content area. Walking up the tree,
//! each ancestor contributes its child's position minus its own scroll
//! offset. An unplaced widget anywhere on the path makes the result unknown.

use crate::geometry::Point;
use crate::tree::{WidgetId, WidgetTree};

impl WidgetTree {
    /// Screen position of the top-left cell of `id`.
    ///
    /// Window roots report their own position; a widget outside any window,
    /// or with an unplaced widget on its path, has no absolute position.
    pub fn absolute_position(&self, id: WidgetId) -> Option<Point> {
        let node = &self.nodes[id];
        match node.parent {
            None if node.window.is_some() => node.position,
            None => None,
            Some(parent) => {
                let pos = node.position?;
                let base = self.absolute_position(parent)?;
                Some(base + pos - self.container(parent).scroll)
            }
        }
    }

    /// Position of `id` in the content coordinates of its ancestor
    /// `reference`, accounting for every scroll offset in between.
    ///
    /// If `reference` is not an ancestor the walk stops at the root.
    pub fn relative_position(&self, id: WidgetId, reference: WidgetId) -> Option<Point> {
        let mut acc = Point::ZERO;
        let mut cur = id;
        while cur != reference {
            let node = &self.nodes[cur];
            let Some(parent) = node.parent else {
                break;
            };
            acc = acc + node.position? - self.container(parent).scroll;
            if parent == reference {
                break;
            }
            cur = parent;
        }
        Some(acc)
    }

    /// Whether `id` and every ancestor up to and including its window are
    /// visible.
    ///
    /// A widget not attached to a window is never visible, and neither is a
    /// window root itself: windows are shown through the manager.
    pub fn is_visible_recursive(&self, id: WidgetId) -> bool {
        let node = &self.nodes[id];
        if !node.visible {
            return false;
        }
        let mut cur = node.parent;
        while let Some(p) = cur {
            let pnode = &self.nodes[p];
            if pnode.window.is_some() {
                return pnode.visible;
            }
            if !pnode.visible {
                return false;
            }
            cur = pnode.parent;
        }
        false
    }
}

// ===========================================================================
// Tests
// ===========================================================================
