//! Focus: the focus path, grabbing and releasing focus, directional movement.
//!
//! Every container remembers which child leads to the focused widget
//! (`focus_child`). Following those links from a window root ends at the
//! focused leaf. At most one leaf in the whole tree has `has_focus` set; it
//! is always the end of its window's focus path.

pub mod chain;
pub mod movement;

pub use chain::{ChainNode, FocusChain};

use crate::event::signal::Signal;
use crate::tree::{WidgetId, WidgetTree};

// ---------------------------------------------------------------------------
// FocusDirection
// ---------------------------------------------------------------------------

/// Direction of a focus move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusDirection {
    Previous,
    Next,
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Begin,
    End,
}

impl FocusDirection {
    /// Map a container key action name ("focus-next", ...) to a direction.
    pub fn from_action(action: &str) -> Option<Self> {
        Some(match action {
            "focus-previous" => Self::Previous,
            "focus-next" => Self::Next,
            "focus-up" => Self::Up,
            "focus-down" => Self::Down,
            "focus-left" => Self::Left,
            "focus-right" => Self::Right,
            "focus-page-up" => Self::PageUp,
            "focus-page-down" => Self::PageDown,
            "focus-begin" => Self::Begin,
            "focus-end" => Self::End,
            _ => return None,
        })
    }

    /// Whether the move walks the chain backwards.
    pub fn is_backward(self) -> bool {
        matches!(self, Self::Previous | Self::Up | Self::Left | Self::PageUp)
    }

    pub fn is_paging(self) -> bool {
        matches!(self, Self::PageUp | Self::PageDown)
    }
}

// ---------------------------------------------------------------------------
// Focus path operations
// ---------------------------------------------------------------------------

impl WidgetTree {
    /// The widget at the end of the focus path starting at `id`.
    ///
    /// A leaf is its own focus widget; a container without a focus child has
    /// none.
    pub fn focus_widget(&self, id: WidgetId) -> Option<WidgetId> {
        let mut cur = id;
        loop {
            match self.nodes[cur].container.as_ref() {
                None => return Some(cur),
                Some(c) => cur = c.focus_child?,
            }
        }
    }

    /// Drop focus from the subtree of `id` and clear the focus links inside it.
    pub fn clean_focus(&mut self, id: WidgetId) {
        match self.nodes[id].container.as_mut() {
            Some(c) => {
                let Some(child) = c.focus_child else {
                    return;
                };
                self.clean_focus(child);
                self.container_mut(id).focus_child = None;
            }
            None => {
                let node = &mut self.nodes[id];
                if node.has_focus {
                    node.has_focus = false;
                    self.signals.emit(id, Signal::Focus(false));
                    self.redraw(id);
                }
            }
        }
    }

    /// Point `container`'s focus link at `child`, and every ancestor's link at
    /// the path leading here.
    ///
    /// Returns whether the window owning this path is the one receiving
    /// input, i.e. whether the focused widget may actually show focus.
    pub fn set_focus_child(&mut self, container: WidgetId, child: WidgetId) -> bool {
        let node = &self.nodes[container];
        if node.window.is_some() {
            self.clean_focus(container);
            self.container_mut(container).focus_child = Some(child);
            self.update_scroll(container);
            return self.input_root == Some(container);
        }

        let Some(parent) = node.parent else {
            return false;
        };
        if !node.visible {
            return false;
        }

        let res = self.set_focus_child(parent, container);
        self.container_mut(container).focus_child = Some(child);
        self.update_scroll(container);
        res
    }

    /// Try to give focus to `id`.
    ///
    /// A container hands the request to its children in order. A leaf takes
    /// focus when it is focusable and visible; the focus path is updated even
    /// when its window does not currently receive input, in which case
    /// `has_focus` stays unset until the window is focused.
    pub fn grab_focus(&mut self, id: WidgetId) -> bool {
        if self.nodes[id].is_container() {
            let children = self.children(id).to_vec();
            return children.into_iter().any(|child| self.grab_focus(child));
        }

        let node = &self.nodes[id];
        let Some(parent) = node.parent else {
            return false;
        };
        if node.has_focus {
            return false;
        }
        if !node.can_focus || !self.is_visible_recursive(id) {
            return false;
        }

        if self.set_focus_child(parent, id) {
            self.nodes[id].has_focus = true;
            self.signals.emit(id, Signal::Focus(true));
            self.redraw(id);
        }
        true
    }

    /// Give focus back to the end of the stored focus path.
    pub fn restore_focus(&mut self, id: WidgetId) -> bool {
        match self.nodes[id].container.as_ref() {
            Some(c) => match c.focus_child {
                Some(child) => self.restore_focus(child),
                None => false,
            },
            None => self.grab_focus(id),
        }
    }

    /// Drop `has_focus` from the end of the focus path, keeping the path so
    /// [`restore_focus`](Self::restore_focus) can bring it back.
    pub fn ungrab_focus(&mut self, id: WidgetId) {
        match self.nodes[id].container.as_ref() {
            Some(c) => {
                if let Some(child) = c.focus_child {
                    self.ungrab_focus(child);
                }
            }
            None => {
                let node = &mut self.nodes[id];
                if node.has_focus {
                    node.has_focus = false;
                    self.signals.emit(id, Signal::Focus(false));
                    self.redraw(id);
                }
            }
        }
    }

    /// Mark the cached focus chain of `id`'s tree as stale.
    pub fn invalidate_focus_chain(&mut self, id: WidgetId) {
        let root = self.root_of(id);
        if let Some(c) = self.nodes[root].container.as_mut() {
            c.focus_chain = None;
        }
    }

    /// The leaf holding focus in the whole tree, if any.
    pub fn focused(&self) -> Option<WidgetId> {
        self.nodes.iter().find(|(_, n)| n.has_focus).map(|(id, _)| id)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
