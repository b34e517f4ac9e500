//! The flattened focus chain of one widget tree.
//!
//! The chain is a pre-order listing of every widget that can take part in
//! directional focus movement. Entry 0 is the root; every container entry
//! records where its subtree ends so that "the widgets inside this container"
//! is the contiguous range `idx + 1..end`.

use crate::tree::{WidgetId, WidgetTree};

/// One entry of a [`FocusChain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainNode {
    pub widget: WidgetId,
    /// Index of the enclosing container entry (0 for the root itself).
    pub parent: usize,
    /// One past the last entry of this node's subtree.
    pub end: usize,
    /// Whether this entry may receive focus. Containers never do.
    pub focusable: bool,
}

/// Pre-order snapshot of the focusable structure below a root container.
///
/// Built lazily and cached on the root; any structural, visibility or
/// focusability change drops the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusChain {
    nodes: Vec<ChainNode>,
}

impl FocusChain {
    /// Build the chain below `root`.
    ///
    /// Visible containers are descended into and kept if anything inside
    /// them made it into the chain. Leaves are kept when visible and
    /// focusable. Widgets on the current focus path are kept regardless so
    /// the focused widget can always be located.
    pub fn build(tree: &WidgetTree, root: WidgetId) -> Self {
        let mut nodes = vec![ChainNode { widget: root, parent: 0, end: 1, focusable: false }];
        if tree.node(root).is_container() {
            collect(tree, root, 0, true, &mut nodes);
        }
        nodes[0].end = nodes.len();
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether only the root is present.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn root(&self) -> WidgetId {
        self.nodes[0].widget
    }

    pub fn get(&self, idx: usize) -> &ChainNode {
        &self.nodes[idx]
    }

    pub(crate) fn set_focusable(&mut self, idx: usize, focusable: bool) {
        self.nodes[idx].focusable = focusable;
    }

    /// Chain index of `widget`.
    pub fn position(&self, widget: WidgetId) -> Option<usize> {
        self.nodes.iter().position(|n| n.widget == widget)
    }

    /// Indices of the direct chain children of the entry at `idx`.
    pub fn children(&self, idx: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut cur = idx + 1;
        while cur < self.nodes[idx].end {
            out.push(cur);
            cur = self.nodes[cur].end;
        }
        out
    }

    /// The widgets in chain order, root first.
    pub fn widgets(&self) -> impl Iterator<Item = WidgetId> + '_ {
        self.nodes.iter().map(|n| n.widget)
    }

    /// First focusable entry in `range`.
    pub(crate) fn first_focusable(&self, range: std::ops::Range<usize>) -> Option<usize> {
        range.into_iter().find(|&i| self.nodes[i].focusable)
    }

    /// Last focusable entry in `range`.
    pub(crate) fn last_focusable(&self, range: std::ops::Range<usize>) -> Option<usize> {
        range.into_iter().rev().find(|&i| self.nodes[i].focusable)
    }
}

fn collect(tree: &WidgetTree, container: WidgetId, idx: usize, shown: bool, nodes: &mut Vec<ChainNode>) {
    let focus_child = tree.node(container).container().and_then(|c| c.focus_child());
    for &child in tree.children(container) {
        let node = tree.node(child);
        let child_shown = shown && node.is_visible();
        let on_path = focus_child == Some(child);

        if node.is_container() {
            if !child_shown && !on_path {
                continue;
            }
            let at = nodes.len();
            nodes.push(ChainNode { widget: child, parent: idx, end: at + 1, focusable: false });
            collect(tree, child, at, child_shown, nodes);
            if nodes.len() == at + 1 {
                nodes.pop();
            } else {
                nodes[at].end = nodes.len();
            }
        } else if (child_shown && node.can_focus()) || on_path {
            let at = nodes.len();
            nodes.push(ChainNode {
                widget: child,
                parent: idx,
                end: at + 1,
                focusable: child_shown && node.can_focus(),
            });
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
