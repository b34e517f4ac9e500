//! Directional focus movement over the cached [`FocusChain`].
//!
//! The move always works on the tree's root. The focus-cycle setting of the
//! nearest enclosing container that is not `Global` decides the range that is
//! searched: `Local` wraps inside that container, `None` stops at its first
//! or last entry. Without such a container the whole window wraps.

use tracing::trace;

use super::chain::FocusChain;
use super::FocusDirection;
use crate::tree::{FocusCycle, WidgetId, WidgetTree};

impl WidgetTree {
    /// Move focus in `direction` within the tree containing `id`.
    ///
    /// Also repairs focus: if the focused widget became hidden or
    /// unfocusable, focus goes to a neighbour inside the same container if
    /// possible, otherwise to the first candidate after it in the window.
    pub fn move_focus(&mut self, id: WidgetId, direction: FocusDirection) {
        let root = self.root_of(id);
        let Some(state) = self.nodes[root].container.as_mut() else {
            return;
        };
        let mut chain = match state.focus_chain.take() {
            Some(chain) => chain,
            None => FocusChain::build(self, root),
        };

        self.move_focus_in(&mut chain, direction);

        if let Some(state) = self.nodes.get_mut(root).and_then(|n| n.container.as_mut()) {
            state.focus_chain = Some(chain);
        }
    }

    fn move_focus_in(&mut self, chain: &mut FocusChain, direction: FocusDirection) {
        let root = chain.root();

        let mut focused = None;
        let mut start = 1;
        if let Some(widget) = self.focus_widget(root) {
            let idx = match chain.position(widget) {
                Some(idx) => idx,
                None => {
                    // The cache missed a structural change.
                    *chain = FocusChain::build(self, root);
                    match chain.position(widget) {
                        Some(idx) => idx,
                        None => panic!("focused widget {widget:?} is missing from its focus chain"),
                    }
                }
            };

            if self.is_visible_recursive(widget) && self.nodes[widget].can_focus {
                focused = Some((widget, idx));
            } else {
                trace!(?widget, "repairing focus of hidden widget");
                chain.set_focusable(idx, false);
                let parent = chain.get(idx).parent;
                let end = chain.get(parent).end;
                let local = chain
                    .first_focusable(idx + 1..end)
                    .or_else(|| chain.first_focusable(parent + 1..idx));
                if let Some(target) = local {
                    self.grab_focus(chain.get(target).widget);
                    return;
                }
                self.clean_focus(root);
                start = idx;
            }
        }

        let Some((widget, idx)) = focused else {
            let target = chain
                .first_focusable(start..chain.len())
                .or_else(|| chain.first_focusable(1..start));
            if let Some(target) = target {
                self.grab_focus(chain.get(target).widget);
            }
            return;
        };

        // Find the enclosing container that limits the move.
        let mut scope = FocusCycle::Global;
        let mut p = chain.get(idx).parent;
        while p != 0 {
            scope = self.container(chain.get(p).widget).focus_cycle;
            if matches!(scope, FocusCycle::Local | FocusCycle::None) {
                break;
            }
            p = chain.get(p).parent;
        }

        let paging = direction.is_paging();
        let mut max = 0;
        let mut init = 0;
        let mut page_container = root;
        if paging {
            // Skip wrapper containers holding a single container.
            loop {
                let kids = chain.children(p);
                if kids.len() != 1 {
                    break;
                }
                let only = chain.get(kids[0]);
                if only.focusable || !self.nodes[only.widget].is_container() {
                    break;
                }
                p = kids[0];
            }
            page_container = chain.get(p).widget;
            if !self.container(page_container).page_focus {
                return;
            }
            scope = FocusCycle::None;
            max = self.nodes[page_container].real_size.height / 2;
            init = self
                .relative_position(widget, page_container)
                .map_or(0, |pt| pt.y);
        }

        let begin = p + 1;
        let end = chain.get(p).end;

        let target = match direction {
            FocusDirection::Begin => chain.first_focusable(begin..end),
            FocusDirection::End => chain.last_focusable(begin..end),
            _ => {
                let backward = direction.is_backward();
                let mut i = idx;
                let mut found = None;
                // Paging falls back to the last candidate passed.
                let mut passed = None;
                for _ in 0..chain.len() {
                    if scope == FocusCycle::None
                        && ((backward && i == begin) || (!backward && i == end - 1))
                    {
                        break;
                    }

                    if backward {
                        if i == begin {
                            i = end;
                        }
                        i -= 1;
                    } else {
                        i += 1;
                        if i == end {
                            i = begin;
                        }
                    }

                    let entry = chain.get(i);
                    if !entry.focusable {
                        continue;
                    }
                    let far_enough = !paging || {
                        let cur = self
                            .relative_position(entry.widget, page_container)
                            .map_or(init, |pt| pt.y);
                        if backward {
                            init - cur >= max
                        } else {
                            cur - init >= max
                        }
                    };
                    if far_enough {
                        found = Some(i);
                        break;
                    }
                    passed = Some(i);
                }
                found.or(if paging { passed } else { None })
            }
        };

        if let Some(target) = target {
            self.grab_focus(chain.get(target).widget);
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::TreeFixture;

    /// Window holding `a`, a container with `b` and `c`, then `d`.
    fn nested() -> (TreeFixture, [WidgetId; 5]) {
        let mut fx = TreeFixture::new();
        let a = fx.button(fx.window, 0, 0);
        let inner = fx.container(fx.window, 0, 1, 20, 3);
        let b = fx.button(inner, 0, 0);
        let c = fx.button(inner, 0, 1);
        let d = fx.button(fx.window, 0, 5);
        (fx, [a, inner, b, c, d])
    }

    fn focused(fx: &TreeFixture) -> Option<WidgetId> {
        fx.tree.focused()
    }

    // ── Global ───────────────────────────────────────────────────────

    #[test]
    fn next_walks_pre_order_and_wraps() {
        let (mut fx, [a, _, b, c, d]) = nested();
        assert_eq!(focused(&fx), Some(a));
        for expected in [b, c, d, a] {
            fx.tree.move_focus(fx.window, FocusDirection::Next);
            assert_eq!(focused(&fx), Some(expected));
        }
    }

    #[test]
    fn previous_wraps_to_last() {
        let (mut fx, [a, _, _, c, d]) = nested();
        fx.tree.move_focus(a, FocusDirection::Previous);
        assert_eq!(focused(&fx), Some(d));
        fx.tree.move_focus(a, FocusDirection::Up);
        assert_eq!(focused(&fx), Some(c));
    }

    #[test]
    fn next_then_previous_returns() {
        let (mut fx, [_, _, _, c, _]) = nested();
        fx.tree.grab_focus(c);
        fx.tree.move_focus(fx.window, FocusDirection::Right);
        fx.tree.move_focus(fx.window, FocusDirection::Left);
        assert_eq!(focused(&fx), Some(c));
    }

    #[test]
    fn single_candidate_keeps_focus() {
        let mut fx = TreeFixture::new();
        let a = fx.button(fx.window, 0, 0);
        fx.label(fx.window, 0, 1, "x");
        fx.tree.move_focus(fx.window, FocusDirection::Next);
        assert_eq!(focused(&fx), Some(a));
    }

    // ── Local / None ─────────────────────────────────────────────────

    #[test]
    fn local_cycle_wraps_inside_container() {
        let (mut fx, [_, inner, b, c, _]) = nested();
        fx.tree.set_focus_cycle(inner, FocusCycle::Local);
        fx.tree.grab_focus(b);
        fx.tree.move_focus(fx.window, FocusDirection::Next);
        assert_eq!(focused(&fx), Some(c));
        fx.tree.move_focus(fx.window, FocusDirection::Next);
        assert_eq!(focused(&fx), Some(b));
        fx.tree.move_focus(fx.window, FocusDirection::Previous);
        assert_eq!(focused(&fx), Some(c));
    }

    #[test]
    fn none_cycle_stops_at_edges() {
        let (mut fx, [_, inner, b, c, _]) = nested();
        fx.tree.set_focus_cycle(inner, FocusCycle::None);
        fx.tree.grab_focus(c);
        fx.tree.move_focus(fx.window, FocusDirection::Next);
        assert_eq!(focused(&fx), Some(c));
        fx.tree.move_focus(fx.window, FocusDirection::Previous);
        assert_eq!(focused(&fx), Some(b));
        fx.tree.move_focus(fx.window, FocusDirection::Previous);
        assert_eq!(focused(&fx), Some(b));
    }

    #[test]
    fn none_cycle_never_crosses_into_nested_container() {
        let mut fx = TreeFixture::new();
        let group = fx.container(fx.window, 0, 0, 20, 5);
        fx.tree.set_focus_cycle(group, FocusCycle::None);
        let inner = fx.container(group, 0, 0, 20, 2);
        let x = fx.button(inner, 0, 0);
        let y = fx.button(inner, 0, 1);
        let z = fx.button(group, 0, 3);
        assert_eq!(focused(&fx), Some(x));

        fx.tree.move_focus(fx.window, FocusDirection::Previous);
        assert_eq!(focused(&fx), Some(x));
        fx.tree.move_focus(fx.window, FocusDirection::Up);
        assert_eq!(focused(&fx), Some(x));
        assert!(!fx.tree.node(y).has_focus());

        fx.tree.grab_focus(z);
        fx.tree.move_focus(fx.window, FocusDirection::Next);
        assert_eq!(focused(&fx), Some(z));
        fx.tree.move_focus(fx.window, FocusDirection::Previous);
        assert_eq!(focused(&fx), Some(y));
    }

    #[test]
    fn begin_and_end_respect_scope() {
        let (mut fx, [a, inner, b, c, d]) = nested();
        fx.tree.grab_focus(c);
        fx.tree.move_focus(fx.window, FocusDirection::Begin);
        assert_eq!(focused(&fx), Some(a));
        fx.tree.move_focus(fx.window, FocusDirection::End);
        assert_eq!(focused(&fx), Some(d));

        fx.tree.set_focus_cycle(inner, FocusCycle::Local);
        fx.tree.grab_focus(c);
        fx.tree.move_focus(fx.window, FocusDirection::Begin);
        assert_eq!(focused(&fx), Some(b));
    }

    // ── Repair ───────────────────────────────────────────────────────

    #[test]
    fn hidden_focus_prefers_sibling() {
        let (mut fx, [_, _, b, c, _]) = nested();
        fx.tree.grab_focus(c);
        fx.tree.set_visibility(c, false);
        assert_eq!(focused(&fx), Some(b));
        assert_eq!(fx.tree.focus_widget(fx.window), Some(b));
    }

    #[test]
    fn hidden_focus_without_sibling_moves_forward() {
        let mut fx = TreeFixture::new();
        let a = fx.button(fx.window, 0, 0);
        let inner = fx.container(fx.window, 0, 1, 20, 3);
        let b = fx.button(inner, 0, 0);
        let d = fx.button(fx.window, 0, 5);
        fx.tree.grab_focus(b);

        fx.tree.set_visibility(b, false);
        assert_eq!(focused(&fx), Some(d));
        assert!(!fx.tree.node(a).has_focus());
        assert_eq!(fx.tree.container(inner).focus_child(), None);
    }

    #[test]
    fn hiding_the_only_candidate_clears_focus_for_good() {
        let mut fx = TreeFixture::new();
        let only = fx.button(fx.window, 0, 0);
        fx.label(fx.window, 0, 1, "x");
        assert_eq!(focused(&fx), Some(only));

        fx.tree.set_visibility(only, false);
        fx.tree.move_focus(fx.window, FocusDirection::Next);
        assert_eq!(focused(&fx), None);
        assert_eq!(fx.tree.focus_widget(fx.window), None);
        assert!(!fx.tree.node(only).has_focus());
    }

    #[test]
    fn no_focus_takes_first_candidate() {
        let (mut fx, [a, ..]) = nested();
        fx.tree.clean_focus(fx.window);
        assert_eq!(focused(&fx), None);
        fx.tree.move_focus(fx.window, FocusDirection::Previous);
        assert_eq!(focused(&fx), Some(a));
    }

    #[test]
    #[should_panic(expected = "missing from its focus chain")]
    fn focus_path_outside_the_tree_is_fatal() {
        let mut fx = TreeFixture::new();
        fx.button(fx.window, 0, 0);
        let stray = fx.tree.create_sized(crate::widgets::Button::new("x"), 1, 1);
        fx.tree.container_mut(fx.window).focus_child = Some(stray);
        fx.tree.move_focus(fx.window, FocusDirection::Next);
    }

    #[test]
    fn chain_is_cached_until_invalidated() {
        let (mut fx, _) = nested();
        assert!(fx.tree.container(fx.window).focus_chain.is_none());
        fx.tree.move_focus(fx.window, FocusDirection::Next);
        assert!(fx.tree.container(fx.window).focus_chain.is_some());
        fx.button(fx.window, 0, 6);
        assert!(fx.tree.container(fx.window).focus_chain.is_none());
    }

    // ── Paging ───────────────────────────────────────────────────────

    fn paged() -> (TreeFixture, WidgetId, Vec<WidgetId>) {
        let mut fx = TreeFixture::new();
        let list = fx.container(fx.window, 0, 0, 10, 4);
        let rows = (0..6).map(|y| fx.button(list, 0, y)).collect();
        fx.tree.set_page_focus(list, true);
        (fx, list, rows)
    }

    #[test]
    fn page_down_moves_by_half_a_view() {
        let (mut fx, list, rows) = paged();
        fx.tree.move_focus(fx.window, FocusDirection::PageDown);
        assert_eq!(focused(&fx), Some(rows[2]));
        fx.tree.move_focus(fx.window, FocusDirection::PageDown);
        assert_eq!(focused(&fx), Some(rows[4]));
        assert_eq!(fx.tree.container(list).scroll().y, 1);

        // Not enough room for a full page: stop on the last row.
        fx.tree.move_focus(fx.window, FocusDirection::PageDown);
        assert_eq!(focused(&fx), Some(rows[5]));

        fx.tree.move_focus(fx.window, FocusDirection::PageUp);
        assert_eq!(focused(&fx), Some(rows[3]));
    }

    #[test]
    fn page_up_at_top_stays_put() {
        let (mut fx, _, rows) = paged();
        fx.tree.move_focus(fx.window, FocusDirection::PageUp);
        assert_eq!(focused(&fx), Some(rows[0]));
    }

    #[test]
    fn paging_needs_page_focus() {
        let (mut fx, list, rows) = paged();
        fx.tree.set_page_focus(list, false);
        fx.tree.move_focus(fx.window, FocusDirection::PageDown);
        assert_eq!(focused(&fx), Some(rows[0]));
    }
}
