//! The widget arena: creation, structure edits, properties, signals.
//!
//! All windows and widgets live in one `SlotMap`. Parent links are plain
//! `WidgetId`s; a container's children are an ordered `Vec<WidgetId>`.
//! Layout and focus algorithms are implemented as further `impl WidgetTree`
//! blocks in [`crate::layout`] and [`crate::focus`].

use slotmap::SlotMap;

use super::node::{FocusCycle, Node, WidgetId};
use crate::event::binding::KeyConfig;
use crate::event::input::KeyEvent;
use crate::event::signal::{Delivery, Signal, SignalBus, SignalKind, SubscriptionId};
use crate::focus::FocusDirection;
use crate::geometry::{Extent, Point, Rect, Size};
use crate::widget::{KeyContext, Widget};

/// Arena holding every window and widget.
pub struct WidgetTree {
    pub(crate) nodes: SlotMap<WidgetId, Node>,
    pub(crate) signals: SignalBus,
    /// The window currently receiving input.
    pub(crate) input_root: Option<WidgetId>,
    pub(crate) screen: Size,
}

impl WidgetTree {
    /// Create an empty tree for a screen of the given size.
    pub fn new(screen: Size) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            signals: SignalBus::new(),
            input_root: None,
            screen,
        }
    }

    // -----------------------------------------------------------------------
    // Creation
    // -----------------------------------------------------------------------

    /// Create a detached widget with auto-sized requested geometry.
    pub fn create(&mut self, widget: impl Widget + 'static) -> WidgetId {
        self.create_sized(widget, Extent::Auto, Extent::Auto)
    }

    /// Create a detached widget with the given requested size.
    pub fn create_sized(
        &mut self,
        widget: impl Widget + 'static,
        width: impl Into<Extent>,
        height: impl Into<Extent>,
    ) -> WidgetId {
        let node = Node::new(Box::new(widget), width.into(), height.into());
        self.nodes.insert(node)
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get(&self, id: WidgetId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Node state of `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not in the tree.
    pub fn node(&self, id: WidgetId) -> &Node {
        &self.nodes[id]
    }

    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.nodes[id].parent
    }

    /// Children of a container; empty for leaves.
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.nodes[id]
            .container
            .as_ref()
            .map_or(&[], |c| c.children.as_slice())
    }

    /// The top-most ancestor of `id` (itself if it has no parent).
    pub fn root_of(&self, id: WidgetId) -> WidgetId {
        let mut cur = id;
        while let Some(p) = self.nodes[cur].parent {
            cur = p;
        }
        cur
    }

    /// Number of live widgets, windows included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn screen_size(&self) -> Size {
        self.screen
    }

    pub fn input_root(&self) -> Option<WidgetId> {
        self.input_root
    }

    /// Typed access to a widget's behaviour object.
    pub fn widget<T: Widget + 'static>(&self, id: WidgetId) -> Option<&T> {
        self.nodes
            .get(id)?
            .widget
            .as_ref()?
            .as_any()
            .downcast_ref::<T>()
    }

    /// Mutate a widget's behaviour object.
    ///
    /// The natural size is re-read afterwards; if it changed the parent
    /// recomputes the widget's area. A redraw is always requested.
    pub fn update_widget<T: Widget + 'static, R>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut T) -> R,
    ) -> Option<R> {
        let node = self.nodes.get_mut(id)?;
        let widget = node.widget.as_mut()?;
        let typed = widget.as_any_mut().downcast_mut::<T>()?;
        let result = f(typed);

        let wish = widget.wish_size();
        if wish != node.wish {
            node.wish = wish;
            self.update_area_of(id);
        }
        self.redraw(id);
        Some(result)
    }

    pub(crate) fn container(&self, id: WidgetId) -> &super::ContainerState {
        match self.nodes[id].container.as_ref() {
            Some(c) => c,
            None => panic!("widget {id:?} is not a container"),
        }
    }

    pub(crate) fn container_mut(&mut self, id: WidgetId) -> &mut super::ContainerState {
        match self.nodes[id].container.as_mut() {
            Some(c) => c,
            None => panic!("widget {id:?} is not a container"),
        }
    }

    // -----------------------------------------------------------------------
    // Structure
    // -----------------------------------------------------------------------

    /// Insert `child` into `parent` at index `pos`, placed at (x, y).
    ///
    /// The child's area is computed immediately. If nothing in the tree holds
    /// focus yet, the new subtree may claim it.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is out of range, if `parent` is not a container, or if
    /// `child` is already attached or is a window.
    pub fn insert_widget(&mut self, parent: WidgetId, pos: usize, child: WidgetId, x: i32, y: i32) {
        let len = self.container(parent).children.len();
        assert!(pos <= len, "insert position {pos} out of range 0..={len}");
        assert!(parent != child, "cannot insert a widget into itself");
        {
            let node = &mut self.nodes[child];
            assert!(node.parent.is_none(), "widget {child:?} already has a parent");
            assert!(node.window.is_none(), "windows cannot be inserted into containers");
            node.parent = Some(parent);
            node.position = Some(Point::new(x, y));
            if let Some(c) = node.container.as_mut() {
                // The new root caches the chain from now on.
                c.focus_chain = None;
            }
        }
        self.container_mut(parent).children.insert(pos, child);
        self.invalidate_focus_chain(parent);
        self.update_child_area(child);

        let root = self.root_of(parent);
        if self.focus_widget(root).is_none() {
            self.grab_focus(child);
        }
        self.redraw(child);
    }

    /// Append `child` to `parent`, placed at (x, y).
    pub fn add_widget(&mut self, parent: WidgetId, child: WidgetId, x: i32, y: i32) {
        let pos = self.container(parent).children.len();
        self.insert_widget(parent, pos, child, x, y);
    }

    /// Remove and destroy a direct child of `parent`.
    ///
    /// If the child's subtree holds focus, it is hidden first so focus moves
    /// to a sibling where possible; any remaining focus references along the
    /// chain are then released.
    ///
    /// # Panics
    ///
    /// Panics if `child` is not a child of `parent`.
    pub fn remove_widget(&mut self, parent: WidgetId, child: WidgetId) {
        assert_eq!(
            self.nodes[child].parent,
            Some(parent),
            "widget {child:?} is not a child of {parent:?}"
        );

        if self.container(parent).focus_child == Some(child) {
            self.set_visibility(child, false);
        }
        if self.container(parent).focus_child == Some(child) {
            self.clean_focus(child);
            self.release_focus_path(child);
        }

        self.container_mut(parent).children.retain(|&c| c != child);
        self.nodes[child].parent = None;
        self.invalidate_focus_chain(parent);
        self.destroy_subtree(child);
        self.redraw(parent);
    }

    /// Destroy a detached widget, or remove it from its parent.
    pub fn destroy(&mut self, id: WidgetId) {
        match self.nodes[id].parent {
            Some(parent) => self.remove_widget(parent, id),
            None => {
                self.clean_focus(id);
                if self.input_root == Some(id) {
                    self.input_root = None;
                }
                self.destroy_subtree(id);
            }
        }
    }

    /// Remove every child of `container`.
    pub fn clear(&mut self, container: WidgetId) {
        while let Some(&first) = self.container(container).children.first() {
            self.remove_widget(container, first);
        }
    }

    /// Move `widget` just before `anchor` among their parent's children.
    pub fn move_widget_before(&mut self, widget: WidgetId, anchor: WidgetId) {
        self.move_widget(widget, anchor, false);
    }

    /// Move `widget` just after `anchor` among their parent's children.
    pub fn move_widget_after(&mut self, widget: WidgetId, anchor: WidgetId) {
        self.move_widget(widget, anchor, true);
    }

    fn move_widget(&mut self, widget: WidgetId, anchor: WidgetId, after: bool) {
        let parent = match self.nodes[widget].parent {
            Some(p) => p,
            None => panic!("widget {widget:?} has no parent"),
        };
        assert_eq!(
            self.nodes[anchor].parent,
            Some(parent),
            "widget {anchor:?} is not a sibling of {widget:?}"
        );
        if widget == anchor {
            return;
        }

        let children = &mut self.container_mut(parent).children;
        children.retain(|&c| c != widget);
        let mut at = children
            .iter()
            .position(|&c| c == anchor)
            .unwrap_or(children.len());
        if after {
            at += 1;
        }
        children.insert(at, widget);

        self.invalidate_focus_chain(parent);
        self.redraw(parent);
    }

    /// Clear the `focus_child` links that lead to `id`, bottom-up.
    fn release_focus_path(&mut self, id: WidgetId) {
        let mut on_path = id;
        let mut cur = self.nodes[id].parent;
        while let Some(c) = cur {
            let state = self.container_mut(c);
            if state.focus_child != Some(on_path) {
                break;
            }
            state.focus_child = None;
            on_path = c;
            cur = self.nodes[c].parent;
        }
    }

    /// Emit `Destroyed` for every node of the subtree (pre-order), then free it.
    fn destroy_subtree(&mut self, id: WidgetId) {
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            order.push(cur);
            stack.extend(self.children(cur).iter().rev().copied());
        }
        for &cur in &order {
            self.signals.emit(cur, Signal::Destroyed);
            self.signals.forget_source(cur);
        }
        for cur in order {
            self.nodes.remove(cur);
        }
    }

    // -----------------------------------------------------------------------
    // Properties
    // -----------------------------------------------------------------------

    /// Change the requested position and size.
    pub fn move_resize(&mut self, id: WidgetId, x: i32, y: i32, width: Extent, height: Extent) {
        let old = self.real_rect(id);
        {
            let node = &mut self.nodes[id];
            node.position = Some(Point::new(x, y));
            node.width = width;
            node.height = height;
        }
        self.geometry_changed(id, old);
    }

    /// Change the requested position.
    pub fn set_position(&mut self, id: WidgetId, x: i32, y: i32) {
        let (width, height) = self.nodes[id].requested_size();
        self.move_resize(id, x, y, width, height);
    }

    /// Mark the widget as not yet placed; it gets zero size.
    pub fn unset_position(&mut self, id: WidgetId) {
        let old = self.real_rect(id);
        self.nodes[id].position = None;
        self.geometry_changed(id, old);
    }

    /// Change the requested size.
    pub fn set_size(&mut self, id: WidgetId, width: impl Into<Extent>, height: impl Into<Extent>) {
        let old = self.real_rect(id);
        {
            let node = &mut self.nodes[id];
            node.width = width.into();
            node.height = height.into();
        }
        self.geometry_changed(id, old);
    }

    fn real_rect(&self, id: WidgetId) -> Rect {
        let node = &self.nodes[id];
        Rect::from_parts(node.position.unwrap_or(Point::ZERO), node.real_size)
    }

    fn geometry_changed(&mut self, id: WidgetId, old: Rect) {
        self.update_area_of(id);
        let new = self.real_rect(id);
        self.signals.emit(id, Signal::MoveResize { old, new });
        if let Some(parent) = self.nodes[id].parent {
            // Overlapping siblings may need repainting.
            self.redraw(parent);
        } else {
            self.redraw(id);
        }
    }

    /// Show or hide a widget.
    ///
    /// Becoming visible in a tree without focus lets the root find a focus
    /// holder; hiding the focus holder (or one of its ancestors) moves focus
    /// elsewhere. Inside a hidden window the focus path is left alone until
    /// the window is shown again.
    pub fn set_visibility(&mut self, id: WidgetId, visible: bool) {
        let node = &mut self.nodes[id];
        if node.visible == visible {
            return;
        }
        node.visible = visible;

        if node.parent.is_some() || node.window.is_some() {
            self.invalidate_focus_chain(id);
            let root = self.root_of(id);
            if self.nodes[root].visible {
                match self.focus_widget(root) {
                    None if visible => self.move_focus(root, FocusDirection::Down),
                    Some(focused) if !self.is_visible_recursive(focused) => {
                        self.move_focus(root, FocusDirection::Down)
                    }
                    _ => {}
                }
            }
        }

        self.signals.emit(id, Signal::Visible(visible));
        self.redraw(id);
    }

    /// Allow or forbid the widget to take focus.
    pub fn set_can_focus(&mut self, id: WidgetId, can_focus: bool) {
        let node = &mut self.nodes[id];
        if node.can_focus == can_focus {
            return;
        }
        node.can_focus = can_focus;
        if node.parent.is_none() {
            return;
        }

        self.invalidate_focus_chain(id);
        let root = self.root_of(id);
        let focused = self.focus_widget(root);
        let repair = if can_focus {
            focused.is_none() && self.is_visible_recursive(id)
        } else {
            focused == Some(id)
        };
        if repair {
            self.move_focus(root, FocusDirection::Down);
        }
    }

    /// Set the border thickness of a container.
    pub fn set_border(&mut self, id: WidgetId, border: i32) {
        self.container_mut(id).border = border.max(0);
        self.update_area(id);
        self.redraw(id);
    }

    pub fn set_focus_cycle(&mut self, id: WidgetId, cycle: FocusCycle) {
        self.container_mut(id).focus_cycle = cycle;
    }

    /// Allow PageUp/PageDown focus movement inside a container.
    pub fn set_page_focus(&mut self, id: WidgetId, page_focus: bool) {
        self.container_mut(id).page_focus = page_focus;
    }

    /// Name the colour scheme used by the widget and its descendants.
    pub fn set_color_scheme(&mut self, id: WidgetId, scheme: Option<&str>) {
        self.nodes[id].color_scheme = scheme.map(str::to_owned);
        self.redraw(id);
    }

    /// The colour scheme in effect for `id`, inherited from ancestors.
    pub fn effective_color_scheme(&self, id: WidgetId) -> Option<&str> {
        let mut cur = Some(id);
        while let Some(c) = cur {
            let node = &self.nodes[c];
            if let Some(scheme) = node.color_scheme.as_deref() {
                return Some(scheme);
            }
            cur = node.parent;
        }
        None
    }

    pub(crate) fn set_input_root(&mut self, window: Option<WidgetId>) {
        self.input_root = window;
    }

    pub(crate) fn set_screen(&mut self, size: Size) {
        self.screen = size;
    }

    // -----------------------------------------------------------------------
    // Signals
    // -----------------------------------------------------------------------

    /// Ask for the window holding `id` to be repainted.
    ///
    /// Widgets outside any window have nothing to repaint.
    pub fn redraw(&mut self, id: WidgetId) {
        let root = self.root_of(id);
        if self.nodes[root].window.is_some() {
            self.signals.emit(root, Signal::Redraw);
        }
    }

    /// Listen for `kind` signals emitted by `source`.
    pub fn subscribe(&mut self, source: WidgetId, kind: SignalKind) -> SubscriptionId {
        self.signals.subscribe(source, kind)
    }

    pub fn unsubscribe(&mut self, subscription: SubscriptionId) -> bool {
        self.signals.unsubscribe(subscription)
    }

    /// Take every queued signal delivery.
    pub fn take_signals(&mut self) -> Vec<Delivery> {
        self.signals.drain()
    }

    /// Emit a signal on behalf of a widget.
    pub fn emit(&mut self, source: WidgetId, signal: Signal) {
        self.signals.emit(source, signal);
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    /// Offer `key` to the behaviour object of `id`.
    pub(crate) fn handle_key(&mut self, id: WidgetId, key: &KeyEvent, keys: &KeyConfig) -> bool {
        let Some(mut widget) = self.nodes[id].widget.take() else {
            return false;
        };
        let (handled, redraw) = {
            let mut ctx = KeyContext::new(id, keys, &mut self.signals);
            let handled = widget.handle_key(key, &mut ctx);
            (handled, ctx.redraw_requested())
        };
        self.nodes[id].widget = Some(widget);
        if redraw {
            self.redraw(id);
        }
        handled
    }
}

impl std::fmt::Debug for WidgetTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetTree")
            .field("nodes", &self.nodes.len())
            .field("input_root", &self.input_root)
            .field("screen", &self.screen)
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::signal::SignalKind;
    use crate::testing::fixtures::{shown_window, TreeFixture};
    use crate::widgets::{Button, Container, Label};

    // ── Insert ───────────────────────────────────────────────────────

    #[test]
    fn insert_preserves_sibling_order() {
        let mut tree = WidgetTree::new(Size::new(80, 24));
        let parent = tree.create(Container::new());
        let a = tree.create(Label::new("a"));
        let b = tree.create(Label::new("b"));
        let c = tree.create(Label::new("c"));
        tree.add_widget(parent, a, 0, 0);
        tree.add_widget(parent, c, 0, 2);
        tree.insert_widget(parent, 1, b, 0, 1);
        assert_eq!(tree.children(parent), &[a, b, c]);
        assert_eq!(tree.parent(b), Some(parent));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn insert_past_end_panics() {
        let mut tree = WidgetTree::new(Size::new(80, 24));
        let parent = tree.create(Container::new());
        let a = tree.create(Label::new("a"));
        tree.insert_widget(parent, 1, a, 0, 0);
    }

    #[test]
    #[should_panic(expected = "already has a parent")]
    fn insert_attached_widget_panics() {
        let mut tree = WidgetTree::new(Size::new(80, 24));
        let p1 = tree.create(Container::new());
        let p2 = tree.create(Container::new());
        let a = tree.create(Label::new("a"));
        tree.add_widget(p1, a, 0, 0);
        tree.add_widget(p2, a, 0, 0);
    }

    #[test]
    fn insert_into_window_claims_focus() {
        let mut fx = TreeFixture::new();
        let b = fx.tree.create_sized(Button::new("OK"), 4, 1);
        fx.tree.add_widget(fx.window, b, 1, 1);
        assert!(fx.tree.node(b).has_focus());
        assert_eq!(fx.tree.focus_widget(fx.window), Some(b));

        let second = fx.tree.create_sized(Button::new("No"), 4, 1);
        fx.tree.add_widget(fx.window, second, 1, 2);
        assert!(!fx.tree.node(second).has_focus());
    }

    // ── Remove / move / clear ────────────────────────────────────────

    #[test]
    fn remove_focused_widget_moves_focus_to_sibling() {
        let mut fx = TreeFixture::new();
        let a = fx.button(fx.window, 0, 0);
        let b = fx.button(fx.window, 0, 1);
        assert!(fx.tree.node(a).has_focus());

        fx.tree.remove_widget(fx.window, a);
        assert!(!fx.tree.contains(a));
        assert!(fx.tree.node(b).has_focus());
        assert_eq!(fx.tree.children(fx.window), &[b]);
    }

    #[test]
    fn remove_last_focusable_clears_focus_path() {
        let mut fx = TreeFixture::new();
        let inner = fx.container(fx.window, 0, 0, 10, 5);
        let a = fx.button(inner, 0, 0);
        assert_eq!(fx.tree.focus_widget(fx.window), Some(a));

        fx.tree.remove_widget(inner, a);
        assert_eq!(fx.tree.focus_widget(fx.window), None);
        assert_eq!(fx.tree.container(inner).focus_child(), None);
    }

    #[test]
    fn remove_emits_destroyed_for_whole_subtree() {
        let mut fx = TreeFixture::new();
        let inner = fx.container(fx.window, 0, 0, 10, 5);
        let leaf = fx.label(inner, 0, 0, "x");
        let s_inner = fx.tree.subscribe(inner, SignalKind::Destroyed);
        let s_leaf = fx.tree.subscribe(leaf, SignalKind::Destroyed);
        fx.tree.take_signals();

        fx.tree.remove_widget(fx.window, inner);
        let destroyed: Vec<_> = fx
            .tree
            .take_signals()
            .into_iter()
            .filter(|d| d.signal == Signal::Destroyed)
            .map(|d| d.subscription)
            .collect();
        assert_eq!(destroyed, vec![s_inner, s_leaf]);
        assert!(!fx.tree.contains(leaf));
        assert!(!fx.tree.signals.is_subscribed(s_leaf));
    }

    #[test]
    fn move_widget_before_and_after() {
        let mut fx = TreeFixture::new();
        let a = fx.label(fx.window, 0, 0, "a");
        let b = fx.label(fx.window, 0, 1, "b");
        let c = fx.label(fx.window, 0, 2, "c");

        fx.tree.move_widget_before(c, a);
        assert_eq!(fx.tree.children(fx.window), &[c, a, b]);
        fx.tree.move_widget_after(c, b);
        assert_eq!(fx.tree.children(fx.window), &[a, b, c]);
        fx.tree.move_widget_after(a, a);
        assert_eq!(fx.tree.children(fx.window), &[a, b, c]);
    }

    #[test]
    fn clear_removes_all_children() {
        let mut fx = TreeFixture::new();
        fx.button(fx.window, 0, 0);
        fx.label(fx.window, 0, 1, "x");
        fx.tree.clear(fx.window);
        assert!(fx.tree.children(fx.window).is_empty());
        assert_eq!(fx.tree.focus_widget(fx.window), None);
    }

    // ── Properties ───────────────────────────────────────────────────

    #[test]
    fn hiding_focused_widget_moves_focus() {
        let mut fx = TreeFixture::new();
        let a = fx.button(fx.window, 0, 0);
        let b = fx.button(fx.window, 0, 1);
        fx.tree.set_visibility(a, false);
        assert!(!fx.tree.node(a).has_focus());
        assert!(fx.tree.node(b).has_focus());
    }

    #[test]
    fn showing_widget_in_unfocused_tree_grabs_focus() {
        let mut fx = TreeFixture::new();
        let a = fx.tree.create_sized(Button::new("a"), 3, 1);
        fx.tree.set_visibility(a, false);
        fx.tree.add_widget(fx.window, a, 0, 0);
        assert_eq!(fx.tree.focus_widget(fx.window), None);

        fx.tree.set_visibility(a, true);
        assert!(fx.tree.node(a).has_focus());
    }

    #[test]
    fn window_populated_while_hidden_gains_focus_when_shown() {
        let mut fx = TreeFixture::new();
        fx.tree.set_visibility(fx.window, false);
        let a = fx.button(fx.window, 0, 0);
        let b = fx.button(fx.window, 0, 1);
        assert_eq!(fx.tree.focus_widget(fx.window), None);

        // Hiding inside a hidden window leaves the focus path alone.
        fx.tree.set_visibility(b, false);
        fx.tree.set_visibility(b, true);
        assert_eq!(fx.tree.focus_widget(fx.window), None);

        fx.tree.set_visibility(fx.window, true);
        assert_eq!(fx.tree.focus_widget(fx.window), Some(a));
        assert!(fx.tree.node(a).has_focus());
    }

    #[test]
    fn disabling_focus_moves_it_away() {
        let mut fx = TreeFixture::new();
        let a = fx.button(fx.window, 0, 0);
        let b = fx.button(fx.window, 0, 1);
        fx.tree.set_can_focus(a, false);
        assert!(fx.tree.node(b).has_focus());
        assert!(!fx.tree.node(a).has_focus());
    }

    #[test]
    fn move_resize_emits_real_rectangles() {
        let mut fx = TreeFixture::new();
        let l = fx.label(fx.window, 0, 0, "abc");
        let sub = fx.tree.subscribe(l, SignalKind::MoveResize);
        fx.tree.set_position(l, 2, 1);
        let deliveries: Vec<_> = fx
            .tree
            .take_signals()
            .into_iter()
            .filter(|d| d.subscription == sub)
            .collect();
        assert_eq!(
            deliveries[0].signal,
            Signal::MoveResize {
                old: Rect::new(0, 0, 3, 1),
                new: Rect::new(2, 1, 3, 1),
            }
        );
    }

    #[test]
    fn color_scheme_is_inherited() {
        let mut fx = TreeFixture::new();
        let inner = fx.container(fx.window, 0, 0, 5, 5);
        let leaf = fx.label(inner, 0, 0, "x");
        fx.tree.set_color_scheme(fx.window, Some("dark"));
        assert_eq!(fx.tree.effective_color_scheme(leaf), Some("dark"));
        fx.tree.set_color_scheme(inner, Some("alert"));
        assert_eq!(fx.tree.effective_color_scheme(leaf), Some("alert"));
    }

    #[test]
    fn update_widget_refreshes_wish_size() {
        let mut fx = TreeFixture::new();
        let l = fx.label(fx.window, 0, 0, "ab");
        assert_eq!(fx.tree.node(l).real_size(), Size::new(2, 1));
        fx.tree.update_widget::<Label, _>(l, |label| label.set_text("abcdef"));
        assert_eq!(fx.tree.node(l).real_size(), Size::new(6, 1));
        assert_eq!(fx.tree.widget::<Label>(l).map(Label::text), Some("abcdef"));
        assert!(fx.tree.update_widget::<Button, _>(l, |_| ()).is_none());
    }

    #[test]
    fn redraw_outside_window_is_silent() {
        let mut tree = WidgetTree::new(Size::new(10, 10));
        let c = tree.create(Container::new());
        tree.subscribe(c, SignalKind::Redraw);
        tree.redraw(c);
        assert!(tree.take_signals().is_empty());

        let (mut tree, win) = shown_window(Size::new(10, 10));
        let sub = tree.subscribe(win, SignalKind::Redraw);
        let l = tree.create(Label::new("x"));
        tree.add_widget(win, l, 0, 0);
        assert!(tree.take_signals().iter().any(|d| d.subscription == sub));
    }
}
