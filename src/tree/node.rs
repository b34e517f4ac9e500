//! Node types: WidgetId, Node, ContainerState, WindowState.

use slotmap::new_key_type;

use crate::focus::FocusChain;
use crate::geometry::{Extent, Extents, Point, Size};
use crate::widget::{Widget, WidgetKind};

new_key_type! {
    /// Handle to a widget living in a [`WidgetTree`](super::WidgetTree).
    pub struct WidgetId;
}

// ---------------------------------------------------------------------------
// Focus cycle / stacking class
// ---------------------------------------------------------------------------

/// How directional focus movement behaves inside a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FocusCycle {
    /// Stop at the first/last focusable descendant.
    None,
    /// Wrap around inside this container.
    Local,
    /// Defer to an enclosing container; at the root, wrap over the whole window.
    #[default]
    Global,
}

/// A window's priority tier, used for draw order and input precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum StackingClass {
    /// Drawn first, never receives input.
    NonFocusable,
    #[default]
    Normal,
    /// Drawn last; the most recent visible one exclusively receives input.
    Top,
}

// ---------------------------------------------------------------------------
// ContainerState
// ---------------------------------------------------------------------------

/// Per-container state: children, scrolling, border and focus bookkeeping.
#[derive(Debug, Default)]
pub struct ContainerState {
    /// Ordered children; order is draw order and default focus order.
    pub(crate) children: Vec<WidgetId>,
    /// Content coordinate aligned with the container's top-left corner.
    pub(crate) scroll: Point,
    pub(crate) border: i32,
    pub(crate) focus_cycle: FocusCycle,
    pub(crate) page_focus: bool,
    /// The child on the path to the focused widget.
    pub(crate) focus_child: Option<WidgetId>,
    /// Cached chain, only meaningful on a root container.
    pub(crate) focus_chain: Option<FocusChain>,
}

// ---------------------------------------------------------------------------
// WindowState
// ---------------------------------------------------------------------------

/// Extra state carried by window roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowState {
    pub(crate) class: StackingClass,
    pub(crate) closable: bool,
    pub(crate) decorated: bool,
}

impl WindowState {
    pub fn class(&self) -> StackingClass {
        self.class
    }

    pub fn is_closable(&self) -> bool {
        self.closable
    }

    pub fn is_decorated(&self) -> bool {
        self.decorated
    }
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// Tree-level state of one widget.
///
/// Geometry, visibility and focus flags are owned here so that layout and
/// focus algorithms never need to reach into behaviour objects.
pub struct Node {
    pub(crate) parent: Option<WidgetId>,
    /// Requested position; `None` means "not yet placed".
    pub(crate) position: Option<Point>,
    pub(crate) width: Extent,
    pub(crate) height: Extent,
    /// Natural size reported by the behaviour object.
    pub(crate) wish: Extents,
    pub(crate) real_size: Size,
    pub(crate) visible: bool,
    pub(crate) can_focus: bool,
    pub(crate) has_focus: bool,
    pub(crate) color_scheme: Option<String>,
    pub(crate) container: Option<ContainerState>,
    pub(crate) window: Option<WindowState>,
    /// Taken out temporarily while the behaviour runs.
    pub(crate) widget: Option<Box<dyn Widget>>,
}

impl Node {
    pub(crate) fn new(widget: Box<dyn Widget>, width: Extent, height: Extent) -> Self {
        let container = match widget.kind() {
            WidgetKind::Container => Some(ContainerState::default()),
            WidgetKind::Leaf => None,
        };
        Self {
            parent: None,
            position: None,
            width,
            height,
            wish: widget.wish_size(),
            real_size: Size::ZERO,
            visible: true,
            can_focus: widget.can_focus(),
            has_focus: false,
            color_scheme: None,
            container,
            window: None,
            widget: Some(widget),
        }
    }

    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    pub fn position(&self) -> Option<Point> {
        self.position
    }

    pub fn requested_size(&self) -> (Extent, Extent) {
        (self.width, self.height)
    }

    pub fn wish_size(&self) -> Extents {
        self.wish
    }

    pub fn real_size(&self) -> Size {
        self.real_size
    }

    /// The widget's own visibility flag (ancestors not considered).
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn can_focus(&self) -> bool {
        self.can_focus
    }

    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    pub fn is_container(&self) -> bool {
        self.container.is_some()
    }

    pub fn container(&self) -> Option<&ContainerState> {
        self.container.as_ref()
    }

    pub fn window(&self) -> Option<&WindowState> {
        self.window.as_ref()
    }

    pub fn color_scheme(&self) -> Option<&str> {
        self.color_scheme.as_deref()
    }

    pub fn widget(&self) -> Option<&dyn Widget> {
        self.widget.as_deref()
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("type", &self.widget.as_ref().map(|w| w.widget_type().to_owned()))
            .field("parent", &self.parent)
            .field("position", &self.position)
            .field("real_size", &self.real_size)
            .field("visible", &self.visible)
            .field("can_focus", &self.can_focus)
            .field("has_focus", &self.has_focus)
            .finish()
    }
}

impl ContainerState {
    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }

    pub fn scroll(&self) -> Point {
        self.scroll
    }

    pub fn border(&self) -> i32 {
        self.border
    }

    pub fn focus_cycle(&self) -> FocusCycle {
        self.focus_cycle
    }

    pub fn page_focus(&self) -> bool {
        self.page_focus
    }

    pub fn focus_child(&self) -> Option<WidgetId> {
        self.focus_child
    }
}

// ===========================================================================
// Tests
// ===========================================================================
