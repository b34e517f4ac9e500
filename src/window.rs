//! Windows: top-level containers with a screen position, stacking class and
//! optional frame.
//!
//! A window is a root node of the [`WidgetTree`] carrying [`WindowState`].
//! Its behaviour object, [`WindowFrame`], paints the background and the
//! decoration. Registration, stacking and input routing are the manager's
//! business; see [`CoreManager`](crate::manager::CoreManager).

use std::any::Any;

use crate::error::Result;
use crate::geometry::{Extent, Point};
use crate::render::canvas::Canvas;
use crate::tree::{ContainerState, Node, StackingClass, WidgetId, WidgetTree, WindowState};
use crate::widget::{DrawContext, Widget, WidgetKind};

// ---------------------------------------------------------------------------
// WindowOptions
// ---------------------------------------------------------------------------

/// How a new window looks and behaves.
///
/// # Examples
///
/// ```
/// use consui::window::WindowOptions;
/// use consui::tree::StackingClass;
///
/// let opts = WindowOptions::new()
///     .at(10, 5)
///     .size(40, 12)
///     .title("Buddy list")
///     .class(StackingClass::Top);
/// assert!(opts.is_decorated());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowOptions {
    position: Point,
    width: Extent,
    height: Extent,
    title: Option<String>,
    class: StackingClass,
    decorated: bool,
    closable: bool,
}

impl WindowOptions {
    /// A decorated, closable, normal window filling the screen from (0, 0).
    pub fn new() -> Self {
        Self {
            position: Point::ZERO,
            width: Extent::Auto,
            height: Extent::Auto,
            title: None,
            class: StackingClass::Normal,
            decorated: true,
            closable: true,
        }
    }

    /// Screen position of the top-left corner.
    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.position = Point::new(x, y);
        self
    }

    /// Requested size; `Extent::Auto` fills the rest of the screen.
    pub fn size(mut self, width: impl Into<Extent>, height: impl Into<Extent>) -> Self {
        self.width = width.into();
        self.height = height.into();
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn class(mut self, class: StackingClass) -> Self {
        self.class = class;
        self
    }

    /// Draw a one-cell frame (and the title) around the content.
    pub fn decorated(mut self, decorated: bool) -> Self {
        self.decorated = decorated;
        self
    }

    pub fn closable(mut self, closable: bool) -> Self {
        self.closable = closable;
        self
    }

    pub fn is_decorated(&self) -> bool {
        self.decorated
    }
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// WindowFrame
// ---------------------------------------------------------------------------

/// Behaviour of a window root: background, frame and title.
///
/// When the window receives input but nothing inside it holds focus, the
/// top-right cell is drawn reversed to show which window Esc would close.
#[derive(Debug, Clone, Default)]
pub struct WindowFrame {
    title: Option<String>,
    decorated: bool,
}

impl WindowFrame {
    pub fn new(title: Option<String>, decorated: bool) -> Self {
        Self { title, decorated }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: Option<String>) {
        self.title = title;
    }
}

impl Widget for WindowFrame {
    fn widget_type(&self) -> &str {
        "window"
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::Container
    }

    fn draw(&self, canvas: &mut Canvas<'_>, ctx: &DrawContext<'_>) -> Result<()> {
        canvas.fill(&ctx.attributes("window", "background")?);
        Ok(())
    }

    fn draw_overlay(&self, canvas: &mut Canvas<'_>, ctx: &DrawContext<'_>) -> Result<()> {
        let size = ctx.size;
        if self.decorated {
            canvas.frame(0, 0, size.width, size.height, &ctx.attributes("panel", "line")?);
            if let Some(title) = self.title.as_deref() {
                let style = ctx.attributes("panel", "title")?;
                canvas.print_clipped(2, 0, size.width - 4, title, &style);
            }
        }
        if ctx.input_window && !ctx.window_has_focus {
            canvas.change_at(size.width - 1, 0, 1, |style| style.reverse = true);
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ---------------------------------------------------------------------------
// Tree integration
// ---------------------------------------------------------------------------

impl WidgetTree {
    /// Create a hidden, unregistered window root.
    ///
    /// Most callers want [`CoreManager::create_window`](crate::manager::CoreManager::create_window),
    /// which also registers it.
    pub fn create_window(&mut self, options: WindowOptions) -> WidgetId {
        let frame = WindowFrame::new(options.title, options.decorated);
        let mut node = Node::new(Box::new(frame), options.width, options.height);
        node.position = Some(options.position);
        node.visible = false;
        node.window = Some(WindowState {
            class: options.class,
            closable: options.closable,
            decorated: options.decorated,
        });
        node.container = Some(ContainerState {
            border: i32::from(options.decorated),
            ..ContainerState::default()
        });
        let id = self.nodes.insert(node);
        self.update_window_area(id);
        id
    }

    /// Whether `id` is a window root.
    pub fn is_window(&self, id: WidgetId) -> bool {
        self.nodes[id].window.is_some()
    }

    pub fn set_closable(&mut self, window: WidgetId, closable: bool) {
        if let Some(state) = self.nodes[window].window.as_mut() {
            state.closable = closable;
        }
    }

    /// Change the title shown in the frame of `window`.
    pub fn set_window_title(&mut self, window: WidgetId, title: Option<&str>) {
        self.update_widget::<WindowFrame, _>(window, |frame| {
            frame.set_title(title.map(str::to_owned));
        });
    }
}

// ===========================================================================
// Tests
// ===========================================================================
