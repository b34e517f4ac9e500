//! Widget trees shared by unit tests.

use crate::geometry::{Point, Size};
use crate::tree::{WidgetId, WidgetTree};
use crate::widgets::{Button, Container, Label};
use crate::window::WindowOptions;

/// A tree with one shown, undecorated window that receives input.
pub(crate) struct TreeFixture {
    pub tree: WidgetTree,
    pub window: WidgetId,
}

impl TreeFixture {
    /// 80x24 screen, window at the origin.
    pub fn new() -> Self {
        Self::build(Size::new(80, 24), Point::ZERO)
    }

    /// 80x24 screen, window at `origin`.
    pub fn at(origin: Point) -> Self {
        Self::build(Size::new(80, 24), origin)
    }

    /// Window covering a screen of `size`.
    pub fn with_screen(size: Size) -> Self {
        Self::build(size, Point::ZERO)
    }

    fn build(screen: Size, origin: Point) -> Self {
        let mut tree = WidgetTree::new(screen);
        let window = tree.create_window(WindowOptions::new().at(origin.x, origin.y).decorated(false));
        tree.set_visibility(window, true);
        tree.set_input_root(Some(window));
        Self { tree, window }
    }

    /// A 3x1 button.
    pub fn button(&mut self, parent: WidgetId, x: i32, y: i32) -> WidgetId {
        let b = self.tree.create_sized(Button::new("btn"), 3, 1);
        self.tree.add_widget(parent, b, x, y);
        b
    }

    pub fn label(&mut self, parent: WidgetId, x: i32, y: i32, text: &str) -> WidgetId {
        let l = self.tree.create(Label::new(text));
        self.tree.add_widget(parent, l, x, y);
        l
    }

    pub fn container(&mut self, parent: WidgetId, x: i32, y: i32, width: i32, height: i32) -> WidgetId {
        let c = self.tree.create_sized(Container::new(), width, height);
        self.tree.add_widget(parent, c, x, y);
        c
    }
}

/// A bare tree plus a shown input window covering `screen`.
pub(crate) fn shown_window(screen: Size) -> (WidgetTree, WidgetId) {
    let TreeFixture { tree, window } = TreeFixture::with_screen(screen);
    (tree, window)
}
