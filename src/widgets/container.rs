//! Container widget: a plain, background-filled group of children.

use std::any::Any;

use crate::error::Result;
use crate::render::canvas::Canvas;
use crate::widget::{DrawContext, Widget, WidgetKind};

// ---------------------------------------------------------------------------
// Container
// ---------------------------------------------------------------------------

/// A widget that holds children and paints nothing but its background.
///
/// Children, scrolling and focus are managed by the
/// [`WidgetTree`](crate::tree::WidgetTree); see
/// [`add_widget`](crate::tree::WidgetTree::add_widget).
///
/// # Examples
///
/// ```
/// use consui::geometry::Size;
/// use consui::tree::WidgetTree;
/// use consui::widgets::{Container, Label};
///
/// let mut tree = WidgetTree::new(Size::new(80, 24));
/// let group = tree.create_sized(Container::new(), 20, 5);
/// let label = tree.create(Label::new("Name:"));
/// tree.add_widget(group, label, 0, 0);
/// assert_eq!(tree.children(group), &[label]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Container;

impl Container {
    pub fn new() -> Self {
        Self
    }
}

impl Widget for Container {
    fn widget_type(&self) -> &str {
        "container"
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::Container
    }

    fn draw(&self, canvas: &mut Canvas<'_>, ctx: &DrawContext<'_>) -> Result<()> {
        canvas.fill(&ctx.attributes("container", "background")?);
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_is_a_container() {
        let c = Container::new();
        assert_eq!(c.kind(), WidgetKind::Container);
        assert_eq!(c.widget_type(), "container");
        assert!(!c.can_focus());
    }
}
