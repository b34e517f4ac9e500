//! Label widget: one line of static text.

use std::any::Any;

use crate::error::Result;
use crate::geometry::Extents;
use crate::render::canvas::Canvas;
use crate::widget::{DrawContext, Widget};

// ---------------------------------------------------------------------------
// Label
// ---------------------------------------------------------------------------

/// Non-interactive text. Its natural size is the text width by one row.
#[derive(Debug, Clone, Default)]
pub struct Label {
    text: String,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text. Use through
    /// [`WidgetTree::update_widget`](crate::tree::WidgetTree::update_widget)
    /// so the label is re-measured.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl Widget for Label {
    fn widget_type(&self) -> &str {
        "label"
    }

    fn wish_size(&self) -> Extents {
        Extents::fixed(self.text.chars().count() as i32, 1)
    }

    fn draw(&self, canvas: &mut Canvas<'_>, ctx: &DrawContext<'_>) -> Result<()> {
        let style = ctx.attributes("label", "text")?;
        canvas.print_clipped(0, 0, ctx.size.width, &self.text, &style);
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
    fn wish_size_follows_text() {
        let mut label = Label::new("héllo");
        assert_eq!(label.wish_size(), Extents::fixed(5, 1));
        label.set_text("");
        assert_eq!(label.wish_size(), Extents::fixed(0, 1));
        assert_eq!(label.text(), "");
    }

    #[test]
    fn label_is_not_focusable() {
        assert!(!Label::new("x").can_focus());
    }
}
