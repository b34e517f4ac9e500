//! Button widget: a focusable label that can be activated.

use std::any::Any;

use crate::error::Result;
use crate::event::binding::BUTTON;
use crate::event::input::KeyEvent;
use crate::event::signal::Signal;
use crate::geometry::Extents;
use crate::render::canvas::Canvas;
use crate::widget::{DrawContext, KeyContext, Widget};

// ---------------------------------------------------------------------------
// Button
// ---------------------------------------------------------------------------

/// A focusable button.
///
/// The key bound to `activate` in the `button` context emits
/// [`Signal::Activated`]. Subscribe to it through
/// [`WidgetTree::subscribe`](crate::tree::WidgetTree::subscribe).
#[derive(Debug, Clone)]
pub struct Button {
    label: String,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into() }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }
}

impl Widget for Button {
    fn widget_type(&self) -> &str {
        "button"
    }

    fn can_focus(&self) -> bool {
        true
    }

    fn wish_size(&self) -> Extents {
        Extents::fixed(self.label.chars().count() as i32, 1)
    }

    fn draw(&self, canvas: &mut Canvas<'_>, ctx: &DrawContext<'_>) -> Result<()> {
        let property = if ctx.has_focus { "focus" } else { "normal" };
        let style = ctx.attributes("button", property)?;
        canvas.fill(&style);
        canvas.print_clipped(0, 0, ctx.size.width, &self.label, &style);
        Ok(())
    }

    fn handle_key(&mut self, key: &KeyEvent, ctx: &mut KeyContext<'_>) -> bool {
        if ctx.action(BUTTON, key) == Some("activate") {
            ctx.emit(Signal::Activated);
            return true;
        }
        false
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
    use crate::event::binding::KeyConfig;
    use crate::event::input::Key;
    use crate::event::signal::{SignalBus, SignalKind};
    use crate::testing::fixtures::TreeFixture;

    #[test]
    fn enter_emits_activated() {
        let fx = TreeFixture::new();
        let keys = KeyConfig::with_defaults();
        let mut bus = SignalBus::new();
        let sub = bus.subscribe(fx.window, SignalKind::Activated);

        let mut button = Button::new("OK");
        let mut ctx = KeyContext::new(fx.window, &keys, &mut bus);
        assert!(button.handle_key(&KeyEvent::plain(Key::Enter), &mut ctx));
        assert!(!button.handle_key(&KeyEvent::plain(Key::Char('x')), &mut ctx));

        let deliveries = bus.drain();
        assert_eq!(deliveries.len(), 1);
        assert_eq!(deliveries[0].subscription, sub);
        assert_eq!(deliveries[0].signal, Signal::Activated);
    }

    #[test]
    fn label_sets_natural_width() {
        let mut b = Button::new("Cancel");
        assert_eq!(b.wish_size(), Extents::fixed(6, 1));
        b.set_label("No");
        assert_eq!(b.label(), "No");
        assert_eq!(b.wish_size(), Extents::fixed(2, 1));
    }
}
