//! Contexts handed to widget callbacks.

use crate::error::Result;
use crate::event::binding::KeyConfig;
use crate::event::input::KeyEvent;
use crate::event::signal::{Signal, SignalBus};
use crate::geometry::Size;
use crate::render::cell::CellStyle;
use crate::theme::ColorScheme;
use crate::tree::WidgetId;

// ---------------------------------------------------------------------------
// DrawContext
// ---------------------------------------------------------------------------

/// Read-only view of a node's state while it draws.
#[derive(Debug, Clone, Copy)]
pub struct DrawContext<'a> {
    pub id: WidgetId,
    /// Real (computed) size of the widget.
    pub size: Size,
    pub has_focus: bool,
    /// Whether the owning window currently receives input.
    pub input_window: bool,
    /// Whether some widget in the owning window holds focus.
    pub window_has_focus: bool,
    /// Effective colour scheme name (inherited from ancestors).
    pub scheme: Option<&'a str>,
    pub colors: &'a ColorScheme,
}

impl DrawContext<'_> {
    /// Resolve a display attribute for `widget`/`property` in the widget's
    /// effective colour scheme.
    pub fn attributes(&self, widget: &str, property: &str) -> Result<CellStyle> {
        self.colors.attributes(self.scheme, widget, property)
    }
}

// ---------------------------------------------------------------------------
// KeyContext
// ---------------------------------------------------------------------------

/// What a widget may do while handling a key.
pub struct KeyContext<'a> {
    id: WidgetId,
    keys: &'a KeyConfig,
    signals: &'a mut SignalBus,
    redraw: bool,
}

impl<'a> KeyContext<'a> {
    pub(crate) fn new(id: WidgetId, keys: &'a KeyConfig, signals: &'a mut SignalBus) -> Self {
        Self { id, keys, signals, redraw: false }
    }

    /// The widget handling the key.
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// Look up the action bound to `key` in `context`.
    pub fn action(&self, context: &str, key: &KeyEvent) -> Option<&'a str> {
        self.keys.resolve(context, key)
    }

    /// Emit a signal from the handling widget.
    pub fn emit(&mut self, signal: Signal) {
        self.signals.emit(self.id, signal);
    }

    /// Ask for the widget's window to be repainted.
    pub fn request_redraw(&mut self) {
        self.redraw = true;
    }

    pub(crate) fn redraw_requested(&self) -> bool {
        self.redraw
    }
}
