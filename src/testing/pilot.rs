//! Pilot: programmatic interaction with a headless CoreManager.
//!
//! The `Pilot` wires a [`CoreManager`] to a [`HeadlessBackend`] and provides
//! methods to simulate user input (key presses, raw terminal bytes, resize),
//! run the deferred redraw/resize work, and read the screen back as text.

use std::rc::Rc;

use crate::error::Result;
use crate::event::binding::KeyConfig;
use crate::event::decode::KeyDecoder;
use crate::event::input::{InputEvent, Key, KeyEvent};
use crate::event::signal::Delivery;
use crate::geometry::Size;
use crate::manager::CoreManager;
use crate::theme::ColorScheme;

use super::backend::HeadlessBackend;
use super::snapshot::compositor_to_string;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless manager driver for testing.
///
/// Input methods only queue work; call [`settle`](Self::settle) to run the
/// coalesced redraw and resize tasks, exactly like one event-loop iteration.
///
/// # Examples
///
/// ```
/// use consui::testing::Pilot;
/// use consui::widgets::Label;
/// use consui::window::WindowOptions;
///
/// let mut pilot = Pilot::new(12, 3).unwrap();
/// let win = pilot.manager_mut().add_window(WindowOptions::new().title("Hi"));
/// let label = pilot.manager_mut().tree_mut().create(Label::new("hello"));
/// pilot.manager_mut().tree_mut().add_widget(win, label, 1, 1);
/// pilot.settle().unwrap();
///
/// assert_eq!(pilot.screen(), "┌─Hi───────┐\n│hello     │\n└──────────┘");
/// ```
pub struct Pilot {
    manager: CoreManager,
    backend: HeadlessBackend,
    decoder: KeyDecoder,
}

impl Pilot {
    /// Create a headless manager with the given screen size and the default
    /// key bindings and colours.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        Self::with_config(
            Size::new(width, height),
            KeyConfig::with_defaults(),
            ColorScheme::with_defaults(),
        )
    }

    /// Create a headless manager with custom bindings and colours.
    pub fn with_config(size: Size, keys: KeyConfig, colors: ColorScheme) -> Result<Self> {
        let backend = HeadlessBackend::new(size);
        let manager = CoreManager::new(Box::new(backend.clone()), Rc::new(keys), Rc::new(colors))?;
        Ok(Self {
            manager,
            backend,
            decoder: KeyDecoder::new(),
        })
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Press a key given as a spec such as `"Tab"`, `"Ctrl-l"` or `"a"`.
    pub fn press(&mut self, spec: &str) -> Result<bool> {
        Ok(self.manager.process_input(&KeyEvent::parse(spec)?))
    }

    /// Press a key with no modifiers.
    pub fn press_key(&mut self, key: Key) -> bool {
        self.manager.process_input(&KeyEvent::plain(key))
    }

    /// Type each character of `text` as an individual key press.
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.press_key(Key::Char(ch));
        }
    }

    /// Feed raw terminal bytes through the key decoder.
    ///
    /// Returns how many of the decoded keys were consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> usize {
        let keys = self.decoder.feed(bytes);
        keys.iter().filter(|key| self.manager.process_input(key)).count()
    }

    /// Change the terminal size and deliver the resize notification.
    pub fn resize_terminal(&mut self, width: i32, height: i32) {
        self.backend.set_size(Size::new(width, height));
        self.manager.process_event(&InputEvent::Resize {
            width: width.clamp(0, i32::from(u16::MAX)) as u16,
            height: height.clamp(0, i32::from(u16::MAX)) as u16,
        });
    }

    // ── Processing ───────────────────────────────────────────────────

    /// Run every pending deferred task.
    pub fn settle(&mut self) -> Result<()> {
        self.manager.run_pending()
    }

    /// Signal deliveries meant for the application.
    pub fn take_signals(&mut self) -> Vec<Delivery> {
        self.manager.take_signals()
    }

    // ── Query ────────────────────────────────────────────────────────

    pub fn manager(&self) -> &CoreManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut CoreManager {
        &mut self.manager
    }

    /// Handle to the backend the manager draws to.
    pub fn backend(&self) -> &HeadlessBackend {
        &self.backend
    }

    /// The last composed frame as text.
    pub fn screen(&self) -> String {
        compositor_to_string(self.manager.compositor())
    }
}

impl std::fmt::Debug for Pilot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pilot")
            .field("manager", &self.manager)
            .field("backend", &self.backend)
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
