//! App struct: configuration, lifecycle and the event loop.
//!
//! [`App`] is the explicit context that replaces process-wide singletons: it
//! builds the key configuration and colour scheme first, then the
//! [`CoreManager`] that borrows them, and tears them down in the reverse
//! order. [`App::run`] drives a single-threaded tokio runtime over
//! crossterm's event stream; [`App::with_backend`] allows testing without a
//! real terminal.

use std::io;
use std::rc::Rc;

use crossterm::event::{Event, EventStream};
use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use crate::error::{Error, Result};
use crate::event::binding::KeyConfig;
use crate::event::input::InputEvent;
use crate::manager::CoreManager;
use crate::render::cell::CellStyle;
use crate::render::driver::{Backend, Driver};
use crate::theme::ColorScheme;

// ---------------------------------------------------------------------------
// AppConfig
// ---------------------------------------------------------------------------

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Whether terminal resize notifications are acted upon.
    pub resizing: bool,
    /// Key binding overrides as (context, action, key spec).
    pub bindings: Vec<(String, String, String)>,
    /// Colour overrides as (scheme, widget, property, attributes).
    pub colors: Vec<(String, String, String, CellStyle)>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            resizing: true,
            bindings: Vec::new(),
            colors: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable resize handling (builder).
    pub fn with_resizing(mut self, resizing: bool) -> Self {
        self.resizing = resizing;
        self
    }

    /// Bind `spec` (e.g. `"Ctrl-w"`) to `action` in `context` (builder).
    pub fn with_binding(
        mut self,
        context: impl Into<String>,
        action: impl Into<String>,
        spec: impl Into<String>,
    ) -> Self {
        self.bindings.push((context.into(), action.into(), spec.into()));
        self
    }

    /// Override one colour scheme entry (builder).
    pub fn with_color(
        mut self,
        scheme: impl Into<String>,
        widget: impl Into<String>,
        property: impl Into<String>,
        style: CellStyle,
    ) -> Self {
        self.colors.push((scheme.into(), widget.into(), property.into(), style));
        self
    }

    /// The key configuration: defaults plus overrides.
    pub fn key_config(&self) -> Result<KeyConfig> {
        let mut keys = KeyConfig::with_defaults();
        for (context, action, spec) in &self.bindings {
            keys.bind_spec(context, action, spec)?;
        }
        Ok(keys)
    }

    /// The colour scheme: defaults plus overrides.
    pub fn color_scheme(&self) -> ColorScheme {
        let mut colors = ColorScheme::with_defaults();
        for (scheme, widget, property, style) in &self.colors {
            colors.set(scheme, widget, property, style.clone());
        }
        colors
    }
}

// ---------------------------------------------------------------------------
// AppHandle
// ---------------------------------------------------------------------------

/// A request from outside the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Repaint the screen.
    Redraw,
    /// Re-query the terminal size.
    Resize,
    /// Leave the event loop.
    Quit,
}

/// Cloneable sender for [`AppCommand`]s.
///
/// Commands are applied on the event-loop thread through the manager's
/// pending-flag and deferred-task path, never directly.
#[derive(Debug, Clone)]
pub struct AppHandle {
    tx: mpsc::UnboundedSender<AppCommand>,
}

impl AppHandle {
    /// Send a command. Returns `false` once the app is gone.
    pub fn send(&self, command: AppCommand) -> bool {
        self.tx.send(command).is_ok()
    }

    pub fn redraw(&self) -> bool {
        self.send(AppCommand::Redraw)
    }

    pub fn resize(&self) -> bool {
        self.send(AppCommand::Resize)
    }

    pub fn quit(&self) -> bool {
        self.send(AppCommand::Quit)
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

enum Step {
    Command(AppCommand),
    Event(Option<io::Result<Event>>),
}

/// The main application struct.
///
/// Field order is teardown order: the manager goes before the key
/// configuration and colour scheme it was built from.
pub struct App {
    manager: CoreManager,
    keys: Rc<KeyConfig>,
    colors: Rc<ColorScheme>,
    config: AppConfig,
    tx: mpsc::UnboundedSender<AppCommand>,
    rx: mpsc::UnboundedReceiver<AppCommand>,
}

impl App {
    /// Create an app on the real terminal.
    ///
    /// Enters the alternate screen and raw mode. Failing to do so is fatal
    /// and reported as [`Error::TerminalInit`].
    pub fn new(config: AppConfig) -> Result<Self> {
        let mut driver = Driver::new().map_err(Error::TerminalInit)?;
        driver.enter_alt_screen().map_err(Error::TerminalInit)?;
        Self::with_backend(config, Box::new(driver))
    }

    /// Create an app drawing to `backend`.
    pub fn with_backend(config: AppConfig, backend: Box<dyn Backend>) -> Result<Self> {
        let keys = Rc::new(config.key_config()?);
        let colors = Rc::new(config.color_scheme());
        let manager = CoreManager::new(backend, Rc::clone(&keys), Rc::clone(&colors))?;
        let (tx, rx) = mpsc::unbounded_channel();
        debug!(bindings = keys.len(), colors = colors.len(), "app initialized");
        Ok(Self {
            manager,
            keys,
            colors,
            config,
            tx,
            rx,
        })
    }

    pub fn manager(&self) -> &CoreManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut CoreManager {
        &mut self.manager
    }

    pub fn keys(&self) -> &KeyConfig {
        &self.keys
    }

    pub fn colors(&self) -> &ColorScheme {
        &self.colors
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// A handle for other tasks to reach the event loop.
    pub fn handle(&self) -> AppHandle {
        AppHandle { tx: self.tx.clone() }
    }

    /// Handle one input event. Returns whether it was consumed.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        if matches!(event, InputEvent::Resize { .. }) && !self.config.resizing {
            return false;
        }
        self.manager.process_event(event)
    }

    /// Apply one command.
    pub fn handle_command(&mut self, command: AppCommand) {
        match command {
            AppCommand::Redraw => self.manager.redraw(),
            AppCommand::Resize => self.manager.screen_resized(),
            AppCommand::Quit => self.manager.quit_main_loop(),
        }
    }

    /// Run the deferred work of one loop iteration.
    ///
    /// A colour that cannot be displayed aborts the frame but not the app.
    pub fn tick(&mut self) -> Result<()> {
        match self.manager.run_pending() {
            Err(err @ Error::InvalidColor { .. }) => {
                warn!(%err, "frame not drawn");
                Ok(())
            }
            other => other,
        }
    }

    /// Drive the app from `events` until quit or the stream ends, then shut
    /// the manager down.
    pub async fn run_events<S>(&mut self, mut events: S) -> Result<()>
    where
        S: Stream<Item = io::Result<Event>> + Unpin,
    {
        let result = self.event_loop(&mut events).await;
        self.manager.shutdown()?;
        result
    }

    async fn event_loop<S>(&mut self, events: &mut S) -> Result<()>
    where
        S: Stream<Item = io::Result<Event>> + Unpin,
    {
        loop {
            self.tick()?;
            if self.manager.should_quit() {
                debug!("main loop quit");
                return Ok(());
            }

            let step = tokio::select! {
                biased;

                Some(command) = self.rx.recv() => Step::Command(command),
                event = events.next() => Step::Event(event),
            };

            match step {
                Step::Command(command) => self.handle_command(command),
                Step::Event(Some(Ok(event))) => {
                    if let Some(event) = InputEvent::from_crossterm(event) {
                        self.handle_event(&event);
                    }
                }
                Step::Event(Some(Err(err))) => {
                    error!(%err, "terminal input lost");
                    return Err(Error::Io(err));
                }
                Step::Event(None) => {
                    debug!("input stream ended");
                    return Ok(());
                }
            }
        }
    }

    /// Run on the terminal until quit, on a single-threaded runtime.
    pub fn run(mut self) -> Result<()> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.run_events(EventStream::new()))
    }
}

// ===========================================================================
// Tests
// ===========================================================================
