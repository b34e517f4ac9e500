//! CoreManager: window registry, coalesced redraw/resize, input routing.
//!
//! The manager owns the [`WidgetTree`], the screen [`Compositor`] and the
//! output [`Backend`]. Windows are kept in a registry whose order is the
//! z-order; each record holds the window's redraw and resize subscriptions.
//!
//! Redraw and resize are never performed synchronously. A request sets a
//! pending flag and queues one [`Deferred`] task; further requests while the
//! flag is set are no-ops. [`CoreManager::run_pending`] runs the queue after
//! each event, so any number of changes produces one repaint.

use std::rc::Rc;

use tracing::{debug, trace};

use crate::error::Result;
use crate::event::binding::{KeyConfig, CONTAINER, COREMANAGER, WINDOW};
use crate::event::input::{InputEvent, Key, KeyEvent};
use crate::event::signal::{Delivery, Signal, SignalKind, SubscriptionId};
use crate::focus::FocusDirection;
use crate::geometry::{Extent, Size};
use crate::render::compositor::Compositor;
use crate::render::driver::Backend;
use crate::scheduler::{Deferred, Scheduler};
use crate::theme::ColorScheme;
use crate::tree::{StackingClass, WidgetId, WidgetTree};
use crate::window::WindowOptions;

// ---------------------------------------------------------------------------
// InputProcessor
// ---------------------------------------------------------------------------

/// Application-level key handling that runs before any window sees a key.
pub trait InputProcessor {
    /// Return `true` to consume the key.
    fn process_input(&mut self, key: &KeyEvent, manager: &mut CoreManager) -> bool;
}

// ---------------------------------------------------------------------------
// WindowRecord
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct WindowRecord {
    window: WidgetId,
    redraw: SubscriptionId,
    resize: SubscriptionId,
}

// ---------------------------------------------------------------------------
// CoreManager
// ---------------------------------------------------------------------------

/// Owner of the screen, the windows and the redraw/resize scheduling.
pub struct CoreManager {
    tree: WidgetTree,
    /// Registry in z-order, last is topmost.
    windows: Vec<WindowRecord>,
    compositor: Compositor,
    backend: Box<dyn Backend>,
    scheduler: Scheduler,
    redraw_pending: bool,
    resize_pending: bool,
    top_input_processor: Option<Box<dyn InputProcessor>>,
    quit: bool,
    frames: u64,
    resizes: u64,
    /// Deliveries for subscriptions the manager does not own.
    forwarded: Vec<Delivery>,
    keys: Rc<KeyConfig>,
    colors: Rc<ColorScheme>,
}

fn cells(n: i32) -> u16 {
    n.clamp(0, i32::from(u16::MAX)) as u16
}

impl CoreManager {
    /// Create a manager drawing to `backend`.
    ///
    /// The screen size is queried once here; an initial repaint is scheduled.
    pub fn new(backend: Box<dyn Backend>, keys: Rc<KeyConfig>, colors: Rc<ColorScheme>) -> Result<Self> {
        let size = backend.size()?;
        let mut manager = Self {
            tree: WidgetTree::new(size),
            windows: Vec::new(),
            compositor: Compositor::new(cells(size.width), cells(size.height)),
            backend,
            scheduler: Scheduler::new(),
            redraw_pending: false,
            resize_pending: false,
            top_input_processor: None,
            quit: false,
            frames: 0,
            resizes: 0,
            forwarded: Vec::new(),
            keys,
            colors,
        };
        manager.redraw();
        Ok(manager)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    /// Mutable access to the widget tree.
    ///
    /// Changes requesting a repaint are picked up by the next
    /// [`run_pending`](Self::run_pending).
    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.tree
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    pub fn keys(&self) -> &KeyConfig {
        &self.keys
    }

    pub fn colors(&self) -> &ColorScheme {
        &self.colors
    }

    /// Number of frames flipped to the backend.
    pub fn frames_drawn(&self) -> u64 {
        self.frames
    }

    /// Number of coalesced resize passes.
    pub fn resize_count(&self) -> u64 {
        self.resizes
    }

    pub fn is_redraw_pending(&self) -> bool {
        self.redraw_pending
    }

    pub fn is_resize_pending(&self) -> bool {
        self.resize_pending
    }

    /// Registered windows in z-order, bottom first.
    pub fn windows(&self) -> Vec<WidgetId> {
        self.windows.iter().map(|r| r.window).collect()
    }

    // -----------------------------------------------------------------------
    // Scheduling
    // -----------------------------------------------------------------------

    /// Request a repaint of the whole screen.
    pub fn redraw(&mut self) {
        if self.redraw_pending {
            return;
        }
        self.redraw_pending = true;
        self.scheduler.schedule(Deferred::Draw);
        trace!("redraw scheduled");
    }

    /// Note that the terminal changed size; it is re-queried once later.
    pub fn screen_resized(&mut self) {
        if self.resize_pending {
            return;
        }
        self.resize_pending = true;
        self.scheduler.schedule(Deferred::Resize);
        trace!("resize scheduled");
    }

    /// Run every deferred task, including the ones they schedule.
    pub fn run_pending(&mut self) -> Result<()> {
        loop {
            self.pump_signals();
            match self.scheduler.pop() {
                Some(Deferred::Draw) => self.draw()?,
                Some(Deferred::Resize) => self.resize()?,
                None => return Ok(()),
            }
        }
    }

    fn draw(&mut self) -> Result<()> {
        if !self.redraw_pending {
            return Ok(());
        }
        self.redraw_pending = false;

        self.compositor.erase();
        for class in [StackingClass::NonFocusable, StackingClass::Normal, StackingClass::Top] {
            for record in &self.windows {
                let node = self.tree.node(record.window);
                if !node.is_visible() || node.window().map(|w| w.class()) != Some(class) {
                    continue;
                }
                self.tree.draw_window(record.window, &mut self.compositor, &self.colors)?;
            }
        }

        let updates = self.compositor.flip();
        self.backend.apply_updates(&updates)?;
        self.backend.flush()?;
        self.frames += 1;
        trace!(cells = updates.len(), frame = self.frames, "frame drawn");
        Ok(())
    }

    fn resize(&mut self) -> Result<()> {
        self.resize_pending = false;
        let size = self.backend.size()?;
        self.compositor.resize(cells(size.width), cells(size.height));
        self.tree.set_screen(size);
        for record in &self.windows {
            self.tree.emit(record.window, Signal::ScreenResized(size));
        }
        self.resizes += 1;
        debug!(width = size.width, height = size.height, "screen resized");

        self.pump_signals();
        self.redraw();
        Ok(())
    }

    /// Serve the manager's own subscriptions; keep the rest for the
    /// application.
    fn pump_signals(&mut self) {
        loop {
            let deliveries = self.tree.take_signals();
            if deliveries.is_empty() {
                break;
            }
            for delivery in deliveries {
                if self.windows.iter().any(|r| r.redraw == delivery.subscription) {
                    self.redraw();
                } else if let Some(record) = self.windows.iter().find(|r| r.resize == delivery.subscription) {
                    let window = record.window;
                    self.tree.update_window_area(window);
                } else {
                    self.forwarded.push(delivery);
                }
            }
        }
        self.prune_windows();
    }

    /// Drop records of windows destroyed behind the manager's back.
    fn prune_windows(&mut self) {
        let before = self.windows.len();
        let tree = &self.tree;
        self.windows.retain(|r| tree.contains(r.window));
        if self.windows.len() != before {
            debug!(removed = before - self.windows.len(), "pruned destroyed windows");
            self.focus_window();
            self.redraw();
        }
    }

    /// Take every signal delivery meant for the application.
    pub fn take_signals(&mut self) -> Vec<Delivery> {
        self.pump_signals();
        std::mem::take(&mut self.forwarded)
    }

    // -----------------------------------------------------------------------
    // Windows
    // -----------------------------------------------------------------------

    /// Create and register a hidden window.
    pub fn create_window(&mut self, options: WindowOptions) -> WidgetId {
        let window = self.tree.create_window(options);
        let redraw = self.tree.subscribe(window, SignalKind::Redraw);
        let resize = self.tree.subscribe(window, SignalKind::ScreenResized);
        self.windows.push(WindowRecord { window, redraw, resize });
        debug!(?window, "window registered");
        window
    }

    /// Create, register and show a window.
    pub fn add_window(&mut self, options: WindowOptions) -> WidgetId {
        let window = self.create_window(options);
        self.show_window(window);
        window
    }

    /// Make `window` visible and raise it to the top of its class.
    pub fn show_window(&mut self, window: WidgetId) {
        self.tree.set_visibility(window, true);
        self.move_to_top(window);
        self.focus_window();
        self.redraw();
    }

    /// Hide `window`; it stays registered.
    pub fn hide_window(&mut self, window: WidgetId) {
        self.tree.set_visibility(window, false);
        self.focus_window();
        self.redraw();
    }

    /// Raise `window` to the top of the z-order.
    pub fn raise_window(&mut self, window: WidgetId) {
        self.move_to_top(window);
        self.focus_window();
        self.redraw();
    }

    /// Move `window` to a new screen position.
    pub fn move_window(&mut self, window: WidgetId, x: i32, y: i32) {
        self.tree.set_position(window, x, y);
        self.redraw();
    }

    /// Change the requested size of `window`.
    pub fn resize_window(&mut self, window: WidgetId, width: impl Into<Extent>, height: impl Into<Extent>) {
        self.tree.set_size(window, width, height);
        self.redraw();
    }

    /// Close `window` unless it is marked unclosable.
    ///
    /// Returns whether the window was closed.
    pub fn close_window(&mut self, window: WidgetId) -> bool {
        let closable = self
            .tree
            .get(window)
            .and_then(|n| n.window())
            .is_some_and(|w| w.is_closable());
        if !closable {
            return false;
        }
        self.destroy_window(window);
        true
    }

    fn destroy_window(&mut self, window: WidgetId) {
        let Some(at) = self.windows.iter().position(|r| r.window == window) else {
            return;
        };
        let record = self.windows.remove(at);
        self.tree.unsubscribe(record.redraw);
        self.tree.unsubscribe(record.resize);
        self.tree.destroy(window);
        debug!(?window, "window destroyed");
        self.focus_window();
        self.redraw();
    }

    fn move_to_top(&mut self, window: WidgetId) {
        if let Some(at) = self.windows.iter().position(|r| r.window == window) {
            let record = self.windows.remove(at);
            self.windows.push(record);
        }
    }

    /// The window that should receive input: the most recent visible top
    /// window, else the most recent visible normal window.
    pub fn top_window(&self) -> Option<WidgetId> {
        let visible_of = |class: StackingClass| {
            self.windows.iter().rev().map(|r| r.window).find(|&w| {
                let node = self.tree.node(w);
                node.is_visible() && node.window().is_some_and(|s| s.class() == class)
            })
        };
        visible_of(StackingClass::Top).or_else(|| visible_of(StackingClass::Normal))
    }

    /// The window currently receiving input.
    pub fn input_window(&self) -> Option<WidgetId> {
        self.tree.input_root()
    }

    /// Re-evaluate which window receives input and move focus over.
    fn focus_window(&mut self) {
        let target = self.top_window();
        let current = self.tree.input_root();
        if target == current {
            return;
        }
        if let Some(old) = current.filter(|&w| self.tree.contains(w)) {
            self.tree.ungrab_focus(old);
        }
        self.tree.set_input_root(target);
        if let Some(window) = target {
            self.tree.restore_focus(window);
        }
        debug!(?current, ?target, "input window changed");
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    /// Install the processor that sees every key first.
    pub fn set_top_input_processor(&mut self, processor: Option<Box<dyn InputProcessor>>) {
        self.top_input_processor = processor;
    }

    /// Route one key. Returns whether anything consumed it.
    ///
    /// Order: the top input processor, the manager's own bindings, then the
    /// input window from its focused widget upwards. Each widget on the way
    /// gets [`Widget::handle_key`](crate::widget::Widget::handle_key); each
    /// container also tries its focus-movement bindings; the window finally
    /// tries its own bindings.
    pub fn process_input(&mut self, key: &KeyEvent) -> bool {
        let key = key.normalized();
        let handled = self.route_input(&key);
        self.pump_signals();
        handled
    }

    fn route_input(&mut self, key: &KeyEvent) -> bool {
        if let Some(mut processor) = self.top_input_processor.take() {
            let handled = processor.process_input(key, self);
            if self.top_input_processor.is_none() {
                self.top_input_processor = Some(processor);
            }
            if handled {
                return true;
            }
        }

        if self.keys.resolve(COREMANAGER, key) == Some("redraw-screen") {
            self.compositor.force_full_refresh();
            self.redraw();
            return true;
        }

        let Some(window) = self.tree.input_root() else {
            return false;
        };
        let mut cur = self.tree.focus_widget(window).unwrap_or(window);
        loop {
            if self.tree.handle_key(cur, key, &self.keys) {
                return true;
            }
            if self.tree.node(cur).is_container() {
                let direction = self
                    .keys
                    .resolve(CONTAINER, key)
                    .and_then(FocusDirection::from_action);
                if let Some(direction) = direction {
                    self.tree.move_focus(cur, direction);
                    return true;
                }
            }
            match self.tree.parent(cur) {
                Some(parent) if cur != window => cur = parent,
                _ => break,
            }
        }

        if self.keys.resolve(WINDOW, key) == Some("close-window") {
            self.close_window(window);
            return true;
        }
        false
    }

    /// Feed any input event.
    pub fn process_event(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key(key) => self.process_input(key),
            InputEvent::Resize { .. } => {
                self.screen_resized();
                true
            }
            InputEvent::Paste(text) => {
                let mut handled = false;
                for ch in text.chars() {
                    handled |= self.process_input(&KeyEvent::plain(Key::Char(ch)));
                }
                handled
            }
        }
    }

    // -----------------------------------------------------------------------
    // Lifetime
    // -----------------------------------------------------------------------

    /// Ask the main loop to stop after the current event.
    pub fn quit_main_loop(&mut self) {
        self.quit = true;
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Destroy every window, closable or not, and restore the terminal.
    pub fn shutdown(&mut self) -> Result<()> {
        for window in self.windows() {
            self.destroy_window(window);
        }
        self.backend.shutdown()?;
        debug!("manager shut down");
        Ok(())
    }
}

impl std::fmt::Debug for CoreManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreManager")
            .field("tree", &self.tree)
            .field("windows", &self.windows.len())
            .field("screen", &self.tree.screen_size())
            .field("redraw_pending", &self.redraw_pending)
            .field("resize_pending", &self.resize_pending)
            .field("frames", &self.frames)
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
