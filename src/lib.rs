//! # consui
//!
//! A curses-style text console widget toolkit.
//!
//! consui keeps every window and widget in one arena, the [`WidgetTree`].
//! Containers nest and scroll, focus moves along a pruned focus chain in any
//! direction, and windows stack in three classes. A [`CoreManager`] owns the
//! screen: it coalesces redraw and resize requests into one deferred pass,
//! composes visible windows into a double-buffered frame and routes each key
//! from the focused widget outwards.
//!
//! ## Core Systems
//!
//! - **[`tree`]**: slotmap-backed widget arena, containers and windows
//! - **[`layout`]**: child/window areas, positions, scroll-into-view
//! - **[`focus`]**: focus chain, focus path and directional focus movement
//! - **[`render`]**: cells, compositor, clipped canvas, draw pass, crossterm backend
//! - **[`event`]**: keys, raw input decoding, key bindings, typed signals
//! - **[`manager`]**: window registry, coalesced redraw/resize, input routing
//! - **[`app`]**: configuration and the tokio event loop
//! - **[`testing`]**: headless backend and `Pilot`
//!
//! ## Example
//!
//! ```
//! use consui::testing::Pilot;
//! use consui::widgets::Button;
//! use consui::window::WindowOptions;
//!
//! let mut pilot = Pilot::new(20, 4).unwrap();
//! let manager = pilot.manager_mut();
//! let win = manager.add_window(WindowOptions::new().decorated(false));
//! let ok = manager.tree_mut().create(Button::new("OK"));
//! let cancel = manager.tree_mut().create(Button::new("Cancel"));
//! manager.tree_mut().add_widget(win, ok, 0, 0);
//! manager.tree_mut().add_widget(win, cancel, 4, 0);
//!
//! pilot.press("Tab").unwrap();
//! assert_eq!(pilot.manager().tree().focused(), Some(cancel));
//! ```

// Foundation
pub mod error;
pub mod geometry;

// Widget arena
pub mod focus;
pub mod layout;
pub mod tree;

// Widget system
pub mod widget;
pub mod widgets;
pub mod window;

// Events
pub mod event;

// Rendering
pub mod render;
pub mod theme;

// Application
pub mod app;
pub mod manager;
pub mod scheduler;

// Testing
pub mod testing;

pub use app::{App, AppCommand, AppConfig, AppHandle};
pub use error::{Error, Result};
pub use focus::FocusDirection;
pub use manager::{CoreManager, InputProcessor};
pub use tree::{StackingClass, WidgetId, WidgetTree};
pub use widget::{Widget, WidgetKind};
