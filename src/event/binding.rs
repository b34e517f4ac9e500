//! Key binding configuration.
//!
//! [`KeyConfig`] maps `(context, action)` pairs to key combinations, e.g.
//! `("container", "focus-next") -> Tab`. Widgets ask which action, if any, a
//! key triggers in a given context. The `with_defaults()` constructor installs
//! the bindings the core toolkit relies on.

use std::collections::HashMap;

use super::input::{Key, KeyEvent, Modifiers};
use crate::error::Result;

/// Context of bindings processed by containers while a key bubbles up.
pub const CONTAINER: &str = "container";
/// Context of bindings processed by a window root.
pub const WINDOW: &str = "window";
/// Context of bindings the manager processes before any window.
pub const COREMANAGER: &str = "coremanager";
/// Context of button bindings.
pub const BUTTON: &str = "button";

// ---------------------------------------------------------------------------
// KeyConfig
// ---------------------------------------------------------------------------

/// Registry of key bindings per context.
///
/// Within one context a key triggers at most one action; binding a key that
/// is already bound replaces the old action. An action may have several keys.
#[derive(Debug, Clone, Default)]
pub struct KeyConfig {
    contexts: HashMap<String, HashMap<KeyEvent, String>>,
}

impl KeyConfig {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the standard bindings.
    ///
    /// - `container`: focus movement on Tab, Shift-Tab, arrows, PageUp,
    ///   PageDown, Home and End
    /// - `window`: Escape closes the window
    /// - `coremanager`: Ctrl-L repaints the whole screen
    /// - `button`: Enter activates
    pub fn with_defaults() -> Self {
        let mut config = Self::new();
        let plain = KeyEvent::plain;

        config.bind(CONTAINER, "focus-previous", plain(Key::BackTab));
        config.bind(CONTAINER, "focus-next", plain(Key::Tab));
        config.bind(CONTAINER, "focus-up", plain(Key::Up));
        config.bind(CONTAINER, "focus-down", plain(Key::Down));
        config.bind(CONTAINER, "focus-left", plain(Key::Left));
        config.bind(CONTAINER, "focus-right", plain(Key::Right));
        config.bind(CONTAINER, "focus-page-up", plain(Key::PageUp));
        config.bind(CONTAINER, "focus-page-down", plain(Key::PageDown));
        config.bind(CONTAINER, "focus-begin", plain(Key::Home));
        config.bind(CONTAINER, "focus-end", plain(Key::End));

        config.bind(WINDOW, "close-window", plain(Key::Escape));

        config.bind(COREMANAGER, "redraw-screen", KeyEvent::ctrl('l'));

        config.bind(BUTTON, "activate", plain(Key::Enter));
        config
    }

    /// Bind `key` to `action` in `context`.
    pub fn bind(&mut self, context: &str, action: &str, key: KeyEvent) {
        self.contexts
            .entry(context.to_owned())
            .or_default()
            .insert(key.normalized(), action.to_owned());
    }

    /// Bind a textual key specification such as `"Ctrl-x"`.
    pub fn bind_spec(&mut self, context: &str, action: &str, spec: &str) -> Result<()> {
        let key = KeyEvent::parse(spec)?;
        self.bind(context, action, key);
        Ok(())
    }

    /// Remove the binding of `key` in `context`, returning its action.
    pub fn unbind(&mut self, context: &str, key: KeyEvent) -> Option<String> {
        self.contexts
            .get_mut(context)
            .and_then(|keys| keys.remove(&key.normalized()))
    }

    /// Remove every key bound to `action` in `context`.
    pub fn unbind_action(&mut self, context: &str, action: &str) {
        if let Some(keys) = self.contexts.get_mut(context) {
            keys.retain(|_, bound| bound != action);
        }
    }

    /// The action `key` triggers in `context`, if any.
    pub fn resolve(&self, context: &str, key: &KeyEvent) -> Option<&str> {
        self.contexts
            .get(context)
            .and_then(|keys| keys.get(&key.normalized()))
            .map(String::as_str)
    }

    /// All keys bound to `action` in `context`, in display form, sorted.
    pub fn keys_for(&self, context: &str, action: &str) -> Vec<String> {
        let mut keys: Vec<String> = self
            .contexts
            .get(context)
            .into_iter()
            .flatten()
            .filter(|(_, bound)| bound.as_str() == action)
            .map(|(key, _)| key.to_string())
            .collect();
        keys.sort();
        keys
    }

    /// Total number of bindings across all contexts.
    pub fn len(&self) -> usize {
        self.contexts.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Whether `key` is a plain printable character without Ctrl or Alt.
pub fn is_printable(key: &KeyEvent) -> bool {
    matches!(key.code, Key::Char(c) if !c.is_control())
        && !key.modifiers.contains(Modifiers::CTRL)
        && !key.modifiers.contains(Modifiers::ALT)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn new_config_is_empty() {
        let config = KeyConfig::new();
        assert!(config.is_empty());
        assert_eq!(config.len(), 0);
    }

    #[test]
    fn with_defaults_binds_core_contexts() {
        let config = KeyConfig::with_defaults();
        assert_eq!(config.len(), 13);
        assert_eq!(config.resolve(CONTAINER, &KeyEvent::plain(Key::Tab)), Some("focus-next"));
        assert_eq!(
            config.resolve(CONTAINER, &KeyEvent::plain(Key::PageDown)),
            Some("focus-page-down")
        );
        assert_eq!(config.resolve(WINDOW, &KeyEvent::plain(Key::Escape)), Some("close-window"));
        assert_eq!(config.resolve(COREMANAGER, &KeyEvent::ctrl('l')), Some("redraw-screen"));
        assert_eq!(config.resolve(BUTTON, &KeyEvent::plain(Key::Enter)), Some("activate"));
    }

    // ── Resolve ──────────────────────────────────────────────────────

    #[test]
    fn shift_tab_matches_backtab_in_any_form() {
        let config = KeyConfig::with_defaults();
        let reported = KeyEvent::new(Key::BackTab, Modifiers::SHIFT);
        assert_eq!(config.resolve(CONTAINER, &reported), Some("focus-previous"));
    }

    #[test]
    fn resolve_is_per_context() {
        let config = KeyConfig::with_defaults();
        assert_eq!(config.resolve(WINDOW, &KeyEvent::plain(Key::Tab)), None);
        assert_eq!(config.resolve("nonexistent", &KeyEvent::plain(Key::Tab)), None);
    }

    #[test]
    fn resolve_wrong_modifiers() {
        let mut config = KeyConfig::new();
        config.bind("app", "quit", KeyEvent::ctrl('q'));
        assert_eq!(config.resolve("app", &KeyEvent::plain(Key::Char('q'))), None);
        assert_eq!(config.resolve("app", &KeyEvent::ctrl('q')), Some("quit"));
    }

    // ── Bind / Unbind ────────────────────────────────────────────────

    #[test]
    fn rebinding_a_key_replaces_action() {
        let mut config = KeyConfig::new();
        config.bind("app", "one", KeyEvent::plain(Key::F(1)));
        config.bind("app", "two", KeyEvent::plain(Key::F(1)));
        assert_eq!(config.len(), 1);
        assert_eq!(config.resolve("app", &KeyEvent::plain(Key::F(1))), Some("two"));
    }

    #[test]
    fn bind_spec_parses_key() {
        let mut config = KeyConfig::new();
        config.bind_spec("app", "quit", "Ctrl-x").unwrap();
        assert_eq!(config.resolve("app", &KeyEvent::ctrl('x')), Some("quit"));
        assert!(config.bind_spec("app", "quit", "Ctrl-").is_err());
    }

    #[test]
    fn unbind_removes_binding() {
        let mut config = KeyConfig::with_defaults();
        let removed = config.unbind(WINDOW, KeyEvent::plain(Key::Escape));
        assert_eq!(removed.as_deref(), Some("close-window"));
        assert_eq!(config.resolve(WINDOW, &KeyEvent::plain(Key::Escape)), None);
        assert_eq!(config.unbind(WINDOW, KeyEvent::plain(Key::Escape)), None);
    }

    #[test]
    fn unbind_action_removes_all_its_keys() {
        let mut config = KeyConfig::new();
        config.bind("app", "quit", KeyEvent::ctrl('q'));
        config.bind("app", "quit", KeyEvent::plain(Key::F(10)));
        config.bind("app", "help", KeyEvent::plain(Key::F(1)));
        config.unbind_action("app", "quit");
        assert_eq!(config.len(), 1);
    }

    #[test]
    fn keys_for_lists_every_key() {
        let mut config = KeyConfig::new();
        config.bind("app", "quit", KeyEvent::ctrl('q'));
        config.bind("app", "quit", KeyEvent::plain(Key::F(10)));
        assert_eq!(config.keys_for("app", "quit"), vec!["Ctrl-q", "F10"]);
        assert!(config.keys_for("app", "missing").is_empty());
    }

    #[test]
    fn printable_keys() {
        assert!(is_printable(&KeyEvent::plain(Key::Char('a'))));
        assert!(!is_printable(&KeyEvent::ctrl('a')));
        assert!(!is_printable(&KeyEvent::plain(Key::Tab)));
    }
}
