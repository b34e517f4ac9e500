//! Colour schemes: (scheme, widget, property) → display attributes.
//!
//! Widgets ask for attributes by widget type and sub-element, e.g.
//! `("button", "focus")`. A named scheme only needs to override what differs;
//! lookups fall back to the default scheme and finally to a plain style.
//! Colour names are validated at lookup time so a bad entry surfaces as a
//! draw error for the widget that uses it.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::render::cell::CellStyle;
use crate::render::driver::parse_color;

/// Name of the scheme every lookup falls back to.
pub const DEFAULT_SCHEME: &str = "";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Key {
    scheme: String,
    widget: String,
    property: String,
}

/// Colour scheme registry.
#[derive(Debug, Clone, Default)]
pub struct ColorScheme {
    entries: HashMap<Key, CellStyle>,
}

impl ColorScheme {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the attributes the built-in widgets use.
    pub fn with_defaults() -> Self {
        let mut scheme = Self::new();
        let d = DEFAULT_SCHEME;
        scheme.set(d, "container", "background", CellStyle::new());
        scheme.set(d, "window", "background", CellStyle::new());
        scheme.set(d, "panel", "line", CellStyle::new());
        scheme.set(d, "panel", "title", CellStyle::new().bold());
        scheme.set(d, "label", "text", CellStyle::new());
        scheme.set(d, "button", "normal", CellStyle::new());
        scheme.set(d, "button", "focus", CellStyle::new().reversed());
        scheme
    }

    /// Set the attributes of one entry, replacing any previous value.
    pub fn set(&mut self, scheme: &str, widget: &str, property: &str, style: CellStyle) {
        self.entries.insert(
            Key {
                scheme: scheme.to_owned(),
                widget: widget.to_owned(),
                property: property.to_owned(),
            },
            style,
        );
    }

    /// Raw entry lookup without fallback or validation.
    pub fn get(&self, scheme: &str, widget: &str, property: &str) -> Option<&CellStyle> {
        self.entries.get(&Key {
            scheme: scheme.to_owned(),
            widget: widget.to_owned(),
            property: property.to_owned(),
        })
    }

    /// Resolve the attributes for `widget`/`property` in `scheme`.
    ///
    /// Falls back to the default scheme, then to [`CellStyle::default`].
    /// Fails if the entry found names a colour that cannot be displayed.
    pub fn attributes(&self, scheme: Option<&str>, widget: &str, property: &str) -> Result<CellStyle> {
        let scheme = scheme.unwrap_or(DEFAULT_SCHEME);
        let found = self
            .get(scheme, widget, property)
            .map(|style| (scheme, style))
            .or_else(|| {
                self.get(DEFAULT_SCHEME, widget, property)
                    .map(|style| (DEFAULT_SCHEME, style))
            });

        let Some((found_in, style)) = found else {
            return Ok(CellStyle::default());
        };

        for color in [&style.fg, &style.bg].into_iter().flatten() {
            if parse_color(color).is_none() {
                return Err(Error::InvalidColor {
                    scheme: found_in.to_owned(),
                    widget: widget.to_owned(),
                    property: property.to_owned(),
                    color: color.clone(),
                });
            }
        }
        Ok(style.clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_builtin_widgets() {
        let scheme = ColorScheme::with_defaults();
        assert!(scheme.get(DEFAULT_SCHEME, "button", "focus").is_some());
        assert!(scheme.get(DEFAULT_SCHEME, "panel", "title").is_some());
        let focus = scheme.attributes(None, "button", "focus").unwrap();
        assert!(focus.reverse);
    }

    #[test]
    fn named_scheme_overrides_default() {
        let mut scheme = ColorScheme::with_defaults();
        scheme.set("alert", "label", "text", CellStyle::new().with_fg("red"));

        let alert = scheme.attributes(Some("alert"), "label", "text").unwrap();
        assert_eq!(alert.fg.as_deref(), Some("red"));

        let plain = scheme.attributes(None, "label", "text").unwrap();
        assert_eq!(plain.fg, None);
    }

    #[test]
    fn named_scheme_falls_back_to_default() {
        let scheme = ColorScheme::with_defaults();
        let focus = scheme.attributes(Some("unknown"), "button", "focus").unwrap();
        assert!(focus.reverse);
    }

    #[test]
    fn missing_entry_is_plain() {
        let scheme = ColorScheme::new();
        assert!(scheme.is_empty());
        assert_eq!(scheme.attributes(None, "x", "y").unwrap(), CellStyle::default());
    }

    #[test]
    fn invalid_color_is_an_error() {
        let mut scheme = ColorScheme::new();
        scheme.set("dark", "button", "normal", CellStyle::new().with_bg("mauve"));
        let err = scheme.attributes(Some("dark"), "button", "normal").unwrap_err();
        match err {
            Error::InvalidColor { scheme, color, .. } => {
                assert_eq!(scheme, "dark");
                assert_eq!(color, "mauve");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn hex_colors_are_valid() {
        let mut scheme = ColorScheme::new();
        scheme.set(DEFAULT_SCHEME, "label", "text", CellStyle::new().with_fg("#ff8800"));
        assert!(scheme.attributes(None, "label", "text").is_ok());
        assert_eq!(scheme.len(), 1);
    }
}
