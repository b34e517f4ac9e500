//! Crate error type.
//!
//! Layout and focus invariants are enforced with assertions and never show up
//! here. What remains are failures at the platform boundary (terminal setup and
//! output), colour resolution failures surfaced by draw calls, and malformed
//! key specifications in binding configuration.

use std::io;

use thiserror::Error;

/// Errors produced by consui.
#[derive(Debug, Error)]
pub enum Error {
    /// The terminal could not be put into the state the toolkit needs.
    /// Fatal: nothing can be shown without a working screen.
    #[error("failed to initialize terminal: {0}")]
    TerminalInit(#[source] io::Error),

    /// Terminal output failed after startup.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A colour scheme entry names a colour that cannot be displayed.
    #[error("invalid color `{color}` for {scheme}/{widget}/{property}")]
    InvalidColor {
        scheme: String,
        widget: String,
        property: String,
        color: String,
    },

    /// A key specification such as `Ctrl-x` could not be parsed.
    #[error("invalid key specification `{0}`")]
    InvalidKey(String),
}

/// Shorthand result type.
pub type Result<T> = std::result::Result<T, Error>;

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert() {
        fn fails() -> Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))?;
            Ok(())
        }
        assert!(matches!(fails(), Err(Error::Io(_))));
    }

    #[test]
    fn display_messages() {
        let err = Error::InvalidColor {
            scheme: "dark".into(),
            widget: "button".into(),
            property: "focus".into(),
            color: "mauve".into(),
        };
        assert_eq!(err.to_string(), "invalid color `mauve` for dark/button/focus");
        assert_eq!(
            Error::InvalidKey("Hyper-q".into()).to_string(),
            "invalid key specification `Hyper-q`"
        );
    }

    #[test]
    fn terminal_init_keeps_source() {
        use std::error::Error as _;
        let err = Error::TerminalInit(io::Error::new(io::ErrorKind::NotFound, "no tty"));
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("failed to initialize terminal"));
    }
}
