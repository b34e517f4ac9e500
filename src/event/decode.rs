//! Raw terminal bytes to key events.
//!
//! [`KeyDecoder`] is a small incremental decoder for byte-oriented input
//! sources. Bytes are fed as they arrive; complete key units are returned and
//! an incomplete trailing unit (a partial escape sequence or UTF-8 character)
//! is kept until the next feed. A lone Escape is ambiguous until more bytes
//! arrive or the source goes idle, so callers flush it with
//! [`KeyDecoder::finish`].
//!
//! Malformed units are logged and dropped; decoding resumes at the next byte.

use super::input::{Key, KeyEvent, Modifiers};

/// Longest escape sequence kept while waiting for its final byte.
const MAX_SEQUENCE: usize = 32;

enum Unit {
    Key(KeyEvent, usize),
    /// Skip this many bytes.
    Invalid(usize),
    Incomplete,
}

/// Incremental decoder from terminal input bytes to [`KeyEvent`]s.
#[derive(Debug, Default)]
pub struct KeyDecoder {
    pending: Vec<u8>,
}

impl KeyDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a partial unit is buffered.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Decode as many complete keys as possible from the buffered bytes plus
    /// `bytes`.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<KeyEvent> {
        self.pending.extend_from_slice(bytes);
        let mut keys = Vec::new();
        let mut pos = 0;
        while pos < self.pending.len() {
            match decode_unit(&self.pending[pos..]) {
                Unit::Key(key, used) => {
                    keys.push(key);
                    pos += used;
                }
                Unit::Invalid(used) => pos += used,
                Unit::Incomplete => break,
            }
        }
        self.pending.drain(..pos);
        keys
    }

    /// Interpret whatever is still buffered, as when the input source goes
    /// idle. An Escape that starts an unfinished sequence becomes the Escape
    /// key and the bytes after it are decoded on their own; a partial UTF-8
    /// character is dropped.
    pub fn finish(&mut self) -> Vec<KeyEvent> {
        let mut keys = Vec::new();
        let mut pos = 0;
        while pos < self.pending.len() {
            let rest = &self.pending[pos..];
            match decode_unit(rest) {
                Unit::Key(key, used) => {
                    keys.push(key);
                    pos += used;
                }
                Unit::Invalid(used) => pos += used,
                Unit::Incomplete if rest[0] == 0x1b => {
                    keys.push(KeyEvent::plain(Key::Escape));
                    pos += 1;
                }
                Unit::Incomplete => {
                    tracing::warn!(bytes = ?rest, "dropping incomplete input");
                    pos = self.pending.len();
                }
            }
        }
        self.pending.clear();
        keys
    }
}

// ---------------------------------------------------------------------------
// Unit decoding
// ---------------------------------------------------------------------------

fn decode_unit(buf: &[u8]) -> Unit {
    match buf[0] {
        0x1b => decode_escape(buf),
        b => decode_plain(b, buf),
    }
}

/// A unit that does not start with Escape.
fn decode_plain(b: u8, buf: &[u8]) -> Unit {
    let key = match b {
        b'\r' | b'\n' => KeyEvent::plain(Key::Enter),
        b'\t' => KeyEvent::plain(Key::Tab),
        0x7f | 0x08 => KeyEvent::plain(Key::Backspace),
        0x00 => KeyEvent::ctrl(' '),
        0x01..=0x1a => KeyEvent::ctrl((b'a' + b - 1) as char),
        0x1c..=0x1f => KeyEvent::ctrl((b + 0x40) as char),
        0x20..=0x7e => KeyEvent::plain(Key::Char(b as char)),
        _ => return decode_utf8(buf),
    };
    Unit::Key(key, 1)
}

fn decode_utf8(buf: &[u8]) -> Unit {
    let width = match buf[0] {
        0xc2..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf4 => 4,
        lead => {
            tracing::warn!(byte = lead, "dropping invalid UTF-8 lead byte");
            return Unit::Invalid(1);
        }
    };
    let available = buf.len().min(width);
    if buf[1..available].iter().any(|&c| !(0x80..=0xbf).contains(&c)) {
        tracing::warn!(bytes = ?&buf[..available], "dropping malformed UTF-8 sequence");
        return Unit::Invalid(1);
    }
    if available < width {
        return Unit::Incomplete;
    }
    match std::str::from_utf8(&buf[..width]).ok().and_then(|s| s.chars().next()) {
        Some(c) => Unit::Key(KeyEvent::plain(Key::Char(c)), width),
        None => {
            tracing::warn!(bytes = ?&buf[..width], "dropping malformed UTF-8 sequence");
            Unit::Invalid(1)
        }
    }
}

fn decode_escape(buf: &[u8]) -> Unit {
    let Some(&next) = buf.get(1) else {
        return Unit::Incomplete;
    };
    match next {
        b'[' => decode_csi(buf),
        b'O' => decode_ss3(buf),
        0x1b => Unit::Key(KeyEvent::plain(Key::Escape), 1),
        _ => match decode_plain(next, &buf[1..]) {
            Unit::Key(key, used) => Unit::Key(
                KeyEvent::new(key.code, key.modifiers | Modifiers::ALT),
                used + 1,
            ),
            Unit::Invalid(used) => Unit::Invalid(used + 1),
            Unit::Incomplete => Unit::Incomplete,
        },
    }
}

/// `ESC [ params final`.
fn decode_csi(buf: &[u8]) -> Unit {
    let Some(offset) = buf[2..].iter().position(|b| (0x40..=0x7e).contains(b)) else {
        if buf.len() > MAX_SEQUENCE {
            tracing::warn!(bytes = ?buf, "dropping unterminated escape sequence");
            return Unit::Invalid(buf.len());
        }
        return Unit::Incomplete;
    };
    let end = 2 + offset;
    let used = end + 1;
    let params: Vec<u32> = buf[2..end]
        .split(|&b| b == b';')
        .map(|p| std::str::from_utf8(p).ok().and_then(|s| s.parse().ok()).unwrap_or(0))
        .collect();
    let modifiers = params.get(1).map_or(Modifiers::NONE, |&m| csi_modifiers(m));

    let code = match buf[end] {
        b'A' => Some(Key::Up),
        b'B' => Some(Key::Down),
        b'C' => Some(Key::Right),
        b'D' => Some(Key::Left),
        b'H' => Some(Key::Home),
        b'F' => Some(Key::End),
        b'Z' => Some(Key::BackTab),
        b'~' => match params.first().copied().unwrap_or(0) {
            1 | 7 => Some(Key::Home),
            2 => Some(Key::Insert),
            3 => Some(Key::Delete),
            4 | 8 => Some(Key::End),
            5 => Some(Key::PageUp),
            6 => Some(Key::PageDown),
            n @ 11..=15 => Some(Key::F((n - 10) as u8)),
            n @ 17..=21 => Some(Key::F((n - 11) as u8)),
            n @ 23..=24 => Some(Key::F((n - 12) as u8)),
            _ => None,
        },
        _ => None,
    };

    match code {
        Some(code) => Unit::Key(KeyEvent::new(code, modifiers).normalized(), used),
        None => {
            tracing::warn!(bytes = ?&buf[..used], "dropping unknown escape sequence");
            Unit::Invalid(used)
        }
    }
}

/// `ESC O final`, sent by terminals in application cursor mode.
fn decode_ss3(buf: &[u8]) -> Unit {
    let Some(&last) = buf.get(2) else {
        return Unit::Incomplete;
    };
    let code = match last {
        b'A' => Key::Up,
        b'B' => Key::Down,
        b'C' => Key::Right,
        b'D' => Key::Left,
        b'H' => Key::Home,
        b'F' => Key::End,
        b'P'..=b'S' => Key::F(last - b'P' + 1),
        _ => {
            tracing::warn!(bytes = ?&buf[..3], "dropping unknown escape sequence");
            return Unit::Invalid(3);
        }
    };
    Unit::Key(KeyEvent::plain(code), 3)
}

/// xterm modifier parameter: 1 + (shift | alt << 1 | ctrl << 2).
fn csi_modifiers(param: u32) -> Modifiers {
    let bits = param.saturating_sub(1);
    let mut out = Modifiers::NONE;
    if bits & 1 != 0 {
        out = out | Modifiers::SHIFT;
    }
    if bits & 2 != 0 {
        out = out | Modifiers::ALT;
    }
    if bits & 4 != 0 {
        out = out | Modifiers::CTRL;
    }
    out
}

// ===========================================================================
// Tests
// ===========================================================================
