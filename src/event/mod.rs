//! Event system: input, decoding, key bindings, signals.

pub mod binding;
pub mod decode;
pub mod input;
pub mod signal;

pub use binding::KeyConfig;
pub use decode::KeyDecoder;
pub use input::{InputEvent, Key, KeyEvent, Modifiers};
pub use signal::{Delivery, Signal, SignalBus, SignalKind, SubscriptionId};
