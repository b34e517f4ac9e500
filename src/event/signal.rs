//! Typed signals and the subscription bus.
//!
//! Widgets never call listeners directly. Emitting a [`Signal`] queues one
//! [`Delivery`] per matching subscription; the owner of the bus drains the
//! queue on the event-loop thread. Emissions nobody listens to are dropped.

use std::collections::VecDeque;

use slotmap::{new_key_type, SlotMap};

use crate::geometry::{Rect, Size};
use crate::tree::WidgetId;

new_key_type! {
    /// Handle returned by [`SignalBus::subscribe`].
    pub struct SubscriptionId;
}

// ---------------------------------------------------------------------------
// Signal
// ---------------------------------------------------------------------------

/// Something that happened to a widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// Requested geometry changed.
    MoveResize { old: Rect, new: Rect },
    /// Focus gained (`true`) or lost (`false`).
    Focus(bool),
    /// Visibility flag changed.
    Visible(bool),
    /// An ancestor scrolled, so the widget moved on screen.
    AbsolutePositionChanged,
    /// The widget's window needs repainting.
    Redraw,
    /// The terminal was resized.
    ScreenResized(Size),
    /// A button-like widget was activated.
    Activated,
    /// The widget is about to be freed.
    Destroyed,
}

/// Discriminant of [`Signal`], used to select subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    MoveResize,
    Focus,
    Visible,
    AbsolutePositionChanged,
    Redraw,
    ScreenResized,
    Activated,
    Destroyed,
}

impl Signal {
    pub fn kind(&self) -> SignalKind {
        match self {
            Signal::MoveResize { .. } => SignalKind::MoveResize,
            Signal::Focus(_) => SignalKind::Focus,
            Signal::Visible(_) => SignalKind::Visible,
            Signal::AbsolutePositionChanged => SignalKind::AbsolutePositionChanged,
            Signal::Redraw => SignalKind::Redraw,
            Signal::ScreenResized(_) => SignalKind::ScreenResized,
            Signal::Activated => SignalKind::Activated,
            Signal::Destroyed => SignalKind::Destroyed,
        }
    }
}

// ---------------------------------------------------------------------------
// Delivery
// ---------------------------------------------------------------------------

/// A signal routed to one subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub subscription: SubscriptionId,
    pub source: WidgetId,
    pub signal: Signal,
}

#[derive(Debug, Clone, Copy)]
struct Subscription {
    source: WidgetId,
    kind: SignalKind,
}

// ---------------------------------------------------------------------------
// SignalBus
// ---------------------------------------------------------------------------

/// Subscription registry plus FIFO delivery queue.
#[derive(Debug, Default)]
pub struct SignalBus {
    subscriptions: SlotMap<SubscriptionId, Subscription>,
    queue: VecDeque<Delivery>,
}

impl SignalBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listen for `kind` signals emitted by `source`.
    pub fn subscribe(&mut self, source: WidgetId, kind: SignalKind) -> SubscriptionId {
        self.subscriptions.insert(Subscription { source, kind })
    }

    /// Stop listening. Returns `false` if the subscription was already gone.
    ///
    /// Deliveries already queued for it are discarded.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let removed = self.subscriptions.remove(id).is_some();
        if removed {
            self.queue.retain(|d| d.subscription != id);
        }
        removed
    }

    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.subscriptions.contains_key(id)
    }

    /// Queue `signal` for every subscription matching its source and kind.
    pub fn emit(&mut self, source: WidgetId, signal: Signal) {
        let kind = signal.kind();
        for (id, sub) in &self.subscriptions {
            if sub.source == source && sub.kind == kind {
                self.queue.push_back(Delivery {
                    subscription: id,
                    source,
                    signal: signal.clone(),
                });
            }
        }
    }

    /// Remove every subscription whose source is `source`.
    ///
    /// Deliveries already queued stay queued, so a final `Destroyed` still
    /// reaches its listeners.
    pub fn forget_source(&mut self, source: WidgetId) {
        self.subscriptions.retain(|_, sub| sub.source != source);
    }

    /// Take all queued deliveries, oldest first.
    pub fn drain(&mut self) -> Vec<Delivery> {
        self.queue.drain(..).collect()
    }

    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn ids() -> (WidgetId, WidgetId) {
        let mut map: SlotMap<WidgetId, ()> = SlotMap::with_key();
        (map.insert(()), map.insert(()))
    }

    // ── Subscribe / emit ─────────────────────────────────────────────

    #[test]
    fn emit_without_subscribers_is_dropped() {
        let (a, _) = ids();
        let mut bus = SignalBus::new();
        bus.emit(a, Signal::Redraw);
        assert!(bus.is_empty());
    }

    #[test]
    fn emit_matches_source_and_kind() {
        let (a, b) = ids();
        let mut bus = SignalBus::new();
        let sub = bus.subscribe(a, SignalKind::Focus);

        bus.emit(b, Signal::Focus(true));
        bus.emit(a, Signal::Visible(false));
        bus.emit(a, Signal::Focus(true));

        let delivered = bus.drain();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].subscription, sub);
        assert_eq!(delivered[0].source, a);
        assert_eq!(delivered[0].signal, Signal::Focus(true));
    }

    #[test]
    fn one_delivery_per_subscription() {
        let (a, _) = ids();
        let mut bus = SignalBus::new();
        let first = bus.subscribe(a, SignalKind::Activated);
        let second = bus.subscribe(a, SignalKind::Activated);
        bus.emit(a, Signal::Activated);

        let subs: Vec<_> = bus.drain().into_iter().map(|d| d.subscription).collect();
        assert_eq!(subs.len(), 2);
        assert!(subs.contains(&first));
        assert!(subs.contains(&second));
    }

    #[test]
    fn deliveries_keep_emission_order() {
        let (a, _) = ids();
        let mut bus = SignalBus::new();
        bus.subscribe(a, SignalKind::Focus);
        bus.emit(a, Signal::Focus(true));
        bus.emit(a, Signal::Focus(false));
        let signals: Vec<_> = bus.drain().into_iter().map(|d| d.signal).collect();
        assert_eq!(signals, vec![Signal::Focus(true), Signal::Focus(false)]);
    }

    // ── Unsubscribe / forget ─────────────────────────────────────────

    #[test]
    fn unsubscribe_discards_queued_deliveries() {
        let (a, _) = ids();
        let mut bus = SignalBus::new();
        let sub = bus.subscribe(a, SignalKind::Redraw);
        bus.emit(a, Signal::Redraw);
        assert!(bus.unsubscribe(sub));
        assert!(!bus.unsubscribe(sub));
        assert!(bus.is_empty());
        assert!(!bus.is_subscribed(sub));
    }

    #[test]
    fn forget_source_drops_its_subscriptions() {
        let (a, b) = ids();
        let mut bus = SignalBus::new();
        let sa = bus.subscribe(a, SignalKind::Destroyed);
        let sb = bus.subscribe(b, SignalKind::Destroyed);
        bus.emit(a, Signal::Destroyed);
        bus.emit(b, Signal::Destroyed);

        bus.forget_source(a);
        assert!(!bus.is_subscribed(sa));
        assert!(bus.is_subscribed(sb));
        assert_eq!(bus.drain().len(), 2);

        bus.emit(a, Signal::Destroyed);
        assert!(bus.is_empty());
    }

    #[test]
    fn signal_kinds() {
        assert_eq!(Signal::ScreenResized(Size::new(1, 1)).kind(), SignalKind::ScreenResized);
        assert_eq!(
            Signal::MoveResize { old: Rect::EMPTY, new: Rect::EMPTY }.kind(),
            SignalKind::MoveResize
        );
    }
}
