//! Zero-delay deferred tasks.
//!
//! Redraw and resize requests are not served on the spot. The manager sets a
//! pending flag and queues a [`Deferred`] task here; the event loop runs the
//! queue once it has finished handling the current event, so a burst of
//! requests costs one repaint.

use std::collections::VecDeque;

/// Work postponed until the current event has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Deferred {
    /// Repaint every visible window and flip the frame to the screen.
    Draw,
    /// Re-query the screen size and reflow every window.
    Resize,
}

/// FIFO queue of [`Deferred`] tasks.
#[derive(Debug, Default)]
pub struct Scheduler {
    queue: VecDeque<Deferred>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `task` to run after the current event.
    pub fn schedule(&mut self, task: Deferred) {
        self.queue.push_back(task);
    }

    /// Take the oldest queued task.
    pub fn pop(&mut self) -> Option<Deferred> {
        self.queue.pop_front()
    }

    /// Number of queued tasks.
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
