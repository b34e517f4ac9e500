//! In-memory [`Backend`] for tests.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use crate::geometry::Size;
use crate::render::compositor::CellUpdate;
use crate::render::driver::Backend;

#[derive(Debug, Default)]
struct State {
    size: Size,
    flushes: usize,
    updates: Vec<CellUpdate>,
    shut_down: bool,
}

/// A backend that records what it is sent.
///
/// Clones share state, so a test can keep one handle while the manager owns
/// another.
#[derive(Debug, Clone, Default)]
pub struct HeadlessBackend {
    state: Rc<RefCell<State>>,
}

impl HeadlessBackend {
    pub fn new(size: Size) -> Self {
        let backend = Self::default();
        backend.set_size(size);
        backend
    }

    /// Change the size reported on the next query.
    pub fn set_size(&self, size: Size) {
        self.state.borrow_mut().size = size;
    }

    /// Number of flushes so far.
    pub fn flushes(&self) -> usize {
        self.state.borrow().flushes
    }

    /// Total number of cell updates received.
    pub fn update_count(&self) -> usize {
        self.state.borrow().updates.len()
    }

    /// Take the cell updates received since the last call.
    pub fn take_updates(&self) -> Vec<CellUpdate> {
        std::mem::take(&mut self.state.borrow_mut().updates)
    }

    pub fn is_shut_down(&self) -> bool {
        self.state.borrow().shut_down
    }
}

impl Backend for HeadlessBackend {
    fn size(&self) -> io::Result<Size> {
        Ok(self.state.borrow().size)
    }

    fn apply_updates(&mut self, updates: &[CellUpdate]) -> io::Result<()> {
        self.state.borrow_mut().updates.extend_from_slice(updates);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.state.borrow_mut().flushes += 1;
        Ok(())
    }

    fn shutdown(&mut self) -> io::Result<()> {
        self.state.borrow_mut().shut_down = true;
        Ok(())
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::cell::StyledCell;

    #[test]
    fn clones_share_state() {
        let backend = HeadlessBackend::new(Size::new(4, 2));
        let mut owned: Box<dyn Backend> = Box::new(backend.clone());

        backend.set_size(Size::new(9, 3));
        assert_eq!(owned.size().unwrap(), Size::new(9, 3));

        let update = CellUpdate { x: 1, y: 0, cell: StyledCell::blank() };
        owned.apply_updates(&[update.clone()]).unwrap();
        owned.flush().unwrap();
        assert_eq!(backend.flushes(), 1);
        assert_eq!(backend.update_count(), 1);
        assert_eq!(backend.take_updates(), vec![update]);
        assert_eq!(backend.update_count(), 0);

        owned.shutdown().unwrap();
        assert!(backend.is_shut_down());
    }
}
