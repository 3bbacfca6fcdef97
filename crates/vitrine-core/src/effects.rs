use std::cell::RefCell;
use std::rc::Rc;

/// A cleanup action that runs at most once, however many clones call it.
#[derive(Clone)]
pub struct Dispose(Rc<RefCell<Option<Box<dyn FnOnce()>>>>);

impl Dispose {
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Rc::new(RefCell::new(Some(Box::new(f)))))
    }

    /// Runs at most once (safe to call multiple times).
    pub fn run(&self) {
        let f = self.0.borrow_mut().take();
        if let Some(f) = f {
            f()
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.0.borrow().is_none()
    }

    /// Tie this disposer to a guard that runs it on drop.
    pub fn guard(self) -> DisposeGuard {
        DisposeGuard(Some(self))
    }
}

impl std::fmt::Debug for Dispose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Dispose")
            .field(&if self.is_disposed() { "done" } else { "pending" })
            .finish()
    }
}

/// Runs the wrapped [`Dispose`] when dropped.
#[derive(Debug)]
pub struct DisposeGuard(Option<Dispose>);

impl Drop for DisposeGuard {
    fn drop(&mut self) {
        if let Some(d) = self.0.take() {
            d.run();
        }
    }
}
