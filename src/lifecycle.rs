//! Explicit start/stop lifecycle shared by both subsystems
//!
//! Everything runs on one thread, so cancellation is a shared flag. Scheduled
//! callbacks and async continuations check it before touching state.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Cloneable cancellation flag. Once cancelled it stays cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel every clone of this token
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }

    pub fn is_active(&self) -> bool {
        !self.is_cancelled()
    }
}

/// Shared home for a self-rescheduling callback.
///
/// The callback holds a clone of its own slot so it can re-arm itself, which
/// is a reference cycle. [`CallbackSlot::release`] breaks it and drops
/// everything the callback captured.
#[derive(Debug)]
pub struct CallbackSlot<T> {
    inner: Rc<RefCell<Option<T>>>,
}

impl<T> Clone for CallbackSlot<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Default for CallbackSlot<T> {
    fn default() -> Self {
        Self {
            inner: Rc::new(RefCell::new(None)),
        }
    }
}

impl<T> CallbackSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, callback: T) {
        *self.inner.borrow_mut() = Some(callback);
    }

    /// Run `f` on the callback, if it hasn't been released
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.inner.borrow().as_ref().map(f)
    }

    /// Drop the callback. Must not be called from inside it.
    pub fn release(&self) {
        let callback = self.inner.borrow_mut().take();
        drop(callback);
    }

    pub fn is_set(&self) -> bool {
        self.inner.borrow().is_some()
    }
}
