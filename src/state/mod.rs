//! Observable state cells.
//!
//! A [`StateCell`] holds the last value written by a resource client. Views
//! subscribe to be notified of writes; values are always replaced wholesale.

use std::sync::Arc;

use tokio::sync::watch;

/// A shared, observable value holder.
#[derive(Debug)]
pub struct StateCell<T> {
    tx: Arc<watch::Sender<T>>,
}

impl<T> Clone for StateCell<T> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<T: Default> Default for StateCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> StateCell<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Replace the held value and notify subscribers. Returns the previous value.
    pub fn set(&self, value: T) -> T {
        self.tx.send_replace(value)
    }

    /// Run `f` against the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.tx.borrow())
    }

    /// Observe future writes.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

impl<T: Clone> StateCell<T> {
    /// Snapshot of the current value.
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }
}

impl<T> StateCell<Option<T>> {
    /// Reset to `None`.
    pub fn clear(&self) {
        self.tx.send_replace(None);
    }

    pub fn is_some(&self) -> bool {
        self.tx.borrow().is_some()
    }
}
