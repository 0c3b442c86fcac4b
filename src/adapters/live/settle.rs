//! One-shot latch that accepts the first of several racing results.

use std::sync::{Mutex, PoisonError};

use tokio::sync::oneshot;

/// Hands exactly one value to a waiting receiver.
///
/// Several tasks may hold the same settlement (process watcher, deadline
/// timer); the first call to [`settle`](Self::settle) wins and every later
/// call is discarded.
pub(crate) struct Settlement<T> {
    sender: Mutex<Option<oneshot::Sender<T>>>,
}

impl<T> Settlement<T> {
    /// Creates a settlement and the receiver that observes its value.
    pub(crate) fn new() -> (Self, oneshot::Receiver<T>) {
        let (sender, receiver) = oneshot::channel();
        (Self { sender: Mutex::new(Some(sender)) }, receiver)
    }

    /// Delivers `value` if nothing has been delivered yet.
    ///
    /// Returns `true` when this call settled the latch.
    pub(crate) fn settle(&self, value: T) -> bool {
        let sender = self.sender.lock().unwrap_or_else(PoisonError::into_inner).take();
        match sender {
            Some(sender) => sender.send(value).is_ok(),
            None => false,
        }
    }
}
