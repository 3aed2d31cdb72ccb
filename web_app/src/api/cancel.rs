//! Cancellation signal threaded through the order confirmation flow.
//!
//! The HTTP handler keeps the [CancelHandle]; when the client goes away the
//! handler future is dropped, the handle with it, and the running flow sees
//! [CancelSignal::cancelled] resolve.

use tokio::sync::watch;

/// Owner side. Dropping it cancels the paired signal.
#[derive(Debug)]
pub struct CancelHandle(watch::Sender<bool>);

/// Observer side handed to the cancellable task
#[derive(Debug, Clone)]
pub struct CancelSignal(watch::Receiver<bool>);

pub fn cancel_pair() -> (CancelHandle, CancelSignal) {
    let (sender, receiver) = watch::channel(false);
    (CancelHandle(sender), CancelSignal(receiver))
}

impl CancelHandle {
    pub fn cancel(&self) {
        // no receivers left means nobody is waiting
        let _ = self.0.send(true);
    }
}

impl Drop for CancelHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl CancelSignal {
    pub fn is_cancelled(&self) -> bool {
        *self.0.borrow() || self.0.has_changed().is_err()
    }

    /// Resolves once the handle cancels or is dropped
    pub async fn cancelled(&mut self) {
        loop {
            if *self.0.borrow_and_update() {
                return;
            }
            if self.0.changed().await.is_err() {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_starts_uncancelled() {
        let (_handle, signal) = cancel_pair();
        assert!(!signal.is_cancelled());
    }

    #[test]
    fn test_explicit_cancel() {
        let (handle, signal) = cancel_pair();
        handle.cancel();
        assert!(signal.is_cancelled());
    }

    #[test]
    fn test_dropping_handle_cancels() {
        let (handle, signal) = cancel_pair();
        drop(handle);
        assert!(signal.is_cancelled());
    }

    #[ntex::test]
    async fn test_cancelled_resolves_after_drop() {
        let (handle, mut signal) = cancel_pair();
        drop(handle);
        signal.cancelled().await;
        assert!(signal.is_cancelled());
    }
}
