//! Cooperative cancellation.
//!
//! A [`CancelSignal`] is cloned into every concurrent fetch and every
//! pending backoff sleep. Cancelling any clone cancels them all.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::debug;

/// Shared, clonable cancellation flag.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelSignal {
    /// Creates a signal that has not been cancelled.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Cancels every holder of this signal. Idempotent.
    pub fn cancel(&self) {
        if !self.tx.send_replace(true) {
            debug!("Cancellation requested");
        }
    }

    /// Returns true once [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Completes when the signal is cancelled.
    ///
    /// Completes immediately if it already was.
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives as long as `self`, so this only returns on cancel.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }

    /// Cancels this signal after `deadline` elapses.
    ///
    /// Must be called from within a tokio runtime.
    pub fn cancel_after(&self, deadline: Duration) {
        let signal = self.clone();
        tokio::spawn(async move {
            tokio::select! {
                () = tokio::time::sleep(deadline) => {
                    debug!(deadline = ?deadline, "Deadline reached");
                    signal.cancel();
                }
                () = signal.cancelled() => {}
            }
        });
    }
}

impl Default for CancelSignal {
    fn default() -> Self {
        Self::new()
    }
}
