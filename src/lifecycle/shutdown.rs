//! Stop coordination for the monitor loop.

use std::sync::Arc;
use tokio::sync::watch;

/// Set-once stop flag shared between the monitor loop and its controllers.
///
/// Backed by a watch channel so that waiters parked in a sleep are woken and
/// late subscribers still observe a stop that already happened.
#[derive(Debug, Clone)]
pub struct StopSignal {
    tx: Arc<watch::Sender<bool>>,
}

impl StopSignal {
    /// Create a new, untriggered stop signal.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Request a stop. Idempotent and callable from any thread.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    /// Whether a stop has been requested.
    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolve once a stop has been requested.
    pub async fn triggered(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so the channel cannot close here.
        let _ = rx.wait_for(|stopped| *stopped).await;
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}
