//! Explicit shutdown signal shared by `.exit`, Ctrl-C, and the REPL loop.
//!
//! Requesting shutdown never aborts a running command; the loop checks the
//! flag between read cycles.

use std::sync::Arc;

use tokio::sync::watch;

/// Cloneable one-way shutdown flag.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    tx: Arc<watch::Sender<bool>>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Ask the session to stop accepting input.
    pub fn request(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_requested(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolve once shutdown has been requested (immediately if it already was).
    pub async fn requested(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so `wait_for` cannot observe a closed channel.
        let _ = rx.wait_for(|stop| *stop).await;
    }

    /// Forward process interrupts (Ctrl-C) into this signal.
    pub fn listen_for_interrupt(&self) -> tokio::task::JoinHandle<()> {
        let signal = self.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("interrupt received");
                    signal.request();
                }
                Err(err) => tracing::warn!("failed to listen for interrupt: {err}"),
            }
        })
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn new_signal_is_not_requested() {
        assert!(!ShutdownSignal::new().is_requested());
    }

    #[test]
    fn request_is_visible_through_clones() {
        let signal = ShutdownSignal::new();
        let observer = signal.clone();
        signal.request();
        assert!(observer.is_requested());
    }

    #[tokio::test]
    async fn requested_resolves_after_request() {
        let signal = ShutdownSignal::new();
        let waiter = signal.clone();
        let handle = tokio::spawn(async move { waiter.requested().await });
        signal.request();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("waiter should finish")
            .unwrap();
    }

    #[tokio::test]
    async fn requested_resolves_immediately_when_already_set() {
        let signal = ShutdownSignal::new();
        signal.request();
        tokio::time::timeout(Duration::from_millis(100), signal.requested())
            .await
            .expect("already-requested signal should not block");
    }
}
