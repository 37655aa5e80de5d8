//! Cooperative cancellation for a batch run.

use tokio::sync::watch;

/// Creates a linked trigger and shutdown handle.
pub fn shutdown_channel() -> (ShutdownTrigger, Shutdown) {
    let (tx, rx) = watch::channel(false);
    (ShutdownTrigger { tx }, Shutdown { rx })
}

/// Fires a shutdown. Dropping the trigger without firing it never cancels.
#[derive(Debug)]
pub struct ShutdownTrigger {
    tx: watch::Sender<bool>,
}

impl ShutdownTrigger {
    /// Requests cancellation of everything watching the linked [`Shutdown`].
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }
}

/// Observes a shutdown request.
#[derive(Debug, Clone)]
pub struct Shutdown {
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    /// A handle that is never triggered.
    pub fn never() -> Self {
        shutdown_channel().1
    }

    /// Whether shutdown has been requested.
    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once shutdown is requested, or never if the trigger is gone.
    pub async fn triggered(&self) {
        let mut rx = self.rx.clone();

        loop {
            if *rx.borrow_and_update() {
                return;
            }

            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_trigger_wakes_waiter() {
        let (trigger, shutdown) = shutdown_channel();
        assert!(!shutdown.is_triggered());

        let waiter = tokio::spawn({
            let shutdown = shutdown.clone();
            async move { shutdown.triggered().await }
        });

        trigger.trigger();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should wake")
            .unwrap();
        assert!(shutdown.is_triggered());
    }

    #[tokio::test]
    async fn test_never_does_not_fire() {
        let shutdown = Shutdown::never();
        let waited = tokio::time::timeout(Duration::from_millis(20), shutdown.triggered()).await;
        assert!(waited.is_err());
        assert!(!shutdown.is_triggered());
    }
}
