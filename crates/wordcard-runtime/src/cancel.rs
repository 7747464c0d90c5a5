//! Cancellation token shared between a timer owner and its tasks.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

/// A cloneable, one-shot cancellation flag.
///
/// All clones observe the same flag. Once cancelled a token stays cancelled.
#[derive(Debug, Clone)]
pub struct CancelToken {
    tx: Arc<watch::Sender<bool>>,
    rx: watch::Receiver<bool>,
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelToken {
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            tx: Arc::new(tx),
            rx,
        }
    }

    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once the token is cancelled.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        // The sender lives as long as any clone of the token, so this only
        // returns once the flag is set.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }

    /// Sleep for `duration`. Returns `false` if cancelled first.
    pub async fn sleep(&self, duration: Duration) -> bool {
        if self.is_cancelled() {
            return false;
        }
        tokio::select! {
            _ = tokio::time::sleep(duration) => true,
            _ = self.cancelled() => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn sleep_completes_without_cancel() {
        let token = CancelToken::new();
        let start = tokio::time::Instant::now();
        assert!(token.sleep(Duration::from_millis(2000)).await);
        assert_eq!(start.elapsed(), Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_interrupts_sleep() {
        let token = CancelToken::new();
        let other = token.clone();
        let start = tokio::time::Instant::now();

        let (slept, _) = tokio::join!(token.sleep(Duration::from_secs(10)), async {
            tokio::time::sleep(Duration::from_millis(300)).await;
            other.cancel();
        });

        assert!(!slept);
        assert_eq!(start.elapsed(), Duration::from_millis(300));
        assert!(token.is_cancelled());
        assert!(!token.sleep(Duration::from_millis(1)).await);
    }
}
