//! Cancel-and-reschedule debouncing.
//!
//! Each `push` replaces the pending value and restarts the quiet period.
//! Only the value still pending when the period elapses is delivered.
//! `flush` delivers the pending value immediately.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::cancel::CancelToken;

type Slot<T> = Arc<Mutex<Option<T>>>;

/// Debounces values into an mpsc channel.
pub struct Debouncer<T: Send + 'static> {
    delay: Duration,
    slot: Slot<T>,
    tx: mpsc::UnboundedSender<T>,
    timer: Option<(CancelToken, JoinHandle<()>)>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Create a debouncer and the receiver its values arrive on.
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let debouncer = Self {
            delay,
            slot: Arc::new(Mutex::new(None)),
            tx,
            timer: None,
        };
        (debouncer, rx)
    }

    /// Replace the pending value and restart the timer.
    pub fn push(&mut self, value: T) {
        self.cancel_timer();
        *lock(&self.slot) = Some(value);

        let token = CancelToken::new();
        let task_token = token.clone();
        let slot = Arc::clone(&self.slot);
        let tx = self.tx.clone();
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            if !task_token.sleep(delay).await {
                return;
            }
            if let Some(value) = lock(&slot).take() {
                let _ = tx.send(value);
            }
        });
        self.timer = Some((token, handle));
    }

    /// Deliver the pending value now. Returns `false` if nothing was pending.
    pub fn flush(&mut self) -> bool {
        self.cancel_timer();
        match lock(&self.slot).take() {
            Some(value) => self.tx.send(value).is_ok(),
            None => false,
        }
    }

    /// Drop the pending value without delivering it.
    pub fn cancel(&mut self) {
        self.cancel_timer();
        lock(&self.slot).take();
    }

    pub fn is_pending(&self) -> bool {
        lock(&self.slot).is_some()
    }

    fn cancel_timer(&mut self) {
        if let Some((token, handle)) = self.timer.take() {
            token.cancel();
            handle.abort();
        }
    }
}

impl<T: Send + 'static> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}

fn lock<T>(slot: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn only_last_value_fires() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(2000));
        let start = tokio::time::Instant::now();

        debouncer.push("r");
        tokio::time::sleep(Duration::from_millis(500)).await;
        debouncer.push("ru");
        tokio::time::sleep(Duration::from_millis(500)).await;
        debouncer.push("rust");

        assert_eq!(rx.recv().await, Some("rust"));
        assert_eq!(start.elapsed(), Duration::from_millis(3000));
        assert!(!debouncer.is_pending());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn flush_sends_immediately() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(2000));
        let start = tokio::time::Instant::now();
        debouncer.push(1);
        assert!(debouncer.flush());
        assert_eq!(rx.recv().await, Some(1));
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert!(!debouncer.flush());

        tokio::time::sleep(Duration::from_millis(3000)).await;
        assert!(rx.try_recv().is_err(), "timer must not fire after flush");
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_and_drop_deliver_nothing() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(100));
        debouncer.push(1);
        debouncer.cancel();
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(rx.try_recv().is_err());

        debouncer.push(2);
        drop(debouncer);
        assert_eq!(rx.recv().await, None);
    }
}
