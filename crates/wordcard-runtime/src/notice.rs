//! Transient notices with auto-dismiss.
//!
//! Showing a notice replaces the current one and restarts the dismiss
//! timer. Observers subscribe to a `watch` channel of the current notice.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use wordcard_core::error::{ApiFailure, ResponseKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoticeKind::Success => write!(f, "success"),
            NoticeKind::Error => write!(f, "error"),
            NoticeKind::Info => write!(f, "info"),
        }
    }
}

/// A message shown to the user for a short time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }
}

impl From<&ApiFailure> for Notice {
    fn from(failure: &ApiFailure) -> Self {
        match failure.kind {
            ResponseKind::AbortError => Notice::info(failure.message()),
            _ => Notice::error(failure.message()),
        }
    }
}

type Current = Option<(u64, Notice)>;

/// Holds at most one notice and dismisses it after a fixed time.
pub struct NoticeBoard {
    ttl: Duration,
    tx: Arc<watch::Sender<Current>>,
    next_id: AtomicU64,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl NoticeBoard {
    pub fn new(ttl: Duration) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            ttl,
            tx: Arc::new(tx),
            next_id: AtomicU64::new(0),
            timer: Mutex::new(None),
        }
    }

    /// Show `notice`, replacing any current one.
    pub fn show(&self, notice: Notice) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(kind = %notice.kind, message = %notice.message, "notice shown");
        self.tx.send_replace(Some((id, notice)));

        let tx = Arc::clone(&self.tx);
        let ttl = self.ttl;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            tx.send_if_modified(|current| match current {
                Some((shown, _)) if *shown == id => {
                    *current = None;
                    true
                }
                _ => false,
            });
        });

        let mut timer = self.timer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(old) = timer.replace(handle) {
            old.abort();
        }
    }

    /// Show the notice for a failed request. Aborted requests are silent.
    pub fn show_failure(&self, failure: &ApiFailure) {
        if !failure.is_abort() {
            self.show(Notice::from(failure));
        }
    }

    pub fn dismiss(&self) {
        if let Some(old) = self
            .timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            old.abort();
        }
        self.tx.send_replace(None);
    }

    pub fn current(&self) -> Option<Notice> {
        self.tx.borrow().as_ref().map(|(_, n)| n.clone())
    }

    /// Watch the current notice. The value is `None` while nothing is shown.
    pub fn subscribe(&self) -> watch::Receiver<Option<(u64, Notice)>> {
        self.tx.subscribe()
    }
}

impl Drop for NoticeBoard {
    fn drop(&mut self) {
        if let Some(old) = self
            .timer
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            old.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn notice_auto_dismisses() {
        let board = NoticeBoard::new(Duration::from_millis(3500));
        board.show(Notice::success("saved"));
        assert_eq!(board.current(), Some(Notice::success("saved")));

        tokio::time::sleep(Duration::from_millis(3499)).await;
        assert!(board.current().is_some());
        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(board.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn replacing_restarts_the_timer() {
        let board = NoticeBoard::new(Duration::from_millis(3500));
        board.show(Notice::error("first"));
        tokio::time::sleep(Duration::from_millis(3000)).await;
        board.show(Notice::error("second"));

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(board.current(), Some(Notice::error("second")));
        tokio::time::sleep(Duration::from_millis(2600)).await;
        assert_eq!(board.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn failures_map_to_notices() {
        let board = NoticeBoard::new(Duration::from_millis(3500));
        board.show_failure(&ApiFailure::aborted());
        assert_eq!(board.current(), None);

        board.show_failure(&ApiFailure::error("word set not found"));
        let current = board.current().unwrap();
        assert_eq!(current.kind, NoticeKind::Error);
        assert_eq!(current.message, "word set not found");

        let mut rx = board.subscribe();
        board.dismiss();
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_none());
    }
}
