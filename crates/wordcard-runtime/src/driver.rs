//! Timer driver for a study session.
//!
//! The driver owns the session and its progress store. An answer puts the
//! session into its feedback phase, waits out the feedback window, records
//! the answer, persists progress and, once the track is complete, opens the
//! grade modal after a short delay. Input that arrives during the window
//! is rejected with `SessionError::Busy`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use wordcard_core::error::SessionError;
use wordcard_core::session::{Completion, StudySession};
use wordcard_core::traits::{ProgressStore, StudyMode};

use crate::cancel::CancelToken;
use crate::Timings;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The driver was stopped during the feedback window.
    #[error("feedback cancelled")]
    Cancelled,

    #[error(transparent)]
    Persist(#[from] anyhow::Error),
}

struct Shared<M: StudyMode, S> {
    session: StudySession<M>,
    store: S,
}

/// Drives a `StudySession` through its timed phases.
///
/// Clones share the same session, so input can be sent from another
/// future while an answer is in its feedback window.
pub struct SessionDriver<M: StudyMode, S> {
    shared: Arc<Mutex<Shared<M, S>>>,
    timings: Timings,
    cancel: CancelToken,
}

impl<M: StudyMode, S> Clone for SessionDriver<M, S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            timings: self.timings,
            cancel: self.cancel.clone(),
        }
    }
}

impl<M: StudyMode, S: ProgressStore> SessionDriver<M, S> {
    pub fn new(session: StudySession<M>, store: S, timings: Timings) -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared { session, store })),
            timings,
            cancel: CancelToken::new(),
        }
    }

    /// Answer the current question and wait out the feedback window.
    pub async fn answer(&self, answer: &M::Answer) -> Result<Completion, DriverError> {
        self.lock().session.answer(answer)?;
        self.finish_feedback().await
    }

    /// Reveal the current answer and wait out the feedback window.
    pub async fn skip(&self) -> Result<Completion, DriverError> {
        self.lock().session.skip()?;
        self.finish_feedback().await
    }

    /// Run `f` against the session. Must not be used to answer.
    pub fn with_session<T>(&self, f: impl FnOnce(&mut StudySession<M>) -> T) -> T {
        f(&mut self.lock().session)
    }

    /// Write the session's progress to the store.
    pub fn persist(&self) -> anyhow::Result<()> {
        let mut shared = self.lock();
        let Shared { session, store } = &mut *shared;
        session.persist(store)
    }

    /// Cancel any running feedback window. The driver is unusable for
    /// timed input afterwards.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub fn timings(&self) -> Timings {
        self.timings
    }

    async fn finish_feedback(&self) -> Result<Completion, DriverError> {
        let guard = AbandonOnDrop {
            shared: &self.shared,
            armed: true,
        };

        if !self.cancel.sleep(self.timings.feedback).await {
            drop(guard);
            return Err(DriverError::Cancelled);
        }

        let completion = {
            let mut shared = self.lock();
            let completion = shared.session.complete_feedback()?;
            let Shared { session, store } = &mut *shared;
            session.persist(store)?;
            completion
        };
        guard.disarm();

        if completion.all_answered && self.cancel.sleep(self.timings.grade_modal_delay).await {
            self.lock().session.open_grade_modal();
            tracing::info!(mode = M::NAME, "all questions answered");
        }
        Ok(completion)
    }

    fn lock(&self) -> MutexGuard<'_, Shared<M, S>> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Returns the session to answering if the feedback future is dropped or
/// cancelled before the answer is recorded.
struct AbandonOnDrop<'a, M: StudyMode, S> {
    shared: &'a Mutex<Shared<M, S>>,
    armed: bool,
}

impl<M: StudyMode, S> AbandonOnDrop<'_, M, S> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<M: StudyMode, S> Drop for AbandonOnDrop<'_, M, S> {
    fn drop(&mut self) {
        if self.armed {
            self.shared
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .session
                .abandon_feedback();
        }
    }
}
