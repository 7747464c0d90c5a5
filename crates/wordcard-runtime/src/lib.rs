//! wordcard-runtime — Timers that drive study sessions.
//!
//! Feedback windows, the grade-modal delay, debounced search, flashcard
//! auto-play and notice auto-dismiss all run on cancellable tokio timers.

pub mod autoplay;
pub mod cancel;
pub mod debounce;
pub mod driver;
pub mod notice;

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use cancel::CancelToken;

/// Durations of every timer the runtime uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timings {
    /// How long answer feedback is shown before the answer is recorded.
    pub feedback: Duration,
    /// Delay between the last answer and opening the grade modal.
    pub grade_modal_delay: Duration,
    /// Notice auto-dismiss.
    pub notice: Duration,
    /// Quiet period before a search query is sent.
    pub search_debounce: Duration,
    /// Wait before speaking each auto-played card.
    pub autoplay_lead: Duration,
    /// How long the back of an auto-played card stays up.
    pub autoplay_hold: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            feedback: Duration::from_millis(2000),
            grade_modal_delay: Duration::from_millis(200),
            notice: Duration::from_millis(3500),
            search_debounce: Duration::from_millis(2000),
            autoplay_lead: Duration::from_millis(300),
            autoplay_hold: Duration::from_millis(2000),
        }
    }
}
