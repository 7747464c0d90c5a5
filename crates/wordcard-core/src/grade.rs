//! Grade entries and the end-of-session score.

use serde::{Deserialize, Serialize};

/// One wrong or skipped question, kept for the results summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeEntry {
    /// The user asked to see the answer instead of answering.
    pub skip: bool,
    /// 1-based question number.
    pub num_of_question: usize,
    /// Prompt text.
    pub q: String,
    /// Expected answer.
    pub ans: String,
    pub q_sound: String,
    pub ans_sound: String,
}

/// Score of a finished (or partially finished) track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeSummary {
    pub correct: usize,
    pub total: usize,
    /// Rounded up, 0..=100.
    pub percentage: u32,
    pub answered: usize,
}

impl GradeSummary {
    /// Summarize a record track.
    ///
    /// Only answered records can lower the score: `correct` is the total
    /// minus answered-and-wrong records.
    pub fn compute<R>(records: &[Option<R>], is_correct: impl Fn(&R) -> bool) -> Self {
        let total = records.len();
        let answered = records.iter().filter(|r| r.is_some()).count();
        let wrong = records
            .iter()
            .flatten()
            .filter(|r| !is_correct(r))
            .count();
        let correct = total - wrong;
        Self {
            correct,
            total,
            percentage: percentage(correct, total),
            answered,
        }
    }
}

/// `ceil(correct / total * 100)`, 0 for an empty track.
pub fn percentage(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((correct * 100).div_ceil(total)) as u32
}
