//! Core trait definitions for study modes and progress storage.
//!
//! `StudyMode` is implemented by the multiple-choice and cloze modes and
//! plugs into the shared `StudySession` state machine. `ProgressStore` is
//! the key/value seam persisted progress goes through.

use std::fmt::Debug;

use anyhow::Result;
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{SamplingError, SessionError};
use crate::grade::GradeEntry;
use crate::model::Word;

// ---------------------------------------------------------------------------
// Study modes
// ---------------------------------------------------------------------------

/// Store key suffixes a mode persists its progress under.
///
/// Full keys are `"{word_set_id}-{suffix}"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressKeys {
    pub records_all: &'static str,
    pub records_starred: &'static str,
    pub grades_all: &'static str,
    pub grades_starred: &'static str,
    pub questions_all: &'static str,
    pub questions_starred: &'static str,
}

/// Cursor key shared by every mode.
pub const CURSOR_KEY: &str = "curQuestionIndex";

/// A question-and-answer study mode driven by `StudySession`.
pub trait StudyMode {
    type Question: Clone + Debug + Serialize + DeserializeOwned;
    type Record: Clone + Debug + Serialize + DeserializeOwned;
    type Answer: ?Sized;

    /// Short name used in logs and reports.
    const NAME: &'static str;

    /// Keys this mode persists under.
    const KEYS: ProgressKeys;

    /// Whether toggling random order clears both tracks or only the active one.
    const SHUFFLE_CLEARS_ALL_TRACKS: bool;

    /// Build one question per word.
    fn build_questions<R: Rng>(
        words: &[Word],
        random: bool,
        rng: &mut R,
    ) -> Result<Vec<Self::Question>, SamplingError>;

    /// Grade an answer into a record.
    fn check(question: &Self::Question, answer: &Self::Answer)
        -> Result<Self::Record, SessionError>;

    /// Record written when the user skips to the answer.
    fn skipped(question: &Self::Question) -> Self::Record;

    fn is_correct(record: &Self::Record) -> bool;

    /// Grade entry for a wrong or skipped question (`number` is 1-based).
    fn grade_entry(question: &Self::Question, number: usize, skip: bool) -> GradeEntry;
}

// ---------------------------------------------------------------------------
// Progress storage
// ---------------------------------------------------------------------------

/// Key/value store for session progress, the local-storage equivalent.
pub trait ProgressStore {
    /// Read a raw JSON value.
    fn get(&self, key: &str) -> Option<serde_json::Value>;

    /// Write a raw JSON value.
    fn set(&mut self, key: &str, value: serde_json::Value) -> Result<()>;

    /// Remove a key. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Typed helpers over a `ProgressStore`.
pub trait ProgressStoreExt: ProgressStore {
    /// Read and decode a value. Undecodable values read as `None`.
    fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.get(key)?;
        match serde_json::from_value(value) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("ignoring undecodable progress key {key}: {e}");
                None
            }
        }
    }

    /// Encode and write a value.
    fn save<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        self.set(key, serde_json::to_value(value)?)
    }
}

impl<S: ProgressStore + ?Sized> ProgressStoreExt for S {}
