//! Store key naming for persisted study progress.
//!
//! Keys are `"{word_set_id}-{suffix}"`. The cursor key is shared by every
//! mode; records, grades and questions are per mode and per track.

use anyhow::Result;

use crate::cloze::Cloze;
use crate::model::Track;
use crate::multichoice::MultiChoice;
use crate::traits::{ProgressKeys, ProgressStore, StudyMode, CURSOR_KEY};

/// Full store key for a word set.
pub fn progress_key(deck_id: &str, suffix: &str) -> String {
    format!("{deck_id}-{suffix}")
}

/// The three per-track keys of a mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackKeys {
    pub records: String,
    pub grades: String,
    pub questions: String,
}

impl TrackKeys {
    pub fn new(deck_id: &str, keys: &ProgressKeys, track: Track) -> Self {
        let (records, grades, questions) = match track {
            Track::All => (keys.records_all, keys.grades_all, keys.questions_all),
            Track::Starred => (
                keys.records_starred,
                keys.grades_starred,
                keys.questions_starred,
            ),
        };
        Self {
            records: progress_key(deck_id, records),
            grades: progress_key(deck_id, grades),
            questions: progress_key(deck_id, questions),
        }
    }
}

/// Cursor key for a word set.
pub fn cursor_key(deck_id: &str) -> String {
    progress_key(deck_id, CURSOR_KEY)
}

/// Every key a mode may have written for a word set.
pub fn mode_keys<M: StudyMode>(deck_id: &str) -> Vec<String> {
    let mut keys = vec![cursor_key(deck_id)];
    for track in [Track::All, Track::Starred] {
        let k = TrackKeys::new(deck_id, &M::KEYS, track);
        keys.extend([k.records, k.grades, k.questions]);
    }
    keys
}

/// Remove a mode's persisted progress for a word set.
pub fn clear_mode<M: StudyMode, S: ProgressStore + ?Sized>(store: &mut S, deck_id: &str) -> Result<()> {
    for key in mode_keys::<M>(deck_id) {
        store.remove(&key)?;
    }
    Ok(())
}

/// Remove all persisted progress of every mode for a word set.
pub fn reset_progress<S: ProgressStore + ?Sized>(store: &mut S, deck_id: &str) -> Result<()> {
    clear_mode::<MultiChoice, _>(store, deck_id)?;
    clear_mode::<Cloze, _>(store, deck_id)?;
    tracing::info!(deck_id, "progress reset");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    #[test]
    fn keys_match_local_storage_names() {
        let k = TrackKeys::new("abc", &MultiChoice::KEYS, Track::Starred);
        assert_eq!(k.records, "abc-multiChoiceRecordForStar");
        assert_eq!(k.grades, "abc-gradeForStar");
        assert_eq!(k.questions, "abc-starQuestions");

        let k = TrackKeys::new("abc", &Cloze::KEYS, Track::All);
        assert_eq!(k.records, "abc-clozeRecordForAll");
        assert_eq!(k.grades, "abc-clozeGradeForAll");
        assert_eq!(cursor_key("abc"), "abc-curQuestionIndex");
    }

    #[test]
    fn reset_leaves_other_decks_alone() {
        let mut store = MemoryStore::default();
        store.set("abc-curQuestionIndex", json!(2)).unwrap();
        store.set("abc-gradeForAll", json!([])).unwrap();
        store.set("abc-clozeRecordForStar", json!([])).unwrap();
        store.set("abc-2-gradeForAll", json!([])).unwrap();

        reset_progress(&mut store, "abc").unwrap();

        assert!(store.get("abc-curQuestionIndex").is_none());
        assert!(store.get("abc-gradeForAll").is_none());
        assert!(store.get("abc-clozeRecordForStar").is_none());
        assert!(store.get("abc-2-gradeForAll").is_some());
    }
}
