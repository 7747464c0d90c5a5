//! The study session state machine shared by multiple choice and cloze.
//!
//! A session holds two independent tracks (all words and starred words) and
//! a single cursor into the active one. Answering moves the session into
//! the feedback phase; the caller (usually a timer driver) ends the phase
//! with [`StudySession::complete_feedback`], which records the outcome and
//! advances the cursor.

use anyhow::Result;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::grade::{GradeEntry, GradeSummary};
use crate::model::{StudyDeck, Track};
use crate::progress::{clear_mode, cursor_key, TrackKeys};
use crate::traits::{ProgressStore, ProgressStoreExt, StudyMode};

/// Where the session is in the answer cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for an answer or navigation.
    #[default]
    Answering,
    /// Showing feedback for an answer. Input is rejected.
    Animating,
}

/// What happened when the feedback window closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    /// 0-based index of the question that was recorded.
    pub index: usize,
    pub correct: bool,
    pub skipped: bool,
    /// Every question of the active track now has a record.
    pub all_answered: bool,
}

#[derive(Debug)]
struct TrackState<M: StudyMode> {
    questions: Vec<M::Question>,
    records: Vec<Option<M::Record>>,
    grades: Vec<GradeEntry>,
    hints: Vec<bool>,
}

impl<M: StudyMode> TrackState<M> {
    fn new(questions: Vec<M::Question>) -> Self {
        let len = questions.len();
        Self {
            questions,
            records: vec![None; len],
            grades: Vec::new(),
            hints: vec![false; len],
        }
    }

    fn clear(&mut self) {
        self.records = vec![None; self.questions.len()];
        self.grades.clear();
        self.hints = vec![false; self.questions.len()];
    }

    fn all_answered(&self) -> bool {
        !self.records.is_empty() && self.records.iter().all(Option::is_some)
    }
}

#[derive(Debug)]
struct Pending<R> {
    index: usize,
    record: R,
    skip: bool,
}

/// A multiple-choice or cloze session over one study deck.
#[derive(Debug)]
pub struct StudySession<M: StudyMode> {
    deck: StudyDeck,
    random: bool,
    track: Track,
    all: TrackState<M>,
    starred: TrackState<M>,
    cursor: usize,
    phase: Phase,
    pending: Option<Pending<M::Record>>,
    grade_modal_open: bool,
}

impl<M: StudyMode> StudySession<M> {
    /// Start a fresh session on the `All` track.
    pub fn new<R: Rng>(deck: StudyDeck, random: bool, rng: &mut R) -> Result<Self, SessionError> {
        let all = M::build_questions(&deck.track_words(Track::All), random, rng)?;
        let starred = M::build_questions(&deck.track_words(Track::Starred), random, rng)?;
        Ok(Self {
            deck,
            random,
            track: Track::All,
            all: TrackState::new(all),
            starred: TrackState::new(starred),
            cursor: 0,
            phase: Phase::Answering,
            pending: None,
            grade_modal_open: false,
        })
    }

    /// Restore a session from `store`, or start fresh.
    ///
    /// A track resumes only when its persisted questions and records match
    /// the deck's current size. Any mismatch, including an out-of-range
    /// cursor, discards all of this mode's persisted progress for the deck.
    pub fn resume<R: Rng, S: ProgressStore + ?Sized>(
        deck: StudyDeck,
        random: bool,
        store: &mut S,
        rng: &mut R,
    ) -> Result<Self> {
        let mut session = Self::new(deck, random, rng)?;
        let deck_id = session.deck.id.clone();

        let mut stale = false;
        for track in [Track::All, Track::Starred] {
            let keys = TrackKeys::new(&deck_id, &M::KEYS, track);
            let questions: Option<Vec<M::Question>> = store.load(&keys.questions);
            let records: Option<Vec<Option<M::Record>>> = store.load(&keys.records);
            let grades: Option<Vec<GradeEntry>> = store.load(&keys.grades);
            let expected = session.deck.track_len(track);

            match (questions, records) {
                (Some(questions), Some(records))
                    if questions.len() == expected && records.len() == expected =>
                {
                    let state = session.track_state_mut(track);
                    *state = TrackState::new(questions);
                    state.records = records;
                    state.grades = grades.unwrap_or_default();
                }
                (None, None) if grades.is_none() => {}
                _ => stale = true,
            }
        }

        if let Some(cursor) = store.load::<usize>(&cursor_key(&deck_id)) {
            if cursor < session.all.questions.len() {
                session.cursor = cursor;
            } else if cursor != 0 {
                stale = true;
            }
        }

        if stale {
            tracing::warn!(
                deck_id = %deck_id,
                mode = M::NAME,
                "persisted progress does not match the word set, starting fresh"
            );
            clear_mode::<M, S>(store, &deck_id)?;
            session = Self::new(session.deck, random, rng)?;
        }
        Ok(session)
    }

    /// Write cursor, questions, records and grades of both tracks.
    pub fn persist<S: ProgressStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        store.save(&cursor_key(&self.deck.id), &self.cursor)?;
        for track in [Track::All, Track::Starred] {
            let keys = TrackKeys::new(&self.deck.id, &M::KEYS, track);
            let state = self.track_state(track);
            store.save(&keys.questions, &state.questions)?;
            store.save(&keys.records, &state.records)?;
            store.save(&keys.grades, &state.grades)?;
        }
        Ok(())
    }

    // -- accessors ----------------------------------------------------------

    pub fn deck(&self) -> &StudyDeck {
        &self.deck
    }

    pub fn deck_id(&self) -> &str {
        &self.deck.id
    }

    pub fn track(&self) -> Track {
        self.track
    }

    pub fn random(&self) -> bool {
        self.random
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// 0-based cursor into the active track.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn grade_modal_open(&self) -> bool {
        self.grade_modal_open
    }

    pub fn questions(&self) -> &[M::Question] {
        &self.active().questions
    }

    pub fn records(&self) -> &[Option<M::Record>] {
        &self.active().records
    }

    pub fn grades(&self) -> &[GradeEntry] {
        &self.active().grades
    }

    pub fn len(&self) -> usize {
        self.active().questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active().questions.is_empty()
    }

    pub fn current(&self) -> Option<&M::Question> {
        self.active().questions.get(self.cursor)
    }

    pub fn current_record(&self) -> Option<&M::Record> {
        self.active().records.get(self.cursor).and_then(Option::as_ref)
    }

    /// Record awaiting the end of the feedback window.
    pub fn pending_record(&self) -> Option<&M::Record> {
        self.pending.as_ref().map(|p| &p.record)
    }

    pub fn hint_open(&self) -> bool {
        self.active().hints.get(self.cursor).copied().unwrap_or(false)
    }

    /// Every question of the active track has a record.
    pub fn is_complete(&self) -> bool {
        self.active().all_answered()
    }

    pub fn summary(&self) -> GradeSummary {
        GradeSummary::compute(&self.active().records, M::is_correct)
    }

    // -- answering ----------------------------------------------------------

    /// Grade `answer` for the current question and enter the feedback phase.
    pub fn answer(&mut self, answer: &M::Answer) -> Result<M::Record, SessionError> {
        let question = self.answerable()?;
        let record = M::check(question, answer)?;
        self.begin_feedback(record.clone(), false);
        Ok(record)
    }

    /// Reveal the answer to the current question. Counts as incorrect.
    pub fn skip(&mut self) -> Result<M::Record, SessionError> {
        let question = self.answerable()?;
        let record = M::skipped(question);
        self.begin_feedback(record.clone(), true);
        Ok(record)
    }

    /// End the feedback window: store the record, append a grade entry for
    /// a wrong or skipped answer, and advance unless skipped or last.
    pub fn complete_feedback(&mut self) -> Result<Completion, SessionError> {
        let pending = self.pending.take().ok_or(SessionError::NothingPending)?;
        self.phase = Phase::Answering;

        let correct = M::is_correct(&pending.record);
        let track = self.track;
        let state = self.track_state_mut(track);
        if !correct {
            let entry = M::grade_entry(&state.questions[pending.index], pending.index + 1, pending.skip);
            state.grades.push(entry);
        }
        state.records[pending.index] = Some(pending.record);
        let last = pending.index + 1 >= state.questions.len();
        let all_answered = state.all_answered();

        if !pending.skip && !last {
            self.cursor = pending.index + 1;
        }

        tracing::debug!(
            mode = M::NAME,
            index = pending.index,
            correct,
            skipped = pending.skip,
            all_answered,
            "answer recorded"
        );
        Ok(Completion {
            index: pending.index,
            correct,
            skipped: pending.skip,
            all_answered,
        })
    }

    /// Drop an in-flight answer without recording it.
    pub fn abandon_feedback(&mut self) {
        if self.pending.take().is_some() {
            tracing::debug!(mode = M::NAME, "feedback abandoned");
        }
        self.phase = Phase::Answering;
    }

    pub fn open_grade_modal(&mut self) {
        self.grade_modal_open = true;
    }

    pub fn close_grade_modal(&mut self) {
        self.grade_modal_open = false;
    }

    // -- track management ---------------------------------------------------

    /// Clear records, grades and hints of the active track and go back to
    /// question 1.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        self.ensure_idle()?;
        let track = self.track;
        self.track_state_mut(track).clear();
        self.cursor = 0;
        self.grade_modal_open = false;
        Ok(())
    }

    /// Rebuild the active track's questions, then restart it.
    pub fn regenerate<R: Rng>(&mut self, rng: &mut R) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.rebuild_track(self.track, rng)?;
        self.cursor = 0;
        self.grade_modal_open = false;
        Ok(())
    }

    /// Switch between the all-words and starred-words tracks. The other
    /// track keeps its progress.
    pub fn set_track(&mut self, track: Track) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.track = track;
        self.cursor = 0;
        self.grade_modal_open = false;
        Ok(())
    }

    /// Toggle random order. Rebuilds and clears both tracks for modes that
    /// share ordering across tracks, otherwise only the active track.
    pub fn set_random<R: Rng>(&mut self, random: bool, rng: &mut R) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.random = random;
        if M::SHUFFLE_CLEARS_ALL_TRACKS {
            self.rebuild_track(Track::All, rng)?;
            self.rebuild_track(Track::Starred, rng)?;
        } else {
            self.rebuild_track(self.track, rng)?;
        }
        self.cursor = 0;
        self.grade_modal_open = false;
        Ok(())
    }

    // -- navigation ---------------------------------------------------------

    pub fn next(&mut self) -> Result<usize, SessionError> {
        self.ensure_idle()?;
        if self.cursor + 1 < self.len() {
            self.cursor += 1;
        }
        Ok(self.cursor)
    }

    pub fn prev(&mut self) -> Result<usize, SessionError> {
        self.ensure_idle()?;
        self.cursor = self.cursor.saturating_sub(1);
        Ok(self.cursor)
    }

    pub fn from_start(&mut self) -> Result<usize, SessionError> {
        self.ensure_idle()?;
        self.cursor = 0;
        Ok(self.cursor)
    }

    /// Flip the hint of the current question. Returns the new state.
    pub fn toggle_hint(&mut self) -> bool {
        let (track, cursor) = (self.track, self.cursor);
        match self.track_state_mut(track).hints.get_mut(cursor) {
            Some(open) => {
                *open = !*open;
                *open
            }
            None => false,
        }
    }

    // -- internals ----------------------------------------------------------

    fn active(&self) -> &TrackState<M> {
        self.track_state(self.track)
    }

    fn track_state(&self, track: Track) -> &TrackState<M> {
        match track {
            Track::All => &self.all,
            Track::Starred => &self.starred,
        }
    }

    fn track_state_mut(&mut self, track: Track) -> &mut TrackState<M> {
        match track {
            Track::All => &mut self.all,
            Track::Starred => &mut self.starred,
        }
    }

    fn ensure_idle(&self) -> Result<(), SessionError> {
        match self.phase {
            Phase::Answering => Ok(()),
            Phase::Animating => Err(SessionError::Busy),
        }
    }

    fn answerable(&self) -> Result<&M::Question, SessionError> {
        self.ensure_idle()?;
        let question = self.current().ok_or(SessionError::Empty)?;
        if self.current_record().is_some() {
            return Err(SessionError::AlreadyAnswered(self.cursor + 1));
        }
        Ok(question)
    }

    fn begin_feedback(&mut self, record: M::Record, skip: bool) {
        self.pending = Some(Pending {
            index: self.cursor,
            record,
            skip,
        });
        self.phase = Phase::Animating;
    }

    fn rebuild_track<R: Rng>(&mut self, track: Track, rng: &mut R) -> Result<(), SessionError> {
        let questions = M::build_questions(&self.deck.track_words(track), self.random, rng)?;
        *self.track_state_mut(track) = TrackState::new(questions);
        Ok(())
    }
}
