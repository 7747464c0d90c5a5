//! In-memory deck source for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use wordcard_core::error::ApiFailure;
use wordcard_core::model::StudyDeck;
use wordcard_runtime::CancelToken;

use crate::schema::{SearchWordSetCardResponse, WordSetCard};
use crate::source::DeckSource;

/// A deck source backed by a map, for exercising study flows without a
/// server.
pub struct MockApi {
    /// Decks keyed by word-set id.
    decks: HashMap<String, StudyDeck>,
    /// Number of calls made.
    call_count: AtomicU32,
    /// Last id or query received.
    last_request: Mutex<Option<String>>,
}

impl MockApi {
    pub fn new(decks: impl IntoIterator<Item = StudyDeck>) -> Self {
        Self {
            decks: decks.into_iter().map(|d| (d.id.clone(), d)).collect(),
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Get the number of calls made to this source.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last id or query received.
    pub fn last_request(&self) -> Option<String> {
        self.last_request
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn record(&self, request: &str) {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_request.lock().unwrap_or_else(|e| e.into_inner()) = Some(request.to_string());
    }
}

#[async_trait]
impl DeckSource for MockApi {
    async fn fetch_deck(&self, id: &str, cancel: Option<&CancelToken>) -> Result<StudyDeck, ApiFailure> {
        self.record(id);
        if cancel.is_some_and(CancelToken::is_cancelled) {
            return Err(ApiFailure::aborted());
        }
        self.decks
            .get(id)
            .cloned()
            .ok_or_else(|| ApiFailure::error(format!("word set {id} not found")))
    }

    async fn search(
        &self,
        query: &str,
        cur_number: usize,
        cancel: Option<&CancelToken>,
    ) -> Result<SearchWordSetCardResponse, ApiFailure> {
        self.record(query);
        if cancel.is_some_and(CancelToken::is_cancelled) {
            return Err(ApiFailure::aborted());
        }

        let needle = query.to_lowercase();
        let mut matches: Vec<&StudyDeck> = self
            .decks
            .values()
            .filter(|d| d.title.to_lowercase().contains(&needle))
            .collect();
        matches.sort_by(|a, b| a.title.cmp(&b.title));

        let cards = matches
            .iter()
            .skip(cur_number)
            .map(|d| WordSetCard {
                id: d.id.clone(),
                title: d.title.clone(),
                author_id: "mock".into(),
                updated_at: 0,
                should_swap: d.should_swap,
                word_cnt: d.words.len() as u64,
                likes: 0,
            })
            .collect();
        Ok(SearchWordSetCardResponse {
            word_set_cards: cards,
            have_more: false,
        })
    }
}
