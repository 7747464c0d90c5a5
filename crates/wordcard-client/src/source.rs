//! Where study decks come from.

use async_trait::async_trait;
use futures::future::join_all;

use wordcard_core::error::ApiFailure;
use wordcard_core::model::StudyDeck;
use wordcard_runtime::CancelToken;

use crate::client::ApiClient;
use crate::schema::SearchWordSetCardResponse;

/// A remote source of decks to study.
#[async_trait]
pub trait DeckSource: Send + Sync {
    /// Fetch one deck by word-set id.
    async fn fetch_deck(&self, id: &str, cancel: Option<&CancelToken>) -> Result<StudyDeck, ApiFailure>;

    /// Search word sets by title, starting after the first `cur_number` results.
    async fn search(
        &self,
        query: &str,
        cur_number: usize,
        cancel: Option<&CancelToken>,
    ) -> Result<SearchWordSetCardResponse, ApiFailure>;
}

#[async_trait]
impl DeckSource for ApiClient {
    async fn fetch_deck(&self, id: &str, cancel: Option<&CancelToken>) -> Result<StudyDeck, ApiFailure> {
        self.get_words(id, cancel).await
    }

    async fn search(
        &self,
        query: &str,
        cur_number: usize,
        cancel: Option<&CancelToken>,
    ) -> Result<SearchWordSetCardResponse, ApiFailure> {
        self.search_word_sets(query, cur_number, cancel).await
    }
}

/// Fetch several decks concurrently. Results keep the order of `ids`.
pub async fn fetch_decks<S: DeckSource + ?Sized>(
    source: &S,
    ids: &[String],
    cancel: Option<&CancelToken>,
) -> Vec<Result<StudyDeck, ApiFailure>> {
    let futures = ids.iter().map(|id| source.fetch_deck(id, cancel));
    let results = join_all(futures).await;

    let failed = results.iter().filter(|r| r.is_err()).count();
    if failed > 0 {
        tracing::warn!(failed, total = ids.len(), "some decks could not be fetched");
    }
    results
}
