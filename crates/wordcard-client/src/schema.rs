//! Response payload types and their schema checks.
//!
//! Decoding into these types checks the payload's shape. `Schema::validate`
//! then checks what the type system cannot, such as unique word ids.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use wordcard_core::model::{StudyDeck, Word, WordSet};

/// A payload type the client can decode and check.
pub trait Schema: DeserializeOwned {
    /// Semantic checks after decoding. The error text is logged, never shown.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

impl Schema for serde_json::Value {}
impl Schema for u64 {}

impl<T: Schema> Schema for Vec<T> {
    fn validate(&self) -> Result<(), String> {
        self.iter().try_for_each(|item| item.validate())
    }
}

fn unique_word_ids(words: &[Word]) -> Result<(), String> {
    let mut seen = HashSet::new();
    for word in words {
        if word.id.is_empty() {
            return Err("word with empty id".into());
        }
        if !seen.insert(word.id.as_str()) {
            return Err(format!("duplicate word id {}", word.id));
        }
    }
    Ok(())
}

impl Schema for Word {}

impl Schema for StudyDeck {
    fn validate(&self) -> Result<(), String> {
        unique_word_ids(&self.words)
    }
}

impl Schema for WordSet {
    fn validate(&self) -> Result<(), String> {
        unique_word_ids(&self.words)
    }
}

/// Payload of acknowledgements that only carry a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePayload {
    pub message: String,
}

impl Schema for MessagePayload {}

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

/// A word set in search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordSetCard {
    pub id: String,
    pub title: String,
    #[serde(rename = "authorID")]
    pub author_id: String,
    pub updated_at: i64,
    pub should_swap: bool,
    pub word_cnt: u64,
    pub likes: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchWordSetCardResponse {
    pub word_set_cards: Vec<WordSetCard>,
    pub have_more: bool,
}

impl Schema for SearchWordSetCardResponse {}

/// A page of words shown in a search preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordSetCardPreview {
    pub words: Vec<Word>,
    pub have_more: bool,
}

impl Schema for WordSetCardPreview {
    fn validate(&self) -> Result<(), String> {
        unique_word_ids(&self.words)
    }
}

/// A word set on the home page sliders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePageWordSet {
    pub id: String,
    pub title: String,
    #[serde(rename = "authorID")]
    pub author_id: String,
    pub word_cnt: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentVisitResponse {
    pub record: Vec<HomePageWordSet>,
}

impl Schema for RecentVisitResponse {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWordSetResponse {
    pub new_word_set: Vec<HomePageWordSet>,
}

impl Schema for NewWordSetResponse {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularWordSetResponse {
    pub popular_word_set: Vec<HomePageWordSet>,
}

impl Schema for PopularWordSetResponse {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackCard {
    pub id: String,
    pub title: String,
    pub content: String,
    pub formatted_created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    pub feedbacks: Vec<FeedbackCard>,
    pub have_more: bool,
}

impl Schema for FeedbackResponse {}

/// A message in the user's mailbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mail {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Milliseconds since the Unix epoch.
    pub date: i64,
    #[serde(rename = "receiverID")]
    pub receiver_id: String,
    pub read: bool,
}

impl Mail {
    pub fn sent_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.date)
    }
}

impl Schema for Mail {
    fn validate(&self) -> Result<(), String> {
        self.sent_at()
            .map(|_| ())
            .ok_or_else(|| format!("mail {} has an out-of-range date", self.id))
    }
}

/// The logged-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontEndUser {
    pub id: String,
    pub role: Role,
    pub name: String,
    pub email: String,
    pub img: String,
    #[serde(default)]
    pub liked_word_sets: Vec<String>,
}

impl Schema for FrontEndUser {}

/// Public link to a user profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserLink {
    pub id: String,
    pub role: Role,
    pub name: String,
    pub img: String,
}

impl Schema for UserLink {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibUser {
    pub id: String,
    pub role: Role,
    pub name: String,
    pub img: String,
    pub created_at: String,
    pub like_cnt: i64,
    pub fork_cnt: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibWordSetDisplay {
    pub id: String,
    pub title: String,
    #[serde(rename = "authorID")]
    pub author_id: String,
    pub word_cnt: u64,
    pub created_at: String,
    pub updated_at: i64,
}

/// A user's library page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibPage {
    pub user: LibUser,
    pub created_word_sets: Vec<LibWordSetDisplay>,
    pub liked_word_sets: Vec<LibWordSetDisplay>,
}

impl Schema for LibPage {}
