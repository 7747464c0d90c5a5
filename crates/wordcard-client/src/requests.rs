//! Request bodies, serialized with the API's camelCase field names.

use serde::Serialize;

use wordcard_core::model::{Word, WordSet};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogInRequest {
    pub user_email: String,
    pub user_password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub user_name: String,
    pub user_email: String,
    pub user_password: String,
    pub re_user_password: String,
}

/// Body shared by the toggles and visits that act on one user and one set.
#[derive(Debug, Clone, Serialize)]
pub struct UserWordSetRequest {
    #[serde(rename = "userID")]
    pub user_id: String,
    #[serde(rename = "wordSetID")]
    pub word_set_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WordSetIdRequest {
    #[serde(rename = "wordSetID")]
    pub word_set_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToggleWordStarRequest {
    #[serde(rename = "wordSetID")]
    pub word_set_id: String,
    #[serde(rename = "wordID")]
    pub word_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleAllWordStarRequest {
    #[serde(rename = "wordSetID")]
    pub word_set_id: String,
    pub new_star: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineUpdateWordRequest {
    #[serde(rename = "wordSetID")]
    pub word_set_id: String,
    #[serde(rename = "wordID")]
    pub word_id: String,
    pub new_vocabulary: String,
    pub new_definition: String,
}

/// Full edit from the large word card, sounds included.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BigWordCardUpdateWordRequest {
    #[serde(rename = "wordSetID")]
    pub word_set_id: String,
    #[serde(rename = "wordID")]
    pub word_id: String,
    pub new_vocabulary: String,
    pub new_definition: String,
    pub new_vocabulary_sound: String,
    pub new_definition_sound: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddWordRequest {
    #[serde(rename = "wordSetID")]
    pub word_set_id: String,
    pub word: Word,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeUserNameRequest {
    #[serde(rename = "userID")]
    pub user_id: String,
    pub new_name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWordSetRequest {
    #[serde(rename = "userID")]
    pub user_id: String,
    pub word_set: WordSet,
}

/// A word as sent in an edit, without its star.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditWord {
    pub id: String,
    pub order: i64,
    pub vocabulary: String,
    pub definition: String,
    pub vocabulary_sound: String,
    pub definition_sound: String,
}

impl From<&Word> for EditWord {
    fn from(word: &Word) -> Self {
        Self {
            id: word.id.clone(),
            order: word.order,
            vocabulary: word.vocabulary.clone(),
            definition: word.definition.clone(),
            vocabulary_sound: word.vocabulary_sound.clone(),
            definition_sound: word.definition_sound.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditWordSet {
    pub id: String,
    pub title: String,
    pub description: String,
    pub words: Vec<EditWord>,
    pub should_swap: bool,
}

impl From<&WordSet> for EditWordSet {
    fn from(set: &WordSet) -> Self {
        Self {
            id: set.id.clone(),
            title: set.title.clone(),
            description: set.description.clone(),
            words: set.words.iter().map(EditWord::from).collect(),
            should_swap: set.should_swap,
        }
    }
}

/// Edit of an existing set: the new state plus the words added and removed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditWordSetRequest {
    pub add_words: Vec<Word>,
    pub word_set: EditWordSet,
    /// Ids of removed words.
    pub remove_words: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReadMailRequest {
    #[serde(rename = "userID")]
    pub user_id: String,
    #[serde(rename = "mailID")]
    pub mail_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateFeedbackRequest {
    #[serde(rename = "authorID")]
    pub author_id: String,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogErrorRequest {
    #[serde(rename = "userID")]
    pub user_id: String,
    #[serde(rename = "errorID")]
    pub error_id: String,
    pub error: String,
    pub error_info: String,
    pub time: String,
}
