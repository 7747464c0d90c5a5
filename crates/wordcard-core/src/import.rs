//! Bulk word-list import.
//!
//! Parses pasted text into vocabulary/definition pairs and inserts them
//! into an existing word list at a position, renumbering `order`.

use thiserror::Error;

use crate::model::{is_valid_sound, sort_words, ImportWord, SortOrder, Word};
use crate::validation::{MAX_DEFINITION_CHARS, MAX_VOCABULARY_CHARS};

/// Separator between vocabulary and definition inside one entry.
pub const DEFAULT_PAIR_DELIMITER: &str = "  ";
/// Separator between entries.
pub const DEFAULT_WORD_DELIMITER: &str = "\n";

/// Why an import was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("delimiters must not be empty")]
    EmptyDelimiter,

    #[error("delimiter {0:?} must not contain '#'")]
    ReservedDelimiter(String),

    #[error("nothing to import")]
    NoWords,

    #[error("invalid {side} sound: {sound}")]
    InvalidSound { side: &'static str, sound: String },

    #[error("insert position {index} is outside 0..={len}")]
    InsertIndex { index: usize, len: usize },

    #[error("entry {entry}: vocabulary must not be empty")]
    EmptyVocabulary { entry: usize },

    #[error("entry {entry}: vocabulary exceeds {MAX_VOCABULARY_CHARS} characters")]
    VocabularyTooLong { entry: usize },

    #[error("entry {entry}: definition must not be empty")]
    EmptyDefinition { entry: usize },

    #[error("entry {entry}: definition exceeds {MAX_DEFINITION_CHARS} characters")]
    DefinitionTooLong { entry: usize },
}

/// Delimiters used to split pasted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    pub pair_delimiter: String,
    pub word_delimiter: String,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            pair_delimiter: DEFAULT_PAIR_DELIMITER.to_string(),
            word_delimiter: DEFAULT_WORD_DELIMITER.to_string(),
        }
    }
}

impl ImportOptions {
    pub fn new(pair_delimiter: impl Into<String>, word_delimiter: impl Into<String>) -> Self {
        Self {
            pair_delimiter: pair_delimiter.into(),
            word_delimiter: word_delimiter.into(),
        }
    }

    /// Check that both delimiters are usable.
    pub fn validate(&self) -> Result<(), ImportError> {
        for delimiter in [&self.pair_delimiter, &self.word_delimiter] {
            if delimiter.is_empty() {
                return Err(ImportError::EmptyDelimiter);
            }
            if delimiter.contains('#') {
                return Err(ImportError::ReservedDelimiter(delimiter.clone()));
            }
        }
        Ok(())
    }

    /// Example input written with these delimiters.
    pub fn placeholder(&self) -> String {
        "word1#definition1##word2#definition2##word3#definition3"
            .replace("##", "\u{0}")
            .replace('#', &self.pair_delimiter)
            .replace('\u{0}', &self.word_delimiter)
    }
}

/// Split `text` into words.
///
/// Blank entries are skipped. Each entry splits at the first pair
/// delimiter; an entry without one becomes a word with an empty definition.
/// Tabs expand to four spaces.
pub fn parse_import(text: &str, options: &ImportOptions) -> Result<Vec<ImportWord>, ImportError> {
    options.validate()?;

    let words = text
        .split(options.word_delimiter.as_str())
        .filter(|entry| !entry.trim().is_empty())
        .map(|entry| {
            let (vocabulary, definition) = entry
                .split_once(options.pair_delimiter.as_str())
                .unwrap_or((entry, ""));
            ImportWord {
                vocabulary: expand_tabs(vocabulary),
                definition: expand_tabs(definition),
            }
        })
        .collect::<Vec<_>>();

    tracing::debug!(count = words.len(), "parsed import text");
    Ok(words)
}

fn expand_tabs(s: &str) -> String {
    s.replace('\t', "    ")
}

/// Check an import before it is applied.
pub fn validate_import(
    words: &[ImportWord],
    vocabulary_sound: &str,
    definition_sound: &str,
    insert_index: usize,
    existing_len: usize,
) -> Result<(), ImportError> {
    if words.is_empty() {
        return Err(ImportError::NoWords);
    }
    if !is_valid_sound(vocabulary_sound) {
        return Err(ImportError::InvalidSound {
            side: "vocabulary",
            sound: vocabulary_sound.to_string(),
        });
    }
    if !is_valid_sound(definition_sound) {
        return Err(ImportError::InvalidSound {
            side: "definition",
            sound: definition_sound.to_string(),
        });
    }
    if insert_index > existing_len {
        return Err(ImportError::InsertIndex {
            index: insert_index,
            len: existing_len,
        });
    }
    for (i, word) in words.iter().enumerate() {
        let entry = i + 1;
        let vocabulary_len = word.vocabulary.chars().count();
        let definition_len = word.definition.chars().count();
        if vocabulary_len == 0 {
            return Err(ImportError::EmptyVocabulary { entry });
        }
        if vocabulary_len > MAX_VOCABULARY_CHARS {
            return Err(ImportError::VocabularyTooLong { entry });
        }
        if definition_len == 0 {
            return Err(ImportError::EmptyDefinition { entry });
        }
        if definition_len > MAX_DEFINITION_CHARS {
            return Err(ImportError::DefinitionTooLong { entry });
        }
    }
    Ok(())
}

/// Insert `imported` at `insert_index` (in `order` sequence) and return the
/// combined list sorted by `order`.
///
/// New words get fresh ids and take orders after the word they follow.
/// Later words are bumped so `order` stays strictly increasing.
pub fn insert_words(
    existing: &[Word],
    imported: &[ImportWord],
    vocabulary_sound: &str,
    definition_sound: &str,
    insert_index: usize,
) -> Result<Vec<Word>, ImportError> {
    validate_import(
        imported,
        vocabulary_sound,
        definition_sound,
        insert_index,
        existing.len(),
    )?;

    let mut sorted = existing.to_vec();
    sort_words(&mut sorted, SortOrder::Order);
    let second_half = sorted.split_off(insert_index);

    let mut next_order = sorted.last().map_or(1, |w| w.order + 1);
    for word in imported {
        sorted.push(Word {
            id: uuid::Uuid::new_v4().to_string(),
            order: next_order,
            vocabulary: word.vocabulary.clone(),
            definition: word.definition.clone(),
            vocabulary_sound: vocabulary_sound.to_string(),
            definition_sound: definition_sound.to_string(),
            star: false,
        });
        next_order += 1;
    }
    for mut word in second_half {
        if word.order < next_order {
            word.order = next_order;
        }
        next_order = word.order + 1;
        sorted.push(word);
    }

    tracing::info!(
        imported = imported.len(),
        total = sorted.len(),
        at = insert_index,
        "imported words"
    );
    Ok(sorted)
}
