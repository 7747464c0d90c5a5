//! Core data model types for wordcard.
//!
//! These are the fundamental types that the whole workspace uses to
//! represent words, word sets, and the decks that study modes consume.

use std::cmp::Ordering;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// A single flashcard entry inside a word set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    /// Unique identifier of the word.
    pub id: String,
    /// Default display position inside the word set.
    pub order: i64,
    /// The term being learned.
    pub vocabulary: String,
    /// Its meaning or translation.
    pub definition: String,
    /// Speech locale for the vocabulary side.
    pub vocabulary_sound: String,
    /// Speech locale for the definition side.
    pub definition_sound: String,
    /// Whether the user marked this word as a favorite.
    #[serde(default)]
    pub star: bool,
}

impl Word {
    /// Return a copy with vocabulary and definition (and their sounds) exchanged.
    pub fn swapped(&self) -> Word {
        Word {
            id: self.id.clone(),
            order: self.order,
            vocabulary: self.definition.clone(),
            definition: self.vocabulary.clone(),
            vocabulary_sound: self.definition_sound.clone(),
            definition_sound: self.vocabulary_sound.clone(),
            star: self.star,
        }
    }
}

/// The deck shape consumed by every study mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyDeck {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub words: Vec<Word>,
    /// Display vocabulary and definition reversed.
    #[serde(default)]
    pub should_swap: bool,
}

impl StudyDeck {
    /// Words as every study mode sees them, with `should_swap` applied.
    pub fn study_words(&self) -> Vec<Word> {
        if self.should_swap {
            self.words.iter().map(Word::swapped).collect()
        } else {
            self.words.clone()
        }
    }

    /// Study words restricted to a track.
    pub fn track_words(&self, track: Track) -> Vec<Word> {
        let words = self.study_words();
        match track {
            Track::All => words,
            Track::Starred => words.into_iter().filter(|w| w.star).collect(),
        }
    }

    /// Number of words in a track.
    pub fn track_len(&self, track: Track) -> usize {
        match track {
            Track::All => self.words.len(),
            Track::Starred => self.words.iter().filter(|w| w.star).count(),
        }
    }

    /// Save the deck as pretty JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize deck")?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write deck to {}", path.display()))?;
        Ok(())
    }

    /// Load a deck from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read deck from {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse deck JSON: {}", path.display()))
    }
}

impl From<WordSet> for StudyDeck {
    fn from(set: WordSet) -> Self {
        Self {
            id: set.id,
            title: set.title,
            words: set.words,
            should_swap: set.should_swap,
        }
    }
}

/// A word set as authored, with its sharing metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordSet {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "authorID")]
    pub author_id: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: i64,
    #[serde(default)]
    pub words: Vec<Word>,
    #[serde(default)]
    pub should_swap: bool,
    #[serde(default)]
    pub liked_users: Vec<String>,
    #[serde(default)]
    pub likes: i64,
    #[serde(default)]
    pub word_cnt: usize,
    /// Others may fork this set.
    #[serde(default)]
    pub allow_copy: bool,
    /// Listed on the home page.
    #[serde(default)]
    pub is_public: bool,
}

/// Which subset of a word set a study session works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Track {
    #[default]
    All,
    Starred,
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Track::All => write!(f, "all"),
            Track::Starred => write!(f, "starred"),
        }
    }
}

/// Speech locales a word side may be read in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "en-GB")]
    EnGb,
    #[serde(rename = "en-AU")]
    EnAu,
    #[serde(rename = "zh-TW")]
    ZhTw,
    #[serde(rename = "zh-CN")]
    ZhCn,
}

impl Locale {
    pub const ALL: [Locale; 5] = [
        Locale::EnUs,
        Locale::EnGb,
        Locale::EnAu,
        Locale::ZhTw,
        Locale::ZhCn,
    ];

    /// Human-readable language name.
    pub fn label(&self) -> &'static str {
        match self {
            Locale::EnUs => "English (US)",
            Locale::EnGb => "English (UK)",
            Locale::EnAu => "English (Australia)",
            Locale::ZhTw => "Chinese (Traditional)",
            Locale::ZhCn => "Chinese (Simplified)",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::EnUs => "en-US",
            Locale::EnGb => "en-GB",
            Locale::EnAu => "en-AU",
            Locale::ZhTw => "zh-TW",
            Locale::ZhCn => "zh-CN",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::ALL
            .iter()
            .copied()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| format!("unknown sound locale: {s}"))
    }
}

/// Whether `sound` names a supported speech locale.
pub fn is_valid_sound(sound: &str) -> bool {
    sound.parse::<Locale>().is_ok()
}

/// How a word list is ordered for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// By `order`, ascending.
    #[default]
    Order,
    /// By vocabulary, case-insensitive A to Z.
    Alphabetical,
    /// By vocabulary, case-insensitive Z to A.
    ReverseAlphabetical,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "order" | "1" => Ok(SortOrder::Order),
            "alphabetical" | "az" | "2" => Ok(SortOrder::Alphabetical),
            "reverse-alphabetical" | "za" | "3" => Ok(SortOrder::ReverseAlphabetical),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

/// Case-insensitive comparison of two vocabulary strings.
pub fn compare_vocabulary(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Sort words in place. Sorting is stable, so equal keys keep their order.
pub fn sort_words(words: &mut [Word], order: SortOrder) {
    match order {
        SortOrder::Order => words.sort_by_key(|w| w.order),
        SortOrder::Alphabetical => {
            words.sort_by(|a, b| compare_vocabulary(&a.vocabulary, &b.vocabulary))
        }
        SortOrder::ReverseAlphabetical => {
            words.sort_by(|a, b| compare_vocabulary(&b.vocabulary, &a.vocabulary))
        }
    }
}

/// A word parsed from a bulk import, before ids and sounds are assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportWord {
    pub vocabulary: String,
    pub definition: String,
}

#[cfg(test)]
pub(crate) fn test_word(id: &str, vocabulary: &str, definition: &str, star: bool) -> Word {
    Word {
        id: id.into(),
        order: 0,
        vocabulary: vocabulary.into(),
        definition: definition.into(),
        vocabulary_sound: "en-US".into(),
        definition_sound: "zh-TW".into(),
        star,
    }
}

#[cfg(test)]
pub(crate) fn test_deck(words: &[(&str, &str, bool)]) -> StudyDeck {
    StudyDeck {
        id: "deck".into(),
        title: "Deck".into(),
        words: words
            .iter()
            .enumerate()
            .map(|(i, (v, d, star))| {
                let mut w = test_word(&format!("w{i}"), v, d, *star);
                w.order = i as i64 + 1;
                w
            })
            .collect(),
        should_swap: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_display_and_parse() {
        assert_eq!(Locale::EnUs.to_string(), "en-US");
        assert_eq!("zh-TW".parse::<Locale>().unwrap(), Locale::ZhTw);
        assert!("fr-FR".parse::<Locale>().is_err());
        assert!(is_valid_sound("en-GB"));
        assert!(!is_valid_sound("en-us"));
    }

    #[test]
    fn swapped_exchanges_sides_and_sounds() {
        let w = test_word("1", "apple", "蘋果", true).swapped();
        assert_eq!(w.vocabulary, "蘋果");
        assert_eq!(w.definition, "apple");
        assert_eq!(w.vocabulary_sound, "zh-TW");
        assert_eq!(w.definition_sound, "en-US");
        assert!(w.star);
    }

    #[test]
    fn track_words_respect_swap_and_star() {
        let mut deck = test_deck(&[("a", "1", true), ("b", "2", false)]);
        deck.should_swap = true;
        let starred = deck.track_words(Track::Starred);
        assert_eq!(starred.len(), 1);
        assert_eq!(starred[0].vocabulary, "1");
        assert_eq!(deck.track_len(Track::All), 2);
    }

    #[test]
    fn sort_orders() {
        let mut words = vec![
            test_word("1", "banana", "", false),
            test_word("2", "Apple", "", false),
            test_word("3", "cherry", "", false),
        ];
        words[0].order = 3;
        words[1].order = 1;
        words[2].order = 2;

        sort_words(&mut words, SortOrder::Alphabetical);
        let v: Vec<_> = words.iter().map(|w| w.vocabulary.as_str()).collect();
        assert_eq!(v, ["Apple", "banana", "cherry"]);

        sort_words(&mut words, SortOrder::ReverseAlphabetical);
        assert_eq!(words[0].vocabulary, "cherry");

        sort_words(&mut words, SortOrder::Order);
        let ids: Vec<_> = words.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, ["2", "3", "1"]);
    }

    #[test]
    fn deck_serde_uses_camel_case() {
        let deck = test_deck(&[("a", "1", false)]);
        let json = serde_json::to_string(&deck).unwrap();
        assert!(json.contains("\"shouldSwap\":false"));
        assert!(json.contains("\"vocabularySound\":\"en-US\""));
    }

    #[test]
    fn deck_json_roundtrip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("decks/deck.json");
        let deck = test_deck(&[("a", "1", false), ("b", "2", true)]);
        deck.save_json(&path).unwrap();
        let loaded = StudyDeck::load_json(&path).unwrap();
        assert_eq!(loaded, deck);
    }
}
