//! The `wordcard validate` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use wordcard_client::Schema;
use wordcard_core::model::{StudyDeck, WordSet};
use wordcard_core::validation::validate_word_set;

pub fn execute(deck_path: PathBuf) -> Result<()> {
    let decks = if deck_path.is_dir() {
        load_deck_directory(&deck_path)?
    } else {
        vec![StudyDeck::load_json(&deck_path)?]
    };

    let mut total_warnings = 0;

    for deck in &decks {
        println!("Word set: {} ({} words)", deck.title, deck.words.len());

        let warnings = deck_warnings(deck);
        for w in &warnings {
            println!("  WARNING: {w}");
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All word sets valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}

fn deck_warnings(deck: &StudyDeck) -> Vec<String> {
    let mut warnings = Vec::new();
    if let Err(e) = deck.validate() {
        warnings.push(e);
    }

    let set = WordSet {
        id: deck.id.clone(),
        title: deck.title.clone(),
        description: String::new(),
        author_id: String::new(),
        created_at: String::new(),
        updated_at: 0,
        words: deck.words.clone(),
        should_swap: deck.should_swap,
        liked_users: vec![],
        likes: 0,
        word_cnt: deck.words.len(),
        allow_copy: false,
        is_public: false,
    };
    if let Err(e) = validate_word_set(&set) {
        warnings.push(e.to_string());
    }
    if deck.words.is_empty() {
        warnings.push("word set has no words".to_string());
    }
    warnings
}

/// Load every `*.json` deck in a directory, sorted by file name.
fn load_deck_directory(dir: &Path) -> Result<Vec<StudyDeck>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();
    paths.iter().map(|p| StudyDeck::load_json(p)).collect()
}
