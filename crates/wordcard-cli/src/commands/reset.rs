//! The `wordcard reset` command.

use std::path::PathBuf;

use anyhow::Result;

use wordcard_client::config::load_config_from;
use wordcard_core::model::StudyDeck;
use wordcard_core::progress::reset_progress;
use wordcard_core::store::JsonFileStore;

pub fn execute(deck_path: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let deck = StudyDeck::load_json(&deck_path)?;

    let mut store = JsonFileStore::open(config.progress_path())?;
    reset_progress(&mut store, &deck.id)?;

    println!("Progress for {} cleared.", deck.title);
    Ok(())
}
