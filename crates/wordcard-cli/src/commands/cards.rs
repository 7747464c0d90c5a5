//! The `wordcard cards` command.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use wordcard_client::config::load_config_from;
use wordcard_core::flashcard::FlashcardDeck;
use wordcard_core::model::StudyDeck;
use wordcard_runtime::autoplay::{AutoPlayEvent, AutoPlayer, Speaker};

/// Prints what would be spoken.
struct PrintSpeaker;

#[async_trait]
impl Speaker for PrintSpeaker {
    async fn speak(&self, text: &str, locale: &str) -> Result<()> {
        println!("  [{locale}] {text}");
        Ok(())
    }
}

pub async fn execute(
    deck_path: PathBuf,
    starred: bool,
    play: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let deck = StudyDeck::load_json(&deck_path)?;
    let cards = FlashcardDeck::new(&deck, starred);
    if cards.is_empty() {
        println!("No cards to show.");
        return Ok(());
    }

    println!("{} ({} cards)", deck.title, cards.len());
    if !play {
        for (i, card) in cards.cards().iter().enumerate() {
            let star = if card.star { " *" } else { "" };
            println!("{:>3}. {} / {}{star}", i + 1, card.vocabulary, card.definition);
        }
        return Ok(());
    }

    let config = load_config_from(config_path.as_deref())?;
    let shared = Arc::new(Mutex::new(cards));
    let (mut player, mut events) =
        AutoPlayer::new(Arc::clone(&shared), Arc::new(PrintSpeaker), config.timings());
    player.start();

    while let Some(event) = events.recv().await {
        match event {
            AutoPlayEvent::Spoke { index } => {
                let total = shared.lock().map(|d| d.len()).unwrap_or_default();
                println!("Card {}/{total}", index + 1);
            }
            AutoPlayEvent::Flipped { index } => {
                let back = shared
                    .lock()
                    .ok()
                    .and_then(|d| d.cards().get(index).map(|w| w.definition.clone()));
                if let Some(back) = back {
                    println!("  -> {back}");
                }
            }
            AutoPlayEvent::Finished | AutoPlayEvent::Stopped => break,
        }
    }
    player.stop();
    Ok(())
}
