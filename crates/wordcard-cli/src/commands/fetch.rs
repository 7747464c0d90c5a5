//! The `wordcard fetch` command.

use std::path::PathBuf;

use anyhow::Result;

use wordcard_client::config::{create_client, load_config_from};
use wordcard_client::DeckSource;

pub async fn execute(id: String, output: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let client = create_client(&config)?;

    let deck = client.fetch_deck(&id, None).await?;
    deck.save_json(&output)?;

    println!("Fetched {} ({} words)", deck.title, deck.words.len());
    println!("Saved to: {}", output.display());
    Ok(())
}
