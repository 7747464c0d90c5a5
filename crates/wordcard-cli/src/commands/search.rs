//! The `wordcard search` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use wordcard_client::config::{create_client, load_config_from};
use wordcard_client::DeckSource;

pub async fn execute(query: String, offset: usize, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let client = create_client(&config)?;

    let result = client.search(&query, offset, None).await?;
    if result.word_set_cards.is_empty() {
        println!("No word sets match {query:?}.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Title", "Words", "Likes", "Id"]);
    for card in &result.word_set_cards {
        table.add_row(vec![
            Cell::new(&card.title),
            Cell::new(card.word_cnt),
            Cell::new(card.likes),
            Cell::new(&card.id),
        ]);
    }
    println!("{table}");

    if result.have_more {
        println!(
            "More results: wordcard search --query {query:?} --offset {}",
            offset + result.word_set_cards.len()
        );
    }
    Ok(())
}
