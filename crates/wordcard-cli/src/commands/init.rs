//! The `wordcard init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create wordcard.toml
    if std::path::Path::new("wordcard.toml").exists() {
        println!("wordcard.toml already exists, skipping.");
    } else {
        std::fs::write("wordcard.toml", SAMPLE_CONFIG)?;
        println!("Created wordcard.toml");
    }

    // Create sample deck
    std::fs::create_dir_all("decks")?;
    let sample_path = std::path::Path::new("decks/sample.json");
    if sample_path.exists() {
        println!("decks/sample.json already exists, skipping.");
    } else {
        std::fs::write(sample_path, SAMPLE_DECK)?;
        println!("Created decks/sample.json");
    }

    println!("\nNext steps:");
    println!("  1. Edit wordcard.toml to point at your word-set server");
    println!("  2. Run: wordcard validate --deck decks/sample.json");
    println!("  3. Run: wordcard quiz --deck decks/sample.json");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# wordcard configuration

# WORDCARD_API_URL overrides this; ${VAR} references are expanded
api_base_url = "http://localhost:5000/api"
timeout_secs = 30
data_dir = "./wordcard-data"

# Timers, in milliseconds
feedback_ms = 2000
grade_modal_delay_ms = 200
notice_ms = 3500
search_debounce_ms = 2000
autoplay_lead_ms = 300
autoplay_hold_ms = 2000

# Speech locales for imported words
default_vocabulary_sound = "en-US"
default_definition_sound = "zh-TW"
"#;

const SAMPLE_DECK: &str = r#"{
  "id": "sample",
  "title": "Fruit",
  "shouldSwap": false,
  "words": [
    {
      "id": "sample-1",
      "order": 1,
      "vocabulary": "apple",
      "definition": "蘋果",
      "vocabularySound": "en-US",
      "definitionSound": "zh-TW",
      "star": true
    },
    {
      "id": "sample-2",
      "order": 2,
      "vocabulary": "banana",
      "definition": "香蕉",
      "vocabularySound": "en-US",
      "definitionSound": "zh-TW",
      "star": false
    },
    {
      "id": "sample-3",
      "order": 3,
      "vocabulary": "cherry",
      "definition": "櫻桃",
      "vocabularySound": "en-US",
      "definitionSound": "zh-TW",
      "star": false
    },
    {
      "id": "sample-4",
      "order": 4,
      "vocabulary": "grape",
      "definition": "葡萄",
      "vocabularySound": "en-US",
      "definitionSound": "zh-TW",
      "star": true
    },
    {
      "id": "sample-5",
      "order": 5,
      "vocabulary": "pear",
      "definition": "梨子",
      "vocabularySound": "en-US",
      "definitionSound": "zh-TW",
      "star": false
    }
  ]
}
"#;
