//! The `wordcard import` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use wordcard_client::config::load_config_from;
use wordcard_core::import::{insert_words, parse_import, ImportError, ImportOptions};
use wordcard_core::model::StudyDeck;

pub struct ImportArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub title: Option<String>,
    pub word_delimiter: Option<String>,
    pub pair_delimiter: Option<String>,
    pub vocabulary_sound: Option<String>,
    pub definition_sound: Option<String>,
    pub insert_at: Option<usize>,
    pub into: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

pub fn execute(args: ImportArgs) -> Result<()> {
    let config = load_config_from(args.config.as_deref())?;
    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let defaults = ImportOptions::default();
    let options = ImportOptions::new(
        args.pair_delimiter
            .as_deref()
            .map(unescape)
            .unwrap_or(defaults.pair_delimiter),
        args.word_delimiter
            .as_deref()
            .map(unescape)
            .unwrap_or(defaults.word_delimiter),
    );
    let words = parse_import(&text, &options)?;

    let mut deck = match &args.into {
        Some(path) => StudyDeck::load_json(path)?,
        None => StudyDeck {
            id: uuid::Uuid::new_v4().to_string(),
            title: default_title(&args.input),
            words: vec![],
            should_swap: false,
        },
    };
    if let Some(title) = args.title {
        deck.title = title;
    }

    let vocabulary_sound = args
        .vocabulary_sound
        .unwrap_or(config.default_vocabulary_sound);
    let definition_sound = args
        .definition_sound
        .unwrap_or(config.default_definition_sound);
    let insert_at = args.insert_at.unwrap_or(deck.words.len());

    deck.words = insert_words(
        &deck.words,
        &words,
        &vocabulary_sound,
        &definition_sound,
        insert_at,
    )
    .map_err(|e| match e {
        ImportError::NoWords => anyhow::anyhow!(
            "nothing to import; expected entries like {:?}",
            options.placeholder()
        ),
        other => other.into(),
    })?;

    deck.save_json(&args.output)?;
    println!(
        "Imported {} words into {} ({} total)",
        words.len(),
        deck.title,
        deck.words.len()
    );
    println!("Saved to: {}", args.output.display());
    Ok(())
}

fn default_title(input: &std::path::Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Imported words".to_string())
}

/// Expand `\n`, `\t` and `\\` written on the command line.
fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unescape_control_sequences() {
        assert_eq!(unescape("\\n"), "\n");
        assert_eq!(unescape(" - \\t"), " - \t");
        assert_eq!(unescape("a\\\\b"), "a\\b");
        assert_eq!(unescape("\\x"), "\\x");
        assert_eq!(unescape("end\\"), "end\\");
    }
}
