//! The `wordcard report` command.

use std::path::{Path, PathBuf};

use anyhow::Result;

use wordcard_client::config::load_config_from;
use wordcard_core::cloze::Cloze;
use wordcard_core::model::StudyDeck;
use wordcard_core::multichoice::MultiChoice;
use wordcard_core::report::GradeSheet;
use wordcard_core::traits::StudyMode;
use wordcard_report::{write_report, ReportFormat};

use crate::{FormatArg, ModeArg};

pub fn execute(
    deck_path: PathBuf,
    mode: ModeArg,
    format: FormatArg,
    output: PathBuf,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let deck = StudyDeck::load_json(&deck_path)?;
    let mode_name = match mode {
        ModeArg::Multichoice => MultiChoice::NAME,
        ModeArg::Cloze => Cloze::NAME,
    };
    let format = match format {
        FormatArg::Html => ReportFormat::Html,
        FormatArg::Markdown => ReportFormat::Markdown,
    };

    let history = load_history(&config.grades_dir(), &deck.id, mode_name);
    if history.is_empty() {
        eprintln!("No {mode_name} grade sheets for {} yet.", deck.title);
    }

    write_report(&history, format, &output)?;
    eprintln!(
        "{} report ({} sessions): {}",
        format,
        history.len(),
        output.display()
    );
    Ok(())
}

/// Grade sheets of one deck and mode, oldest first. Unreadable files are
/// skipped.
fn load_history(dir: &Path, deck_id: &str, mode: &str) -> Vec<GradeSheet> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut sheets: Vec<GradeSheet> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .filter_map(|p| match GradeSheet::load_json(&p) {
            Ok(sheet) => Some(sheet),
            Err(e) => {
                tracing::warn!("skipping {}: {e:#}", p.display());
                None
            }
        })
        .filter(|s| s.deck_id == deck_id && s.mode == mode)
        .collect();
    sheets.sort_by_key(|s| s.created_at);
    sheets
}
