//! Shared plumbing for the interactive quiz commands.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use wordcard_client::config::{load_config_from, WordcardConfig};
use wordcard_core::error::SessionError;
use wordcard_core::model::{StudyDeck, Track};
use wordcard_core::report::GradeSheet;
use wordcard_core::session::StudySession;
use wordcard_core::store::JsonFileStore;
use wordcard_core::traits::StudyMode;
use wordcard_runtime::driver::SessionDriver;

use crate::StudyArgs;

pub type Driver<M> = SessionDriver<M, JsonFileStore>;

/// Load the deck and its saved progress and wrap them in a driver.
pub fn open<M: StudyMode>(
    args: &StudyArgs,
    config_path: Option<&Path>,
) -> Result<(Driver<M>, WordcardConfig)> {
    let config = load_config_from(config_path)?;
    let deck = StudyDeck::load_json(&args.deck)?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut store = JsonFileStore::open(config.progress_path())?;
    let mut session = StudySession::<M>::resume(deck, args.random, &mut store, &mut rng)?;
    if args.random {
        session.set_random(true, &mut rng)?;
    }
    if args.starred {
        session.set_track(Track::Starred)?;
    }
    if session.is_empty() {
        anyhow::bail!(
            "no {} words to study in {}",
            session.track(),
            args.deck.display()
        );
    }

    let mut timings = config.timings();
    if let Some(ms) = args.feedback_ms {
        timings.feedback = Duration::from_millis(ms);
    }

    let driver = SessionDriver::new(session, store, timings);
    driver.persist()?;
    Ok((driver, config))
}

/// Move the cursor to the first unanswered question of the active track.
pub fn seek_unanswered<M: StudyMode>(driver: &Driver<M>) -> Result<()> {
    driver.with_session(|s| -> Result<(), SessionError> {
        if s.current_record().is_none() {
            return Ok(());
        }
        if let Some(target) = s.records().iter().position(Option::is_none) {
            s.from_start()?;
            while s.cursor() < target {
                s.next()?;
            }
        }
        Ok(())
    })?;
    Ok(())
}

/// Restart the active track and save.
pub fn restart<M: StudyMode>(driver: &Driver<M>) -> Result<()> {
    driver.with_session(|s| s.restart())?;
    driver.persist()?;
    println!("Restarted.");
    Ok(())
}

/// Print the score, list mistakes and save a grade sheet.
pub fn finish<M: StudyMode>(driver: &Driver<M>, config: &WordcardConfig) -> Result<PathBuf> {
    let sheet = driver.with_session(|s| {
        s.close_grade_modal();
        GradeSheet::from_session(&*s)
    });
    let summary = &sheet.summary;

    println!();
    println!(
        "Score: {}% ({}/{} correct)",
        summary.percentage, summary.correct, summary.total
    );
    if sheet.entries.is_empty() {
        println!("No mistakes.");
    } else {
        println!("To review:");
        for entry in &sheet.entries {
            let tag = if entry.skip { " (skipped)" } else { "" };
            println!(
                "  {}. {} -> {}{tag}",
                entry.num_of_question, entry.q, entry.ans
            );
        }
    }

    let path = sheet_path(config, &sheet);
    sheet.save_json(&path)?;
    println!("Grade sheet saved to: {}", path.display());
    Ok(path)
}

fn sheet_path(config: &WordcardConfig, sheet: &GradeSheet) -> PathBuf {
    config.grades_dir().join(format!(
        "{}-{}-{}.json",
        sheet.deck_id,
        sheet.mode,
        sheet.created_at.format("%Y%m%dT%H%M%S%.3f")
    ))
}

/// Line reader over stdin. `None` means end of input.
pub struct Input {
    lines: Lines<BufReader<Stdin>>,
}

impl Input {
    pub fn stdin() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    pub async fn next_line(&mut self) -> Result<Option<String>> {
        self.lines
            .next_line()
            .await
            .context("failed to read from stdin")
    }
}
