//! The `wordcard cloze` command.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;

use wordcard_core::cloze::{hint_mask, Cloze};

use crate::commands::study::{self, Input};
use crate::StudyArgs;

pub async fn execute(args: StudyArgs, config_path: Option<PathBuf>) -> Result<()> {
    let (driver, config) = study::open::<Cloze>(&args, config_path.as_deref())?;
    let (title, len, track) = driver.with_session(|s| (s.deck().title.clone(), s.len(), s.track()));
    println!("{title}: {len} questions ({track} words)");
    println!("Type the word. ? shows a hint, an empty line shows the answer, :r restarts, :q quits.");

    let mut input = Input::stdin();
    loop {
        if driver.with_session(|s| s.is_complete()) {
            study::finish(&driver, &config)?;
            return Ok(());
        }
        study::seek_unanswered(&driver)?;

        let (cursor, question, hint) =
            driver.with_session(|s| (s.cursor(), s.current().cloned(), s.hint_open()));
        let Some(question) = question else {
            anyhow::bail!("no question at position {}", cursor + 1);
        };

        println!();
        println!("[{}/{len}] {}", cursor + 1, question.q.0);
        if hint {
            println!("Hint: {}", hint_mask(&question.ans));
        }
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = input.next_line().await? else {
            println!();
            println!("Progress saved.");
            return Ok(());
        };

        match line.trim() {
            ":q" => {
                driver.persist()?;
                println!("Progress saved.");
                return Ok(());
            }
            ":r" => study::restart(&driver)?,
            "?" => {
                driver.with_session(|s| s.toggle_hint());
            }
            "" => {
                driver.skip().await?;
                println!("Answer: {}", question.ans);
            }
            typed => {
                let completion = driver.answer(typed).await?;
                if completion.correct {
                    println!("Correct!");
                } else {
                    println!("Wrong. Answer: {}", question.ans);
                }
            }
        }
    }
}
