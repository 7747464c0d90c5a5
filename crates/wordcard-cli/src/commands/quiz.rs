//! The `wordcard quiz` command.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;

use wordcard_core::multichoice::MultiChoice;

use crate::commands::study::{self, Input};
use crate::StudyArgs;

pub async fn execute(args: StudyArgs, config_path: Option<PathBuf>) -> Result<()> {
    let (driver, config) = study::open::<MultiChoice>(&args, config_path.as_deref())?;
    let (title, len, track) = driver.with_session(|s| (s.deck().title.clone(), s.len(), s.track()));
    println!("{title}: {len} questions ({track} words)");
    println!("Answer with 1-4, s to show the answer, r to restart, q to quit.");

    let mut input = Input::stdin();
    loop {
        if driver.with_session(|s| s.is_complete()) {
            study::finish(&driver, &config)?;
            return Ok(());
        }
        study::seek_unanswered(&driver)?;

        let (cursor, question) = driver.with_session(|s| (s.cursor(), s.current().cloned()));
        let Some(question) = question else {
            anyhow::bail!("no question at position {}", cursor + 1);
        };

        println!();
        println!("[{}/{len}] {}", cursor + 1, question.q.0);
        for (i, choice) in question.choices.iter().enumerate() {
            println!("  {}. {}", i + 1, choice.description);
        }
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = input.next_line().await? else {
            println!();
            println!("Progress saved.");
            return Ok(());
        };
        let answer = question
            .answer()
            .map(|c| c.description.as_str())
            .unwrap_or_default();

        match line.trim() {
            "q" => {
                driver.persist()?;
                println!("Progress saved.");
                return Ok(());
            }
            "r" => study::restart(&driver)?,
            "s" => {
                driver.skip().await?;
                println!("Answer: {answer}");
            }
            other => match other.parse::<usize>() {
                Ok(n) if (1..=question.choices.len()).contains(&n) => {
                    let completion = driver.answer(&(n - 1)).await?;
                    if completion.correct {
                        println!("Correct!");
                    } else {
                        println!("Wrong. Answer: {answer}");
                    }
                }
                _ => println!(
                    "Enter 1-{}, s, r or q.",
                    question.choices.len()
                ),
            },
        }
    }
}
