//! Markdown report generator, for pasting into notes.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use wordcard_core::report::GradeSheet;

/// Escape characters that would break a table cell.
fn cell(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('|', "\\|")
        .replace('\n', " ")
}

/// Generate a Markdown report from a deck's grade sheets, oldest first.
pub fn generate_markdown(history: &[GradeSheet]) -> String {
    let mut md = String::new();
    let Some(latest) = history.last() else {
        md.push_str("# wordcard grades\n\nNo grade sheets recorded yet.\n");
        return md;
    };

    let summary = &latest.summary;
    let _ = writeln!(md, "# {}\n", latest.deck_title);
    let _ = writeln!(
        md,
        "Mode: **{}** | Track: {} | {}\n",
        latest.mode,
        latest.track,
        latest.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(
        md,
        "**Score: {}%** ({}/{} correct, {} answered, {} skipped)\n",
        summary.percentage,
        summary.correct,
        summary.total,
        summary.answered,
        latest.skipped()
    );

    if history.len() > 1 {
        md.push_str("## History\n\n| Date | Score | Change |\n|---|---|---|\n");
        for (i, sheet) in history.iter().enumerate() {
            let change = match i {
                0 => "-".to_string(),
                _ => format!("{:+}", sheet.delta(&history[i - 1])),
            };
            let _ = writeln!(
                md,
                "| {} | {}% | {} |",
                sheet.created_at.format("%Y-%m-%d %H:%M"),
                sheet.summary.percentage,
                change
            );
        }
        md.push('\n');
    }

    md.push_str("## To review\n\n");
    if latest.entries.is_empty() {
        md.push_str("Nothing to review.\n");
        return md;
    }
    md.push_str("| # | Question | Answer | Result |\n|---|---|---|---|\n");
    for entry in &latest.entries {
        let _ = writeln!(
            md,
            "| {} | {} | {} | {} |",
            entry.num_of_question,
            cell(&entry.q),
            cell(&entry.ans),
            if entry.skip { "skipped" } else { "wrong" }
        );
    }
    md
}

/// Write a Markdown report to a file.
pub fn write_markdown_report(history: &[GradeSheet], path: &Path) -> Result<()> {
    let md = generate_markdown(history);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, md)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}
