//! wordcard-report — Render grade sheets as HTML or Markdown.

pub mod html;
pub mod markdown;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::Result;

use wordcard_core::report::GradeSheet;

pub use html::{generate_html, write_html_report};
pub use markdown::{generate_markdown, write_markdown_report};

/// Output format of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Html,
    Markdown,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Html => write!(f, "html"),
            ReportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(ReportFormat::Html),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            other => Err(format!("unknown report format: {other}")),
        }
    }
}

/// Write `history` to `path` in the given format.
pub fn write_report(history: &[GradeSheet], format: ReportFormat, path: &Path) -> Result<()> {
    match format {
        ReportFormat::Html => write_html_report(history, path),
        ReportFormat::Markdown => write_markdown_report(history, path),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parses() {
        assert_eq!("HTML".parse::<ReportFormat>().unwrap(), ReportFormat::Html);
        assert_eq!("md".parse::<ReportFormat>().unwrap(), ReportFormat::Markdown);
        assert!("pdf".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn write_report_dispatches_on_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grades.md");
        write_report(&[test_support::sheet(100)], ReportFormat::Markdown, &path).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().starts_with("# Fruit & Veg"));
    }
}
