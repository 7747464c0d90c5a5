//! Grade sheets: the persisted result of a study session.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::grade::{GradeEntry, GradeSummary};
use crate::model::Track;
use crate::session::StudySession;
use crate::traits::StudyMode;

/// Snapshot of a session's score and mistakes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeSheet {
    /// Unique sheet identifier.
    pub id: Uuid,
    /// When the sheet was taken.
    pub created_at: DateTime<Utc>,
    pub deck_id: String,
    pub deck_title: String,
    /// Study mode name, e.g. `multichoice` or `cloze`.
    pub mode: String,
    pub track: Track,
    pub summary: GradeSummary,
    /// Wrong and skipped questions, in the order they were answered.
    pub entries: Vec<GradeEntry>,
}

impl GradeSheet {
    /// Take a sheet of the session's active track.
    pub fn from_session<M: StudyMode>(session: &StudySession<M>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            deck_id: session.deck_id().to_string(),
            deck_title: session.deck().title.clone(),
            mode: M::NAME.to_string(),
            track: session.track(),
            summary: session.summary(),
            entries: session.grades().to_vec(),
        }
    }

    /// Number of skipped entries.
    pub fn skipped(&self) -> usize {
        self.entries.iter().filter(|e| e.skip).count()
    }

    /// Save the sheet as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize grade sheet")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write grade sheet to {}", path.display()))?;
        Ok(())
    }

    /// Load a sheet from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read grade sheet from {}", path.display()))?;
        serde_json::from_str(&content).context("failed to parse grade sheet JSON")
    }

    /// Percentage-point change against an earlier sheet.
    pub fn delta(&self, previous: &GradeSheet) -> i64 {
        i64::from(self.summary.percentage) - i64::from(previous.summary.percentage)
    }
}
