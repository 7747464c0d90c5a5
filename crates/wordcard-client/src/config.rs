//! Configuration and client factory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use wordcard_core::model::is_valid_sound;
use wordcard_runtime::Timings;

use crate::client::ApiClient;

/// Top-level wordcard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordcardConfig {
    /// Base URL of the word-set API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Directory for progress and grade sheets.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// How long an answer's feedback is shown before moving on.
    #[serde(default = "default_feedback_ms")]
    pub feedback_ms: u64,
    #[serde(default = "default_grade_modal_delay_ms")]
    pub grade_modal_delay_ms: u64,
    #[serde(default = "default_notice_ms")]
    pub notice_ms: u64,
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    #[serde(default = "default_autoplay_hold_ms")]
    pub autoplay_hold_ms: u64,
    #[serde(default = "default_autoplay_lead_ms")]
    pub autoplay_lead_ms: u64,
    /// Speech locale for imported vocabulary.
    #[serde(default = "default_vocabulary_sound")]
    pub default_vocabulary_sound: String,
    /// Speech locale for imported definitions.
    #[serde(default = "default_definition_sound")]
    pub default_definition_sound: String,
}

fn default_api_base_url() -> String {
    "http://localhost:5000/api".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_data_dir() -> PathBuf {
    PathBuf::from("./wordcard-data")
}
fn default_feedback_ms() -> u64 {
    2000
}
fn default_grade_modal_delay_ms() -> u64 {
    200
}
fn default_notice_ms() -> u64 {
    3500
}
fn default_search_debounce_ms() -> u64 {
    2000
}
fn default_autoplay_hold_ms() -> u64 {
    2000
}
fn default_autoplay_lead_ms() -> u64 {
    300
}
fn default_vocabulary_sound() -> String {
    "en-US".to_string()
}
fn default_definition_sound() -> String {
    "zh-TW".to_string()
}

impl Default for WordcardConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout_secs(),
            data_dir: default_data_dir(),
            feedback_ms: default_feedback_ms(),
            grade_modal_delay_ms: default_grade_modal_delay_ms(),
            notice_ms: default_notice_ms(),
            search_debounce_ms: default_search_debounce_ms(),
            autoplay_hold_ms: default_autoplay_hold_ms(),
            autoplay_lead_ms: default_autoplay_lead_ms(),
            default_vocabulary_sound: default_vocabulary_sound(),
            default_definition_sound: default_definition_sound(),
        }
    }
}

impl WordcardConfig {
    /// Timer durations for the study runtime.
    pub fn timings(&self) -> Timings {
        Timings {
            feedback: Duration::from_millis(self.feedback_ms),
            grade_modal_delay: Duration::from_millis(self.grade_modal_delay_ms),
            notice: Duration::from_millis(self.notice_ms),
            search_debounce: Duration::from_millis(self.search_debounce_ms),
            autoplay_lead: Duration::from_millis(self.autoplay_lead_ms),
            autoplay_hold: Duration::from_millis(self.autoplay_hold_ms),
        }
    }

    /// Path of the progress store inside the data directory.
    pub fn progress_path(&self) -> PathBuf {
        self.data_dir.join("progress.json")
    }

    /// Directory for saved grade sheets.
    pub fn grades_dir(&self) -> PathBuf {
        self.data_dir.join("grades")
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `wordcard.toml` in the current directory
/// 2. `~/.config/wordcard/config.toml`
///
/// `WORDCARD_API_URL` overrides the API base URL.
pub fn load_config() -> Result<WordcardConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<WordcardConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("wordcard.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match &config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<WordcardConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => WordcardConfig::default(),
    };

    if let Ok(url) = std::env::var("WORDCARD_API_URL") {
        config.api_base_url = url;
    }

    config.api_base_url = resolve_env_vars(&config.api_base_url);
    config.data_dir = PathBuf::from(resolve_env_vars(&config.data_dir.to_string_lossy()));

    for sound in [&config.default_vocabulary_sound, &config.default_definition_sound] {
        if !is_valid_sound(sound) {
            anyhow::bail!("unsupported speech locale in config: {sound}");
        }
    }

    tracing::debug!(
        path = ?config_path,
        api = %config.api_base_url,
        "configuration loaded"
    );
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("wordcard"))
}

/// Create an API client from the configuration.
pub fn create_client(config: &WordcardConfig) -> Result<ApiClient> {
    ApiClient::new(
        &config.api_base_url,
        Duration::from_secs(config.timeout_secs),
    )
    .with_context(|| format!("failed to create API client for {}", config.api_base_url))
}
