//! Form validation for word sets, accounts and feedback.
//!
//! Every check returns the first problem found as a [`FieldError`], the
//! inline message a form shows next to the offending field. Lengths are
//! counted in characters.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{is_valid_sound, WordSet};

pub const MAX_TITLE_CHARS: usize = 50;
pub const MAX_DESCRIPTION_CHARS: usize = 150;
pub const MAX_VOCABULARY_CHARS: usize = 100;
pub const MAX_DEFINITION_CHARS: usize = 300;
pub const MAX_USERNAME_CHARS: usize = 12;
pub const MIN_PASSWORD_CHARS: usize = 8;
pub const MAX_PASSWORD_CHARS: usize = 20;
pub const MAX_FEEDBACK_TITLE_CHARS: usize = 50;
pub const MAX_FEEDBACK_CONTENT_CHARS: usize = 300;

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("valid regex"));
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));
static PASSWORD_CHARSET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\d@$!%*?&]+$").expect("valid regex"));

const PASSWORD_SPECIALS: &str = "@$!%*?&";

/// An inline validation message attached to a form field.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn chars(s: &str) -> usize {
    s.chars().count()
}

/// Check a word set before it is created or saved.
pub fn validate_word_set(set: &WordSet) -> Result<(), FieldError> {
    if set.title.trim().is_empty() {
        return Err(FieldError::new("title", "title must not be empty"));
    }
    if chars(&set.title) > MAX_TITLE_CHARS {
        return Err(FieldError::new(
            "title",
            format!("title must not exceed {MAX_TITLE_CHARS} characters"),
        ));
    }
    if chars(&set.description) > MAX_DESCRIPTION_CHARS {
        return Err(FieldError::new(
            "description",
            format!("description must not exceed {MAX_DESCRIPTION_CHARS} characters"),
        ));
    }
    for (i, word) in set.words.iter().enumerate() {
        let field = format!("words[{i}]");
        if word.vocabulary.is_empty() {
            return Err(FieldError::new(field, "vocabulary must not be empty"));
        }
        if chars(&word.vocabulary) > MAX_VOCABULARY_CHARS {
            return Err(FieldError::new(
                field,
                format!("vocabulary must not exceed {MAX_VOCABULARY_CHARS} characters"),
            ));
        }
        if word.definition.is_empty() {
            return Err(FieldError::new(field, "definition must not be empty"));
        }
        if chars(&word.definition) > MAX_DEFINITION_CHARS {
            return Err(FieldError::new(
                field,
                format!("definition must not exceed {MAX_DEFINITION_CHARS} characters"),
            ));
        }
        if !is_valid_sound(&word.vocabulary_sound) {
            return Err(FieldError::new(
                field,
                format!("invalid vocabulary sound: {}", word.vocabulary_sound),
            ));
        }
        if !is_valid_sound(&word.definition_sound) {
            return Err(FieldError::new(
                field,
                format!("invalid definition sound: {}", word.definition_sound),
            ));
        }
    }
    Ok(())
}

/// Check a user name. `reserved` names (the official account) are refused.
pub fn validate_username(name: &str, reserved: &[&str]) -> Result<(), FieldError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(FieldError::new("username", "user name must not be empty"));
    }
    if chars(name) > MAX_USERNAME_CHARS {
        return Err(FieldError::new(
            "username",
            format!("user name must not exceed {MAX_USERNAME_CHARS} characters"),
        ));
    }
    if reserved.contains(&name) {
        return Err(FieldError::new(
            "username",
            format!("user name must not be {name}"),
        ));
    }
    if !USERNAME_RE.is_match(name) {
        return Err(FieldError::new(
            "username",
            "user name may only contain letters, digits and underscores",
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), FieldError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(FieldError::new("email", "email must not be empty"));
    }
    if !EMAIL_RE.is_match(email) {
        return Err(FieldError::new("email", "invalid email address"));
    }
    Ok(())
}

/// Check a password's length, character classes and charset.
pub fn validate_password(password: &str) -> Result<(), FieldError> {
    let trimmed = password.trim();
    let len = chars(trimmed);
    if !(MIN_PASSWORD_CHARS..=MAX_PASSWORD_CHARS).contains(&len) {
        return Err(FieldError::new(
            "password",
            format!("password must be {MIN_PASSWORD_CHARS} to {MAX_PASSWORD_CHARS} characters"),
        ));
    }
    if password.chars().any(char::is_whitespace) {
        return Err(FieldError::new("password", "password must not contain spaces"));
    }
    let has_upper = trimmed.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = trimmed.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = trimmed.chars().any(|c| c.is_ascii_digit());
    if !(has_upper && has_lower && has_digit) {
        return Err(FieldError::new(
            "password",
            "password needs an uppercase letter, a lowercase letter and a digit",
        ));
    }
    if !trimmed.chars().any(|c| PASSWORD_SPECIALS.contains(c)) {
        return Err(FieldError::new(
            "password",
            format!("password needs one special character ({PASSWORD_SPECIALS})"),
        ));
    }
    if !PASSWORD_CHARSET_RE.is_match(trimmed) {
        return Err(FieldError::new("password", "password contains invalid characters"));
    }
    Ok(())
}

/// Check a password confirmation field.
pub fn validate_password_confirmation(password: &str, confirmation: &str) -> Result<(), FieldError> {
    validate_password(confirmation).map_err(|e| FieldError::new("confirmPassword", e.message))?;
    if password.trim() != confirmation.trim() {
        return Err(FieldError::new("confirmPassword", "passwords do not match"));
    }
    Ok(())
}

pub fn validate_feedback(title: &str, content: &str) -> Result<(), FieldError> {
    if title.trim().is_empty() {
        return Err(FieldError::new("title", "title must not be empty"));
    }
    if chars(title) > MAX_FEEDBACK_TITLE_CHARS {
        return Err(FieldError::new(
            "title",
            format!("title must not exceed {MAX_FEEDBACK_TITLE_CHARS} characters"),
        ));
    }
    if content.trim().is_empty() {
        return Err(FieldError::new("content", "content must not be empty"));
    }
    if chars(content) > MAX_FEEDBACK_CONTENT_CHARS {
        return Err(FieldError::new(
            "content",
            format!("content must not exceed {MAX_FEEDBACK_CONTENT_CHARS} characters"),
        ));
    }
    Ok(())
}
