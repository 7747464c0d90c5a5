//! Error types shared across the workspace.
//!
//! `ApiFailure` is the wire-level tagged union the remote API and the
//! client agree on. It lives here so study code and notices can react to
//! remote failures without depending on the HTTP client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Discriminant of an API envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseKind {
    Success,
    Error,
    AbortError,
}

/// Message body of a failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailurePayload {
    pub message: String,
}

/// A failed remote request, shaped like `{type, payload: {message}}`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{}", .payload.message)]
pub struct ApiFailure {
    #[serde(rename = "type")]
    pub kind: ResponseKind,
    pub payload: FailurePayload,
}

impl ApiFailure {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ResponseKind::Error,
            payload: FailurePayload {
                message: message.into(),
            },
        }
    }

    pub fn aborted() -> Self {
        Self {
            kind: ResponseKind::AbortError,
            payload: FailurePayload {
                message: "request was aborted".into(),
            },
        }
    }

    pub fn message(&self) -> &str {
        &self.payload.message
    }

    /// Returns `true` if the request was cancelled by the caller.
    pub fn is_abort(&self) -> bool {
        self.kind == ResponseKind::AbortError
    }
}

/// Errors from drawing random indices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SamplingError {
    #[error("cannot draw {wanted} distinct indices, only {available} available")]
    NotEnoughCandidates { wanted: usize, available: usize },
}

/// Errors raised by a study session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Input arrived during the feedback window.
    #[error("session is showing feedback, input is blocked")]
    Busy,

    /// The current question already has a record.
    #[error("question {0} is already answered")]
    AlreadyAnswered(usize),

    /// There is no feedback to complete.
    #[error("no answer is awaiting feedback")]
    NothingPending,

    /// The selected choice does not exist.
    #[error("choice {index} is out of range ({count} choices)")]
    InvalidChoice { index: usize, count: usize },

    /// The active track has no questions.
    #[error("no questions to study")]
    Empty,

    #[error(transparent)]
    Sampling(#[from] SamplingError),
}
