use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnswerKeyError {
    #[error("answer key cannot be empty")]
    Empty,
}

/// Canonical answer for a problem, as published in the contest answer key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerKey(String);

impl AnswerKey {
    /// Parse a raw answer-key string.
    ///
    /// # Errors
    ///
    /// Returns `AnswerKeyError::Empty` when the input is blank.
    pub fn parse(raw: impl Into<String>) -> Result<Self, AnswerKeyError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(AnswerKeyError::Empty);
        }
        Ok(Self(raw))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whitespace-trimmed, case-insensitive comparison against a candidate
    /// answer.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        candidate.trim().eq_ignore_ascii_case(self.0.trim())
    }
}

/// The user's attempt at the currently shown problem.
///
/// Created fresh when a problem loads and discarded when the next load
/// begins; it never outlives its problem.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attempt {
    user_answer: String,
    verdict: Option<bool>,
    started_at: Option<DateTime<Utc>>,
    submitted_at: Option<DateTime<Utc>>,
}

impl Attempt {
    /// A blank attempt whose timer starts now.
    #[must_use]
    pub fn started(now: DateTime<Utc>) -> Self {
        Self {
            started_at: Some(now),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn user_answer(&self) -> &str {
        &self.user_answer
    }

    #[must_use]
    pub fn verdict(&self) -> Option<bool> {
        self.verdict
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.submitted_at
    }

    /// Update the working answer text. Any previous verdict is cleared.
    pub fn set_answer(&mut self, raw: impl Into<String>) {
        self.user_answer = raw.into();
        self.verdict = None;
        self.submitted_at = None;
    }

    /// Record the graded verdict for the current answer text.
    pub fn record_verdict(&mut self, verdict: bool, submitted_at: DateTime<Utc>) {
        self.verdict = Some(verdict);
        self.submitted_at = Some(submitted_at);
    }

    /// Time between the problem being shown and the answer being graded.
    #[must_use]
    pub fn time_to_answer(&self) -> Option<Duration> {
        match (self.started_at, self.submitted_at) {
            (Some(started), Some(submitted)) if submitted >= started => Some(submitted - started),
            _ => None,
        }
    }
}
