//! Shared error types for the services crate.

use thiserror::Error;

/// Errors emitted by the remote practice API client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("practice service returned status {0}")]
    Status(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by the practice session state machine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no problem is loaded")]
    NoProblem,
    #[error("solution content is already shown for this problem")]
    SolutionShown,
    #[error("a solution request is already pending")]
    SolutionPending,
}
