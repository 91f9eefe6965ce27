//! Client seams for the remote practice service.
//!
//! The HTTP implementation speaks the pinned JSON contract; tests inject
//! their own implementations of the traits.

mod http;
mod wire;

pub use http::HttpPracticeApi;
pub use wire::{
    AdaptiveResponse, ExplainRequest, ExplainResponse, ProblemResponse, SolutionResponse,
};

use async_trait::async_trait;
use practice_core::model::{Problem, SolutionKey};

use crate::error::ApiError;

/// Fetches problems from the remote service.
#[async_trait]
pub trait ProblemsApi: Send + Sync {
    /// Fetch a random problem.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-success status.
    async fn random_problem(&self) -> Result<Problem, ApiError>;
}

/// Fetches AI explanation and solution content from the remote service.
#[async_trait]
pub trait SolutionsApi: Send + Sync {
    /// Ask for an explanation of an incorrect attempt.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-success status.
    async fn adaptive_explain(
        &self,
        request: ExplainRequest,
    ) -> Result<ExplainResponse, ApiError>;

    /// Fetch the canonical solution for a problem, when the service has one.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-success status.
    async fn canonical_solution(&self, key: SolutionKey<'_>) -> Result<Option<String>, ApiError>;

    /// Fetch an adaptive follow-up problem at the given difficulty.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-success status.
    async fn adaptive_followup(
        &self,
        key: SolutionKey<'_>,
        difficulty: &str,
    ) -> Result<AdaptiveResponse, ApiError>;
}
