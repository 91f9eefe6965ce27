//! Asynchronous orchestration over the remote practice service.

use std::sync::Arc;
use std::time::Duration;

use practice_core::Clock;
use practice_core::model::Problem;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::api::{ExplainRequest, ExplainResponse, ProblemsApi, SolutionsApi};
use crate::config::{ApiConfig, DEFAULT_REVEAL_DELAY};
use crate::error::ApiError;
use crate::session::SolutionBundle;

/// Issues remote calls on behalf of the practice page.
///
/// The service never touches session state; callers tag each call with the
/// session generation and apply the result through `PracticeSession`, so a
/// superseded call cannot leak into a newer problem.
#[derive(Clone)]
pub struct PracticeService {
    problems: Arc<dyn ProblemsApi>,
    solutions: Arc<dyn SolutionsApi>,
    clock: Clock,
    reveal_delay: Duration,
}

impl PracticeService {
    #[must_use]
    pub fn new(problems: Arc<dyn ProblemsApi>, solutions: Arc<dyn SolutionsApi>) -> Self {
        Self {
            problems,
            solutions,
            clock: Clock::default_clock(),
            reveal_delay: DEFAULT_REVEAL_DELAY,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_reveal_delay(mut self, delay: Duration) -> Self {
        self.reveal_delay = delay;
        self
    }

    /// Apply pacing configuration from an `ApiConfig`.
    #[must_use]
    pub fn with_config(self, config: &ApiConfig) -> Self {
        self.with_reveal_delay(config.reveal_delay)
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Fetch a random problem.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request fails or the service answers
    /// with a non-success status.
    pub async fn fetch_problem(&self) -> Result<Problem, ApiError> {
        self.problems.random_problem().await
    }

    /// Request the automatic explanation for an incorrect answer.
    ///
    /// Failures are logged and collapsed to `None`; a missing explanation
    /// never breaks the attempt flow.
    pub async fn explain_incorrect(
        &self,
        problem: &Problem,
        student_answer: &str,
    ) -> Option<ExplainResponse> {
        let request = ExplainRequest {
            problem_text: problem.statement().to_string(),
            student_answer: student_answer.to_string(),
            correct_answer: problem
                .answer_key()
                .map(|key| key.as_str().to_string())
                .unwrap_or_default(),
            show_solution: false,
        };
        match self.solutions.adaptive_explain(request).await {
            Ok(response) => Some(response),
            Err(err) => {
                warn!(error = %err, "explanation request failed");
                None
            }
        }
    }

    /// Fetch canonical and adaptive solution content in parallel.
    ///
    /// Both calls settle before the bundle is returned, and either side may
    /// fail on its own without blocking the other. The reveal delay runs
    /// alongside the calls so a fast response still waits it out.
    pub async fn fetch_solution_bundle(
        &self,
        problem: &Problem,
        difficulty: Option<&str>,
    ) -> SolutionBundle {
        let Some(key) = problem.source().solution_key() else {
            debug!("problem has no solution coordinates, skipping fetch");
            sleep(self.reveal_delay).await;
            return SolutionBundle::default();
        };
        let difficulty = difficulty.unwrap_or("same");

        let ((), canonical, adaptive) = tokio::join!(
            sleep(self.reveal_delay),
            self.solutions.canonical_solution(key),
            self.solutions.adaptive_followup(key, difficulty),
        );

        let canonical = match canonical {
            Ok(solution) => solution,
            Err(err) => {
                warn!(error = %err, "canonical solution fetch failed");
                None
            }
        };
        let (adaptive_solution, followup) = match adaptive {
            Ok(response) => (response.solution, response.followup),
            Err(err) => {
                warn!(error = %err, "adaptive follow-up fetch failed");
                (None, None)
            }
        };

        SolutionBundle {
            canonical: canonical.or(adaptive_solution),
            followup,
        }
    }
}
