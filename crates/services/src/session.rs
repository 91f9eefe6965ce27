//! In-memory state for one practice sitting.
//!
//! `PracticeSession` owns the current problem, the attempt against it, and
//! any AI-generated content, and gates every asynchronous apply on a
//! request generation so superseded responses die at the gate instead of
//! mutating newer state.

use chrono::{DateTime, Utc};
use practice_core::model::{Attempt, Problem};
use tracing::debug;

use crate::api::ExplainResponse;
use crate::error::{ApiError, SessionError};

/// User-visible message for a failed problem load.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load problem.";

/// Token identifying one round of asynchronous work.
///
/// Captured when a request is issued; a result is applied only while its
/// generation is still current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestGeneration(u64);

/// Where the controller is in the problem-load lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed {
        message: String,
    },
}

/// AI-generated content associated with the current problem.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolutionContent {
    explanation: Option<String>,
    canonical: Option<String>,
    followup: Option<String>,
    selected_difficulty: Option<String>,
}

impl SolutionContent {
    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    #[must_use]
    pub fn canonical(&self) -> Option<&str> {
        self.canonical.as_deref()
    }

    #[must_use]
    pub fn followup(&self) -> Option<&str> {
        self.followup.as_deref()
    }

    #[must_use]
    pub fn selected_difficulty(&self) -> Option<&str> {
        self.selected_difficulty.as_deref()
    }

    /// True once any AI content has arrived for this problem.
    #[must_use]
    pub fn has_content(&self) -> bool {
        self.explanation.is_some() || self.canonical.is_some() || self.followup.is_some()
    }
}

/// Settled result of the combined canonical + adaptive solution fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolutionBundle {
    pub canonical: Option<String>,
    pub followup: Option<String>,
}

/// The single current-problem session.
#[derive(Debug, Clone, Default)]
pub struct PracticeSession {
    state: LoadState,
    generation: u64,
    problem: Option<Problem>,
    attempt: Attempt,
    solution: SolutionContent,
    solution_pending: bool,
}

impl PracticeSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    #[must_use]
    pub fn problem(&self) -> Option<&Problem> {
        self.problem.as_ref()
    }

    #[must_use]
    pub fn attempt(&self) -> &Attempt {
        &self.attempt
    }

    #[must_use]
    pub fn solution(&self) -> &SolutionContent {
        &self.solution
    }

    #[must_use]
    pub fn solution_pending(&self) -> bool {
        self.solution_pending
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    /// Generation that tags work issued for the current problem.
    #[must_use]
    pub fn generation(&self) -> RequestGeneration {
        RequestGeneration(self.generation)
    }

    #[must_use]
    pub fn is_current(&self, generation: RequestGeneration) -> bool {
        self.generation == generation.0
    }

    /// Start loading a new problem.
    ///
    /// Supersedes any outstanding load or solution request and resets the
    /// attempt and solution state before the next problem can appear.
    pub fn begin_load(&mut self) -> RequestGeneration {
        self.generation += 1;
        self.state = LoadState::Loading;
        self.problem = None;
        self.attempt = Attempt::default();
        self.solution = SolutionContent::default();
        self.solution_pending = false;
        RequestGeneration(self.generation)
    }

    /// Apply a finished problem load. Stale results are dropped silently.
    pub fn apply_load(
        &mut self,
        generation: RequestGeneration,
        outcome: Result<Problem, ApiError>,
        now: DateTime<Utc>,
    ) {
        if !self.is_current(generation) {
            debug!("discarding problem load from a superseded request");
            return;
        }
        match outcome {
            Ok(problem) => {
                self.problem = Some(problem);
                self.attempt = Attempt::started(now);
                self.state = LoadState::Loaded;
            }
            Err(_) => {
                self.state = LoadState::Failed {
                    message: LOAD_FAILED_MESSAGE.to_string(),
                };
            }
        }
    }

    /// Grade the user's answer against the current problem.
    ///
    /// Valid only while a problem is loaded and before any solution content
    /// has been shown for it. A missing answer key grades as incorrect.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoProblem` outside the loaded state and
    /// `SessionError::SolutionShown` once solution content exists.
    pub fn submit_answer(
        &mut self,
        answer: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, SessionError> {
        if self.state != LoadState::Loaded {
            return Err(SessionError::NoProblem);
        }
        if self.solution.has_content() {
            return Err(SessionError::SolutionShown);
        }
        let problem = self.problem.as_ref().ok_or(SessionError::NoProblem)?;
        let verdict = problem.check_answer(answer);
        self.attempt.set_answer(answer);
        self.attempt.record_verdict(verdict, now);
        Ok(verdict)
    }

    /// Start a solution request for the current problem.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoProblem` outside the loaded state and
    /// `SessionError::SolutionPending` while a request is outstanding.
    pub fn begin_solution_request(&mut self) -> Result<RequestGeneration, SessionError> {
        if self.state != LoadState::Loaded || self.problem.is_none() {
            return Err(SessionError::NoProblem);
        }
        if self.solution_pending {
            return Err(SessionError::SolutionPending);
        }
        self.solution_pending = true;
        Ok(RequestGeneration(self.generation))
    }

    /// Apply a settled solution bundle. Stale results are dropped silently.
    pub fn apply_solution(&mut self, generation: RequestGeneration, bundle: SolutionBundle) {
        if !self.is_current(generation) {
            debug!("discarding solution bundle from a superseded request");
            return;
        }
        self.solution_pending = false;
        if bundle.canonical.is_some() {
            self.solution.canonical = bundle.canonical;
        }
        if bundle.followup.is_some() {
            self.solution.followup = bundle.followup;
        }
    }

    /// Apply the automatic explanation triggered by an incorrect answer.
    /// Stale results are dropped silently.
    pub fn apply_explanation(&mut self, generation: RequestGeneration, response: ExplainResponse) {
        if !self.is_current(generation) {
            debug!("discarding explanation from a superseded request");
            return;
        }
        if response.explanation.is_some() {
            self.solution.explanation = response.explanation;
        }
        if response.followup.is_some() {
            self.solution.followup = response.followup;
        }
        if response.selected_difficulty.is_some() {
            self.solution.selected_difficulty = response.selected_difficulty;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use practice_core::model::{AnswerKey, ProblemSource};
    use practice_core::time::fixed_now;

    fn build_problem(key: Option<&str>) -> Problem {
        Problem::new(
            "Problem 1",
            "Compute the sum.",
            Vec::new(),
            Vec::new(),
            Vec::new(),
            key.map(|k| AnswerKey::parse(k).unwrap()),
            ProblemSource::default(),
        )
    }

    fn loaded_session(key: Option<&str>) -> PracticeSession {
        let mut session = PracticeSession::new();
        let generation = session.begin_load();
        session.apply_load(generation, Ok(build_problem(key)), fixed_now());
        session
    }

    #[test]
    fn load_walks_idle_loading_loaded() {
        let mut session = PracticeSession::new();
        assert_eq!(*session.state(), LoadState::Idle);

        let generation = session.begin_load();
        assert_eq!(*session.state(), LoadState::Loading);

        session.apply_load(generation, Ok(build_problem(Some("A"))), fixed_now());
        assert_eq!(*session.state(), LoadState::Loaded);
        assert!(session.problem().is_some());
        assert_eq!(session.attempt().started_at(), Some(fixed_now()));
    }

    #[test]
    fn failed_load_is_generic_and_recoverable() {
        let mut session = PracticeSession::new();
        let generation = session.begin_load();
        let err = reqwest::StatusCode::INTERNAL_SERVER_ERROR;
        session.apply_load(generation, Err(ApiError::Status(err)), fixed_now());
        assert_eq!(
            *session.state(),
            LoadState::Failed {
                message: LOAD_FAILED_MESSAGE.to_string()
            }
        );

        // Not terminal: the next load re-enters Loading.
        session.begin_load();
        assert_eq!(*session.state(), LoadState::Loading);
    }

    #[test]
    fn stale_load_result_is_discarded() {
        let mut session = PracticeSession::new();
        let first = session.begin_load();
        let second = session.begin_load();

        session.apply_load(first, Ok(build_problem(Some("A"))), fixed_now());
        assert_eq!(*session.state(), LoadState::Loading);
        assert!(session.problem().is_none());

        session.apply_load(second, Ok(build_problem(Some("B"))), fixed_now());
        assert_eq!(*session.state(), LoadState::Loaded);
    }

    #[test]
    fn new_load_resets_attempt_and_solution() {
        let mut session = loaded_session(Some("B"));
        session.submit_answer("C", fixed_now()).unwrap();
        let generation = session.generation();
        session.apply_explanation(
            generation,
            ExplainResponse {
                explanation: Some("Look again.".into()),
                ..ExplainResponse::default()
            },
        );
        assert!(session.solution().has_content());

        session.begin_load();
        assert_eq!(session.attempt().verdict(), None);
        assert_eq!(session.attempt().user_answer(), "");
        assert!(!session.solution().has_content());
        assert!(!session.solution_pending());
    }

    #[test]
    fn submit_is_trim_and_case_insensitive() {
        let mut session = loaded_session(Some("b"));
        assert_eq!(session.submit_answer("  B ", fixed_now()), Ok(true));
    }

    #[test]
    fn submit_without_key_is_incorrect() {
        let mut session = loaded_session(None);
        assert_eq!(session.submit_answer("anything", fixed_now()), Ok(false));
    }

    #[test]
    fn submit_outside_loaded_state_is_rejected() {
        let mut session = PracticeSession::new();
        assert_eq!(
            session.submit_answer("A", fixed_now()),
            Err(SessionError::NoProblem)
        );

        session.begin_load();
        assert_eq!(
            session.submit_answer("A", fixed_now()),
            Err(SessionError::NoProblem)
        );
    }

    #[test]
    fn submit_after_solution_shown_is_rejected() {
        let mut session = loaded_session(Some("B"));
        let generation = session.begin_solution_request().unwrap();
        session.apply_solution(
            generation,
            SolutionBundle {
                canonical: Some("Add the angles.".into()),
                followup: None,
            },
        );
        assert_eq!(
            session.submit_answer("B", fixed_now()),
            Err(SessionError::SolutionShown)
        );
    }

    #[test]
    fn solution_request_requires_a_problem_and_no_pending_request() {
        let mut session = PracticeSession::new();
        assert_eq!(
            session.begin_solution_request(),
            Err(SessionError::NoProblem)
        );

        let mut session = loaded_session(Some("B"));
        session.begin_solution_request().unwrap();
        assert_eq!(
            session.begin_solution_request(),
            Err(SessionError::SolutionPending)
        );
    }

    #[test]
    fn stale_solution_does_not_touch_the_new_problem() {
        let mut session = loaded_session(Some("B"));
        let stale = session.begin_solution_request().unwrap();

        // A new problem supersedes the outstanding solution request.
        let generation = session.begin_load();
        session.apply_load(generation, Ok(build_problem(Some("C"))), fixed_now());

        session.apply_solution(
            stale,
            SolutionBundle {
                canonical: Some("Stale content.".into()),
                followup: Some("Stale follow-up.".into()),
            },
        );
        assert!(!session.solution().has_content());
        assert_eq!(*session.state(), LoadState::Loaded);
    }

    #[test]
    fn stale_explanation_is_discarded() {
        let mut session = loaded_session(Some("B"));
        session.submit_answer("C", fixed_now()).unwrap();
        let stale = session.generation();

        session.begin_load();
        session.apply_explanation(
            stale,
            ExplainResponse {
                explanation: Some("Stale.".into()),
                ..ExplainResponse::default()
            },
        );
        assert!(!session.solution().has_content());
    }

    #[test]
    fn explanation_fills_solution_state() {
        let mut session = loaded_session(Some("B"));
        session.submit_answer("C", fixed_now()).unwrap();
        let generation = session.generation();
        session.apply_explanation(
            generation,
            ExplainResponse {
                explanation: Some("The angles sum to 180.".into()),
                followup: Some("Try this variant.".into()),
                selected_difficulty: Some("harder".into()),
            },
        );
        let solution = session.solution();
        assert_eq!(solution.explanation(), Some("The angles sum to 180."));
        assert_eq!(solution.followup(), Some("Try this variant."));
        assert_eq!(solution.selected_difficulty(), Some("harder"));
    }
}
