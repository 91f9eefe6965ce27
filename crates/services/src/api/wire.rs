//! Wire shapes for the pinned practice-service contract.
//!
//! Every response field carries a default so a sparse or drifting payload
//! degrades to empty content instead of a deserialization failure.

use practice_core::model::{AnswerKey, ImageRef, Problem, ProblemSource};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// `GET /random_problem` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProblemResponse {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub problem_statement: String,
    #[serde(default)]
    pub math_images: Vec<String>,
    #[serde(default)]
    pub screenshot_images: Vec<String>,
    #[serde(default)]
    pub answer_choices: Vec<String>,
    #[serde(default)]
    pub answer_key: Option<String>,
    #[serde(default)]
    pub problem_number: Option<u32>,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub contest: Option<String>,
}

impl ProblemResponse {
    /// Map the wire payload into the domain model.
    ///
    /// Fields that fail validation (blank answer key, malformed image URLs)
    /// are dropped rather than failing the whole problem.
    #[must_use]
    pub fn into_problem(self) -> Problem {
        let answer_key = self.answer_key.and_then(|raw| AnswerKey::parse(raw).ok());
        let source = ProblemSource::new(self.year, self.contest, self.problem_number);
        Problem::new(
            self.title,
            self.problem_statement,
            parse_image_list("math_images", self.math_images),
            parse_image_list("screenshot_images", self.screenshot_images),
            parse_image_list("answer_choices", self.answer_choices),
            answer_key,
            source,
        )
    }
}

fn parse_image_list(field: &'static str, raw: Vec<String>) -> Vec<ImageRef> {
    raw.into_iter()
        .filter_map(|url| match ImageRef::parse(&url) {
            Ok(image) => Some(image),
            Err(_) => {
                warn!(field, %url, "dropping malformed image URL");
                None
            }
        })
        .collect()
}

/// `POST /adaptive_explain` request body.
#[derive(Debug, Clone, Serialize)]
pub struct ExplainRequest {
    pub problem_text: String,
    pub student_answer: String,
    pub correct_answer: String,
    pub show_solution: bool,
}

/// `POST /adaptive_explain` response.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ExplainResponse {
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub followup: Option<String>,
    #[serde(default)]
    pub selected_difficulty: Option<String>,
}

/// `GET /solution` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SolutionResponse {
    #[serde(default)]
    pub solution: Option<String>,
}

/// `GET /adaptive_learning` response.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct AdaptiveResponse {
    #[serde(default)]
    pub solution: Option<String>,
    #[serde(default)]
    pub followup: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_payload_maps_to_empty_problem() {
        let payload: ProblemResponse = serde_json::from_str("{}").unwrap();
        let problem = payload.into_problem();
        assert_eq!(problem.title(), "");
        assert!(problem.math_images().is_empty());
        assert!(problem.answer_key().is_none());
        assert!(problem.source().solution_key().is_none());
    }

    #[test]
    fn malformed_image_urls_are_dropped() {
        let payload = ProblemResponse {
            math_images: vec![
                "https://latex.example.com/good.png".into(),
                "not a url".into(),
            ],
            ..ProblemResponse::default()
        };
        let problem = payload.into_problem();
        assert_eq!(problem.math_images().len(), 1);
        assert_eq!(
            problem.math_images()[0].as_str(),
            "https://latex.example.com/good.png"
        );
    }

    #[test]
    fn full_payload_round_trips_into_domain() {
        let json = r#"{
            "title": "Problem 7",
            "problem_statement": "What is {math_image_0}?",
            "math_images": ["https://latex.example.com/expr.png"],
            "screenshot_images": [],
            "answer_choices": ["https://latex.example.com/choices.png"],
            "answer_key": "B",
            "problem_number": 7,
            "year": 2024,
            "contest": "AMC 10A"
        }"#;
        let payload: ProblemResponse = serde_json::from_str(json).unwrap();
        let problem = payload.into_problem();
        assert_eq!(problem.title(), "Problem 7");
        assert!(problem.check_answer(" b "));
        let key = problem.source().solution_key().unwrap();
        assert_eq!(key.year, 2024);
        assert_eq!(key.problem_number, 7);
    }

    #[test]
    fn blank_answer_key_is_treated_as_absent() {
        let payload = ProblemResponse {
            answer_key: Some("   ".into()),
            ..ProblemResponse::default()
        };
        assert!(payload.into_problem().answer_key().is_none());
    }
}
