use serde::{Deserialize, Serialize};

use crate::model::{AnswerKey, ImageRef, ProblemSource};
use crate::render::render_statement;

/// One contest question as served by the remote problem service.
///
/// Immutable once constructed; the next fetch replaces it wholesale. All
/// fields tolerate being empty, so a sparse payload still renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    title: String,
    statement: String,
    math_images: Vec<ImageRef>,
    screenshot_images: Vec<ImageRef>,
    answer_choices: Vec<ImageRef>,
    answer_key: Option<AnswerKey>,
    source: ProblemSource,
}

impl Problem {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        statement: impl Into<String>,
        math_images: Vec<ImageRef>,
        screenshot_images: Vec<ImageRef>,
        answer_choices: Vec<ImageRef>,
        answer_key: Option<AnswerKey>,
        source: ProblemSource,
    ) -> Self {
        Self {
            title: title.into(),
            statement: statement.into(),
            math_images,
            screenshot_images,
            answer_choices,
            answer_key,
            source,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Raw statement text, placeholder tokens and all.
    #[must_use]
    pub fn statement(&self) -> &str {
        &self.statement
    }

    #[must_use]
    pub fn math_images(&self) -> &[ImageRef] {
        &self.math_images
    }

    #[must_use]
    pub fn screenshot_images(&self) -> &[ImageRef] {
        &self.screenshot_images
    }

    #[must_use]
    pub fn answer_choices(&self) -> &[ImageRef] {
        &self.answer_choices
    }

    #[must_use]
    pub fn answer_key(&self) -> Option<&AnswerKey> {
        self.answer_key.as_ref()
    }

    #[must_use]
    pub fn source(&self) -> &ProblemSource {
        &self.source
    }

    /// Grade a candidate answer against the answer key.
    ///
    /// A problem without a key grades every answer as incorrect rather than
    /// erroring.
    #[must_use]
    pub fn check_answer(&self, candidate: &str) -> bool {
        self.answer_key
            .as_ref()
            .is_some_and(|key| key.matches(candidate))
    }

    /// Statement with placeholder tokens substituted by image markup.
    #[must_use]
    pub fn render_statement(&self) -> String {
        render_statement(&self.statement, &self.math_images, &self.screenshot_images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(url: &str) -> ImageRef {
        ImageRef::parse(url).unwrap()
    }

    fn problem_with_key(key: Option<&str>) -> Problem {
        Problem::new(
            "Problem 7",
            "What is {math_image_0}?",
            vec![image("https://latex.example.com/expr.png")],
            Vec::new(),
            vec![image("https://latex.example.com/choices.png")],
            key.map(|k| AnswerKey::parse(k).unwrap()),
            ProblemSource::new(Some(2024), Some("AMC 10A".into()), Some(7)),
        )
    }

    #[test]
    fn grading_uses_the_answer_key() {
        let problem = problem_with_key(Some("42"));
        assert!(problem.check_answer("42"));
        assert!(problem.check_answer(" 42 "));
        assert!(!problem.check_answer("043"));
    }

    #[test]
    fn missing_key_grades_incorrect() {
        let problem = problem_with_key(None);
        assert!(!problem.check_answer("anything"));
        assert!(!problem.check_answer(""));
    }

    #[test]
    fn rendered_statement_substitutes_images() {
        let problem = problem_with_key(Some("B"));
        let html = problem.render_statement();
        assert!(html.contains(r#"src="https://latex.example.com/expr.png""#));
        assert!(!html.contains("{math_image_0}"));
    }
}
