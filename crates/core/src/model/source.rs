use serde::{Deserialize, Serialize};

/// Where a problem came from: year, contest name, and problem number.
///
/// The remote service fills these in when it knows them; they are used only
/// to request solution content. A problem with incomplete coordinates can
/// still be practiced, it just cannot look up a canonical solution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemSource {
    year: Option<u16>,
    contest: Option<String>,
    problem_number: Option<u32>,
}

impl ProblemSource {
    #[must_use]
    pub fn new(year: Option<u16>, contest: Option<String>, problem_number: Option<u32>) -> Self {
        Self {
            year,
            contest: contest.filter(|name| !name.trim().is_empty()),
            problem_number,
        }
    }

    #[must_use]
    pub fn year(&self) -> Option<u16> {
        self.year
    }

    #[must_use]
    pub fn contest(&self) -> Option<&str> {
        self.contest.as_deref()
    }

    #[must_use]
    pub fn problem_number(&self) -> Option<u32> {
        self.problem_number
    }

    /// Complete lookup coordinates, if every part is present.
    #[must_use]
    pub fn solution_key(&self) -> Option<SolutionKey<'_>> {
        Some(SolutionKey {
            year: self.year?,
            contest: self.contest.as_deref()?,
            problem_number: self.problem_number?,
        })
    }
}

/// Fully specified coordinates for solution lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolutionKey<'a> {
    pub year: u16,
    pub contest: &'a str,
    pub problem_number: u32,
}
