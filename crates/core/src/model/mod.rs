mod answer;
mod media;
mod problem;
mod source;

pub use answer::{AnswerKey, AnswerKeyError, Attempt};
pub use media::{ImageRef, ImageRefError};
pub use problem::Problem;
pub use source::{ProblemSource, SolutionKey};
