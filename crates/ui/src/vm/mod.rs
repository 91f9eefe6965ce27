mod content;
mod feedback;

pub use content::{ai_markdown_to_html, sanitize_fragment, statement_html};
pub use feedback::{FeedbackCue, format_elapsed};
