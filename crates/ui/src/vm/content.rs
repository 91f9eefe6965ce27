//! Content view models: statement markup and AI-generated markdown.

use std::collections::{HashMap, HashSet};

use practice_core::model::Problem;

/// Render a problem statement to sanitized HTML ready for
/// `dangerous_inner_html`.
#[must_use]
pub fn statement_html(problem: &Problem) -> String {
    sanitize_fragment(&problem.render_statement())
}

/// Convert AI-generated markdown (explanations, solutions, follow-ups) to
/// sanitized HTML.
#[must_use]
pub fn ai_markdown_to_html(input: &str) -> String {
    let mut options = pulldown_cmark::Options::empty();
    options.insert(pulldown_cmark::Options::ENABLE_STRIKETHROUGH);
    options.insert(pulldown_cmark::Options::ENABLE_TABLES);

    let parser = pulldown_cmark::Parser::new_ext(input, options);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    sanitize_fragment(&html)
}

/// Sanitize an HTML fragment before it reaches the page.
///
/// Images stay, with their src/class/alt attributes, since statements embed
/// math and screenshot images; scripts, event handlers, and unknown
/// attributes do not survive.
#[must_use]
pub fn sanitize_fragment(html: &str) -> String {
    let tags: HashSet<&str> = [
        "p",
        "div",
        "span",
        "br",
        "em",
        "strong",
        "b",
        "i",
        "code",
        "pre",
        "blockquote",
        "ul",
        "ol",
        "li",
        "img",
    ]
    .into_iter()
    .collect();

    let mut attributes: HashMap<&str, HashSet<&str>> = HashMap::new();
    attributes.insert("img", ["src", "class", "alt"].into_iter().collect());

    ammonia::Builder::new()
        .tags(tags)
        .tag_attributes(attributes)
        .url_schemes(["http", "https"].into_iter().collect())
        .clean(html)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use practice_core::model::{ImageRef, ProblemSource};

    #[test]
    fn statement_images_survive_sanitization() {
        let problem = Problem::new(
            "Problem 3",
            "Area is {math_image_0}",
            vec![ImageRef::parse("https://latex.example.com/a.png").unwrap()],
            Vec::new(),
            Vec::new(),
            None,
            ProblemSource::default(),
        );
        let html = statement_html(&problem);
        assert!(html.contains(r#"src="https://latex.example.com/a.png""#));
        assert!(html.contains(r#"class="math-image""#));
        assert!(!html.contains('{'));
    }

    #[test]
    fn scripts_and_handlers_are_stripped() {
        let html = sanitize_fragment(
            r#"<p>ok</p><script>alert(1)</script><img src="https://x.test/a.png" onerror="alert(1)">"#,
        );
        assert!(html.contains("<p>ok</p>"));
        assert!(!html.contains("script"));
        assert!(!html.contains("onerror"));
        assert!(html.contains(r#"src="https://x.test/a.png""#));
    }

    #[test]
    fn javascript_image_sources_are_rejected() {
        let html = sanitize_fragment(r#"<img src="javascript:alert(1)">"#);
        assert!(!html.contains("javascript:"));
    }

    #[test]
    fn markdown_renders_to_sanitized_html() {
        let html = ai_markdown_to_html("**Step 1.** Add the angles.\n\n- then simplify");
        assert!(html.contains("<strong>Step 1.</strong>"));
        assert!(html.contains("<li>then simplify</li>"));
    }
}
