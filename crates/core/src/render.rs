//! Inline rendering of problem statements.
//!
//! Statements arrive from the scraper with `{math_image_N}` and
//! `{screenshot_image_N}` tokens marking where an image was lifted out of
//! the page. Rendering substitutes each token with an `<img>` tag pointing
//! into the matching image list, then strips any token whose index has no
//! image. The output contains no placeholder syntax, so rendering is
//! idempotent.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::ImageRef;

static LEFTOVER_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(?:math_image|screenshot_image)_\d+\}").expect("placeholder pattern is valid")
});

/// Substitute placeholder tokens in `statement` with image markup.
///
/// Tokens whose index falls outside the corresponding list are removed, not
/// replaced with a broken reference. Empty image lists mean zero
/// substitutions; the function never panics.
#[must_use]
pub fn render_statement(
    statement: &str,
    math_images: &[ImageRef],
    screenshot_images: &[ImageRef],
) -> String {
    let mut out = statement.to_string();

    for (index, image) in math_images.iter().enumerate() {
        let token = format!("{{math_image_{index}}}");
        out = out.replace(&token, &image_tag(image, "math-image", "math"));
    }

    for (index, image) in screenshot_images.iter().enumerate() {
        let token = format!("{{screenshot_image_{index}}}");
        out = out.replace(&token, &image_tag(image, "screenshot-image", "screenshot"));
    }

    LEFTOVER_TOKEN.replace_all(&out, "").into_owned()
}

fn image_tag(image: &ImageRef, class: &str, alt: &str) -> String {
    format!(r#"<img src="{}" class="{class}" alt="{alt}">"#, image.as_str())
}
