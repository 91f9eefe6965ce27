use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImageRefError {
    #[error("image URL cannot be empty")]
    Empty,

    #[error("image URL is not a valid absolute URL: {raw}")]
    Invalid { raw: String },
}

/// Absolute URL of a rendered math expression, a diagram screenshot, or an
/// answer-choice image served alongside a problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(Url);

impl ImageRef {
    /// Parse a raw URL string into an image reference.
    ///
    /// # Errors
    ///
    /// Returns `ImageRefError` when the input is empty or does not parse as
    /// an absolute URL.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, ImageRefError> {
        let s = raw.as_ref().trim();
        if s.is_empty() {
            return Err(ImageRefError::Empty);
        }
        let url = Url::parse(s).map_err(|_| ImageRefError::Invalid { raw: s.to_string() })?;
        Ok(Self(url))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    #[must_use]
    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_url_parses() {
        let image = ImageRef::parse("https://latex.example.com/img/abc.png").unwrap();
        assert_eq!(image.as_str(), "https://latex.example.com/img/abc.png");
    }

    #[test]
    fn empty_and_relative_urls_fail() {
        assert_eq!(ImageRef::parse("   ").unwrap_err(), ImageRefError::Empty);
        assert!(matches!(
            ImageRef::parse("img/abc.png").unwrap_err(),
            ImageRefError::Invalid { .. }
        ));
    }
}
