use std::env;
use std::time::Duration;

/// Fallback endpoint for a locally running problem service.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5001";

/// Minimum time the solution panel stays in its loading state, so a fast
/// response does not flash open.
pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_millis(800);

/// Where the remote problem/solution service lives and how solution
/// reveals are paced.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
    pub reveal_delay: Duration,
}

impl ApiConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            reveal_delay: DEFAULT_REVEAL_DELAY,
        }
    }

    /// Read configuration from `PRACTICE_API_URL` and
    /// `PRACTICE_REVEAL_DELAY_MS`, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = env::var("PRACTICE_API_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let reveal_delay = env::var("PRACTICE_REVEAL_DELAY_MS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .map_or(DEFAULT_REVEAL_DELAY, Duration::from_millis);
        Self {
            base_url,
            reveal_delay,
        }
    }

    #[must_use]
    pub fn with_reveal_delay(mut self, delay: Duration) -> Self {
        self.reveal_delay = delay;
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
