use std::sync::Arc;

use services::PracticeService;

/// UI-facing surface of the composition root (`crates/app`).
pub trait UiApp: Send + Sync {
    fn practice(&self) -> Arc<PracticeService>;
}

#[derive(Clone)]
pub struct AppContext {
    practice: Arc<PracticeService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            practice: app.practice(),
        }
    }

    #[must_use]
    pub fn practice(&self) -> Arc<PracticeService> {
        Arc::clone(&self.practice)
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
