#![forbid(unsafe_code)]

pub mod api;
pub mod config;
pub mod error;
pub mod practice;
pub mod session;

pub use practice_core::Clock;

pub use api::{HttpPracticeApi, ProblemsApi, SolutionsApi};
pub use config::ApiConfig;
pub use error::{ApiError, SessionError};
pub use practice::PracticeService;
pub use session::{
    LoadState, PracticeSession, RequestGeneration, SolutionBundle, SolutionContent,
};
