use async_trait::async_trait;
use practice_core::model::{Problem, SolutionKey};
use reqwest::Client;
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::ApiError;

use super::wire::{
    AdaptiveResponse, ExplainRequest, ExplainResponse, ProblemResponse, SolutionResponse,
};
use super::{ProblemsApi, SolutionsApi};

/// HTTP client for the practice service.
#[derive(Clone)]
pub struct HttpPracticeApi {
    client: Client,
    base_url: String,
}

impl HttpPracticeApi {
    #[must_use]
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }
}

#[async_trait]
impl ProblemsApi for HttpPracticeApi {
    async fn random_problem(&self) -> Result<Problem, ApiError> {
        debug!(base_url = %self.base_url, "fetching random problem");
        let response = self
            .client
            .get(self.endpoint("random_problem"))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        let payload: ProblemResponse = response.json().await?;
        Ok(payload.into_problem())
    }
}

#[async_trait]
impl SolutionsApi for HttpPracticeApi {
    async fn adaptive_explain(
        &self,
        request: ExplainRequest,
    ) -> Result<ExplainResponse, ApiError> {
        let response = self
            .client
            .post(self.endpoint("adaptive_explain"))
            .json(&request)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        Ok(response.json().await?)
    }

    async fn canonical_solution(&self, key: SolutionKey<'_>) -> Result<Option<String>, ApiError> {
        let response = self
            .client
            .get(self.endpoint("solution"))
            .query(&[
                ("year", key.year.to_string()),
                ("contest", key.contest.to_string()),
                ("problem_number", key.problem_number.to_string()),
            ])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        let payload: SolutionResponse = response.json().await?;
        Ok(payload.solution)
    }

    async fn adaptive_followup(
        &self,
        key: SolutionKey<'_>,
        difficulty: &str,
    ) -> Result<AdaptiveResponse, ApiError> {
        let response = self
            .client
            .get(self.endpoint("adaptive_learning"))
            .query(&[
                ("year", key.year.to_string()),
                ("contest", key.contest.to_string()),
                ("problem_number", key.problem_number.to_string()),
                ("difficulty", difficulty.to_string()),
            ])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        Ok(response.json().await?)
    }
}
