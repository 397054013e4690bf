use crate::core::errors::{EmptyPreferenceError, SubmissionError};
use crate::models::{Recommendation, RecommendationRequest, PreferenceBatch, SubmissionResult};
use crate::services::MenuApiClient;
use std::sync::Arc;

/// Turns a completed preference batch into a single recommendation request
///
/// Holds no state between calls. Every failure is mapped to
/// `SubmissionResult::Failure`; nothing propagates to the caller as an error.
#[derive(Clone)]
pub struct RecommendationClient {
    api: Arc<MenuApiClient>,
}

impl RecommendationClient {
    pub fn new(api: Arc<MenuApiClient>) -> Self {
        Self { api }
    }

    /// Submit liked and passed ids
    ///
    /// An empty `liked_ids` never reaches the network.
    pub async fn submit(&self, liked_ids: &[i64], passed_ids: &[i64]) -> SubmissionResult {
        if liked_ids.is_empty() {
            tracing::info!("Skipping recommendation request: {}", EmptyPreferenceError);
            return SubmissionResult::failure(EmptyPreferenceError.to_string());
        }

        let request = RecommendationRequest {
            select_menu_ids: liked_ids.to_vec(),
            not_selected_menu_ids: passed_ids.to_vec(),
        };

        match self.request(&request).await {
            Ok(recommendation) => {
                tracing::info!(
                    "Recommendation received: menu {} for {} liked ids",
                    recommendation.recommended_menu.item.id,
                    liked_ids.len()
                );
                SubmissionResult::Success(recommendation)
            }
            Err(e) => {
                match &e {
                    SubmissionError::Service(source) => {
                        tracing::error!("Recommendation request failed: {}", source)
                    }
                    SubmissionError::InvalidShape => {
                        tracing::error!("Recommendation response rejected: {}", e)
                    }
                }
                SubmissionResult::failure(e.to_string())
            }
        }
    }

    pub async fn submit_batch(&self, batch: &PreferenceBatch) -> SubmissionResult {
        self.submit(&batch.liked_ids, &batch.passed_ids).await
    }

    async fn request(&self, request: &RecommendationRequest) -> Result<Recommendation, SubmissionError> {
        let response = self.api.post_recommended_menus(request).await?;

        let recommended_menu = response
            .recommended_menu
            .ok_or(SubmissionError::InvalidShape)?;

        Ok(Recommendation {
            recommended_menu,
            reason: response.reason,
        })
    }
}
