use crate::core::image::ImageNormalizer;
use crate::models::{DeckResponse, MenuDetail, MenuItem, RecommendationRequest, RecommendationResponse};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the menu API
#[derive(Debug, Error)]
pub enum MenuApiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("API returned status {0}")]
    Status(u16),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Menu API client
///
/// One-shot request/response calls against the deck source, the detail
/// lookup and the recommendation service. Every image reference in a
/// response is normalized before it leaves this client.
pub struct MenuApiClient {
    base_url: String,
    timeout: Duration,
    images: ImageNormalizer,
    client: Client,
}

impl MenuApiClient {
    /// Create a new client; `timeout` bounds every request
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        images: ImageNormalizer,
    ) -> Result<Self, MenuApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            timeout,
            images,
            client,
        })
    }

    pub fn images(&self) -> &ImageNormalizer {
        &self.images
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn map_send_error(&self, err: reqwest::Error) -> MenuApiError {
        if err.is_timeout() {
            MenuApiError::Timeout(self.timeout)
        } else {
            MenuApiError::Request(err)
        }
    }

    /// Fetch a random deck of menus
    pub async fn get_random_menus(&self) -> Result<Vec<MenuItem>, MenuApiError> {
        let url = self.url("/random_menus");

        tracing::debug!("Fetching deck from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            return Err(MenuApiError::Status(response.status().as_u16()));
        }

        let deck: DeckResponse = response
            .json()
            .await
            .map_err(|e| MenuApiError::InvalidResponse(format!("Failed to parse menus: {}", e)))?;

        let menus: Vec<MenuItem> = deck
            .menus
            .into_iter()
            .map(|mut menu| {
                self.images.normalize_in_place(&mut menu.image_url);
                menu
            })
            .collect();

        tracing::debug!("Fetched {} menus", menus.len());

        Ok(menus)
    }

    /// Fetch one menu with its shop
    pub async fn get_menu_with_shop(&self, id: i64) -> Result<MenuDetail, MenuApiError> {
        let url = self.url(&format!("/menu_with_shops/{}", id));

        tracing::debug!("Fetching menu detail from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(MenuApiError::NotFound(format!("Menu {} not found", id)));
        }
        if !status.is_success() {
            return Err(MenuApiError::Status(status.as_u16()));
        }

        let mut detail: MenuDetail = response
            .json()
            .await
            .map_err(|e| MenuApiError::InvalidResponse(format!("Failed to parse menu detail: {}", e)))?;

        self.images.normalize_in_place(&mut detail.item.image_url);

        Ok(detail)
    }

    /// Submit a preference batch and return the raw recommendation
    pub async fn post_recommended_menus(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationResponse, MenuApiError> {
        let url = self.url("/recommended_menus");

        tracing::debug!(
            "Posting {} liked / {} passed ids to: {}",
            request.select_menu_ids.len(),
            request.not_selected_menu_ids.len(),
            url
        );

        let response = self
            .client
            .post(&url)
            .header("Accept", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Recommendation request failed: {} - {}", status, body);
            return Err(MenuApiError::Status(status.as_u16()));
        }

        let mut recommendation: RecommendationResponse = response
            .json()
            .await
            .map_err(|e| MenuApiError::InvalidResponse(format!("Failed to parse recommendation: {}", e)))?;

        if let Some(menu) = recommendation.recommended_menu.as_mut() {
            self.images.normalize_in_place(&mut menu.item.image_url);
        }

        Ok(recommendation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_api_client_creation() {
        let client = MenuApiClient::new(
            "https://api.ramen.test/",
            Duration::from_secs(10),
            ImageNormalizer::new("https://ramen.test"),
        )
        .unwrap();

        assert_eq!(client.url("/random_menus"), "https://api.ramen.test/random_menus");
        assert_eq!(client.timeout, Duration::from_secs(10));
    }
}
