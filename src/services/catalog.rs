use crate::core::errors::LoadError;
use crate::models::{MenuDetail, MenuItem};
use crate::services::MenuApiClient;
use std::sync::Arc;

/// Deck source and detail lookup
///
/// When the deck source is unreachable the injected fallback deck is used
/// instead; with no fallback configured the failure is returned.
#[derive(Clone)]
pub struct MenuCatalog {
    api: Arc<MenuApiClient>,
    fallback: Vec<MenuItem>,
}

impl MenuCatalog {
    pub fn new(api: Arc<MenuApiClient>, fallback: Vec<MenuItem>) -> Self {
        let fallback = fallback
            .into_iter()
            .map(|mut menu| {
                api.images().normalize_in_place(&mut menu.image_url);
                menu
            })
            .collect();

        Self { api, fallback }
    }

    pub async fn load_deck(&self) -> Result<Vec<MenuItem>, LoadError> {
        match self.api.get_random_menus().await {
            Ok(menus) => Ok(menus),
            Err(e) if !self.fallback.is_empty() => {
                tracing::warn!("Deck source unavailable ({}), using {} fallback menus", e, self.fallback.len());
                Ok(self.fallback.clone())
            }
            Err(e) => {
                tracing::error!("Failed to load deck: {}", e);
                Err(LoadError::Deck(e))
            }
        }
    }

    /// Fetch one menu with its shop for the detail page
    pub async fn menu_detail(&self, id: i64) -> Result<MenuDetail, LoadError> {
        self.api.get_menu_with_shop(id).await.map_err(|e| {
            tracing::warn!("Failed to load menu {}: {}", id, e);
            LoadError::detail(id, e)
        })
    }
}
