use serde::{Deserialize, Serialize};
use crate::models::domain::{MenuItem, RecommendedMenu};

/// Deck source response (`GET /random_menus`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckResponse {
    #[serde(default)]
    pub menus: Vec<MenuItem>,
}

/// Recommendation service response, before shape validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    #[serde(default)]
    pub recommended_menu: Option<RecommendedMenu>,
    #[serde(default)]
    pub reason: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery: Option<Recovery>,
}

/// The single recovery action offered alongside a user-facing error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recovery {
    ReturnToStart,
    Back,
    TryAgain,
}

/// Preference session phase as seen by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseView {
    Loading,
    Ready,
    Submitting,
    Completed,
    Empty,
    LoadFailed,
}

/// One card in the swipe stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub id: i64,
    pub name: String,
    pub genre_name: String,
    pub noodle_name: String,
    pub soup_name: String,
    pub image: Option<String>,
}

/// Renderable state of a preference session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionView {
    pub session_id: uuid::Uuid,
    pub phase: PhaseView,
    pub progress: Option<String>,
    pub current: Option<CardView>,
    pub next: Option<CardView>,
    pub overlay: Option<String>,
    pub submitting: bool,
    pub message: Option<String>,
    pub recovery: Option<Recovery>,
    pub redirect: Option<String>,
}

/// Shop block of a result or detail page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopView {
    pub name: String,
    pub address: String,
    pub map_url: Option<String>,
}

/// Landing page state after decoding the transfer payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SuggestionView {
    Loaded {
        id: i64,
        title: String,
        summary: String,
        image: Option<String>,
        shop: Option<ShopView>,
        reason: String,
        share_url: String,
        recovery: Recovery,
    },
    Error {
        message: String,
        recovery: Recovery,
    },
}

/// Menu detail page state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuDetailView {
    pub id: i64,
    pub title: String,
    pub summary: String,
    pub image: Option<String>,
    pub shop: ShopView,
    pub recovery: Recovery,
}
