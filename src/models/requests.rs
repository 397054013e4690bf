use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::SwipeDirection;

/// Request to swipe the current card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwipeRequest {
    pub direction: SwipeDirection,
}

/// Path parameters for the menu detail lookup
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MenuPath {
    #[validate(range(min = 1))]
    pub id: i64,
}

/// Body sent to the recommendation service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub select_menu_ids: Vec<i64>,
    pub not_selected_menu_ids: Vec<i64>,
}

