use serde::{Deserialize, Serialize};

/// Menu item eligible for swiping
///
/// Display strings default to empty so a semantically incomplete record
/// still deserializes; only `id` is mandatory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub genre_name: String,
    #[serde(default)]
    pub noodle_name: String,
    #[serde(default)]
    pub soup_name: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Shop serving a menu item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_map_url: Option<String>,
}

/// Menu item returned by the recommendation service, optionally with its shop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedMenu {
    #[serde(flatten)]
    pub item: MenuItem,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop: Option<Shop>,
}

/// Menu item with its embedded shop, as returned by the detail lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuDetail {
    #[serde(flatten)]
    pub item: MenuItem,
    pub shop: Shop,
}

/// Swipe gesture direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Left,
    Right,
}

/// Classification of a single deck position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeOutcome {
    Liked,
    Passed,
}

impl From<SwipeDirection> for SwipeOutcome {
    fn from(direction: SwipeDirection) -> Self {
        match direction {
            SwipeDirection::Right => SwipeOutcome::Liked,
            SwipeDirection::Left => SwipeOutcome::Passed,
        }
    }
}

/// Accumulated preference signal for one completed deck
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceBatch {
    pub liked_ids: Vec<i64>,
    pub passed_ids: Vec<i64>,
}

/// Successful recommendation; also the `data` transfer payload shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub recommended_menu: RecommendedMenu,
    #[serde(default)]
    pub reason: String,
}

/// Outcome of one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    Success(Recommendation),
    Failure { message: String },
}

impl SubmissionResult {
    pub fn failure(message: impl Into<String>) -> Self {
        SubmissionResult::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionResult::Success(_))
    }
}
