//! Ramen Swipe - swipe-driven ramen preference sessions
//!
//! A user classifies a deck of menus with left/right swipes. The completed
//! preference set goes to the recommendation service once, and the result
//! is handed to the landing page through its query string.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{DeckEngine, DeckPhase, ImageNormalizer, RecommendationClient, TransferPayload};
pub use self::models::{MenuItem, RecommendedMenu, Recommendation, SubmissionResult, SwipeDirection, SwipeOutcome};
