// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{MenuItem, Shop, RecommendedMenu, MenuDetail, SwipeDirection, SwipeOutcome, PreferenceBatch, Recommendation, SubmissionResult};
pub use requests::{SwipeRequest, MenuPath, RecommendationRequest};
pub use responses::{DeckResponse, RecommendationResponse, HealthResponse, ErrorResponse, Recovery, PhaseView, CardView, SessionView, ShopView, SuggestionView, MenuDetailView};
