// Core exports
pub mod deck;
pub mod errors;
pub mod image;
pub mod presentation;
pub mod recommendation;
pub mod transfer;

pub use deck::{DeckEngine, DeckPhase, SwipeError, SwipeEvent};
pub use errors::{EmptyPreferenceError, LoadError, SubmissionError, TransferDecodeError, TransferEncodeError};
pub use image::ImageNormalizer;
pub use recommendation::RecommendationClient;
pub use transfer::{LandingError, TransferPayload};
