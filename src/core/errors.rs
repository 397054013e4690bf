use crate::services::MenuApiError;
use thiserror::Error;

/// Deck or detail fetch failed
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to load menus")]
    Deck(#[source] MenuApiError),

    #[error("menu {id} was not found")]
    NotFound { id: i64 },

    #[error("failed to load menu {id}")]
    Detail {
        id: i64,
        #[source]
        source: MenuApiError,
    },
}

impl LoadError {
    pub fn detail(id: i64, source: MenuApiError) -> Self {
        match source {
            MenuApiError::NotFound(_) => LoadError::NotFound { id },
            source => LoadError::Detail { id, source },
        }
    }
}

/// Recommendation call failed or returned an unusable shape
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("recommendation service error")]
    Service(#[from] MenuApiError),

    #[error("recommendation response is missing a recommended menu")]
    InvalidShape,
}

/// Completed deck with zero likes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no liked items")]
pub struct EmptyPreferenceError;

/// Transfer payload missing or malformed on landing
#[derive(Debug, Error)]
pub enum TransferDecodeError {
    #[error("no recommendation data")]
    Missing,

    #[error("recommendation data could not be read")]
    Malformed(#[source] serde_json::Error),

    #[error("recommendation data could not be read")]
    IncompleteRecommendation,
}

/// Success payload could not be serialized
#[derive(Debug, Error)]
pub enum TransferEncodeError {
    #[error("failed to serialize recommendation: {0}")]
    Serialize(#[from] serde_json::Error),
}
