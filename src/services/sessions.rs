use crate::core::deck::{DeckEngine, SwipeError};
use crate::core::presentation::session_view;
use crate::core::recommendation::RecommendationClient;
use crate::core::transfer;
use crate::models::{SessionView, SwipeDirection};
use crate::services::MenuCatalog;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Errors surfaced by the session layer
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(Uuid),

    #[error(transparent)]
    Swipe(#[from] SwipeError),
}

/// One preference session (one visit to the swipe page)
#[derive(Debug)]
pub struct PreferenceSession {
    pub id: Uuid,
    pub engine: DeckEngine,
}

pub type SharedSession = Arc<Mutex<PreferenceSession>>;

/// Short-lived in-memory session store
///
/// Entries expire after the configured TTL so abandoned sessions need no
/// explicit cleanup.
#[derive(Clone)]
pub struct SessionStore {
    sessions: moka::future::Cache<Uuid, SharedSession>,
}

impl SessionStore {
    pub fn new(max_sessions: u64, ttl: Duration) -> Self {
        let sessions = moka::future::CacheBuilder::new(max_sessions)
            .time_to_live(ttl)
            .build();

        Self { sessions }
    }

    pub async fn insert(&self, engine: DeckEngine) -> SharedSession {
        let id = Uuid::new_v4();
        let session = Arc::new(Mutex::new(PreferenceSession { id, engine }));
        self.sessions.insert(id, session.clone()).await;
        session
    }

    pub async fn get(&self, id: &Uuid) -> Option<SharedSession> {
        self.sessions.get(id).await
    }

    pub async fn remove(&self, id: &Uuid) -> Option<SharedSession> {
        self.sessions.remove(id).await
    }

    pub fn len(&self) -> u64 {
        self.sessions.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Drives preference sessions from deck load to the result hand-off
#[derive(Clone)]
pub struct SessionManager {
    store: SessionStore,
    catalog: Arc<MenuCatalog>,
    recommender: RecommendationClient,
    transition: Duration,
    suggestions_path: String,
}

impl SessionManager {
    pub fn new(
        store: SessionStore,
        catalog: Arc<MenuCatalog>,
        recommender: RecommendationClient,
        transition: Duration,
        suggestions_path: impl Into<String>,
    ) -> Self {
        Self {
            store,
            catalog,
            recommender,
            transition,
            suggestions_path: suggestions_path.into(),
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Open a session and load its deck
    pub async fn start(&self) -> SessionView {
        let mut engine = DeckEngine::new(self.transition);

        let phase = match self.catalog.load_deck().await {
            Ok(deck) => engine.loaded(deck),
            Err(_) => engine.load_failed(),
        };

        let session = self.store.insert(engine).await;
        let session = session.lock().await;

        tracing::info!("Session {} started: {:?} with {} menus", session.id, phase, session.engine.len());

        session_view(session.id, &session.engine, Instant::now())
    }

    pub async fn view(&self, id: Uuid) -> Result<SessionView, SessionError> {
        let shared = self.store.get(&id).await.ok_or(SessionError::NotFound(id))?;
        let session = shared.lock().await;
        Ok(session_view(id, &session.engine, Instant::now()))
    }

    /// Apply one swipe; the completing swipe also performs the submission
    /// and returns the encoded landing destination in `redirect`.
    pub async fn swipe(&self, id: Uuid, direction: SwipeDirection) -> Result<SessionView, SessionError> {
        let shared = self.store.get(&id).await.ok_or(SessionError::NotFound(id))?;
        let now = Instant::now();

        let batch = {
            let mut session = shared.lock().await;
            let event = session.engine.swipe(direction, now).map_err(|e| {
                tracing::warn!("Session {} rejected swipe: {}", id, e);
                e
            })?;

            tracing::debug!(
                "Session {} card {} (menu {}) -> {:?}",
                id,
                event.index,
                event.menu_id,
                event.outcome
            );

            if !event.completed {
                return Ok(session_view(id, &session.engine, now));
            }

            session.engine.begin_submission()
        };

        let Some(batch) = batch else {
            let session = shared.lock().await;
            return Ok(session_view(id, &session.engine, now));
        };

        tracing::info!(
            "Session {} completed: {} liked, {} passed",
            id,
            batch.liked_ids.len(),
            batch.passed_ids.len()
        );

        let result = self.recommender.submit_batch(&batch).await;
        let redirect = transfer::destination(&self.suggestions_path, &result);

        if self.store.remove(&id).await.is_none() {
            tracing::warn!("Session {} ended before its recommendation resolved, discarding result", id);
            return Err(SessionError::NotFound(id));
        }

        let mut session = shared.lock().await;
        session.engine.finish_submission();

        let mut view = session_view(id, &session.engine, Instant::now());
        view.redirect = Some(redirect);
        Ok(view)
    }
}
