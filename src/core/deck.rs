use crate::models::{MenuItem, PreferenceBatch, SwipeDirection, SwipeOutcome};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Default visual transition length between two accepted swipes
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(300);

/// Lifecycle of one preference session
///
/// ```text
/// Loading ──> Ready ──(swipe)*──> Completed ──> Submitting ──> Submitted
///    │
///    ├──> Empty       (deck loaded with zero items)
///    └──> LoadFailed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckPhase {
    Loading,
    Ready,
    Completed,
    Submitting,
    Submitted,
    Empty,
    LoadFailed,
}

/// Reasons a swipe is not accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SwipeError {
    #[error("swipe not accepted while the deck is {0:?}")]
    NotReady(DeckPhase),

    #[error("swipe arrived {remaining:?} before the previous transition finished")]
    Debounced { remaining: Duration },
}

/// Result of one accepted swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwipeEvent {
    pub index: usize,
    pub menu_id: i64,
    pub outcome: SwipeOutcome,
    /// True only for the swipe that moved the deck into `Completed`
    pub completed: bool,
}

/// Deck traversal and swipe classification state machine
///
/// Owns the deck, the cursor and the two outcome collections for the
/// lifetime of one preference session. Every deck position is classified
/// exactly once and in index order. Time is passed in by the caller so the
/// debounce window stays deterministic.
#[derive(Debug, Clone)]
pub struct DeckEngine {
    deck: Vec<MenuItem>,
    current_index: usize,
    liked_ids: Vec<i64>,
    passed_ids: Vec<i64>,
    phase: DeckPhase,
    transition: Duration,
    last_swipe: Option<(SwipeDirection, Instant)>,
}

impl DeckEngine {
    pub fn new(transition: Duration) -> Self {
        Self {
            deck: Vec::new(),
            current_index: 0,
            liked_ids: Vec::new(),
            passed_ids: Vec::new(),
            phase: DeckPhase::Loading,
            transition,
            last_swipe: None,
        }
    }

    /// Engine that starts out with a loaded deck
    pub fn with_deck(deck: Vec<MenuItem>, transition: Duration) -> Self {
        let mut engine = Self::new(transition);
        engine.loaded(deck);
        engine
    }

    /// Install the fetched deck. Ignored unless still `Loading`.
    pub fn loaded(&mut self, deck: Vec<MenuItem>) -> DeckPhase {
        if self.phase != DeckPhase::Loading {
            return self.phase;
        }

        self.phase = if deck.is_empty() {
            DeckPhase::Empty
        } else {
            DeckPhase::Ready
        };
        self.deck = deck;
        self.phase
    }

    /// Record that the deck could not be fetched. Ignored unless still `Loading`.
    pub fn load_failed(&mut self) -> DeckPhase {
        if self.phase == DeckPhase::Loading {
            self.phase = DeckPhase::LoadFailed;
        }
        self.phase
    }

    /// Classify the card at the cursor and advance by one
    pub fn swipe(&mut self, direction: SwipeDirection, now: Instant) -> Result<SwipeEvent, SwipeError> {
        if self.phase != DeckPhase::Ready {
            return Err(SwipeError::NotReady(self.phase));
        }

        if let Some((_, at)) = self.last_swipe {
            let elapsed = now.saturating_duration_since(at);
            if elapsed < self.transition {
                return Err(SwipeError::Debounced {
                    remaining: self.transition - elapsed,
                });
            }
        }

        let index = self.current_index;
        let menu_id = self.deck[index].id;
        let outcome = SwipeOutcome::from(direction);

        match outcome {
            SwipeOutcome::Liked => self.liked_ids.push(menu_id),
            SwipeOutcome::Passed => self.passed_ids.push(menu_id),
        }

        self.last_swipe = Some((direction, now));
        self.current_index += 1;

        let completed = self.check_completion();

        Ok(SwipeEvent {
            index,
            menu_id,
            outcome,
            completed,
        })
    }

    /// Move `Ready` to `Completed` once the cursor reaches the end.
    /// Returns true only on the call that performs the transition.
    pub fn check_completion(&mut self) -> bool {
        if self.phase == DeckPhase::Ready
            && !self.deck.is_empty()
            && self.current_index == self.deck.len()
        {
            self.phase = DeckPhase::Completed;
            return true;
        }
        false
    }

    /// Claim the single submission for this traversal.
    /// Returns `None` for every call after the first, and before completion.
    pub fn begin_submission(&mut self) -> Option<PreferenceBatch> {
        if self.phase != DeckPhase::Completed {
            return None;
        }

        self.phase = DeckPhase::Submitting;
        Some(self.batch())
    }

    pub fn finish_submission(&mut self) {
        if self.phase == DeckPhase::Submitting {
            self.phase = DeckPhase::Submitted;
        }
    }

    pub fn phase(&self) -> DeckPhase {
        self.phase
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn len(&self) -> usize {
        self.deck.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    pub fn current(&self) -> Option<&MenuItem> {
        self.deck.get(self.current_index)
    }

    pub fn upcoming(&self) -> Option<&MenuItem> {
        self.deck.get(self.current_index + 1)
    }

    pub fn liked_ids(&self) -> &[i64] {
        &self.liked_ids
    }

    pub fn passed_ids(&self) -> &[i64] {
        &self.passed_ids
    }

    pub fn batch(&self) -> PreferenceBatch {
        PreferenceBatch {
            liked_ids: self.liked_ids.clone(),
            passed_ids: self.passed_ids.clone(),
        }
    }

    /// Direction of the last swipe while its transition is still running
    pub fn transitioning(&self, now: Instant) -> Option<SwipeDirection> {
        self.last_swipe
            .filter(|(_, at)| now.saturating_duration_since(*at) < self.transition)
            .map(|(direction, _)| direction)
    }
}

impl Default for DeckEngine {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSITION)
    }
}
