//! Sequential quiz state machine and the per-session store that holds it.
//!
//! One `QuizState` exists per browser session, keyed by a ulid token in the
//! `quiz_session` cookie. The machine only ever moves forward: a correct
//! answer advances the 1-based index, anything else leaves it where it is,
//! and `Complete` is absorbing.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    InProgress { index: u32 },
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing was selected; re-prompt without moving.
    SelectionRequired,
    /// Wrong answer; same question again.
    TryAgain,
    /// Correct answer, more questions remain.
    Advanced { next_index: u32 },
    /// Correct answer on the final question, or the quiz was already done.
    Finished,
}

impl Default for QuizState {
    fn default() -> Self {
        QuizState::InProgress { index: 1 }
    }
}

impl QuizState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The question index to render, or `None` when the quiz is complete.
    ///
    /// An index past `total` counts as complete too; the question count can
    /// shrink under us if the backend data changed since the session began.
    pub fn current(self, total: u32) -> Option<u32> {
        match self {
            QuizState::InProgress { index } if index <= total => Some(index),
            _ => None,
        }
    }

    /// Apply one submission. `selection` is `None` when the user submitted
    /// without picking a response, otherwise whether the picked response was
    /// correct.
    pub fn submit(&mut self, selection: Option<bool>, total: u32) -> SubmitOutcome {
        let index = match *self {
            QuizState::Complete => return SubmitOutcome::Finished,
            QuizState::InProgress { index } => index,
        };

        if index > total {
            *self = QuizState::Complete;
            return SubmitOutcome::Finished;
        }

        match selection {
            None => SubmitOutcome::SelectionRequired,
            Some(false) => SubmitOutcome::TryAgain,
            Some(true) => {
                if index >= total {
                    *self = QuizState::Complete;
                    SubmitOutcome::Finished
                } else {
                    *self = QuizState::InProgress { index: index + 1 };
                    SubmitOutcome::Advanced {
                        next_index: index + 1,
                    }
                }
            }
        }
    }
}

/// In-memory session contexts, created on the first quiz render and removed
/// when the quiz completes. Shared across handlers via `AppState`.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<String, QuizState>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a session, or mint a fresh one when the token is absent or
    /// unknown. Returns the (possibly new) token and its state.
    pub fn get_or_create(&self, token: Option<&str>) -> (String, QuizState) {
        let mut sessions = self.inner.lock().expect("session store poisoned");

        if let Some(token) = token {
            if let Some(state) = sessions.get(token) {
                return (token.to_string(), *state);
            }
        }

        let token = ulid::Ulid::new().to_string();
        let state = QuizState::new();
        sessions.insert(token.clone(), state);
        tracing::debug!("created quiz session {token}");
        (token, state)
    }

    pub fn update(&self, token: &str, state: QuizState) {
        self.inner
            .lock()
            .expect("session store poisoned")
            .insert(token.to_string(), state);
    }

    pub fn remove(&self, token: &str) {
        self.inner
            .lock()
            .expect("session store poisoned")
            .remove(token);
    }
}
