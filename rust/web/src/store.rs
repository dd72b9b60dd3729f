use blackjack_engine::game::GameState;
use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use thiserror::Error;
use uuid::Uuid;

pub type SessionId = String;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),
    #[error("Session storage poisoned")]
    Poisoned,
}

/// Keyed storage for session state.
///
/// Implementations hand out owned snapshots; callers that need a
/// read-modify-write cycle must serialize it themselves.
pub trait SessionStore: Send + Sync + fmt::Debug {
    /// Returns the stored state and marks the session as recently used.
    fn get(&self, id: &str) -> Result<Option<GameState>, StoreError>;

    /// Creates a fresh session with a new unique id.
    fn create(&self) -> Result<GameState, StoreError>;

    /// Replaces the state of an existing session. Unknown ids fail with
    /// [`StoreError::NotFound`].
    fn update(&self, id: &str, state: GameState) -> Result<GameState, StoreError>;

    fn remove(&self, id: &str) -> Result<Option<GameState>, StoreError>;

    /// Time since the session was last read or written, `None` if unknown.
    fn idle_for(&self, id: &str) -> Result<Option<Duration>, StoreError>;

    /// Drops every session idle for longer than `ttl` and returns their ids.
    fn evict_idle(&self, ttl: Duration) -> Result<Vec<SessionId>, StoreError>;

    fn ids(&self) -> Result<Vec<SessionId>, StoreError>;
}

#[derive(Debug)]
struct Entry {
    state: GameState,
    last_active: Instant,
}

impl Entry {
    fn new(state: GameState) -> Self {
        Self {
            state,
            last_active: Instant::now(),
        }
    }
}

/// Process-local store backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sessions: RwLock<HashMap<SessionId, Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Moves the last-access time of `id` back by `by`. Returns false for unknown ids.
    ///
    /// Test hook for exercising idle expiry without sleeping; servers never call it.
    #[doc(hidden)]
    pub fn backdate(&self, id: &str, by: Duration) -> bool {
        let Ok(mut guard) = self.sessions.write() else {
            return false;
        };
        match guard.get_mut(id) {
            Some(entry) => {
                entry.last_active = Instant::now()
                    .checked_sub(by)
                    .unwrap_or(entry.last_active);
                true
            }
            None => false,
        }
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, id: &str) -> Result<Option<GameState>, StoreError> {
        let mut guard = self.sessions.write().map_err(|_| StoreError::Poisoned)?;
        Ok(guard.get_mut(id).map(|entry| {
            entry.last_active = Instant::now();
            entry.state.clone()
        }))
    }

    fn create(&self) -> Result<GameState, StoreError> {
        let mut guard = self.sessions.write().map_err(|_| StoreError::Poisoned)?;
        let mut id = Uuid::new_v4().to_string();
        while guard.contains_key(&id) {
            id = Uuid::new_v4().to_string();
        }
        let state = GameState::new(id.clone());
        guard.insert(id, Entry::new(state.clone()));
        Ok(state)
    }

    fn update(&self, id: &str, state: GameState) -> Result<GameState, StoreError> {
        let mut guard = self.sessions.write().map_err(|_| StoreError::Poisoned)?;
        let entry = guard
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        entry.state = state;
        entry.last_active = Instant::now();
        Ok(entry.state.clone())
    }

    fn remove(&self, id: &str) -> Result<Option<GameState>, StoreError> {
        let mut guard = self.sessions.write().map_err(|_| StoreError::Poisoned)?;
        Ok(guard.remove(id).map(|entry| entry.state))
    }

    fn idle_for(&self, id: &str) -> Result<Option<Duration>, StoreError> {
        let guard = self.sessions.read().map_err(|_| StoreError::Poisoned)?;
        Ok(guard.get(id).map(|entry| entry.last_active.elapsed()))
    }

    fn evict_idle(&self, ttl: Duration) -> Result<Vec<SessionId>, StoreError> {
        let mut expired = Vec::new();
        let mut guard = self.sessions.write().map_err(|_| StoreError::Poisoned)?;
        guard.retain(|id, entry| {
            if entry.last_active.elapsed() > ttl {
                expired.push(id.clone());
                false
            } else {
                true
            }
        });
        Ok(expired)
    }

    fn ids(&self) -> Result<Vec<SessionId>, StoreError> {
        let guard = self.sessions.read().map_err(|_| StoreError::Poisoned)?;
        Ok(guard.keys().cloned().collect())
    }
}
