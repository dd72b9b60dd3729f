use crate::errors::{ErrorSeverity, IntoErrorResponse};
use crate::store::{MemoryStore, SessionId, SessionStore, StoreError};
use blackjack_engine::engine::{Action, Engine, Transition};
use blackjack_engine::errors::GameError;
use blackjack_engine::game::GameState;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use warp::http::StatusCode;

pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

/// Dispatcher between transport and engine.
///
/// Each session's read, transition and write-back happen under a per-session
/// lock, so concurrent requests against one id cannot lose updates. Requests
/// for different sessions only contend on the shared shuffle generator.
#[derive(Debug)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    engine: Mutex<Engine>,
    locks: Mutex<HashMap<SessionId, Arc<Mutex<()>>>>,
    session_ttl: Duration,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>, seed: Option<u64>) -> Self {
        Self::with_ttl(store, seed, DEFAULT_SESSION_TTL)
    }

    pub fn with_ttl(store: Arc<dyn SessionStore>, seed: Option<u64>, ttl: Duration) -> Self {
        let engine = Engine::new(seed);
        tracing::debug!(seed = ?engine.seed(), ttl_secs = ttl.as_secs(), "session manager ready");
        Self {
            store,
            engine: Mutex::new(engine),
            locks: Mutex::new(HashMap::new()),
            session_ttl: ttl,
        }
    }

    pub fn in_memory(seed: Option<u64>) -> Self {
        Self::new(Arc::new(MemoryStore::new()), seed)
    }

    pub fn store(&self) -> Arc<dyn SessionStore> {
        Arc::clone(&self.store)
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    pub fn create_session(&self) -> Result<GameState, SessionError> {
        let state = self.store.create()?;
        tracing::info!(session_id = %state.session_id, "created game session");
        Ok(state)
    }

    pub fn state(&self, session_id: &str) -> Result<GameState, SessionError> {
        self.ensure_live(session_id)?;
        self.store
            .get(session_id)?
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))
    }

    /// Parses `action_name` and applies it to the stored state of `session_id`.
    ///
    /// Nothing is written back unless the engine accepts the action.
    pub fn process_action(
        &self,
        session_id: &str,
        action_name: &str,
    ) -> Result<GameState, SessionError> {
        self.ensure_live(session_id)?;
        let action: Action = action_name.parse()?;

        let lock = self.session_lock(session_id)?;
        let _guard = lock.lock().map_err(|_| SessionError::Store(StoreError::Poisoned))?;

        let current = self
            .store
            .get(session_id)?
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))?;

        tracing::debug!(session_id = %session_id, action = %action, "processing action");

        let transition = {
            let mut engine = self
                .engine
                .lock()
                .map_err(|_| SessionError::Engine("engine lock poisoned".into()))?;
            engine.apply(&current, action)?
        };

        if let Transition::RoundEnded { state, outcome } = &transition {
            tracing::info!(
                session_id = %session_id,
                outcome = ?outcome,
                player_score = state.player_score,
                dealer_score = state.dealer_score,
                wins = state.tally.wins,
                losses = state.tally.losses,
                ties = state.tally.ties,
                "round settled"
            );
        }

        Ok(self.store.update(session_id, transition.into_state())?)
    }

    pub fn delete_session(&self, session_id: &str) -> Result<(), SessionError> {
        match self.store.remove(session_id)? {
            Some(_) => {
                self.drop_lock(session_id);
                tracing::info!(session_id = %session_id, "session deleted");
                Ok(())
            }
            None => Err(SessionError::NotFound(session_id.to_string())),
        }
    }

    /// Removes idle sessions; returns the ids that were dropped.
    pub fn cleanup_expired_sessions(&self) -> Vec<SessionId> {
        match self.store.evict_idle(self.session_ttl) {
            Ok(expired) => {
                for id in &expired {
                    self.drop_lock(id);
                    tracing::info!(session_id = %id, "session expired");
                }
                expired
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to sweep idle sessions");
                Vec::new()
            }
        }
    }

    pub fn active_sessions(&self) -> Vec<SessionId> {
        self.store.ids().unwrap_or_default()
    }

    fn ensure_live(&self, session_id: &str) -> Result<(), SessionError> {
        match self.store.idle_for(session_id)? {
            None => Err(SessionError::NotFound(session_id.to_string())),
            Some(idle) if idle > self.session_ttl => {
                self.store.remove(session_id)?;
                self.drop_lock(session_id);
                tracing::info!(session_id = %session_id, "session expired on access");
                Err(SessionError::Expired(session_id.to_string()))
            }
            Some(_) => Ok(()),
        }
    }

    fn session_lock(&self, session_id: &str) -> Result<Arc<Mutex<()>>, SessionError> {
        let mut locks = self
            .locks
            .lock()
            .map_err(|_| SessionError::Store(StoreError::Poisoned))?;
        Ok(Arc::clone(
            locks.entry(session_id.to_string()).or_default(),
        ))
    }

    fn drop_lock(&self, session_id: &str) {
        if let Ok(mut locks) = self.locks.lock() {
            locks.remove(session_id);
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),
    #[error("Session expired: {0}")]
    Expired(SessionId),
    #[error("Invalid action: {0}")]
    InvalidAction(String),
    #[error("No round in progress")]
    InactiveRound,
    #[error("Game engine error: {0}")]
    Engine(String),
    #[error(transparent)]
    Store(StoreError),
}

impl From<GameError> for SessionError {
    fn from(err: GameError) -> Self {
        match err {
            GameError::InvalidAction(name) => SessionError::InvalidAction(name),
            GameError::InactiveRound => SessionError::InactiveRound,
            other => SessionError::Engine(other.to_string()),
        }
    }
}

impl From<StoreError> for SessionError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => SessionError::NotFound(id),
            other => SessionError::Store(other),
        }
    }
}

impl IntoErrorResponse for SessionError {
    fn status_code(&self) -> StatusCode {
        match self {
            SessionError::NotFound(_) => StatusCode::NOT_FOUND,
            SessionError::Expired(_) => StatusCode::GONE,
            SessionError::InvalidAction(_) => StatusCode::BAD_REQUEST,
            SessionError::InactiveRound => StatusCode::CONFLICT,
            SessionError::Engine(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SessionError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            SessionError::NotFound(_) => "session_not_found",
            SessionError::Expired(_) => "session_expired",
            SessionError::InvalidAction(_) => "invalid_action",
            SessionError::InactiveRound => "inactive_round",
            SessionError::Engine(_) => "engine_error",
            SessionError::Store(_) => "session_storage_error",
        }
    }

    fn error_message(&self) -> String {
        self.to_string()
    }

    fn error_details(&self) -> Option<serde_json::Value> {
        match self {
            SessionError::NotFound(id) => Some(serde_json::json!({ "session_id": id })),
            SessionError::Expired(id) => Some(serde_json::json!({
                "session_id": id,
                "reason": "Session expired due to inactivity"
            })),
            SessionError::InvalidAction(name) => Some(serde_json::json!({
                "action": name,
                "allowed": ["deal", "hit", "stand"]
            })),
            _ => None,
        }
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            SessionError::Store(_) => ErrorSeverity::Critical,
            SessionError::Engine(_) => ErrorSeverity::Server,
            _ => ErrorSeverity::Client,
        }
    }
}
