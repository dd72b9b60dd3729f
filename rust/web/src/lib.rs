//! HTTP front end for the blackjack engine: a session store, the dispatcher
//! that applies actions to stored state, and a warp server exposing both.

pub mod errors;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod server;
pub mod session;
pub mod settings;
pub mod store;

pub use errors::{handle_rejection, ErrorResponse, ErrorSeverity, IntoErrorResponse};
pub use logging::{init_logging, init_test_logging, LogEntry, TestLogSubscriber};
pub use middleware::{log_response, with_request_logging};
pub use server::{AppContext, ServerConfig, ServerError, ServerHandle, WebServer};
pub use session::{SessionError, SessionManager, DEFAULT_SESSION_TTL};
pub use settings::{ResolvedSettings, ServerSettings, SettingsError, SettingsOverrides, ValueSource};
pub use store::{MemoryStore, SessionId, SessionStore, StoreError};
