use crate::errors::IntoErrorResponse;
use crate::session::{SessionError, SessionManager};
use crate::store::SessionId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use warp::http::StatusCode;
use warp::reply::{self, Response};
use warp::Reply;

/// Body of `POST /api/game/{id}/action`.
///
/// The action stays a plain string here so unknown names are reported as
/// `invalid_action` by the dispatcher rather than as a malformed body.
#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    pub action: String,
}

/// Starts a new session.
///
/// - **Method**: POST
/// - **Path**: `/api/game`
/// - **Success (201 Created)**: the full pre-deal state
///
/// ```json
/// {
///   "session_id": "uuid",
///   "deck": [],
///   "player_hand": [],
///   "dealer_hand": [],
///   "player_score": 0,
///   "dealer_score": 0,
///   "round_active": false,
///   "status_message": "Press Deal to start new game",
///   "wins": 0, "losses": 0, "ties": 0
/// }
/// ```
pub async fn create_game(sessions: Arc<SessionManager>) -> Response {
    match sessions.create_session() {
        Ok(state) => success_response(StatusCode::CREATED, state),
        Err(err) => session_error(err),
    }
}

/// Fetches the stored state.
///
/// - **Method**: GET
/// - **Path**: `/api/game/{session_id}`
/// - **Errors**: `session_not_found` (404), `session_expired` (410)
pub async fn get_game(sessions: Arc<SessionManager>, session_id: SessionId) -> Response {
    match sessions.state(&session_id) {
        Ok(state) => success_response(StatusCode::OK, state),
        Err(err) => session_error(err),
    }
}

/// Applies `deal`, `hit` or `stand` and returns the updated state.
///
/// - **Method**: POST
/// - **Path**: `/api/game/{session_id}/action`
/// - **Body**: `{ "action": "hit" }`
/// - **Errors**: `session_not_found` (404), `session_expired` (410),
///   `invalid_action` (400), `inactive_round` (409)
pub async fn submit_action(
    sessions: Arc<SessionManager>,
    session_id: SessionId,
    request: ActionRequest,
) -> Response {
    match sessions.process_action(&session_id, &request.action) {
        Ok(state) => success_response(StatusCode::OK, state),
        Err(err) => session_error(err),
    }
}

/// Ends a session early.
///
/// - **Method**: DELETE
/// - **Path**: `/api/game/{session_id}`
/// - **Success (204 No Content)**
pub async fn delete_game(sessions: Arc<SessionManager>, session_id: SessionId) -> Response {
    match sessions.delete_session(&session_id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => session_error(err),
    }
}

fn success_response<T>(status: StatusCode, body: T) -> Response
where
    T: Serialize,
{
    reply::with_status(reply::json(&body), status).into_response()
}

fn session_error(err: SessionError) -> Response {
    err.into_http_response()
}
