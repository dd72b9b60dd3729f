//! Session lifecycle events as seen by a capturing subscriber.
use blackjack_web::init_test_logging;
use blackjack_web::server::{AppContext, ServerConfig};

#[test]
fn session_lifecycle_is_logged_with_session_id() {
    let logs = init_test_logging();
    let context = AppContext::new(ServerConfig::for_tests());
    let sessions = context.sessions();

    let id = sessions.create_session().expect("create").session_id;
    let dealt = sessions.process_action(&id, "deal").expect("deal");
    if dealt.round_active {
        sessions.process_action(&id, "stand").expect("stand");
    }
    sessions.delete_session(&id).expect("delete");

    let entries = logs.entries();
    let for_session = |message: &str| {
        entries
            .iter()
            .any(|e| e.message.contains(message) && e.field("session_id") == Some(id.as_str()))
    };
    assert!(for_session("created game session"));
    assert!(for_session("round settled"));
    assert!(for_session("session deleted"));

    let settled = entries
        .iter()
        .find(|e| e.message.contains("round settled"))
        .expect("settled event");
    assert_eq!(settled.level, tracing::Level::INFO);
    assert!(settled.field("outcome").is_some());
}
