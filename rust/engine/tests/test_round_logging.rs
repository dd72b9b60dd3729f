use std::fs;

use blackjack_engine::engine::{Action, Engine, Transition};
use blackjack_engine::game::GameState;
use blackjack_engine::logger::{RoundLogger, RoundRecord};

fn play_to_end(engine: &mut Engine, state: &GameState) -> Transition {
    let mut transition = engine.apply(state, Action::Deal).expect("deal");
    while let Transition::Continues(active) = &transition {
        transition = engine.apply(active, Action::Stand).expect("stand");
    }
    transition
}

#[test]
fn writes_one_jsonl_line_per_settled_round() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("rounds").join("log.jsonl");
    let mut logger = RoundLogger::create(&path).expect("create logger");
    let mut engine = Engine::new(Some(3));
    let mut state = GameState::new("logged");

    for _ in 0..3 {
        let transition = play_to_end(&mut engine, &state);
        assert!(logger.log_transition(&transition).expect("log"));
        state = transition.into_state();
    }

    let bytes = fs::read(&path).expect("read file");
    assert!(bytes.ends_with(b"\n"));
    assert!(!bytes.contains(&b'\r'));

    let content = String::from_utf8(bytes).expect("utf8");
    let records: Vec<RoundRecord> = content
        .lines()
        .map(|l| serde_json::from_str(l).expect("parse record"))
        .collect();
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.session_id == "logged"));
    assert!(records.iter().all(|r| r.ts.is_some()));
    assert!(records[0].round_id.ends_with("-000001"));
    assert!(records[2].round_id.ends_with("-000003"));
}

#[test]
fn active_rounds_are_not_logged() {
    let mut logger = RoundLogger::detached("20250101");
    let mut engine = Engine::new(Some(11));
    let state = GameState::new("skip");
    let dealt = (0..50)
        .map(|_| engine.apply(&state, Action::Deal).expect("deal"))
        .find(|t| !t.is_round_over())
        .expect("a non-natural deal");
    assert!(!logger.log_transition(&dealt).expect("log"));
    assert_eq!(logger.next_id(), "20250101-000001");
}

#[test]
fn preset_timestamp_is_kept() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("ts.jsonl");
    let mut logger = RoundLogger::create(&path).expect("create logger");
    let mut engine = Engine::new(Some(5));
    let transition = play_to_end(&mut engine, &GameState::new("ts"));
    let mut record =
        RoundRecord::from_transition("20300101-000001".into(), &transition).expect("settled");
    record.ts = Some("2030-01-01T00:00:00Z".into());
    logger.write(&record).expect("write");

    let content = fs::read_to_string(&path).expect("read");
    assert!(content.contains("2030-01-01T00:00:00Z"));
}
