use blackjack_cli::commands::handle_play_command;
use blackjack_engine::logger::RoundRecord;
use std::io::Cursor;

fn play_with_log(seed: u64, rounds: u32, input: &str, log: std::path::PathBuf) -> String {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let mut stdin = Cursor::new(input.as_bytes().to_vec());
    handle_play_command(
        Some(seed),
        Some(rounds),
        Some(log),
        false,
        &mut out,
        &mut err,
        &mut stdin,
    )
    .expect("play session");
    String::from_utf8(out).expect("utf8")
}

#[test]
fn standing_every_round_plays_to_the_limit() {
    let dir = tempfile::tempdir().expect("temp dir");
    let log = dir.path().join("rounds.jsonl");
    // "s" settles an active round, "d" starts the next; extra lines are harmless
    let input = "s\nd\n".repeat(10);
    let stdout = play_with_log(11, 3, &input, log.clone());

    assert!(stdout.contains("Rounds played: 3"));
    assert!(stdout.contains("Round 3"));
    assert!(!stdout.contains("Round 4"));

    let content = std::fs::read_to_string(&log).expect("log file");
    let records: Vec<RoundRecord> = content
        .lines()
        .map(|line| serde_json::from_str(line).expect("record"))
        .collect();
    assert_eq!(records.len(), 3);
    assert!(records[0].round_id.ends_with("-000001"));
    assert!(records[2].round_id.ends_with("-000003"));
    assert!(records.iter().all(|r| r.ts.is_some()));
}

#[test]
fn same_seed_replays_identically() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = "h\ns\nd\ns\n";
    let first = play_with_log(21, 2, input, dir.path().join("a.jsonl"));
    let second = play_with_log(21, 2, input, dir.path().join("b.jsonl"));
    assert_eq!(first, second);
}

#[test]
fn deal_mid_round_is_refused() {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let mut stdin = Cursor::new(b"d\nq\n".to_vec());
    // seed search for a first round that is not an immediate natural
    let seed = (0..100u64)
        .find(|seed| {
            let mut probe = Vec::new();
            blackjack_cli::commands::handle_deal_command(Some(*seed), &mut probe).expect("deal");
            String::from_utf8_lossy(&probe).contains("Choose your action")
        })
        .expect("non-natural seed");

    handle_play_command(
        Some(seed),
        None,
        None,
        false,
        &mut out,
        &mut err,
        &mut stdin,
    )
    .expect("play session");

    let stderr = String::from_utf8_lossy(&err);
    assert!(stderr.contains("Round in progress"), "stderr: {}", stderr);
    let stdout = String::from_utf8_lossy(&out);
    assert!(stdout.contains("Rounds played: 0"));
    assert!(stdout.contains("??"));
}
