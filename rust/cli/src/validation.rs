//! Input parsing for the interactive `play` loop.

use blackjack_engine::engine::Action;

/// Outcome of parsing one line typed at the prompt.
#[derive(Debug, PartialEq, Eq)]
pub enum ParseResult {
    Action(Action),
    /// `q` or `quit`
    Quit,
    Invalid(String),
}

/// Parses a prompt answer, case-insensitive.
///
/// Accepts `h`/`hit`, `s`/`stand`, `d`/`deal` and `q`/`quit`.
///
/// ```rust
/// # use blackjack_cli::validation::{parse_player_action, ParseResult};
/// use blackjack_engine::engine::Action;
///
/// assert_eq!(parse_player_action("H"), ParseResult::Action(Action::Hit));
/// assert_eq!(parse_player_action("quit"), ParseResult::Quit);
/// assert!(matches!(parse_player_action("double"), ParseResult::Invalid(_)));
/// ```
pub fn parse_player_action(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return ParseResult::Invalid("Empty input".to_string());
    }

    match input.as_str() {
        "q" | "quit" => ParseResult::Quit,
        "h" | "hit" => ParseResult::Action(Action::Hit),
        "s" | "stand" => ParseResult::Action(Action::Stand),
        "d" | "deal" => ParseResult::Action(Action::Deal),
        other => ParseResult::Invalid(format!(
            "Unrecognized action '{}'. Use hit (h), stand (s), deal (d) or quit (q)",
            other
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_and_long_forms() {
        assert_eq!(parse_player_action("s"), ParseResult::Action(Action::Stand));
        assert_eq!(parse_player_action(" Stand "), ParseResult::Action(Action::Stand));
        assert_eq!(parse_player_action("d"), ParseResult::Action(Action::Deal));
        assert_eq!(parse_player_action("Q"), ParseResult::Quit);
    }

    #[test]
    fn rejects_empty_and_unknown() {
        assert_eq!(
            parse_player_action("   "),
            ParseResult::Invalid("Empty input".to_string())
        );
        match parse_player_action("split") {
            ParseResult::Invalid(msg) => assert!(msg.contains("split")),
            other => panic!("expected Invalid, got {:?}", other),
        }
    }
}
