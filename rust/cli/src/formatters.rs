//! Card, hand and table formatters for terminal display.
//!
//! Suits render as ♠ ♥ ♦ ♣ where the terminal is known to handle them and as
//! `s h d c` otherwise. While a round is in progress the dealer's second card
//! is shown as `??` and the dealer total is withheld.
//!
//! ```rust
//! use blackjack_engine::cards::{Card, Rank, Suit};
//! use blackjack_cli::formatters::format_hand;
//!
//! let hand = [Card::new(Suit::Spades, Rank::Ace), Card::new(Suit::Hearts, Rank::Ten)];
//! let shown = format_hand(&hand);
//! assert!(shown == "A♠ 10♥" || shown == "As 10h");
//! ```

use blackjack_engine::cards::{Card, Suit};
use blackjack_engine::game::{GameState, Tally};

pub const HIDDEN_CARD: &str = "??";

/// Windows consoles other than Windows Terminal and VS Code garble the suit
/// symbols; everything else is assumed to cope.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: Suit) -> &'static str {
    if supports_unicode() {
        suit.symbol()
    } else {
        match suit {
            Suit::Spades => "s",
            Suit::Hearts => "h",
            Suit::Diamonds => "d",
            Suit::Clubs => "c",
        }
    }
}

pub fn format_card(card: &Card) -> String {
    format!("{}{}", card.rank.label(), format_suit(card.suit))
}

pub fn format_hand(cards: &[Card]) -> String {
    cards.iter().map(format_card).collect::<Vec<_>>().join(" ")
}

/// Dealer hand with every card after the first replaced by [`HIDDEN_CARD`].
pub fn format_hidden_hand(cards: &[Card]) -> String {
    cards
        .iter()
        .enumerate()
        .map(|(i, card)| {
            if i == 0 {
                format_card(card)
            } else {
                HIDDEN_CARD.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn format_tally(tally: &Tally) -> String {
    format!(
        "Wins: {}  Losses: {}  Ties: {}",
        tally.wins, tally.losses, tally.ties
    )
}

/// Table view as printed after every action: dealer line, player line, status.
pub fn format_table(state: &GameState, reveal_dealer: bool) -> Vec<String> {
    let show_dealer = reveal_dealer || !state.round_active;
    let dealer = if show_dealer {
        format!(
            "Dealer: {} ({})",
            format_hand(state.dealer_hand.cards()),
            state.dealer_score
        )
    } else {
        format!("Dealer: {}", format_hidden_hand(state.dealer_hand.cards()))
    };
    vec![
        dealer,
        format!(
            "Player: {} ({})",
            format_hand(state.player_hand.cards()),
            state.player_score
        ),
        state.status_message.clone(),
    ]
}
