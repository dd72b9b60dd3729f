use serde::{Deserialize, Serialize};

use crate::deck::Deck;
use crate::hand::Hand;

/// Status shown before the first deal of a session.
pub const PRE_DEAL_STATUS: &str = "Press Deal to start new game";
/// Status shown while the player is to act.
pub const PROMPT_STATUS: &str = "Choose your action: Hit or Stand";

/// How a round was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Player's first two cards totalled 21.
    Blackjack,
    /// Player went over 21 on a hit.
    PlayerBust,
    /// Dealer went over 21 while drawing.
    DealerBust,
    /// Player finished closer to 21 than the dealer.
    PlayerWins,
    /// Equal totals.
    Push,
    /// Dealer finished closer to 21 than the player.
    DealerWins,
}

impl Outcome {
    pub fn status_message(self) -> &'static str {
        match self {
            Outcome::Blackjack => "Blackjack! Player wins!",
            Outcome::PlayerBust => "Player Bust! Dealer wins!",
            Outcome::DealerBust => "Dealer Bust! Player wins!",
            Outcome::PlayerWins => "Player wins!",
            Outcome::Push => "It's a tie!",
            Outcome::DealerWins => "Dealer wins!",
        }
    }

    pub fn is_player_win(self) -> bool {
        matches!(
            self,
            Outcome::Blackjack | Outcome::DealerBust | Outcome::PlayerWins
        )
    }

    pub fn is_loss(self) -> bool {
        matches!(self, Outcome::PlayerBust | Outcome::DealerWins)
    }

    pub fn is_push(self) -> bool {
        self == Outcome::Push
    }
}

/// Cumulative results for a session. Counters only ever grow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl Tally {
    /// Increments exactly one counter for `outcome`.
    pub fn record(&mut self, outcome: Outcome) {
        if outcome.is_player_win() {
            self.wins += 1;
        } else if outcome.is_push() {
            self.ties += 1;
        } else {
            self.losses += 1;
        }
    }

    pub fn total(&self) -> u32 {
        self.wins + self.losses + self.ties
    }
}

/// Everything a session persists between requests: the current round plus
/// the running tally.
///
/// `player_score` and `dealer_score` always equal the scores of the stored
/// hands; the engine recomputes them on every transition. The full dealer
/// hand is kept here; hiding the hole card is left to whoever renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub session_id: String,
    pub deck: Deck,
    pub player_hand: Hand,
    pub dealer_hand: Hand,
    pub player_score: u32,
    pub dealer_score: u32,
    pub round_active: bool,
    pub status_message: String,
    #[serde(flatten)]
    pub tally: Tally,
}

impl GameState {
    /// A fresh session: no round dealt, zero tallies.
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            deck: Deck::default(),
            player_hand: Hand::new(),
            dealer_hand: Hand::new(),
            player_score: 0,
            dealer_score: 0,
            round_active: false,
            status_message: PRE_DEAL_STATUS.to_string(),
            tally: Tally::default(),
        }
    }

    pub fn is_round_active(&self) -> bool {
        self.round_active
    }

    pub fn rounds_played(&self) -> u32 {
        self.tally.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_before_first_deal() {
        let state = GameState::new("s-1");
        assert!(!state.is_round_active());
        assert!(state.player_hand.is_empty());
        assert!(state.dealer_hand.is_empty());
        assert_eq!(state.player_score, 0);
        assert_eq!(state.dealer_score, 0);
        assert_eq!(state.tally, Tally::default());
        assert_eq!(state.status_message, PRE_DEAL_STATUS);
    }

    #[test]
    fn tally_records_one_counter_per_outcome() {
        let mut tally = Tally::default();
        for outcome in [
            Outcome::Blackjack,
            Outcome::PlayerBust,
            Outcome::DealerBust,
            Outcome::PlayerWins,
            Outcome::Push,
            Outcome::DealerWins,
        ] {
            tally.record(outcome);
        }
        assert_eq!(tally.wins, 3);
        assert_eq!(tally.losses, 2);
        assert_eq!(tally.ties, 1);
        assert_eq!(tally.total(), 6);
    }

    #[test]
    fn state_serializes_with_flat_tally() {
        let state = GameState::new("abc");
        let json = serde_json::to_value(&state).expect("serialize");
        assert_eq!(json["session_id"], "abc");
        assert_eq!(json["wins"], 0);
        assert_eq!(json["losses"], 0);
        assert_eq!(json["ties"], 0);
        assert_eq!(json["round_active"], false);
        assert!(json["player_hand"].is_array());
        assert!(json.get("tally").is_none());

        let back: GameState = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, state);
    }
}
