use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Highest total a hand may reach without busting.
pub const BLACKJACK: u32 = 21;

/// Best blackjack total for `cards`.
///
/// Aces start at 11; while the total exceeds 21 and an ace is still counted
/// high, one ace is downgraded to 1. The result is the largest total not above
/// 21 when one exists, otherwise the smallest possible total. Card order does
/// not matter.
///
/// # Examples
///
/// ```
/// use blackjack_engine::cards::{Card, Rank, Suit};
/// use blackjack_engine::hand::compute_score;
///
/// let ace = Card::new(Suit::Spades, Rank::Ace);
/// let king = Card::new(Suit::Hearts, Rank::King);
/// assert_eq!(compute_score(&[ace, king]), 21);
/// assert_eq!(compute_score(&[ace, ace]), 12);
/// assert_eq!(compute_score(&[]), 0);
/// ```
pub fn compute_score(cards: &[Card]) -> u32 {
    let (total, _) = score_with_soft_aces(cards);
    total
}

// Returns the adjusted total and how many aces still count as 11.
fn score_with_soft_aces(cards: &[Card]) -> (u32, u32) {
    let mut total = 0;
    let mut soft_aces = 0;
    for card in cards {
        total += card.base_value();
        if card.rank.is_ace() {
            soft_aces += 1;
        }
    }
    while total > BLACKJACK && soft_aces > 0 {
        total -= 10;
        soft_aces -= 1;
    }
    (total, soft_aces)
}

/// Cards held by one side of the table, in the order they were dealt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn score(&self) -> u32 {
        compute_score(&self.cards)
    }

    pub fn is_bust(&self) -> bool {
        self.score() > BLACKJACK
    }

    /// True while at least one ace is still counted as 11.
    pub fn is_soft(&self) -> bool {
        score_with_soft_aces(&self.cards).1 > 0
    }

    /// Two cards totalling 21.
    pub fn is_natural(&self) -> bool {
        self.cards.len() == 2 && self.score() == BLACKJACK
    }
}
