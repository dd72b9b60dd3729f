use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::cards::{full_deck, Card};

/// An ordered pile of cards. The last element is the top of the deck:
/// cards are dealt by popping from the end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Builds the 52-card set and applies a Fisher-Yates shuffle driven by `rng`.
    ///
    /// Every one of the 52! orderings is equally likely provided `rng` is
    /// uniform; pass a seeded generator for reproducible decks.
    ///
    /// # Examples
    ///
    /// ```
    /// use blackjack_engine::deck::Deck;
    /// use rand::SeedableRng;
    /// use rand_chacha::ChaCha20Rng;
    ///
    /// let mut rng = ChaCha20Rng::seed_from_u64(7);
    /// let deck = Deck::shuffled(&mut rng);
    /// assert_eq!(deck.remaining(), 52);
    /// ```
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut cards = full_deck();
        for i in (1..cards.len()).rev() {
            let j = rng.random_range(0..=i);
            cards.swap(i, j);
        }
        Self { cards }
    }

    pub fn new_with_seed(seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    /// Wraps an explicit card sequence; the last card is dealt first.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn deal_card(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    #[test]
    fn deals_from_the_end() {
        let first = Card::new(Suit::Spades, Rank::Two);
        let last = Card::new(Suit::Hearts, Rank::King);
        let mut deck = Deck::from_cards(vec![first, last]);
        assert_eq!(deck.deal_card(), Some(last));
        assert_eq!(deck.deal_card(), Some(first));
        assert_eq!(deck.deal_card(), None);
        assert!(deck.is_empty());
    }

    #[test]
    fn serializes_as_plain_array() {
        let deck = Deck::from_cards(vec![Card::new(Suit::Clubs, Rank::Five)]);
        let json = serde_json::to_value(&deck).expect("serialize");
        assert!(json.is_array());
        assert_eq!(json[0]["rank"], "5");
    }
}
