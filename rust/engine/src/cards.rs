use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four suits in a standard 52-card deck.
/// Serialized as its symbol so clients can render it directly.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Spades suit (♠)
    #[serde(rename = "♠")]
    Spades,
    /// Hearts suit (♥)
    #[serde(rename = "♥")]
    Hearts,
    /// Diamonds suit (♦)
    #[serde(rename = "♦")]
    Diamonds,
    /// Clubs suit (♣)
    #[serde(rename = "♣")]
    Clubs,
}

impl Suit {
    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Spades => "♠",
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
        }
    }
}

/// The rank (face) of a playing card, Ace through King.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    #[serde(rename = "A")]
    Ace,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "J")]
    Jack,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "K")]
    King,
}

impl Rank {
    /// Blackjack value before any soft-ace adjustment: Ace counts 11,
    /// face cards 10, numerals their pip value.
    pub fn base_value(self) -> u32 {
        match self {
            Rank::Ace => 11,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }

    pub fn is_ace(self) -> bool {
        self == Rank::Ace
    }
}

/// A single playing card.
///
/// The blackjack base value is derived from the rank, so it is carried on
/// the wire for clients but recomputed whenever a card is decoded.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(into = "CardRepr", from = "CardRepr")]
pub struct Card {
    /// The suit of the card
    pub suit: Suit,
    /// The rank of the card (Ace through King)
    pub rank: Rank,
}

impl Card {
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    pub fn base_value(&self) -> u32 {
        self.rank.base_value()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

#[derive(Serialize, Deserialize)]
struct CardRepr {
    suit: Suit,
    rank: Rank,
    #[serde(default)]
    base_value: u32,
}

impl From<Card> for CardRepr {
    fn from(card: Card) -> Self {
        Self {
            suit: card.suit,
            rank: card.rank,
            base_value: card.base_value(),
        }
    }
}

impl From<CardRepr> for Card {
    fn from(repr: CardRepr) -> Self {
        Card::new(repr.suit, repr.rank)
    }
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ]
}

/// The 52 cards in suit-major order, unshuffled.
pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(52);
    for &s in &all_suits() {
        for &r in &all_ranks() {
            v.push(Card::new(s, r));
        }
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_values_follow_blackjack_rules() {
        assert_eq!(Rank::Ace.base_value(), 11);
        assert_eq!(Rank::Seven.base_value(), 7);
        for face in [Rank::Ten, Rank::Jack, Rank::Queen, Rank::King] {
            assert_eq!(face.base_value(), 10);
        }
    }

    #[test]
    fn card_serializes_with_symbol_label_and_value() {
        let card = Card::new(Suit::Hearts, Rank::Queen);
        let json = serde_json::to_value(card).expect("serialize");
        assert_eq!(json["suit"], "♥");
        assert_eq!(json["rank"], "Q");
        assert_eq!(json["base_value"], 10);
    }

    #[test]
    fn decoding_recomputes_base_value() {
        let card: Card =
            serde_json::from_str(r#"{"suit":"♣","rank":"A","base_value":3}"#).expect("decode");
        assert_eq!(card, Card::new(Suit::Clubs, Rank::Ace));
        assert_eq!(card.base_value(), 11);
    }

    #[test]
    fn display_uses_label_and_symbol() {
        assert_eq!(Card::new(Suit::Spades, Rank::Ten).to_string(), "10♠");
        assert_eq!(Card::new(Suit::Diamonds, Rank::Ace).to_string(), "A♦");
    }
}
