use std::collections::HashSet;

use blackjack_engine::cards::{full_deck, Card, Rank};
use blackjack_engine::deck::Deck;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn drain(mut deck: Deck) -> Vec<Card> {
    let mut out = Vec::new();
    while let Some(c) = deck.deal_card() {
        out.push(c);
    }
    out
}

#[test]
fn shuffled_deck_has_52_unique_cards() {
    let deck = Deck::new_with_seed(42);
    assert_eq!(deck.remaining(), 52);
    let mut set = HashSet::new();
    for (i, c) in drain(deck).into_iter().enumerate() {
        assert!(set.insert(c), "card {:?} duplicated at position {}", c, i);
    }
    let expected: HashSet<Card> = full_deck().into_iter().collect();
    assert_eq!(set, expected);
}

#[test]
fn shuffle_is_deterministic_with_same_seed() {
    let a = drain(Deck::new_with_seed(12345));
    let b = drain(Deck::new_with_seed(12345));
    assert_eq!(a, b, "same seed must yield identical order");
}

#[test]
fn shuffle_differs_with_different_seed() {
    let a = Deck::new_with_seed(1);
    let b = Deck::new_with_seed(2);
    assert_ne!(
        a.cards(),
        b.cards(),
        "different seeds should produce different orders (high probability)"
    );
}

#[test]
fn repeated_shuffles_from_one_rng_differ() {
    let mut rng = ChaCha20Rng::seed_from_u64(5);
    let first = Deck::shuffled(&mut rng);
    let second = Deck::shuffled(&mut rng);
    assert_ne!(first, second);
}

#[test]
fn shuffle_actually_moves_cards() {
    let deck = Deck::new_with_seed(77);
    assert_ne!(deck.cards(), full_deck().as_slice());
}

#[test]
fn top_card_rank_is_roughly_uniform() {
    // 2600 shuffles, 13 ranks: expect 200 per rank, allow a wide band.
    let mut rng = ChaCha20Rng::seed_from_u64(2024);
    let mut counts = std::collections::HashMap::<Rank, u32>::new();
    for _ in 0..2600 {
        let mut deck = Deck::shuffled(&mut rng);
        let top = deck.deal_card().expect("52 cards");
        *counts.entry(top.rank).or_default() += 1;
    }
    assert_eq!(counts.len(), 13);
    for (rank, n) in counts {
        assert!(
            (120..=280).contains(&n),
            "rank {:?} came up {} times",
            rank,
            n
        );
    }
}
