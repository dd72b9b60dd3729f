use blackjack_engine::cards::{Card, Rank as R, Suit as S};
use blackjack_engine::deck::Deck;
use blackjack_engine::hand::{compute_score, Hand};

fn hand(ranks: &[R]) -> Vec<Card> {
    ranks.iter().map(|&r| Card::new(S::Hearts, r)).collect()
}

#[test]
fn known_totals() {
    assert_eq!(compute_score(&hand(&[R::Ace, R::King])), 21);
    assert_eq!(compute_score(&hand(&[R::Ace, R::Ace])), 12);
    assert_eq!(compute_score(&hand(&[R::Ace, R::Ace, R::Ace])), 13);
    assert_eq!(compute_score(&hand(&[R::Ten, R::Nine, R::Five])), 24);
    assert_eq!(compute_score(&[]), 0);
}

#[test]
fn four_aces_and_a_seven() {
    // 44 + 7 = 51: three aces drop to 1, the fourth stays high.
    assert_eq!(
        compute_score(&hand(&[R::Ace, R::Ace, R::Ace, R::Ace, R::Seven])),
        21
    );
    assert_eq!(
        compute_score(&hand(&[R::Ace, R::Ace, R::Ace, R::Ace, R::Seven, R::King])),
        21
    );
    assert_eq!(
        compute_score(&hand(&[
            R::Ace,
            R::Ace,
            R::Ace,
            R::Ace,
            R::Seven,
            R::King,
            R::Two
        ])),
        23
    );
}

#[test]
fn score_ignores_card_order() {
    // Walk a shuffled deck in windows of 2..=6 cards and compare against reversed
    // and rotated orderings.
    for seed in 0..20u64 {
        let cards = Deck::new_with_seed(seed).cards().to_vec();
        for size in 2..=6 {
            for window in cards.windows(size) {
                let base = compute_score(window);
                let mut reversed = window.to_vec();
                reversed.reverse();
                assert_eq!(compute_score(&reversed), base);
                let mut rotated = window.to_vec();
                rotated.rotate_left(1);
                assert_eq!(compute_score(&rotated), base);
            }
        }
    }
}

#[test]
fn score_is_best_total_not_over_21() {
    // Brute force: try every assignment of 1 or 11 to each ace.
    for seed in 100..130u64 {
        let cards = Deck::new_with_seed(seed).cards().to_vec();
        for window in cards.windows(5) {
            let aces = window.iter().filter(|c| c.rank == R::Ace).count();
            let hard: u32 = window
                .iter()
                .map(|c| if c.rank == R::Ace { 1 } else { c.base_value() })
                .sum();
            let best = (0..=aces as u32)
                .map(|high| hard + 10 * high)
                .filter(|&t| t <= 21)
                .max()
                .unwrap_or(hard);
            assert_eq!(compute_score(window), best, "hand {:?}", window);
        }
    }
}

#[test]
fn hand_wrapper_matches_free_function() {
    let cards = hand(&[R::Ace, R::Five, R::Nine]);
    let h = Hand::from_cards(cards.clone());
    assert_eq!(h.score(), compute_score(&cards));
    assert_eq!(h.score(), 15);
    assert!(!h.is_soft());
    assert!(!h.is_bust());
}
