use std::fmt;
use std::str::FromStr;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::game::{GameState, Outcome, PROMPT_STATUS};
use crate::hand::{Hand, BLACKJACK};

/// The dealer keeps drawing while below this total, soft or hard.
pub const DEALER_STANDS_ON: u32 = 17;

/// A player request against the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Start a new round with a fresh deck.
    Deal,
    /// Take one more card.
    Hit,
    /// Stop drawing and let the dealer play.
    Stand,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Deal => "deal",
            Action::Hit => "hit",
            Action::Stand => "stand",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deal" => Ok(Action::Deal),
            "hit" => Ok(Action::Hit),
            "stand" => Ok(Action::Stand),
            _ => Err(GameError::InvalidAction(s.to_string())),
        }
    }
}

/// Result of applying an action: either the player still has a decision to
/// make, or the round has been resolved and the tally updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Continues(GameState),
    RoundEnded { state: GameState, outcome: Outcome },
}

impl Transition {
    pub fn state(&self) -> &GameState {
        match self {
            Transition::Continues(state) => state,
            Transition::RoundEnded { state, .. } => state,
        }
    }

    pub fn into_state(self) -> GameState {
        match self {
            Transition::Continues(state) => state,
            Transition::RoundEnded { state, .. } => state,
        }
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Transition::Continues(_) => None,
            Transition::RoundEnded { outcome, .. } => Some(*outcome),
        }
    }

    pub fn is_round_over(&self) -> bool {
        matches!(self, Transition::RoundEnded { .. })
    }
}

/// Applies `action` to a snapshot of the session and returns the next state.
///
/// The input is never modified; on error nothing should be persisted.
///
/// # Errors
///
/// - [`GameError::InactiveRound`] for `hit` or `stand` outside a round
/// - [`GameError::DeckExhausted`] if a stored deck runs dry mid-round
pub fn apply_action<R: Rng + ?Sized>(
    state: &GameState,
    action: Action,
    rng: &mut R,
) -> Result<Transition, GameError> {
    match action {
        Action::Deal => deal(state, rng),
        Action::Hit => hit(state),
        Action::Stand => stand(state),
    }
}

/// Replaces deck and hands with a freshly shuffled round.
///
/// Player receives the first two cards off the deck, dealer the next two.
/// A player natural ends the round at once as a blackjack win; the dealer's
/// cards are not checked until the dealer plays.
pub fn deal<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> Result<Transition, GameError> {
    let mut deck = Deck::shuffled(rng);
    let mut player_hand = Hand::new();
    let mut dealer_hand = Hand::new();
    for _ in 0..2 {
        player_hand.push(draw(&mut deck)?);
    }
    for _ in 0..2 {
        dealer_hand.push(draw(&mut deck)?);
    }

    let next = GameState {
        session_id: state.session_id.clone(),
        deck,
        player_score: player_hand.score(),
        dealer_score: dealer_hand.score(),
        player_hand,
        dealer_hand,
        round_active: true,
        status_message: PROMPT_STATUS.to_string(),
        tally: state.tally,
    };

    if next.player_score == BLACKJACK {
        return Ok(finish(next, Outcome::Blackjack));
    }
    Ok(Transition::Continues(next))
}

/// Draws one card for the player. Busting loses the round; reaching exactly
/// 21 stands automatically.
pub fn hit(state: &GameState) -> Result<Transition, GameError> {
    ensure_active(state)?;

    let mut next = state.clone();
    let card = draw(&mut next.deck)?;
    next.player_hand.push(card);
    next.player_score = next.player_hand.score();

    if next.player_score > BLACKJACK {
        return Ok(finish(next, Outcome::PlayerBust));
    }
    if next.player_score == BLACKJACK {
        return stand(&next);
    }
    next.status_message = PROMPT_STATUS.to_string();
    Ok(Transition::Continues(next))
}

/// Plays out the dealer hand and settles the round against the stored
/// player score.
pub fn stand(state: &GameState) -> Result<Transition, GameError> {
    ensure_active(state)?;

    let mut next = state.clone();
    next.dealer_score = next.dealer_hand.score();
    while next.dealer_score < DEALER_STANDS_ON {
        let card = draw(&mut next.deck)?;
        next.dealer_hand.push(card);
        next.dealer_score = next.dealer_hand.score();
    }

    let player = state.player_score;
    let dealer = next.dealer_score;
    let outcome = if dealer > BLACKJACK {
        Outcome::DealerBust
    } else if player == dealer {
        Outcome::Push
    } else if player > dealer {
        Outcome::PlayerWins
    } else {
        Outcome::DealerWins
    };
    Ok(finish(next, outcome))
}

fn ensure_active(state: &GameState) -> Result<(), GameError> {
    if state.round_active {
        Ok(())
    } else {
        Err(GameError::InactiveRound)
    }
}

fn draw(deck: &mut Deck) -> Result<Card, GameError> {
    deck.deal_card().ok_or(GameError::DeckExhausted)
}

fn finish(mut state: GameState, outcome: Outcome) -> Transition {
    state.round_active = false;
    state.status_message = outcome.status_message().to_string();
    state.tally.record(outcome);
    Transition::RoundEnded { state, outcome }
}

/// Owns the shuffle randomness for a stream of rounds. Game state itself is
/// always passed in and handed back; nothing else is kept between calls.
///
/// # Examples
///
/// ```
/// use blackjack_engine::engine::{Action, Engine};
/// use blackjack_engine::game::GameState;
///
/// let mut engine = Engine::new(Some(12345));
/// let state = GameState::new("demo");
/// let dealt = engine.apply(&state, Action::Deal).expect("deal always succeeds");
/// assert_eq!(dealt.state().player_hand.len(), 2);
///
/// let settled = if dealt.is_round_over() {
///     dealt
/// } else {
///     engine.apply(dealt.state(), Action::Stand).expect("round is active")
/// };
/// assert!(!settled.state().round_active);
/// assert_eq!(settled.state().tally.total(), 1);
/// ```
#[derive(Debug)]
pub struct Engine<R = ChaCha20Rng> {
    rng: R,
    seed: Option<u64>,
}

impl Engine<ChaCha20Rng> {
    /// Seeded ChaCha20 engine; a random seed is drawn when `seed` is `None`.
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }
}

impl<R: Rng> Engine<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng, seed: None }
    }

    /// Seed used to build the generator, when the engine created it.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn apply(&mut self, state: &GameState, action: Action) -> Result<Transition, GameError> {
        apply_action(state, action, &mut self.rng)
    }
}
