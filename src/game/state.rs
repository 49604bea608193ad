//! Main game state structure and seat-scoped rendering
//!
//! `GameState` is the single mutable record of a game: hands, play stacks,
//! discard pile, resource counters and the turn cursor. It is mutated only
//! by the move executor and read everywhere else.
//!
//! Rendering is the information-hiding boundary of the whole engine: a
//! seat's rendering must never reveal the color or rank of its own cards.

use crate::core::{Card, Color, Deck, Hand, HAND_SIZE};
use crate::{HanabiError, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};

pub const MAX_LIVES: u8 = 3;
pub const MAX_INFO_TOKENS: u8 = 8;

/// Maximum score: 5 colors x rank 5
pub const MAX_SCORE: u8 = 25;

/// Per-color progress toward rank 5
///
/// Invariant: a stack only ever advances by consecutive ranks starting at 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayArea {
    stacks: [u8; 5],
}

impl PlayArea {
    /// Highest rank successfully played for `color` (0 = none)
    pub fn top(&self, color: Color) -> u8 {
        self.stacks[color.index()]
    }

    /// Would `card` continue its color's stack?
    pub fn is_next(&self, card: Card) -> bool {
        self.top(card.color) + 1 == card.rank
    }

    /// Advance `color` to `rank`; callers must have checked [`is_next`](Self::is_next)
    pub fn advance(&mut self, color: Color, rank: u8) {
        debug_assert_eq!(self.stacks[color.index()] + 1, rank);
        self.stacks[color.index()] = rank;
    }

    pub fn score(&self) -> u8 {
        self.stacks.iter().sum()
    }
}

/// Complete state of one game
///
/// Fields are public: the executor mutates them directly and tests arrange
/// positions through them, in the same spirit as stacking the deck.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// One ordered hand per seat
    pub hands: Vec<Hand>,

    /// Remaining draw pile
    pub deck: Deck,

    pub play_area: PlayArea,

    /// Cards removed by discard or misplay, in removal order
    pub discard_pile: Vec<Card>,

    pub lives: u8,
    pub info_tokens: u8,

    /// Seat whose turn it is, cycling 0..N
    pub current_player: usize,

    /// Executed moves so far, including invalid ones
    pub turns_played: u32,
}

impl GameState {
    /// Create a game with a fresh shuffled deck seeded from `seed`
    pub fn new(num_seats: usize, seed: u64) -> Result<Self> {
        let mut rng = ChaCha12Rng::seed_from_u64(seed);
        Self::with_deck(num_seats, Deck::standard(&mut rng))
    }

    /// Create a game dealing from an explicit deck (tests stack it)
    pub fn with_deck(num_seats: usize, mut deck: Deck) -> Result<Self> {
        // The wire grammar addresses seats with a single digit
        if !(2..=9).contains(&num_seats) {
            return Err(HanabiError::InvalidSeatCount(num_seats));
        }
        let hands = deck.deal(num_seats, HAND_SIZE)?;
        Ok(GameState {
            hands,
            deck,
            play_area: PlayArea::default(),
            discard_pile: Vec::new(),
            lives: MAX_LIVES,
            info_tokens: MAX_INFO_TOKENS,
            current_player: 0,
            turns_played: 0,
        })
    }

    pub fn num_seats(&self) -> usize {
        self.hands.len()
    }

    pub fn score(&self) -> u8 {
        self.play_area.score()
    }

    /// Render the state as seen by `observer` while `acting` is to move.
    ///
    /// The output is line-oriented, deterministic for identical state, and
    /// hides the observer's own hand behind `[*]` placeholders. Everything
    /// numeric is identical across observers of the same state.
    pub fn render(&self, observer: usize, acting: usize) -> String {
        let mut out = String::new();

        let seats: Vec<String> = (0..self.num_seats())
            .map(|i| {
                if i == observer {
                    "[YOU]".to_string()
                } else {
                    format!("Player {}", i + 1)
                }
            })
            .collect();
        out.push_str(&format!("Players: {}\n", seats.join(", ")));
        out.push_str(&format!("Current turn: Player {}\n", acting + 1));
        out.push_str(&format!(
            "Lives: {}/{} | Information tokens: {}/{} | Score: {}/{}\n\n",
            self.lives,
            MAX_LIVES,
            self.info_tokens,
            MAX_INFO_TOKENS,
            self.score(),
            MAX_SCORE
        ));

        let discard: Vec<String> = self.discard_pile.iter().map(|c| c.to_string()).collect();
        out.push_str("Discard pile:\n");
        out.push_str(&format!("{}\n\n", discard.join(" ")));

        let played: Vec<String> = Color::ALL
            .iter()
            .filter(|&&color| self.play_area.top(color) > 0)
            .map(|&color| format!("[{}{}]", color.letter(), self.play_area.top(color)))
            .collect();
        out.push_str("Play area:\n");
        out.push_str(&format!("{}\n\n", played.join(" ")));

        let placeholders = vec!["[*]"; self.hands[observer].len()];
        out.push_str("Your hand:\n");
        out.push_str(&format!("{}\n\n", placeholders.join(" ")));

        out.push_str("Other hands:\n");
        for (i, hand) in self.hands.iter().enumerate() {
            if i == observer {
                continue;
            }
            let cards: Vec<String> = hand.iter().map(|c| format!("[{c}]")).collect();
            out.push_str(&format!("Player {}: {}\n", i + 1, cards.join(" ")));
        }

        out.trim_end().to_string()
    }
}
