//! The standard 50-card deck and initial deal
//!
//! The deck is built once per game as a fixed multiset, shuffled once with
//! the game's RNG, and then only ever consumed from the tail. It is never
//! reshuffled mid-game.

use crate::core::Card;
use crate::core::Color;
use crate::{HanabiError, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Total cards in a standard deck: 5 colors x (3+2+2+2+1)
pub const DECK_SIZE: usize = 50;

/// Cards dealt to each seat (fixed, not derived from seat count)
pub const HAND_SIZE: usize = 4;

/// Copies of each rank per color
const RANK_COUNTS: [(u8, usize); 5] = [(1, 3), (2, 2), (3, 2), (4, 2), (5, 1)];

/// One seat's hand, ordered; shrinks only once the deck runs dry
pub type Hand = SmallVec<[Card; HAND_SIZE]>;

/// Ordered draw pile, consumed from the tail
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Build the standard multiset and shuffle it once with `rng`
    pub fn standard<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for color in Color::ALL {
            for (rank, count) in RANK_COUNTS {
                for _ in 0..count {
                    cards.push(Card::new(color, rank));
                }
            }
        }
        cards.shuffle(rng);
        Deck { cards }
    }

    /// A deck with an explicit card order; `draw` pops from the end
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Deck { cards }
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Deal `hand_size` cards to each of `num_seats` seats, in seat order.
    ///
    /// Underflow here is fatal: it means a misconfigured seat count, not a
    /// normal game event.
    pub fn deal(&mut self, num_seats: usize, hand_size: usize) -> Result<Vec<Hand>> {
        let required = num_seats * hand_size;
        if self.cards.len() < required {
            return Err(HanabiError::DeckExhausted {
                required,
                available: self.cards.len(),
            });
        }
        let mut hands = Vec::with_capacity(num_seats);
        for _ in 0..num_seats {
            let mut hand = Hand::new();
            for _ in 0..hand_size {
                let card = self.draw().ok_or(HanabiError::DeckExhausted {
                    required,
                    available: 0,
                })?;
                hand.push(card);
            }
            hands.push(hand);
        }
        Ok(hands)
    }
}
