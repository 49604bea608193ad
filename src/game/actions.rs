//! Move execution
//!
//! The executor is the only code that mutates [`GameState`]. Every call
//! counts as one turn, valid or not. An invalid token costs one life and
//! changes nothing else.

use crate::core::Card;
use crate::game::moves::Move;
use crate::game::state::{GameState, MAX_INFO_TOKENS};

/// Sentinel recorded in history when a move did not validate
pub const INVALID_MOVE: &str = "INVALID MOVE";

/// Effective result of executing one move token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// A card was played; `successful` is false for a misplay
    Played { card: Card, successful: bool },
    Discarded { card: Card },
    Clued,
    /// Token was malformed or illegal; one life was charged
    Invalid,
}

impl GameState {
    /// Execute a raw move token for `seat`, mutating the state.
    ///
    /// The turn counter increments regardless of the branch taken. Lives
    /// and information tokens never leave their declared bounds.
    pub fn execute_move(&mut self, seat: usize, token: &str) -> MoveOutcome {
        self.turns_played += 1;

        let mv = match Move::parse(token) {
            Some(mv) if self.is_legal(seat, &mv) => mv,
            _ => {
                self.lives = self.lives.saturating_sub(1);
                return MoveOutcome::Invalid;
            }
        };

        match mv {
            Move::Play { index } => {
                let card = self.hands[seat].remove(index);
                let successful = self.play_area.is_next(card);
                if successful {
                    self.play_area.advance(card.color, card.rank);
                } else {
                    self.lives = self.lives.saturating_sub(1);
                    self.discard_pile.push(card);
                }
                self.refill(seat, index);
                MoveOutcome::Played { card, successful }
            }
            Move::Discard { index } => {
                let card = self.hands[seat].remove(index);
                self.discard_pile.push(card);
                self.refill(seat, index);
                self.info_tokens = (self.info_tokens + 1).min(MAX_INFO_TOKENS);
                MoveOutcome::Discarded { card }
            }
            Move::Clue { .. } => {
                // A clue is pure communication; what the target makes of it
                // is the agents' business, not the engine's.
                self.info_tokens -= 1;
                MoveOutcome::Clued
            }
        }
    }

    /// Draw into the vacated index, preserving positional layout. With an
    /// empty deck the hand simply shrinks.
    fn refill(&mut self, seat: usize, index: usize) {
        if let Some(card) = self.deck.draw() {
            self.hands[seat].insert(index, card);
        }
    }
}
