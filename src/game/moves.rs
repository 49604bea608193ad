//! Move grammar and legality checking
//!
//! Moves arrive as single-line tokens with fixed positions and no
//! separators:
//!
//! - `P<i>` play the card at 1-based hand index `i`
//! - `D<i>` discard the card at 1-based hand index `i`
//! - `C<target><type><value><positions...>` clue: `target` is a 1-based
//!   seat digit, `type` is `N` for a rank clue (any other character marks a
//!   color clue), `value` is a rank digit or color letter, and `positions`
//!   are zero or more 1-based hand index digits
//!
//! Tokens are parsed once into a [`Move`] and validated against the state;
//! anything unparseable is simply not a move. The validator is pure and
//! total: it answers for every input string without panicking.

use crate::core::{Card, Color};
use crate::game::state::{GameState, MAX_INFO_TOKENS};
use std::collections::BTreeSet;

/// The kind of information a clue conveys
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClueKind {
    Rank(u8),
    Color(Color),
}

impl ClueKind {
    pub fn matches(&self, card: &Card) -> bool {
        match self {
            ClueKind::Rank(rank) => card.rank == *rank,
            ClueKind::Color(color) => card.color == *color,
        }
    }
}

/// A parsed move, indices 0-based (the wire format is 1-based)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Move {
    Play {
        index: usize,
    },
    Discard {
        index: usize,
    },
    Clue {
        target: usize,
        kind: ClueKind,
        positions: BTreeSet<usize>,
    },
}

/// Convert a 1-based wire digit to a 0-based index; `0` is not an index
fn digit_index(b: u8) -> Option<usize> {
    if (b'1'..=b'9').contains(&b) {
        Some((b - b'1') as usize)
    } else {
        None
    }
}

impl Move {
    /// Parse a wire token. `None` means the token is malformed, which the
    /// executor treats as an invalid move, never as an engine fault.
    pub fn parse(token: &str) -> Option<Move> {
        let bytes = token.as_bytes();
        match bytes.first()? {
            b'P' => {
                if bytes.len() != 2 {
                    return None;
                }
                Some(Move::Play {
                    index: digit_index(bytes[1])?,
                })
            }
            b'D' => {
                if bytes.len() != 2 {
                    return None;
                }
                Some(Move::Discard {
                    index: digit_index(bytes[1])?,
                })
            }
            b'C' => {
                if bytes.len() < 4 {
                    return None;
                }
                let target = digit_index(bytes[1])?;
                let kind = if bytes[2] == b'N' {
                    if !(b'1'..=b'5').contains(&bytes[3]) {
                        return None;
                    }
                    ClueKind::Rank(bytes[3] - b'0')
                } else {
                    ClueKind::Color(Color::from_letter(bytes[3] as char)?)
                };
                let mut positions = BTreeSet::new();
                for &b in &bytes[4..] {
                    positions.insert(digit_index(b)?);
                }
                Some(Move::Clue {
                    target,
                    kind,
                    positions,
                })
            }
            _ => None,
        }
    }
}

impl GameState {
    /// Is this parsed move legal for `seat` in the current state?
    ///
    /// A clue is legal only if the declared position set equals *exactly*
    /// the set of matching indices in the target hand; there is no partial
    /// credit. Self-targeted clues are deliberately not rejected.
    pub fn is_legal(&self, seat: usize, mv: &Move) -> bool {
        match mv {
            Move::Play { index } => self.hands.get(seat).is_some_and(|h| *index < h.len()),
            Move::Discard { index } => {
                self.info_tokens < MAX_INFO_TOKENS
                    && self.hands.get(seat).is_some_and(|h| *index < h.len())
            }
            Move::Clue {
                target,
                kind,
                positions,
            } => {
                if self.info_tokens == 0 {
                    return false;
                }
                let Some(hand) = self.hands.get(*target) else {
                    return false;
                };
                let matching: BTreeSet<usize> = hand
                    .iter()
                    .enumerate()
                    .filter(|(_, card)| kind.matches(card))
                    .map(|(i, _)| i)
                    .collect();
                *positions == matching
            }
        }
    }

    /// Total validation of a raw wire token: parse, then check legality
    pub fn validate(&self, seat: usize, token: &str) -> bool {
        match Move::parse(token) {
            Some(mv) => self.is_legal(seat, &mv),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Deck;
    use smallvec::smallvec;

    fn card(s: &str) -> Card {
        let mut chars = s.chars();
        Card::new(
            Color::from_letter(chars.next().unwrap()).unwrap(),
            chars.next().unwrap().to_digit(10).unwrap() as u8,
        )
    }

    fn positions(indices: &[usize]) -> BTreeSet<usize> {
        indices.iter().copied().collect()
    }

    /// Seat 0: R1 G2 B3 Y4 / Seat 1: R1 R3 G1 B2
    fn two_seat_state() -> GameState {
        GameState {
            hands: vec![
                smallvec![card("R1"), card("G2"), card("B3"), card("Y4")],
                smallvec![card("R1"), card("R3"), card("G1"), card("B2")],
            ],
            deck: Deck::from_cards(vec![card("W1")]),
            play_area: Default::default(),
            discard_pile: Vec::new(),
            lives: 3,
            info_tokens: 4,
            current_player: 0,
            turns_played: 0,
        }
    }

    #[test]
    fn test_parse_play_discard() {
        assert_eq!(Move::parse("P1"), Some(Move::Play { index: 0 }));
        assert_eq!(Move::parse("P4"), Some(Move::Play { index: 3 }));
        assert_eq!(Move::parse("D2"), Some(Move::Discard { index: 1 }));
    }

    #[test]
    fn test_parse_rank_clue() {
        assert_eq!(
            Move::parse("C2N312"),
            Some(Move::Clue {
                target: 1,
                kind: ClueKind::Rank(3),
                positions: positions(&[0, 1]),
            })
        );
        // Empty declared position set is parseable
        assert_eq!(
            Move::parse("C2N3"),
            Some(Move::Clue {
                target: 1,
                kind: ClueKind::Rank(3),
                positions: BTreeSet::new(),
            })
        );
    }

    #[test]
    fn test_parse_color_clue_any_type_marker() {
        // The type marker for color clues is any non-N character; the
        // matched value is the following letter.
        let expected = Some(Move::Clue {
            target: 0,
            kind: ClueKind::Color(Color::Red),
            positions: positions(&[0, 2]),
        });
        assert_eq!(Move::parse("C1CR13"), expected);
        assert_eq!(Move::parse("C1RR13"), expected);
    }

    #[test]
    fn test_parse_collapses_duplicate_positions() {
        assert_eq!(
            Move::parse("C1N211"),
            Some(Move::Clue {
                target: 0,
                kind: ClueKind::Rank(2),
                positions: positions(&[0]),
            })
        );
    }

    #[test]
    fn test_parse_rejects_malformed_tokens() {
        for token in [
            "", "P", "P0", "P10", "Pa", "D", "D0", "X1", "p1", "C", "C1", "C1N",
            "C0N1", "C1N0", "C1N6", "C1NX", "C1CX", "C2N3a", "C2N10", "hello",
        ] {
            assert_eq!(Move::parse(token), None, "token {token:?} should not parse");
        }
    }

    #[test]
    fn test_parse_survives_non_ascii() {
        assert_eq!(Move::parse("Pé"), None);
        assert_eq!(Move::parse("C1Né"), None);
    }

    #[test]
    fn test_play_legality_is_bounds_checked() {
        let state = two_seat_state();
        assert!(state.validate(0, "P1"));
        assert!(state.validate(0, "P4"));
        assert!(!state.validate(0, "P5"));
        // Unknown seat never panics
        assert!(!state.validate(7, "P1"));
    }

    #[test]
    fn test_discard_requires_token_headroom() {
        let mut state = two_seat_state();
        assert!(state.validate(0, "D1"));
        state.info_tokens = MAX_INFO_TOKENS;
        assert!(!state.validate(0, "D1"));
    }

    #[test]
    fn test_clue_must_name_exact_matching_set() {
        let state = two_seat_state();
        // Seat 1 has R1 at position 1 and R3 at position 2
        assert!(state.validate(0, "C2CR12"));
        // Subset and superset are both rejected
        assert!(!state.validate(0, "C2CR1"));
        assert!(!state.validate(0, "C2CR123"));
        // Rank clue: the single rank-3 card is at position 2
        assert!(state.validate(0, "C2N32"));
        assert!(!state.validate(0, "C2N3"));
    }

    #[test]
    fn test_empty_clue_legal_when_nothing_matches() {
        let state = two_seat_state();
        // Seat 1 holds no rank 5
        assert!(state.validate(0, "C2N5"));
        assert!(!state.validate(0, "C2N51"));
        // Seat 1 holds no white cards either
        assert!(state.validate(0, "C2CW"));
    }

    #[test]
    fn test_clue_requires_info_tokens() {
        let mut state = two_seat_state();
        state.info_tokens = 0;
        assert!(!state.validate(0, "C2CR12"));
    }

    #[test]
    fn test_clue_target_bounds_and_self_target() {
        let state = two_seat_state();
        assert!(!state.validate(0, "C3N1"));
        // Self-targeting is permitted by the grammar; legality only needs
        // the declared set to be truthful.
        assert!(state.validate(0, "C1N11"));
    }
}
