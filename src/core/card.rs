//! Card identity types
//!
//! A card is nothing but a color and a rank; duplicates exist by design
//! (three 1s, two each of 2-4, one 5 per color).

use serde::{Deserialize, Serialize};
use std::fmt;

/// The five Hanabi suit colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
    White,
}

impl Color {
    /// All colors in canonical render order
    pub const ALL: [Color; 5] = [
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Yellow,
        Color::White,
    ];

    /// Single-letter wire form (`R`, `G`, `B`, `Y`, `W`)
    pub fn letter(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Green => 'G',
            Color::Blue => 'B',
            Color::Yellow => 'Y',
            Color::White => 'W',
        }
    }

    pub fn from_letter(c: char) -> Option<Color> {
        match c {
            'R' => Some(Color::Red),
            'G' => Some(Color::Green),
            'B' => Some(Color::Blue),
            'Y' => Some(Color::Yellow),
            'W' => Some(Color::White),
            _ => None,
        }
    }

    /// Position in [`Color::ALL`], used to index play stacks
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// An immutable card: color plus rank 1..=5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub color: Color,
    pub rank: u8,
}

impl Card {
    pub fn new(color: Color, rank: u8) -> Self {
        debug_assert!((1..=5).contains(&rank), "card rank out of range: {rank}");
        Card { color, rank }
    }
}

impl fmt::Display for Card {
    /// Compact wire form, e.g. `R1`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.color.letter(), self.rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_letter_roundtrip() {
        for color in Color::ALL {
            assert_eq!(Color::from_letter(color.letter()), Some(color));
        }
        assert_eq!(Color::from_letter('X'), None);
        assert_eq!(Color::from_letter('r'), None);
    }

    #[test]
    fn test_color_index_matches_all_order() {
        for (i, color) in Color::ALL.iter().enumerate() {
            assert_eq!(color.index(), i);
        }
    }

    #[test]
    fn test_card_display() {
        assert_eq!(Card::new(Color::Red, 1).to_string(), "R1");
        assert_eq!(Card::new(Color::White, 5).to_string(), "W5");
    }
}
