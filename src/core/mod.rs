//! Core value types: cards and the deck

pub mod card;
pub mod deck;

pub use card::{Card, Color};
pub use deck::{Deck, Hand, DECK_SIZE, HAND_SIZE};
