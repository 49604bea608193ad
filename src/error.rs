//! Error types for Hanabi Arena
//!
//! Only genuinely fatal conditions live here. A malformed or illegal move
//! token is *not* an error: the engine handles it as the normal invalid-move
//! path (one life lost) and it never crosses this boundary.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HanabiError {
    #[error("deck exhausted during deal: need {required} cards, have {available}")]
    DeckExhausted { required: usize, available: usize },

    #[error("invalid seat count: {0} (expected 2..=9)")]
    InvalidSeatCount(usize),

    #[error("agent count {agents} does not match seat count {seats}")]
    AgentCountMismatch { agents: usize, seats: usize },

    #[error("unknown agent provider: {0}")]
    UnknownAgent(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HanabiError>;
