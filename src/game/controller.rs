//! Agent trait: the seam between the engine and decision makers
//!
//! The engine is agnostic to how a seat decides: a network-backed model, a
//! scripted sequence, or a pseudo-random policy all satisfy the same single
//! capability. Whatever string comes back is treated as a move token; an
//! agent that cannot produce a move should return something unparseable and
//! accept the one-life penalty. The engine never retries an agent call.

use crate::game::random_controller::RandomAgent;
use crate::{HanabiError, Result};

/// A seat-taking decision maker
///
/// `observation` is the rendered state for this agent's seat, optionally
/// followed by a `Previous turns:` history block. The return value is a
/// single-line move token (anything else counts as an invalid move).
pub trait Agent {
    fn take_turn(&mut self, observation: &str) -> String;

    /// Called once when the game ends (for cleanup/logging)
    fn on_game_end(&mut self, _final_score: u8) {}
}

impl std::fmt::Debug for dyn Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Agent")
    }
}

/// Build an agent from a provider name.
///
/// This is the plug point for model-backed providers; the engine ships only
/// the self-contained ones.
pub fn build_agent(provider: &str, seed: Option<u64>) -> Result<Box<dyn Agent>> {
    match provider {
        "random" | "test" => Ok(match seed {
            Some(seed) => Box::new(RandomAgent::with_seed(seed)),
            None => Box::new(RandomAgent::new()),
        }),
        other => Err(HanabiError::UnknownAgent(other.to_string())),
    }
}
