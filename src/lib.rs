//! Hanabi Arena - cooperative card game engine for agent benchmarking
//!
//! The engine simulates Hanabi among N seated agents with asymmetric,
//! partial information: each seat sees every hand except its own. Agents
//! communicate with the engine over a textual protocol (rendered state in,
//! single-line move token out), so any decision maker that can read and
//! write strings can take a seat.

pub mod core;
pub mod error;
pub mod experiment;
pub mod game;

pub use error::{HanabiError, Result};
