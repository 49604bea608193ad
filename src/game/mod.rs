//! Game state, move handling, the turn loop and agents

pub mod actions;
pub mod controller;
pub mod game_loop;
pub mod logger;
pub mod moves;
pub mod random_controller;
pub mod scripted_controller;
pub mod state;

pub use actions::{MoveOutcome, INVALID_MOVE};
pub use controller::{build_agent, Agent};
pub use game_loop::{GameEndReason, GameLoop, GameResult};
pub use logger::{GameLogger, LogEntry, VerbosityLevel};
pub use moves::{ClueKind, Move};
pub use random_controller::RandomAgent;
pub use scripted_controller::ScriptedAgent;
pub use state::{GameState, PlayArea, MAX_INFO_TOKENS, MAX_LIVES, MAX_SCORE};
