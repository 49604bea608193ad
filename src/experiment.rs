//! Batch experiment runner and result collection
//!
//! Runs many independent games in parallel and aggregates their results.
//! Each game gets its own deck RNG and agent RNGs derived from the master
//! seed plus the game index, so nothing is shared between concurrent games
//! and a batch is reproducible from `(seed, games, seats)` alone.
//!
//! The engine core exposes only `{turns_played, final_score}`; turning that
//! into CSV rows and summary statistics happens here, outside the core.

use crate::game::{Agent, GameEndReason, GameLoop, GameState, RandomAgent, VerbosityLevel};
use crate::Result;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Mixing constant for deriving per-seat agent seeds from the game seed
const SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Configuration for one batch of games
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub games: usize,
    pub seats: usize,
    pub seed: u64,
}

/// Outcome of a single game in a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_index: usize,
    pub seed: u64,
    pub seats: usize,
    pub turns_played: u32,
    pub final_score: u8,
    pub end_reason: GameEndReason,
}

/// Aggregate statistics over a batch
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    pub games: usize,
    pub mean_score: f64,
    pub mean_turns: f64,
    /// Percentage of games reaching the perfect score of 25
    pub perfect_pct: f64,
}

/// Run `config.games` independent games in parallel with random agents.
///
/// Records come back in game-index order regardless of completion order.
pub fn run_batch(config: &BatchConfig) -> Result<Vec<GameRecord>> {
    (0..config.games)
        .into_par_iter()
        .map(|game_index| {
            let seed = config.seed.wrapping_add(game_index as u64);
            run_one(game_index, seed, config.seats)
        })
        .collect()
}

fn run_one(game_index: usize, seed: u64, seats: usize) -> Result<GameRecord> {
    let mut game = GameState::new(seats, seed)?;
    let mut agents: Vec<Box<dyn Agent>> = (0..seats)
        .map(|seat| {
            let agent_seed = seed.wrapping_mul(SEED_MIX).wrapping_add(seat as u64);
            Box::new(RandomAgent::with_seed(agent_seed)) as Box<dyn Agent>
        })
        .collect();
    let mut game_loop = GameLoop::new(&mut game).with_verbosity(VerbosityLevel::Silent);
    let result = game_loop.run_game(&mut agents)?;
    Ok(GameRecord {
        game_index,
        seed,
        seats,
        turns_played: result.turns_played,
        final_score: result.final_score,
        end_reason: result.end_reason,
    })
}

pub fn summarize(records: &[GameRecord]) -> BatchSummary {
    if records.is_empty() {
        return BatchSummary {
            games: 0,
            mean_score: 0.0,
            mean_turns: 0.0,
            perfect_pct: 0.0,
        };
    }
    let games = records.len();
    let score_sum: u32 = records.iter().map(|r| r.final_score as u32).sum();
    let turn_sum: u64 = records.iter().map(|r| r.turns_played as u64).sum();
    let perfect = records.iter().filter(|r| r.final_score == 25).count();
    BatchSummary {
        games,
        mean_score: score_sum as f64 / games as f64,
        mean_turns: turn_sum as f64 / games as f64,
        perfect_pct: perfect as f64 * 100.0 / games as f64,
    }
}

/// Append records to a CSV file, writing the header on first creation
pub fn write_csv(path: &Path, records: &[GameRecord]) -> Result<()> {
    let needs_header = !path.exists();
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    if needs_header {
        writeln!(file, "game_index,seed,seats,turns_played,final_score,end_reason")?;
    }
    for record in records {
        writeln!(
            file,
            "{},{},{},{},{},{:?}",
            record.game_index,
            record.seed,
            record.seats,
            record.turns_played,
            record.final_score,
            record.end_reason
        )?;
    }
    Ok(())
}
