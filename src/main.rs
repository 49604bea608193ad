//! Hanabi Arena - Main Binary
//!
//! Runs single games for inspection or parallel batches for benchmarking.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use hanabi_arena::experiment::{run_batch, summarize, write_csv, BatchConfig};
use hanabi_arena::game::{build_agent, Agent, GameLoop, GameState, ScriptedAgent, VerbosityLevel};
use std::path::PathBuf;

/// Agent type taking every seat
#[derive(Debug, Clone, Copy, ValueEnum)]
enum AgentType {
    /// Picks uniformly among constructible legal moves
    Random,
    /// Follows a fixed token script (requires --script)
    Scripted,
}

/// Verbosity level for game output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

#[derive(Parser)]
#[command(name = "hanabi")]
#[command(about = "Hanabi Arena - cooperative card game engine and agent benchmark", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single game
    Play {
        /// Number of seats
        #[arg(long, default_value_t = 5)]
        seats: usize,

        /// Random seed for the deck and agents (random if omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Agent type for all seats
        #[arg(long, value_enum, default_value = "random")]
        agent: AgentType,

        /// Move tokens for scripted agents (space or comma separated, e.g. "P1 D2 C2N34")
        #[arg(long, value_name = "TOKENS")]
        script: Option<String>,

        /// Verbosity level for game output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,

        /// Safety limit on executed moves
        #[arg(long, default_value_t = 1000)]
        max_turns: u32,

        /// Print the result as JSON instead of prose
        #[arg(long)]
        json: bool,
    },

    /// Run a batch of games in parallel and report statistics
    Bench {
        /// Number of games to run
        #[arg(long, short = 'g', default_value_t = 10)]
        games: usize,

        /// Number of seats per game
        #[arg(long, default_value_t = 5)]
        seats: usize,

        /// Master seed; game i uses seed + i
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Append per-game records to this CSV file
        #[arg(long, short = 'o', value_name = "CSV_FILE")]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            seats,
            seed,
            agent,
            script,
            verbosity,
            max_turns,
            json,
        } => {
            let seed = seed.unwrap_or_else(rand::random);
            let mut game = GameState::new(seats, seed)?;
            let mut agents: Vec<Box<dyn Agent>> = match agent {
                AgentType::Random => (0..seats)
                    .map(|seat| build_agent("random", Some(seed.wrapping_add(seat as u64 + 1))))
                    .collect::<hanabi_arena::Result<_>>()?,
                AgentType::Scripted => {
                    let script = script.context("--script is required for scripted agents")?;
                    let tokens: Vec<String> = script
                        .split(|c: char| c == ',' || c.is_whitespace())
                        .filter(|t| !t.is_empty())
                        .map(|t| t.to_string())
                        .collect();
                    (0..seats)
                        .map(|_| Box::new(ScriptedAgent::new(tokens.clone())) as Box<dyn Agent>)
                        .collect()
                }
            };

            if !json {
                println!("Seats: {seats} | Seed: {seed}");
            }
            let mut game_loop = GameLoop::new(&mut game)
                .with_verbosity(if json { VerbosityLevel::Silent } else { verbosity.0 })
                .with_max_turns(max_turns);
            let result = game_loop.run_game(&mut agents)?;
            if json {
                println!("{}", serde_json::to_string(&result)?);
            } else {
                println!(
                    "Final score: {}/25 in {} turns ({:?})",
                    result.final_score, result.turns_played, result.end_reason
                );
            }
        }

        Commands::Bench {
            games,
            seats,
            seed,
            output,
        } => {
            let config = BatchConfig { games, seats, seed };
            let records = run_batch(&config)?;
            if let Some(path) = &output {
                write_csv(path, &records)?;
                println!("Appended {} records to {}", records.len(), path.display());
            }
            let summary = summarize(&records);
            println!(
                "games: {} | mean score: {:.2}/25 | mean turns: {:.1} | perfect: {:.1}%",
                summary.games, summary.mean_score, summary.mean_turns, summary.perfect_pct
            );
        }
    }

    Ok(())
}
