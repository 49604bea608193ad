//! Turn scheduler and per-seat history tracking
//!
//! Drives the seat rotation: render the acting seat's view plus the delta
//! history since its last turn, dispatch to the agent, execute the returned
//! token, record the turn for every seat, advance. Strictly sequential; the
//! loop blocks on each agent call and touches the single `GameState` only
//! from here.

use crate::game::actions::{MoveOutcome, INVALID_MOVE};
use crate::game::controller::Agent;
use crate::game::logger::{GameLogger, VerbosityLevel};
use crate::game::state::{GameState, MAX_SCORE};
use crate::{HanabiError, Result};
use serde::{Deserialize, Serialize};

/// Reason the game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEndReason {
    /// All lives lost
    LivesExhausted,
    /// Score reached 25
    PerfectScore,
    /// Draw pile ran out (ends immediately, no final round)
    DeckExhausted,
    /// Safety limit on executed moves was hit
    TurnLimit,
}

/// Result of running a game to completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub final_score: u8,
    pub turns_played: u32,
    pub end_reason: GameEndReason,
}

/// One executed move as remembered for a particular observing seat
#[derive(Debug, Clone)]
struct HistoryEntry {
    /// Seat that acted
    seat: usize,
    /// Move token, or the invalid-move sentinel
    action: String,
    /// Pre-move state rendered for the observing seat
    state: String,
}

const HISTORY_RULE: &str =
    "---------------------------------------------";

/// Game loop manager
///
/// Owns the seat rotation, end-condition checks and per-seat pending
/// history buffers for one game.
pub struct GameLoop<'a> {
    /// The game state
    pub game: &'a mut GameState,
    /// Logger for this game (no global logging state)
    pub logger: GameLogger,
    /// Maximum executed moves before the loop bails out
    max_turns: u32,
    /// Turns each seat has not yet seen, oldest first
    pending: Vec<Vec<HistoryEntry>>,
}

impl<'a> GameLoop<'a> {
    pub fn new(game: &'a mut GameState) -> Self {
        let num_seats = game.num_seats();
        GameLoop {
            game,
            logger: GameLogger::new(),
            max_turns: 1000,
            pending: vec![Vec::new(); num_seats],
        }
    }

    /// Set the safety limit on executed moves
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn with_verbosity(mut self, verbosity: VerbosityLevel) -> Self {
        self.logger.set_verbosity(verbosity);
        self
    }

    /// End condition, if any holds in the current state
    pub fn check_end(&self) -> Option<GameEndReason> {
        if self.game.lives == 0 {
            Some(GameEndReason::LivesExhausted)
        } else if self.game.score() == MAX_SCORE {
            Some(GameEndReason::PerfectScore)
        } else if self.game.deck.is_empty() {
            Some(GameEndReason::DeckExhausted)
        } else if self.game.turns_played >= self.max_turns {
            Some(GameEndReason::TurnLimit)
        } else {
            None
        }
    }

    /// Run the game to completion with one agent per seat
    pub fn run_game(&mut self, agents: &mut [Box<dyn Agent>]) -> Result<GameResult> {
        loop {
            if let Some(result) = self.run_turn(agents)? {
                return Ok(result);
            }
        }
    }

    /// Run one turn, or finish the game if an end condition already holds.
    ///
    /// Returns `Ok(Some(result))` once the game is over.
    pub fn run_turn(&mut self, agents: &mut [Box<dyn Agent>]) -> Result<Option<GameResult>> {
        let num_seats = self.game.num_seats();
        if agents.len() != num_seats {
            return Err(HanabiError::AgentCountMismatch {
                agents: agents.len(),
                seats: num_seats,
            });
        }
        if let Some(reason) = self.check_end() {
            return Ok(Some(self.finish(agents, reason)));
        }

        let seat = self.game.current_player;
        let observation = self.build_observation(seat);

        let raw = agents[seat].take_turn(&observation);
        let token = raw.trim().to_string();

        // Snapshot every seat's perspective before mutating
        let pre_move: Vec<String> = (0..num_seats)
            .map(|observer| self.game.render(observer, seat))
            .collect();

        let outcome = self.game.execute_move(seat, &token);
        let action = if outcome == MoveOutcome::Invalid {
            INVALID_MOVE.to_string()
        } else {
            token
        };

        self.logger
            .normal(&format!("Player {}: {}", seat + 1, action));
        match outcome {
            MoveOutcome::Played {
                card,
                successful: true,
            } => self.logger.verbose(&format!("{card} played successfully")),
            MoveOutcome::Played {
                card,
                successful: false,
            } => self
                .logger
                .verbose(&format!("{card} misplayed, {} lives left", self.game.lives)),
            MoveOutcome::Discarded { card } => self.logger.verbose(&format!(
                "{card} discarded, {} information tokens",
                self.game.info_tokens
            )),
            MoveOutcome::Clued => self
                .logger
                .verbose(&format!("{} information tokens left", self.game.info_tokens)),
            MoveOutcome::Invalid => self
                .logger
                .verbose(&format!("invalid move, {} lives left", self.game.lives)),
        }

        for (observer, state) in pre_move.into_iter().enumerate() {
            self.pending[observer].push(HistoryEntry {
                seat,
                action: action.clone(),
                state,
            });
        }
        // The acting seat rebuilds its history from its next turn onward
        self.pending[seat].clear();

        self.game.current_player = (seat + 1) % num_seats;
        Ok(None)
    }

    /// The acting seat's rendered view plus its accumulated delta history
    fn build_observation(&self, seat: usize) -> String {
        let mut observation = self.game.render(seat, seat);
        if self.pending[seat].is_empty() {
            return observation;
        }
        let history: Vec<String> = self.pending[seat]
            .iter()
            .map(|entry| {
                format!(
                    "Player {} Turn:\nAction: {}\nBoard State:\n{}\n{}",
                    entry.seat + 1,
                    entry.action,
                    entry.state,
                    HISTORY_RULE
                )
            })
            .collect();
        observation.push_str("\nPrevious turns:\n");
        observation.push_str(&history.join("\n"));
        observation
    }

    fn finish(&mut self, agents: &mut [Box<dyn Agent>], reason: GameEndReason) -> GameResult {
        let result = GameResult {
            final_score: self.game.score(),
            turns_played: self.game.turns_played,
            end_reason: reason,
        };
        self.logger.minimal(&format!(
            "Game over: score {}/{} after {} turns ({:?})",
            result.final_score, MAX_SCORE, result.turns_played, reason
        ));
        for agent in agents.iter_mut() {
            agent.on_game_end(result.final_score);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Card, Color, Deck};
    use crate::game::scripted_controller::ScriptedAgent;
    use crate::game::state::PlayArea;
    use smallvec::smallvec;

    fn card(s: &str) -> Card {
        let mut chars = s.chars();
        Card::new(
            Color::from_letter(chars.next().unwrap()).unwrap(),
            chars.next().unwrap().to_digit(10).unwrap() as u8,
        )
    }

    fn agents(scripts: &[&[&str]]) -> Vec<Box<dyn Agent>> {
        scripts
            .iter()
            .map(|tokens| Box::new(ScriptedAgent::from_tokens(tokens)) as Box<dyn Agent>)
            .collect()
    }

    /// Seat 0: R1 G2 B3 Y4 / Seat 1: W5 R2 G3 B4, deck [G5, W1] (W1 on top)
    fn two_seat_state() -> GameState {
        GameState {
            hands: vec![
                smallvec![card("R1"), card("G2"), card("B3"), card("Y4")],
                smallvec![card("W5"), card("R2"), card("G3"), card("B4")],
            ],
            deck: Deck::from_cards(vec![card("G5"), card("W1")]),
            play_area: PlayArea::default(),
            discard_pile: Vec::new(),
            lives: 3,
            info_tokens: 4,
            current_player: 0,
            turns_played: 0,
        }
    }

    #[test]
    fn test_agent_count_must_match_seats() {
        let mut game = two_seat_state();
        let mut game_loop = GameLoop::new(&mut game);
        let mut too_few = agents(&[&["P1"]]);
        assert!(matches!(
            game_loop.run_turn(&mut too_few),
            Err(HanabiError::AgentCountMismatch { agents: 1, seats: 2 })
        ));
    }

    #[test]
    fn test_turn_rotation_and_history_delivery() {
        let mut game = two_seat_state();
        let mut game_loop = GameLoop::new(&mut game).with_verbosity(VerbosityLevel::Silent);
        let mut seat_agents = agents(&[&["P1"], &["C1N11"]]);

        assert!(game_loop.run_turn(&mut seat_agents).unwrap().is_none());
        assert_eq!(game_loop.game.current_player, 1);
        // Seat 1 now has one pending entry, seat 0 none
        assert_eq!(game_loop.pending[1].len(), 1);
        assert!(game_loop.pending[0].is_empty());

        let observation = game_loop.build_observation(1);
        assert!(observation.contains("Previous turns:"));
        assert!(observation.contains("Player 1 Turn:"));
        assert!(observation.contains("Action: P1"));
        assert!(observation.contains(HISTORY_RULE));
        // The history snapshot is pre-move: R1 not yet played
        assert!(observation.contains("Score: 0/25"));

        // After seat 1 acts, its buffer is cleared and seat 0 holds the clue
        assert!(game_loop.run_turn(&mut seat_agents).unwrap().is_none());
        assert!(game_loop.pending[1].is_empty());
        assert_eq!(game_loop.pending[0].len(), 1);
        assert_eq!(game_loop.pending[0][0].action, "C1N11");
    }

    #[test]
    fn test_history_is_rendered_for_the_receiving_seat() {
        let mut game = two_seat_state();
        let mut game_loop = GameLoop::new(&mut game).with_verbosity(VerbosityLevel::Silent);
        let mut seat_agents = agents(&[&["C2N51"], &[]]);
        game_loop.run_turn(&mut seat_agents).unwrap();

        // Seat 1's pending entry must not reveal seat 1's own cards
        let entry = &game_loop.pending[1][0];
        assert!(entry.state.contains("[YOU]"));
        assert!(!entry.state.contains("[W5]"));
        assert!(entry.state.contains("[R1]"));
    }

    #[test]
    fn test_invalid_token_recorded_with_sentinel() {
        let mut game = two_seat_state();
        let mut game_loop = GameLoop::new(&mut game).with_verbosity(VerbosityLevel::Silent);
        let mut seat_agents = agents(&[&["bogus"], &[]]);
        game_loop.run_turn(&mut seat_agents).unwrap();
        assert_eq!(game_loop.pending[1][0].action, INVALID_MOVE);
        assert_eq!(game_loop.game.lives, 2);
    }

    #[test]
    fn test_agent_output_is_trimmed() {
        let mut game = two_seat_state();
        let mut game_loop = GameLoop::new(&mut game).with_verbosity(VerbosityLevel::Silent);
        let mut seat_agents = agents(&[&["  P1\n"], &[]]);
        game_loop.run_turn(&mut seat_agents).unwrap();
        assert_eq!(game_loop.pending[1][0].action, "P1");
        assert_eq!(game_loop.game.play_area.top(Color::Red), 1);
    }

    #[test]
    fn test_game_ends_when_lives_run_out() {
        let mut game = two_seat_state();
        let mut game_loop = GameLoop::new(&mut game).with_verbosity(VerbosityLevel::Silent);
        // Empty scripts produce invalid moves every turn
        let mut seat_agents = agents(&[&[], &[]]);
        let result = game_loop.run_game(&mut seat_agents).unwrap();
        assert_eq!(result.end_reason, GameEndReason::LivesExhausted);
        assert_eq!(result.turns_played, 3);
        assert_eq!(result.final_score, 0);
    }

    #[test]
    fn test_game_ends_immediately_when_deck_empties() {
        let mut game = two_seat_state();
        game.deck = Deck::from_cards(vec![card("W1")]);
        let mut game_loop = GameLoop::new(&mut game).with_verbosity(VerbosityLevel::Silent);
        // First discard takes the last deck card; the game ends before
        // seat 1 ever acts, with no final round.
        let mut seat_agents = agents(&[&["D1"], &["D1"]]);
        let result = game_loop.run_game(&mut seat_agents).unwrap();
        assert_eq!(result.end_reason, GameEndReason::DeckExhausted);
        assert_eq!(result.turns_played, 1);
    }

    #[test]
    fn test_game_ends_on_perfect_score() {
        let mut game = two_seat_state();
        for color in Color::ALL {
            for rank in 1..=5 {
                if color == Color::White && rank == 5 {
                    continue;
                }
                game.play_area.advance(color, rank);
            }
        }
        let mut game_loop = GameLoop::new(&mut game).with_verbosity(VerbosityLevel::Silent);
        // Seat 1 holds W5 at position 1
        let mut seat_agents = agents(&[&["C2N51"], &["P1"]]);
        let result = game_loop.run_game(&mut seat_agents).unwrap();
        assert_eq!(result.end_reason, GameEndReason::PerfectScore);
        assert_eq!(result.final_score, MAX_SCORE);
        assert_eq!(result.turns_played, 2);
    }

    #[test]
    fn test_turn_limit_guard() {
        let mut game = two_seat_state();
        game.info_tokens = 8;
        let mut game_loop = GameLoop::new(&mut game)
            .with_verbosity(VerbosityLevel::Silent)
            .with_max_turns(2);
        // Truthful empty clues: neither seat holds the named rank
        let mut seat_agents = agents(&[&["C2N1"; 8], &["C1N5"; 8]]);
        let result = game_loop.run_game(&mut seat_agents).unwrap();
        assert_eq!(result.end_reason, GameEndReason::TurnLimit);
        assert_eq!(result.turns_played, 2);
    }

    #[test]
    fn test_logger_captures_move_lines() {
        let mut game = two_seat_state();
        let mut game_loop = GameLoop::new(&mut game);
        game_loop.logger.enable_capture();
        let mut seat_agents = agents(&[&["P1"], &[]]);
        game_loop.run_turn(&mut seat_agents).unwrap();
        let logs = game_loop.logger.logs();
        assert!(logs.iter().any(|entry| entry.message == "Player 1: P1"));
    }
}
