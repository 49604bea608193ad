//! Random agent for baselines and deterministic testing
//!
//! Picks uniformly among moves it can construct from the rendered state.
//! Like any agent it sees only the text protocol, so everything here is
//! scraped from the observation string rather than read from `GameState`;
//! that keeps the information-hiding boundary honest even for the baseline.

use crate::game::controller::Agent;
use rand::Rng;

pub struct RandomAgent {
    rng: Box<dyn rand::RngCore>,
}

impl RandomAgent {
    /// Create a random agent with the thread RNG
    pub fn new() -> Self {
        RandomAgent {
            rng: Box::new(rand::thread_rng()),
        }
    }

    /// Create a random agent with a seeded RNG (for deterministic testing)
    pub fn with_seed(seed: u64) -> Self {
        use rand::SeedableRng;
        RandomAgent {
            rng: Box::new(rand::rngs::StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn take_turn(&mut self, observation: &str) -> String {
        // Only the current board matters, not the history block
        let state = observation
            .split("Previous turns:")
            .next()
            .unwrap_or(observation);
        let moves = moves_from_text(state);
        if moves.is_empty() {
            // Nothing constructible; concede a life rather than stall
            return String::new();
        }
        let index = self.rng.gen_range(0..moves.len());
        moves[index].clone()
    }
}

/// Enumerate the move tokens a seat can derive from its rendered view
fn moves_from_text(state: &str) -> Vec<String> {
    let lines: Vec<&str> = state.lines().collect();

    let mut num_cards = 0;
    for (i, line) in lines.iter().enumerate() {
        if line.trim() == "Your hand:" {
            if let Some(hand_line) = lines.get(i + 1) {
                num_cards = hand_line.matches("[*]").count();
            }
        }
    }

    let info_tokens = lines
        .iter()
        .find(|line| line.contains("Information tokens:"))
        .and_then(|line| line.split("Information tokens:").nth(1))
        .and_then(|rest| rest.split('/').next())
        .and_then(|n| n.trim().parse::<u8>().ok())
        .unwrap_or(0);

    let mut moves = Vec::new();
    for i in 0..num_cards {
        moves.push(format!("P{}", i + 1));
    }
    if info_tokens < 8 {
        for i in 0..num_cards {
            moves.push(format!("D{}", i + 1));
        }
    }
    if info_tokens > 0 {
        let mut in_other_hands = false;
        for line in &lines {
            if line.trim() == "Other hands:" {
                in_other_hands = true;
                continue;
            }
            if !in_other_hands {
                continue;
            }
            let Some((name, rest)) = line.split_once(':') else {
                continue;
            };
            let Some(seat_num) = name
                .trim()
                .strip_prefix("Player ")
                .and_then(|n| n.parse::<usize>().ok())
            else {
                continue;
            };
            // Cards render as [R1]-style tokens
            let cards: Vec<&str> = rest.split_whitespace().collect();
            for color in ['R', 'G', 'B', 'Y', 'W'] {
                let positions = matching_positions(&cards, 1, color as u8);
                if !positions.is_empty() {
                    moves.push(format!("C{seat_num}C{color}{positions}"));
                }
            }
            for rank in 1..=5u8 {
                let positions = matching_positions(&cards, 2, b'0' + rank);
                if !positions.is_empty() {
                    moves.push(format!("C{seat_num}N{rank}{positions}"));
                }
            }
        }
    }
    moves
}

/// 1-based position digits of card tokens whose byte at `offset` is `value`
fn matching_positions(cards: &[&str], offset: usize, value: u8) -> String {
    let mut positions = String::new();
    for (i, token) in cards.iter().enumerate() {
        if token.as_bytes().get(offset) == Some(&value) {
            positions.push((b'1' + i as u8) as char);
        }
    }
    positions
}
