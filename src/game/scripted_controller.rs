//! Scripted agent for tests and examples
//!
//! Follows a predetermined sequence of move tokens, useful for driving the
//! engine through exact scenarios. An exhausted script returns an empty
//! token, which the engine charges as an invalid move.

use crate::game::controller::Agent;

pub struct ScriptedAgent {
    moves: Vec<String>,
    current_step: usize,
}

impl ScriptedAgent {
    pub fn new(moves: Vec<String>) -> Self {
        ScriptedAgent {
            moves,
            current_step: 0,
        }
    }

    pub fn from_tokens(tokens: &[&str]) -> Self {
        Self::new(tokens.iter().map(|t| t.to_string()).collect())
    }
}

impl Agent for ScriptedAgent {
    fn take_turn(&mut self, _observation: &str) -> String {
        if self.current_step < self.moves.len() {
            let token = self.moves[self.current_step].clone();
            self.current_step += 1;
            token
        } else {
            String::new()
        }
    }
}
