use decorum::N64;
use itertools::Itertools;
use maze_types::{
    types::{ScoreGettableGame, SimulableGame},
    Direction, MazeGame, MAXIMIZER,
};
use rand::{seq::SliceRandom, thread_rng, Rng};
use tracing::debug;

use crate::{AgentConfig, AgentError, AgentFactory, BoxedAgent, MazeAgent};

/// Looks a single move ahead and takes whatever raises the game score the most, ties are broken
/// at random
#[derive(Debug, Clone, Copy, Default)]
pub struct ReflexAgent;

impl ReflexAgent {
    /// Every legal action sharing the best successor score, in legal action order
    pub fn best_actions(&self, game: &MazeGame) -> Vec<Direction> {
        let scored = game
            .legal_actions(MAXIMIZER)
            .into_iter()
            .map(|action| {
                let successor = game.apply_action(MAXIMIZER, action);
                (action, N64::from(successor.intrinsic_score()))
            })
            .collect_vec();

        let Some(best) = scored.iter().map(|(_, score)| *score).max() else {
            return vec![];
        };

        scored
            .into_iter()
            .filter(|(_, score)| *score == best)
            .map(|(action, _)| action)
            .collect()
    }

    pub fn choose_action_with_rng(
        &self,
        game: &MazeGame,
        rng: &mut impl Rng,
    ) -> Result<Direction, AgentError> {
        let best = self.best_actions(game);
        debug!(candidates = ?best, "reflex candidates");

        best.choose(rng).copied().ok_or(AgentError::NoLegalActions)
    }
}

impl MazeAgent for ReflexAgent {
    fn choose_action(&self, game: &MazeGame) -> Result<Direction, AgentError> {
        self.choose_action_with_rng(game, &mut thread_rng())
    }
}

pub struct ReflexFactory;

impl AgentFactory for ReflexFactory {
    fn name(&self) -> String {
        "reflex".to_owned()
    }

    /// The reflex agent has nothing to configure, it never searches past the next move
    fn build(&self, _config: AgentConfig) -> BoxedAgent {
        Box::new(ReflexAgent)
    }
}
