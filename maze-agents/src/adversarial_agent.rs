use adversarial_minimax::paranoid::{ParanoidSearch, Pruning, SearchOptions};
use decorum::N64;
use maze_types::{Direction, MazeGame};

use crate::{
    evaluation::EvaluationKind, AgentConfig, AgentError, AgentFactory, BoxedAgent, MazeAgent,
};

/// Plays the maximizer with a paranoid search over every ghost's replies
#[derive(Debug, Clone)]
pub struct AdversarialAgent {
    search: ParanoidSearch<MazeGame, N64, EvaluationKind>,
}

impl AdversarialAgent {
    pub fn new(config: AgentConfig, pruning: Pruning, name: &'static str) -> Self {
        let options = SearchOptions {
            depth: config.depth,
            pruning,
        };

        Self {
            search: ParanoidSearch::new(config.evaluation, name, options),
        }
    }

    pub fn search(&self) -> &ParanoidSearch<MazeGame, N64, EvaluationKind> {
        &self.search
    }
}

impl MazeAgent for AdversarialAgent {
    fn choose_action(&self, game: &MazeGame) -> Result<Direction, AgentError> {
        self.search
            .choose_action(game)
            .ok_or(AgentError::NoLegalActions)
    }
}

pub struct MinimaxFactory;

impl AgentFactory for MinimaxFactory {
    fn name(&self) -> String {
        "minimax".to_owned()
    }

    fn build(&self, config: AgentConfig) -> BoxedAgent {
        Box::new(AdversarialAgent::new(config, Pruning::None, "minimax"))
    }
}

pub struct AlphaBetaFactory;

impl AgentFactory for AlphaBetaFactory {
    fn name(&self) -> String {
        "alpha-beta".to_owned()
    }

    fn build(&self, config: AgentConfig) -> BoxedAgent {
        Box::new(AdversarialAgent::new(config, Pruning::AlphaBeta, "alpha-beta"))
    }
}
