//! Agents that play the maximizer side of a [MazeGame].
//!
//! Each agent is built by an [AgentFactory] from an [AgentConfig]. The adversarial agents run a
//! [adversarial_minimax::paranoid::ParanoidSearch] scored by one of the functions in
//! [evaluation], the reflex agent only looks one move ahead.

pub mod adversarial_agent;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod reflex_agent;

use maze_types::{Direction, MazeGame};

pub use adversarial_agent::{AlphaBetaFactory, MinimaxFactory};
pub use config::{AgentConfig, ConfigError};
pub use error::AgentError;
pub use evaluation::EvaluationKind;
pub use reflex_agent::ReflexFactory;

pub type BoxedAgent = Box<dyn MazeAgent + Send + Sync>;
pub type BoxedFactory = Box<dyn AgentFactory + Send + Sync>;

pub trait MazeAgent {
    fn choose_action(&self, game: &MazeGame) -> Result<Direction, AgentError>;
}

pub trait AgentFactory {
    fn name(&self) -> String;
    fn build(&self, config: AgentConfig) -> BoxedAgent;
}

pub fn all_factories() -> Vec<BoxedFactory> {
    vec![
        Box::new(MinimaxFactory {}),
        Box::new(AlphaBetaFactory {}),
        Box::new(ReflexFactory {}),
    ]
}

pub fn factory_named(name: &str) -> Option<BoxedFactory> {
    all_factories().into_iter().find(|f| f.name() == name)
}
