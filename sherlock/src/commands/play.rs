use std::path::PathBuf;

use color_eyre::eyre::{eyre, Result};
use maze_agents::{factory_named, AgentConfig};
use maze_types::{
    maze::Outcome,
    types::{SimulableGame, TurnOrderedGame, VictorDeterminableGame},
    MazeGame, MAXIMIZER,
};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tracing::{debug, info, info_span};

use crate::load::load_game;

#[derive(clap::Args, Debug)]
pub(crate) struct Play {
    /// Layout (`.lay`) or wire fixture (`.json`) to start from
    #[clap(value_parser)]
    path: PathBuf,

    /// One of `minimax`, `alpha-beta` or `reflex`
    #[clap(short, long, value_parser, default_value = "alpha-beta")]
    agent: String,

    /// Agent options, for example `evaluation=composite,depth=3`
    #[clap(short, long, value_parser, default_value = "")]
    config: AgentConfig,

    /// Seed for the ghosts' moves
    #[clap(short, long, value_parser, default_value_t = 0)]
    seed: u64,

    /// Stop after this many maximizer moves
    #[clap(short, long, value_parser, default_value_t = 500)]
    max_turns: usize,

    /// Print the board after every round
    #[clap(short, long)]
    verbose: bool,
}

impl Play {
    pub(crate) fn run(self) -> Result<()> {
        let factory =
            factory_named(&self.agent).ok_or_else(|| eyre!("Unknown agent {:?}", self.agent))?;
        let agent = factory.build(self.config);
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut game = load_game(&self.path)?;

        let mut turn = 0;
        while !game.is_over() && turn < self.max_turns {
            let _span = info_span!("round", turn).entered();

            let action = agent.choose_action(&game)?;
            debug!(%action, "maximizer moved");
            game = game.apply_action(MAXIMIZER, action);

            for ghost in 1..game.agent_count() {
                if game.is_over() {
                    break;
                }

                let actions = game.legal_actions(ghost);
                if let Some(ghost_action) = actions.choose(&mut rng) {
                    game = game.apply_action(ghost, *ghost_action);
                }
            }

            turn += 1;
            if self.verbose {
                println!("Turn {turn}, score {}\n{game}", game.score());
            }
        }

        let result = match game.outcome() {
            Outcome::Win => "won",
            Outcome::Loss => "lost",
            Outcome::InProgress => "ran out of turns",
        };
        info!(turn, score = game.score(), "game finished");
        println!("{game}");
        println!(
            "{} {result} after {turn} turns with a score of {}",
            factory.name(),
            game.score()
        );

        Ok(())
    }
}
