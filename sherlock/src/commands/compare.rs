use std::path::PathBuf;

use adversarial_minimax::{paranoid::Pruning, LeafCounter};
use color_eyre::eyre::Result;
use maze_agents::{adversarial_agent::AdversarialAgent, AgentConfig};

use crate::load::load_game;

#[derive(clap::Args, Debug)]
pub(crate) struct Compare {
    /// Layout (`.lay`) or wire fixture (`.json`) to search
    #[clap(value_parser)]
    path: PathBuf,

    /// Agent options, for example `evaluation=composite,depth=3`
    #[clap(short, long, value_parser, default_value = "")]
    config: AgentConfig,
}

impl Compare {
    pub(crate) fn run(self) -> Result<()> {
        let game = load_game(&self.path)?;
        println!("{game}");

        let full_counter = LeafCounter::default();
        let full = AdversarialAgent::new(self.config, Pruning::None, "minimax")
            .search()
            .search_with_instruments(&game, &full_counter);

        let pruned_counter = LeafCounter::default();
        let pruned = AdversarialAgent::new(self.config, Pruning::AlphaBeta, "alpha-beta")
            .search()
            .search_with_instruments(&game, &pruned_counter);

        for (name, result, counter) in [
            ("minimax", &full, &full_counter),
            ("alpha-beta", &pruned, &pruned_counter),
        ] {
            println!(
                "{name:>10}: {:?} scored {:?}, {} leaves evaluated, {} nodes expanded",
                result.best_action(),
                result.score(),
                counter.leaf_count(),
                counter.expansion_count(),
            );
        }

        if full.score() != pruned.score() {
            println!("The two searches disagree on the score!");
        }

        Ok(())
    }
}
