use std::{collections::BTreeMap, fmt::Debug, path::PathBuf};

use adversarial_minimax::paranoid::{MinMaxReturn, Pruning};
use color_eyre::eyre::{eyre, Result};
use itertools::Itertools;
use maze_agents::{adversarial_agent::AdversarialAgent, factory_named, AgentConfig};
use maze_types::{types::SimulableGame, AgentIndex, MazeGame};

use crate::load::load_game;

#[derive(clap::Args, Debug)]
pub(crate) struct Solve {
    /// Layout (`.lay`) or wire fixture (`.json`) to solve
    #[clap(value_parser)]
    path: PathBuf,

    /// One of `minimax`, `alpha-beta` or `reflex`
    #[clap(short, long, value_parser, default_value = "alpha-beta")]
    agent: String,

    /// Agent options, for example `evaluation=composite,depth=3`
    #[clap(short, long, value_parser, default_value = "")]
    config: AgentConfig,

    /// Print every node the search explored
    #[clap(short, long)]
    tree: bool,
}

impl Solve {
    pub(crate) fn run(self) -> Result<()> {
        let game = load_game(&self.path)?;
        println!("{game}");

        let pruning = match self.agent.as_str() {
            "minimax" => Pruning::None,
            "alpha-beta" => Pruning::AlphaBeta,
            other => {
                let factory =
                    factory_named(other).ok_or_else(|| eyre!("Unknown agent {other:?}"))?;
                let action = factory.build(self.config).choose_action(&game)?;
                println!("{other} chose {action}");

                return Ok(());
            }
        };

        let agent = AdversarialAgent::new(self.config, pruning, "solve");
        let result = agent.search().search(&game);

        match result.best_action() {
            Some(action) => println!(
                "{} chose {action} with a score of {:?} at depth {}",
                self.agent,
                result.score(),
                self.config.depth
            ),
            None => println!("There is nothing to choose, the game is over"),
        }
        print_route(&result);

        if self.tree {
            println!("{}", result.to_text_tree());
        }

        Ok(())
    }
}

pub(crate) fn route_per_agent<GameType, ScoreType>(
    result: &MinMaxReturn<GameType, ScoreType>,
) -> BTreeMap<AgentIndex, Vec<GameType::Action>>
where
    GameType: SimulableGame + Debug + Clone,
    ScoreType: Copy + Ord + Debug,
{
    result.chosen_route().into_iter().into_group_map().into_iter().collect()
}

fn print_route(result: &MinMaxReturn<MazeGame, impl Copy + Ord + Debug>) {
    let paths_per_agent = route_per_agent(result);
    println!(
        "The chosen route looks {} rounds ahead:",
        paths_per_agent.values().map(Vec::len).max().unwrap_or(0)
    );
    for (agent, path) in paths_per_agent {
        println!("agent {agent}: {}", path.iter().join(", "));
    }
    println!()
}
