pub mod compare;
pub mod play;
pub mod solve;

use compare::Compare;
use play::Play;
use solve::Solve;

use clap::Subcommand;
use color_eyre::eyre::Result;

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Pick the maximizer's action for a single position
    Solve(Solve),
    /// Run plain minimax and Alpha-Beta on the same position
    Compare(Compare),
    /// Play a whole game against randomly moving ghosts
    Play(Play),
}

impl Command {
    pub fn run(self) -> Result<()> {
        match self {
            Command::Solve(s) => s.run()?,
            Command::Compare(c) => c.run()?,
            Command::Play(p) => p.run()?,
        }

        Ok(())
    }
}
