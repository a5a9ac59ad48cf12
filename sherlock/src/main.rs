use clap::Parser;
use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

mod commands;
mod load;

use commands::Command;

/// Debugging tools for the maze agents
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    args.command.run()
}
