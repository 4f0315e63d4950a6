use anyhow::Result;
use clap::Parser;

use phylomap::cli::{Cli, Commands};
use phylomap::commands::run_convert;

fn main() -> Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Convert(args) => run_convert(&cli, args),
    }
}
