use clap::{Args, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

/// Phylomap CLI (argument schema only)
#[derive(Parser, Debug)]
#[command(name = "phylomap", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a legacy (v1) dataset to the v2 schema
    Convert(ConvertArgs),
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Input legacy dataset (JSON)
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: PathBuf,

    /// Output dataset file (must be a file path; "-" is rejected)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: PathBuf,

    /// Overwrite if the file exists
    #[arg(long)]
    pub force: bool,
}
