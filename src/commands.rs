use anyhow::{Result, bail};

use crate::cli::{Cli, ConvertArgs};
use crate::io::{read_legacy_json, write_dataset_json};
use crate::migrate::convert;

pub fn run_convert(cli: &Cli, args: &ConvertArgs) -> Result<()> {
    if args.output == std::path::Path::new("-") {
        bail!("stdout is not supported; provide a real file path.");
    }
    if args.output.exists() && !args.force {
        bail!("{} already exists (use --force to overwrite)", args.output.display());
    }

    if cli.verbose > 0 {
        eprintln!("[convert] {} -> {}", args.input.display(), args.output.display());
    }

    let legacy = read_legacy_json(&args.input)?;
    let dataset = convert(legacy);
    write_dataset_json(&args.output, &dataset)?;

    if cli.verbose > 0 {
        eprintln!("[convert] wrote dataset version {}", dataset.version);
    }
    Ok(())
}
