use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use singlemap::analysis::Detector;
use singlemap::cli::Cli;
use singlemap::config::{self, DetectorConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let file_config = config::load_file_config(Path::new("."))?;
    let config = DetectorConfig::from_cli(&cli, file_config.as_ref());
    let prefix = cli.package_prefix();

    let detector = Detector::from_root(&cli.path, &prefix, config)?;

    fs::write(&cli.output, detector.graphml())
        .with_context(|| format!("failed to write {}", cli.output.display()))?;

    if detector.config().show_stats {
        println!();
        println!("{}", detector.stats_text(true));
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}
