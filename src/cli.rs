use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Kairos bias correction and reordering-cost evaluation.
#[derive(Parser)]
#[command(
    name = "kairos",
    version,
    about = "Bias-correct a climate model series and score it against a reference"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Correct the model, then evaluate every (threshold, window) reordering cost.
    Run(RunArgs),
    /// Apply the configured bias correction and write the corrected future.
    Correct(CorrectArgs),
}

/// Arguments for the `run` subcommand.
#[derive(clap::Args)]
pub struct RunArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "kairos.toml")]
    pub config: PathBuf,

    /// Override output report path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `correct` subcommand.
#[derive(clap::Args)]
pub struct CorrectArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "kairos.toml")]
    pub config: PathBuf,

    /// Path for the corrected CSV series.
    #[arg(short, long)]
    pub output: PathBuf,
}
