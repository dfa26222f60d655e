mod commands;
mod progress;
mod settings;
mod summary;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stainarea", about = "Monte Carlo stain area estimation")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Session configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the result history
    #[arg(long, global = true)]
    history_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show image dimensions and area
    Info(commands::info::InfoArgs),
    /// Estimate the stain area of an image
    Estimate(commands::estimate::EstimateArgs),
    /// Inspect or edit the result history
    History(commands::history::HistoryArgs),
    /// Print the default configuration as TOML
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let global = settings::GlobalArgs {
        config: cli.config.clone(),
        history_dir: cli.history_dir.clone(),
    };

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Estimate(args) => commands::estimate::run(args, &global),
        Commands::History(args) => commands::history::run(args, &global),
        Commands::Config(args) => commands::config::run(args),
    }
}
