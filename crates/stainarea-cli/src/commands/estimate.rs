use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use stainarea_core::session::CalculationSession;

use crate::progress::BarReporter;
use crate::settings::{load_config, GlobalArgs};
use crate::summary::print_result;

#[derive(Args)]
pub struct EstimateArgs {
    /// Binary image: white pixels are stain, black pixels background
    pub file: PathBuf,

    /// Number of random points (100..=10000)
    #[arg(short = 'n', long)]
    pub samples: Option<u32>,

    /// Seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Do not record the result in history
    #[arg(long)]
    pub no_save: bool,

    /// Print the points classified inside the stain
    #[arg(long)]
    pub points: bool,
}

pub fn run(args: &EstimateArgs, global: &GlobalArgs) -> Result<()> {
    let mut config = load_config(global)?;
    if let Some(n) = args.samples {
        config.sample_count = n;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.no_save {
        config.history.dir = None;
    }

    let session = CalculationSession::from_config(&config).context("Invalid session settings")?;
    session
        .load_image_file(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    let reporter = BarReporter::new()?;
    let result = session.calculate_reported(&reporter)?;
    print_result(&result);

    if args.points {
        println!("Points inside the stain ({}):", result.points_inside_stain_list.len());
        for p in &result.points_inside_stain_list {
            println!("{:>10.3}  {:>10.3}", p.x, p.y);
        }
    }

    Ok(())
}
