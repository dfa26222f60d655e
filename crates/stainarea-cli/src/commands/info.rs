use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use stainarea_core::io::image_io::{content_type_for_path, load_image_file};

#[derive(Args)]
pub struct InfoArgs {
    /// Input image file
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let image = load_image_file(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    println!("File:          {}", args.file.display());
    println!("Name:          {}", image.name());
    println!("Content type:  {}", content_type_for_path(&args.file));
    println!("Dimensions:    {}x{}", image.width(), image.height());
    println!("Total area:    {} px", image.area());

    Ok(())
}
