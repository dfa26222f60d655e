mod types;

use chrono::Utc;
use rand::Rng;
use rayon::prelude::*;
use tracing::{debug, info};
use uuid::Uuid;

use crate::classify::is_inside;
use crate::consts::{CLASSIFY_CHUNK_SIZE, PARALLEL_SAMPLE_THRESHOLD};
use crate::error::{Result, StainError};
use crate::io::ImageHandle;
use crate::point::Point;
use crate::result::CalculationResult;
use crate::sampler::sample_points;

pub use types::{NoOpReporter, ProgressReporter};

/// Estimate the stain area of `image` from `sample_count` random points.
pub fn estimate<R: Rng + ?Sized>(
    image: Option<&ImageHandle>,
    sample_count: usize,
    rng: &mut R,
) -> Result<CalculationResult> {
    estimate_reported(image, sample_count, rng, &NoOpReporter)
}

/// Like [`estimate`], reporting classification progress to `reporter`.
pub fn estimate_reported<R: Rng + ?Sized>(
    image: Option<&ImageHandle>,
    sample_count: usize,
    rng: &mut R,
    reporter: &dyn ProgressReporter,
) -> Result<CalculationResult> {
    let image = image.ok_or(StainError::NoImageLoaded)?;
    let surface = image.surface();
    estimate_with(Some(image), sample_count, rng, |p| is_inside(surface, p), reporter)
}

/// Run an estimation with a caller-supplied point classifier.
///
/// Points are drawn over the image rectangle, classified (in parallel for
/// large runs) and aggregated in draw order. Nothing is persisted here.
pub fn estimate_with<R, F>(
    image: Option<&ImageHandle>,
    sample_count: usize,
    rng: &mut R,
    classify: F,
    reporter: &dyn ProgressReporter,
) -> Result<CalculationResult>
where
    R: Rng + ?Sized,
    F: Fn(&Point) -> bool + Sync,
{
    let image = image.ok_or(StainError::NoImageLoaded)?;
    info!(
        image = image.name(),
        width = image.width(),
        height = image.height(),
        samples = sample_count,
        "Starting Monte Carlo estimation"
    );

    let random_points = sample_points(rng, image.width(), image.height(), sample_count)?;
    let flags = classify_points(&random_points, &classify, reporter);

    let points_inside_stain_list: Vec<Point> = random_points
        .iter()
        .zip(&flags)
        .filter(|(_, inside)| **inside)
        .map(|(p, _)| *p)
        .collect();

    let total_image_area = image.area();
    let total_random_points = random_points.len();
    let points_inside_stain = points_inside_stain_list.len();
    let estimated_stain_area =
        total_image_area as f64 * points_inside_stain as f64 / total_random_points as f64;

    let result = CalculationResult {
        id: Uuid::new_v4(),
        image_name: image.name().to_string(),
        image_width: image.width(),
        image_height: image.height(),
        total_image_area,
        total_random_points,
        points_inside_stain,
        estimated_stain_area,
        calculation_date: Utc::now(),
        random_points,
        points_inside_stain_list,
    };

    info!(
        id = %result.id,
        inside = points_inside_stain,
        total = total_random_points,
        area = estimated_stain_area,
        "Estimation complete"
    );
    Ok(result)
}

/// Classify every point, chunk by chunk, keeping the input order.
fn classify_points<F>(points: &[Point], classify: &F, reporter: &dyn ProgressReporter) -> Vec<bool>
where
    F: Fn(&Point) -> bool + Sync,
{
    let parallel = points.len() >= PARALLEL_SAMPLE_THRESHOLD;
    debug!(points = points.len(), parallel, "Classifying sample points");

    reporter.begin(points.len());
    let mut flags: Vec<bool> = Vec::with_capacity(points.len());
    for chunk in points.chunks(CLASSIFY_CHUNK_SIZE) {
        if parallel {
            flags.par_extend(chunk.par_iter().map(classify));
        } else {
            flags.extend(chunk.iter().map(classify));
        }
        reporter.advance(flags.len());
    }
    reporter.finish();
    flags
}
