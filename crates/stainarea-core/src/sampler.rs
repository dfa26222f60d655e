use rand::Rng;

use crate::error::{Result, StainError};
use crate::point::Point;

/// Draw `count` points uniformly over the rectangle `[0, width] x [0, height]`.
///
/// Coordinates are continuous, not snapped to pixel centers. The generator is
/// supplied by the caller so that seeded runs are reproducible.
pub fn sample_points<R: Rng + ?Sized>(
    rng: &mut R,
    width: u32,
    height: u32,
    count: usize,
) -> Result<Vec<Point>> {
    if count == 0 {
        return Err(StainError::InvalidArgument(
            "sample count must be positive".into(),
        ));
    }
    if width == 0 || height == 0 {
        return Err(StainError::InvalidArgument(format!(
            "sampling domain must be non-empty, got {width}x{height}"
        )));
    }

    let w = width as f64;
    let h = height as f64;
    let points = (0..count)
        .map(|_| Point::new(rng.gen_range(0.0..=w), rng.gen_range(0.0..=h)))
        .collect();
    Ok(points)
}
