use crate::consts::WHITE_THRESHOLD;
use crate::io::PixelSource;
use crate::point::Point;

/// Whether an RGB triple counts as stain: every channel strictly above
/// [`WHITE_THRESHOLD`]. Alpha plays no part.
pub fn is_stain_color(r: u8, g: u8, b: u8) -> bool {
    r > WHITE_THRESHOLD && g > WHITE_THRESHOLD && b > WHITE_THRESHOLD
}

/// Map a continuous coordinate onto a pixel index in `[0, extent - 1]`.
fn pixel_index(v: f64, extent: u32) -> u32 {
    let max = extent.saturating_sub(1);
    if v.is_nan() || v <= 0.0 {
        return 0;
    }
    (v.floor() as u64).min(max as u64) as u32
}

/// Classify one point against the pixel under it.
///
/// An unreadable or empty surface yields `false`; a run in progress is never
/// aborted by a classification failure.
pub fn is_inside(source: &dyn PixelSource, point: &Point) -> bool {
    let (w, h) = source.dimensions();
    if w == 0 || h == 0 {
        return false;
    }
    let x = pixel_index(point.x, w);
    let y = pixel_index(point.y, h);
    match source.sample_color(x, y) {
        Some([r, g, b, _]) => is_stain_color(r, g, b),
        None => false,
    }
}
