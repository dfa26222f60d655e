use serde::{Deserialize, Serialize};

/// A sampled coordinate in image space, `x` in `[0, width]`, `y` in `[0, height]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
