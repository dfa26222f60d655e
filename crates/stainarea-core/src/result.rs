use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{COVERAGE_LOW_PERCENT, COVERAGE_MODERATE_PERCENT, COVERAGE_SUBSTANTIAL_PERCENT};
use crate::point::Point;

/// Outcome of one Monte Carlo estimation.
///
/// `random_points` and `points_inside_stain_list` are only present on
/// results produced in this process; records loaded from a history snapshot
/// carry empty lists.
#[derive(Clone, Debug, PartialEq)]
pub struct CalculationResult {
    pub id: Uuid,
    pub image_name: String,
    pub image_width: u32,
    pub image_height: u32,
    pub total_image_area: u64,
    pub total_random_points: usize,
    pub points_inside_stain: usize,
    pub estimated_stain_area: f64,
    pub calculation_date: DateTime<Utc>,
    pub random_points: Vec<Point>,
    pub points_inside_stain_list: Vec<Point>,
}

impl CalculationResult {
    /// Fraction of samples classified inside, as a percentage in `[0, 100]`.
    pub fn coverage_percent(&self) -> f64 {
        if self.total_random_points == 0 {
            return 0.0;
        }
        self.points_inside_stain as f64 / self.total_random_points as f64 * 100.0
    }

    pub fn coverage_band(&self) -> CoverageBand {
        CoverageBand::from_percent(self.coverage_percent())
    }

    /// Whether the sampled point lists are available (not a reloaded record).
    pub fn has_point_data(&self) -> bool {
        !self.random_points.is_empty()
    }

    /// The durable projection of this result, without the point lists.
    pub fn to_stored(&self) -> StoredResult {
        StoredResult {
            id: self.id,
            image_name: self.image_name.clone(),
            image_width: self.image_width,
            image_height: self.image_height,
            total_image_area: self.total_image_area,
            total_random_points: self.total_random_points,
            points_inside_stain: self.points_inside_stain,
            estimated_stain_area: self.estimated_stain_area,
            calculation_date: self.calculation_date,
        }
    }
}

/// History record as written to a persistence slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredResult {
    pub id: Uuid,
    pub image_name: String,
    pub image_width: u32,
    pub image_height: u32,
    pub total_image_area: u64,
    pub total_random_points: usize,
    pub points_inside_stain: usize,
    pub estimated_stain_area: f64,
    pub calculation_date: DateTime<Utc>,
}

impl From<StoredResult> for CalculationResult {
    fn from(stored: StoredResult) -> Self {
        Self {
            id: stored.id,
            image_name: stored.image_name,
            image_width: stored.image_width,
            image_height: stored.image_height,
            total_image_area: stored.total_image_area,
            total_random_points: stored.total_random_points,
            points_inside_stain: stored.points_inside_stain,
            estimated_stain_area: stored.estimated_stain_area,
            calculation_date: stored.calculation_date,
            random_points: Vec::new(),
            points_inside_stain_list: Vec::new(),
        }
    }
}

/// Coarse grading of stain coverage, as shown next to each history entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoverageBand {
    Low,
    Moderate,
    Substantial,
    High,
}

impl CoverageBand {
    pub fn from_percent(percent: f64) -> Self {
        if percent < COVERAGE_LOW_PERCENT {
            Self::Low
        } else if percent < COVERAGE_MODERATE_PERCENT {
            Self::Moderate
        } else if percent < COVERAGE_SUBSTANTIAL_PERCENT {
            Self::Substantial
        } else {
            Self::High
        }
    }
}

impl fmt::Display for CoverageBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Moderate => write!(f, "Moderate"),
            Self::Substantial => write!(f, "Substantial"),
            Self::High => write!(f, "High"),
        }
    }
}
