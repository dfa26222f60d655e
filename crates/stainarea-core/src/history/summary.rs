use crate::result::CalculationResult;

/// Aggregate figures over a set of history entries. All zero when empty.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HistorySummary {
    pub count: usize,
    pub average_area: f64,
    pub average_coverage_percent: f64,
    pub average_points: f64,
}

impl HistorySummary {
    pub fn from_results(results: &[CalculationResult]) -> Self {
        if results.is_empty() {
            return Self::default();
        }
        let n = results.len() as f64;
        let mean = |f: fn(&CalculationResult) -> f64| results.iter().map(f).sum::<f64>() / n;

        Self {
            count: results.len(),
            average_area: mean(|r| r.estimated_stain_area),
            average_coverage_percent: mean(CalculationResult::coverage_percent),
            average_points: mean(|r| r.total_random_points as f64),
        }
    }
}
