/// Thread-safe progress reporting for an estimation run.
///
/// Implementors can use this to drive progress bars or logging. All methods
/// have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// Classification is starting over `total_points` samples.
    fn begin(&self, _total_points: usize) {}

    /// `points_done` samples have been classified so far.
    fn advance(&self, _points_done: usize) {}

    /// Classification is finished.
    fn finish(&self) {}
}

/// No-op progress reporter, used when `estimate` delegates.
pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
