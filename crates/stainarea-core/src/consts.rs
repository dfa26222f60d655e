/// Channel intensity a pixel must strictly exceed on R, G and B to count as stain.
pub const WHITE_THRESHOLD: u8 = 128;

/// Number of random points sampled when nothing else is configured.
pub const DEFAULT_SAMPLE_COUNT: u32 = 1000;

/// Smallest sample count a session accepts.
pub const MIN_SAMPLE_COUNT: u32 = 100;

/// Largest sample count a session accepts.
pub const MAX_SAMPLE_COUNT: u32 = 10_000;

/// Storage slot holding the persisted history snapshot.
pub const HISTORY_SLOT_KEY: &str = "stain-calculation-results";

/// Minimum point count to classify with Rayon parallelism.
pub const PARALLEL_SAMPLE_THRESHOLD: usize = 2_048;

/// Number of points classified between two progress reports.
pub const CLASSIFY_CHUNK_SIZE: usize = 1_000;

/// Coverage (percent) below which a result is banded as low.
pub const COVERAGE_LOW_PERCENT: f64 = 10.0;

/// Coverage (percent) below which a result is banded as moderate.
pub const COVERAGE_MODERATE_PERCENT: f64 = 25.0;

/// Coverage (percent) below which a result is banded as substantial.
pub const COVERAGE_SUBSTANTIAL_PERCENT: f64 = 50.0;
