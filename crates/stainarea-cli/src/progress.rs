use indicatif::{ProgressBar, ProgressStyle};
use stainarea_core::estimate::ProgressReporter;

/// Drives an indicatif bar from estimation progress.
pub struct BarReporter {
    bar: ProgressBar,
}

impl BarReporter {
    pub fn new() -> anyhow::Result<Self> {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:40}] {pos}/{len}")?
                .progress_chars("=> "),
        );
        bar.set_message("Classifying points");
        Ok(Self { bar })
    }
}

impl ProgressReporter for BarReporter {
    fn begin(&self, total_points: usize) {
        self.bar.set_length(total_points as u64);
        self.bar.set_position(0);
    }

    fn advance(&self, points_done: usize) {
        self.bar.set_position(points_done as u64);
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
