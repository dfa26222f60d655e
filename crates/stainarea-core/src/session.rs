use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::{validate_sample_count, SessionConfig};
use crate::consts::DEFAULT_SAMPLE_COUNT;
use crate::error::{Result, StainError};
use crate::estimate::{estimate_reported, NoOpReporter, ProgressReporter};
use crate::history::{HistoryStore, HistorySummary, JsonFileStore, KeyValueStore, MemoryStore};
use crate::io::{self, ImageHandle};
use crate::result::CalculationResult;

/// Where a session stands with respect to image and calculation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    ImageLoaded,
    Calculating,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::ImageLoaded => write!(f, "Image loaded"),
            Self::Calculating => write!(f, "Calculating"),
        }
    }
}

/// Hook for front ends that want live updates. All methods default to no-ops.
pub trait SessionObserver: Send + Sync {
    fn image_loaded(&self, _image: &ImageHandle) {}
    fn image_reset(&self) {}
    fn calculation_started(&self, _image: &ImageHandle, _sample_count: u32) {}
    fn calculation_finished(&self, _result: &CalculationResult) {}
    fn history_changed(&self, _len: usize) {}
}

struct Inner {
    current_image: Option<ImageHandle>,
    sample_count: u32,
    /// Seeded once, never reseeded; each calculation draws a child generator.
    rng: StdRng,
}

/// Holds the busy flag for the duration of one calculation.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| StainError::NotReady)?;
        Ok(Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// One user's working session: the current image, the sample count and
/// the result history. At most one calculation runs at a time; a second
/// concurrent `calculate` is rejected with [`StainError::NotReady`].
pub struct CalculationSession {
    inner: Mutex<Inner>,
    busy: AtomicBool,
    history: HistoryStore,
    observer: Option<Arc<dyn SessionObserver>>,
}

impl CalculationSession {
    /// New idle session with an OS-seeded generator.
    pub fn new(history: HistoryStore) -> Self {
        Self::with_rng(history, StdRng::from_entropy())
    }

    /// New idle session whose runs are reproducible from `seed`.
    pub fn with_seed(history: HistoryStore, seed: u64) -> Self {
        Self::with_rng(history, StdRng::seed_from_u64(seed))
    }

    fn with_rng(history: HistoryStore, rng: StdRng) -> Self {
        Self {
            inner: Mutex::new(Inner {
                current_image: None,
                sample_count: DEFAULT_SAMPLE_COUNT,
                rng,
            }),
            busy: AtomicBool::new(false),
            history,
            observer: None,
        }
    }

    /// Build a session from configuration, opening the configured history.
    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        config.validate()?;
        let sink: Arc<dyn KeyValueStore> = match &config.history.dir {
            Some(dir) => Arc::new(JsonFileStore::new(dir)),
            None => Arc::new(MemoryStore::new()),
        };
        let history = HistoryStore::load(sink, config.history.key.clone());
        let session = match config.seed {
            Some(seed) => Self::with_seed(history, seed),
            None => Self::new(history),
        };
        session.set_sample_count(config.sample_count)?;
        Ok(session)
    }

    pub fn with_observer(mut self, observer: Arc<dyn SessionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self, f: impl FnOnce(&dyn SessionObserver)) {
        if let Some(observer) = &self.observer {
            f(observer.as_ref());
        }
    }

    pub fn state(&self) -> SessionState {
        if self.is_busy() {
            SessionState::Calculating
        } else if self.has_image() {
            SessionState::ImageLoaded
        } else {
            SessionState::Idle
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn has_image(&self) -> bool {
        self.lock().current_image.is_some()
    }

    pub fn can_calculate(&self) -> bool {
        self.has_image() && !self.is_busy()
    }

    pub fn current_image(&self) -> Option<ImageHandle> {
        self.lock().current_image.clone()
    }

    pub fn sample_count(&self) -> u32 {
        self.lock().sample_count
    }

    /// Decode `bytes` and make the result the current image.
    ///
    /// On failure the previous image (if any) stays current.
    pub fn load_image(&self, name: &str, bytes: &[u8], content_type: &str) -> Result<ImageHandle> {
        let image = io::decode(name, bytes, content_type)?;
        self.set_image(image.clone());
        Ok(image)
    }

    /// Read and decode an image file, then make it current.
    pub fn load_image_file(&self, path: &Path) -> Result<ImageHandle> {
        let image = io::load_image_file(path)?;
        self.set_image(image.clone());
        Ok(image)
    }

    /// Replace the current image with an already decoded one.
    pub fn set_image(&self, image: ImageHandle) {
        info!(
            name = image.name(),
            width = image.width(),
            height = image.height(),
            "Image loaded"
        );
        self.lock().current_image = Some(image.clone());
        self.notify(|o| o.image_loaded(&image));
    }

    /// Set the number of random points for the next calculation.
    pub fn set_sample_count(&self, n: u32) -> Result<()> {
        validate_sample_count(n)?;
        self.lock().sample_count = n;
        debug!(sample_count = n, "Sample count updated");
        Ok(())
    }

    /// Drop the current image and restore the default sample count.
    /// History is left untouched.
    pub fn reset(&self) {
        {
            let mut inner = self.lock();
            inner.current_image = None;
            inner.sample_count = DEFAULT_SAMPLE_COUNT;
        }
        debug!("Session reset");
        self.notify(|o| o.image_reset());
    }

    /// Run one estimation on the current image and record it in history.
    pub fn calculate(&self) -> Result<CalculationResult> {
        self.calculate_reported(&NoOpReporter)
    }

    /// Like [`calculate`](Self::calculate), reporting progress to `reporter`.
    pub fn calculate_reported(&self, reporter: &dyn ProgressReporter) -> Result<CalculationResult> {
        let _busy = BusyGuard::acquire(&self.busy)?;

        let (image, sample_count, mut rng) = {
            let mut inner = self.lock();
            let image = inner.current_image.clone().ok_or(StainError::NoImageLoaded)?;
            let rng = StdRng::seed_from_u64(inner.rng.gen());
            (image, inner.sample_count, rng)
        };

        self.notify(|o| o.calculation_started(&image, sample_count));
        let result = estimate_reported(Some(&image), sample_count as usize, &mut rng, reporter)
            .inspect_err(|e| warn!(error = %e, "Calculation failed"))?;

        self.history.add(result.clone());
        self.notify(|o| {
            o.calculation_finished(&result);
            o.history_changed(self.history.len());
        });
        Ok(result)
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Past results, most recent first.
    pub fn list_results(&self) -> Vec<CalculationResult> {
        self.history.list()
    }

    /// Remove one result. Unknown ids are ignored.
    pub fn remove_result(&self, id: &Uuid) -> bool {
        let removed = self.history.remove(id);
        self.notify(|o| o.history_changed(self.history.len()));
        removed
    }

    pub fn clear_results(&self) {
        self.history.clear();
        self.notify(|o| o.history_changed(0));
    }

    pub fn summary(&self) -> HistorySummary {
        self.history.summary()
    }
}
