// src/config/settings.rs
//
// Run configuration passed explicitly into the scheduler and classifier.

use serde::{Deserialize, Serialize};

/// Default effective-frequency threshold below which a file is forced FAKE
pub const DEFAULT_CUTOFF_HZ: f64 = 18000.0;

/// Output verbosity flags. The analysis core never reads these; they are
/// carried through to the reporter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputMode {
    /// Print only the paths of FAKE files
    pub quiet: bool,
    /// Suppress everything that is not FAKE
    pub only_fake: bool,
    /// One JSON object per result
    pub json: bool,
}

impl OutputMode {
    /// Progress bar and summary only make sense for human-readable output
    pub fn shows_progress(&self) -> bool {
        !self.quiet && !self.json
    }
}

/// Configuration for one batch run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckerConfig {
    /// Files whose max effective frequency is below this are FAKE (Hz)
    pub cutoff_hz: f64,
    /// Number of concurrent workers
    pub concurrency: usize,
    pub output: OutputMode,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            cutoff_hz: DEFAULT_CUTOFF_HZ,
            concurrency: default_concurrency(),
            output: OutputMode::default(),
        }
    }
}

impl CheckerConfig {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

/// Logical CPU count, falling back to a single worker
pub fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Fluent builder for [`CheckerConfig`]
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: CheckerConfig,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: CheckerConfig::default(),
        }
    }

    pub fn cutoff_hz(mut self, hz: f64) -> Self {
        self.config.cutoff_hz = hz;
        self
    }

    /// Zero is clamped to one worker
    pub fn concurrency(mut self, workers: usize) -> Self {
        self.config.concurrency = workers.max(1);
        self
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.config.output.quiet = quiet;
        self
    }

    pub fn only_fake(mut self, only_fake: bool) -> Self {
        self.config.output.only_fake = only_fake;
        self
    }

    pub fn json(mut self, json: bool) -> Self {
        self.config.output.json = json;
        self
    }

    pub fn build(self) -> CheckerConfig {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
