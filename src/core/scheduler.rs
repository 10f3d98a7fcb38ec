// src/core/scheduler.rs
//
// Bounded worker pool over a file list. Workers pull paths from a shared
// job queue and push one result each onto a result channel; the channel
// closes once every worker has drained the queue.

use crossbeam_channel::{Receiver, Sender};
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::analyzer::FileAnalyzer;
use super::decoder::AudioMetadata;
use crate::config::CheckerConfig;
use crate::detection::AnalysisResult;
use crate::error::CheckError;

/// Runs a [`FileAnalyzer`] over many files with at most `pool_size`
/// analyses in flight.
#[derive(Debug, Clone)]
pub struct BatchScheduler {
    analyzer: Arc<FileAnalyzer>,
    pool_size: usize,
}

impl BatchScheduler {
    /// `pool_size` of zero is treated as one.
    pub fn new(analyzer: FileAnalyzer, pool_size: usize) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            pool_size: pool_size.max(1),
        }
    }

    pub fn from_config(analyzer: FileAnalyzer, config: &CheckerConfig) -> Self {
        Self::new(analyzer, config.concurrency)
    }

    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    /// Start analyzing `files` and return the stream of results.
    ///
    /// Results arrive in completion order. The stream yields exactly one
    /// result per input path, then ends.
    pub fn spawn(&self, files: Vec<PathBuf>) -> Result<ResultStream, ThreadPoolBuildError> {
        let total = files.len();
        let (result_tx, result_rx) = crossbeam_channel::unbounded();

        if total == 0 {
            return Ok(ResultStream {
                results: result_rx,
                total,
                _pool: None,
            });
        }

        let workers = self.pool_size.min(total);
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("losscheckr-worker-{}", i))
            .build()?;

        let (job_tx, job_rx) = crossbeam_channel::bounded(total);
        for path in files {
            job_tx
                .send(path)
                .expect("job queue has capacity for every file and a live receiver");
        }
        // Workers stop once the queue is empty and this sender is gone
        drop(job_tx);

        log::info!("Analyzing {} files on {} workers", total, workers);

        for worker in 0..workers {
            let jobs = job_rx.clone();
            let results = result_tx.clone();
            let analyzer = Arc::clone(&self.analyzer);
            pool.spawn(move || run_worker(worker, &analyzer, jobs, results));
        }
        drop(result_tx);

        Ok(ResultStream {
            results: result_rx,
            total,
            _pool: Some(pool),
        })
    }

    /// Analyze everything and collect the results in completion order
    pub fn run(&self, files: Vec<PathBuf>) -> Result<Vec<AnalysisResult>, ThreadPoolBuildError> {
        Ok(self.spawn(files)?.collect())
    }
}

fn run_worker(
    worker: usize,
    analyzer: &FileAnalyzer,
    jobs: Receiver<PathBuf>,
    results: Sender<AnalysisResult>,
) {
    for path in jobs.iter() {
        log::trace!("worker {} picked {}", worker, path.display());
        if results.send(analyze_guarded(analyzer, &path)).is_err() {
            log::debug!("worker {}: result stream dropped, stopping", worker);
            return;
        }
    }
}

/// A panic while analyzing one file becomes that file's ERROR result.
/// Unwinding out of a pool task would abort the process.
fn analyze_guarded(analyzer: &FileAnalyzer, path: &Path) -> AnalysisResult {
    match panic::catch_unwind(AssertUnwindSafe(|| analyzer.analyze(path))) {
        Ok(result) => result,
        Err(payload) => {
            let err = CheckError::Panicked {
                path: path.to_path_buf(),
                message: panic_message(payload.as_ref()),
            };
            log::error!("{}", err);
            let format = analyzer
                .registry()
                .decoder_for(path)
                .map(|d| d.name())
                .unwrap_or_default();
            AnalysisResult::failed(path, format, AudioMetadata::default(), &err)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Results from a running batch.
///
/// Iterating blocks until the next result is ready and ends after the last
/// worker finishes. Dropping the stream early makes workers stop after
/// their current file.
pub struct ResultStream {
    results: Receiver<AnalysisResult>,
    total: usize,
    _pool: Option<ThreadPool>,
}

impl ResultStream {
    /// Number of results this stream will yield in total
    pub fn total(&self) -> usize {
        self.total
    }
}

impl Iterator for ResultStream {
    type Item = AnalysisResult;

    fn next(&mut self) -> Option<Self::Item> {
        self.results.recv().ok()
    }
}
