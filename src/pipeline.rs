//! Concurrent hashing pipeline.
//!
//! # Overview
//!
//! [`HashingPipeline`] runs [`MetadataExtractor::extract`] over a list of
//! enumerated paths on a dedicated rayon thread pool and streams each
//! outcome back to the caller as soon as a worker finishes it:
//!
//! 1. Every path is queued on a work channel sized to hold them all.
//! 2. `concurrency` workers pull paths until the queue is empty.
//! 3. Outcomes go to a single result channel that closes once every worker
//!    has returned.
//!
//! Completion order is not related to input order. A failing file is logged
//! at warn level through the pipeline's [`LogSink`], reported as an `Err`
//! item and left out of the catalog; the run itself keeps going.
//!
//! # Example
//!
//! ```no_run
//! use file_catalog::pipeline::HashingPipeline;
//! use file_catalog::scanner::FileEnumerator;
//! use std::path::Path;
//!
//! let files = FileEnumerator::new(Path::new("/storage")).enumerate()?;
//! let report = HashingPipeline::new(8).run(files)?;
//! println!("{} entries, {} failures", report.catalog.len(), report.failures.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use crossbeam_channel::{bounded, unbounded, Receiver};
use log::Level;

use crate::catalog::{Catalog, CatalogEntry};
use crate::logging::{default_sink, LogSink};
use crate::progress::ProgressCallback;
use crate::scanner::{HashError, MetadataExtractor};

/// Errors that prevent a hashing run from starting.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    /// The worker thread pool could not be created.
    #[error("Failed to start hashing workers: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// The work queue was closed before every path was queued.
    #[error("Work queue closed before all paths were queued")]
    QueueClosed,
}

/// Bounded worker pool producing catalog entries.
pub struct HashingPipeline {
    concurrency: usize,
    extractor: Arc<MetadataExtractor>,
    log: Arc<dyn LogSink>,
    progress: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for HashingPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashingPipeline")
            .field("concurrency", &self.concurrency)
            .field("extractor", &self.extractor)
            .field("progress", &self.progress.is_some())
            .finish_non_exhaustive()
    }
}

impl HashingPipeline {
    /// Create a pipeline with `concurrency` workers (at least one).
    #[must_use]
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
            extractor: Arc::new(MetadataExtractor::new()),
            log: default_sink(),
            progress: None,
        }
    }

    /// Use a specific extractor for every file.
    #[must_use]
    pub fn with_extractor(mut self, extractor: MetadataExtractor) -> Self {
        self.extractor = Arc::new(extractor);
        self
    }

    /// Route per-file diagnostics to `sink`.
    #[must_use]
    pub fn with_log_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.log = sink;
        self
    }

    /// Report progress to `callback` while results are drained.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Configured number of workers.
    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Start hashing `paths` and return the stream of outcomes.
    ///
    /// Workers start immediately. The returned [`HashRun`] yields one item
    /// per path in completion order and ends when every worker is done.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] if the worker pool cannot be built.
    pub fn spawn(&self, paths: Vec<PathBuf>) -> Result<HashRun, PipelineError> {
        let total = paths.len();
        let threads = self.concurrency.min(total).max(1);

        let panic_log = Arc::clone(&self.log);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|idx| format!("hash-worker-{idx}"))
            .panic_handler(move |_| panic_log.log(Level::Error, "Hash worker panicked"))
            .build()?;

        let (work_tx, work_rx) = bounded::<PathBuf>(total.max(1));
        for path in paths {
            work_tx.send(path).map_err(|_| PipelineError::QueueClosed)?;
        }
        drop(work_tx);

        let (result_tx, result_rx) = unbounded();
        for _ in 0..threads {
            let work_rx = work_rx.clone();
            let result_tx = result_tx.clone();
            let extractor = Arc::clone(&self.extractor);
            let log = Arc::clone(&self.log);

            pool.spawn(move || {
                for path in work_rx.iter() {
                    let outcome = extractor.extract(&path);
                    if let Err(ref e) = outcome {
                        log.log(Level::Warn, &format!("Skipping {}: {}", path.display(), e));
                    }
                    if result_tx.send(outcome).is_err() {
                        break;
                    }
                }
            });
        }
        drop(result_tx);

        self.log.log(
            Level::Debug,
            &format!("Hashing {total} files with {threads} workers"),
        );
        if let Some(ref progress) = self.progress {
            progress.on_start(total);
        }

        Ok(HashRun {
            results: result_rx,
            _pool: pool,
            progress: self.progress.clone(),
            total,
            produced: 0,
            failed: 0,
            finished: false,
        })
    }

    /// Hash `paths` and collect every outcome.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] if the worker pool cannot be built. Per-file
    /// failures are returned in [`HashReport::failures`].
    pub fn run(&self, paths: Vec<PathBuf>) -> Result<HashReport, PipelineError> {
        let mut run = self.spawn(paths)?;
        let total = run.total();

        let mut catalog = Catalog::new();
        let mut failures = Vec::new();
        for outcome in &mut run {
            match outcome {
                Ok(entry) => catalog.push(entry),
                Err(e) => failures.push(e),
            }
        }

        self.log.log(
            Level::Debug,
            &format!(
                "Hashing finished: {} entries, {} failures",
                catalog.len(),
                failures.len()
            ),
        );

        Ok(HashReport {
            catalog,
            failures,
            total,
        })
    }
}

/// Stream of per-path outcomes from a running pipeline.
///
/// Blocks in [`Iterator::next`] until the next outcome arrives; returns
/// `None` once all workers have finished.
pub struct HashRun {
    results: Receiver<Result<CatalogEntry, HashError>>,
    // Owned so the workers outlive the caller's handle on the stream.
    _pool: rayon::ThreadPool,
    progress: Option<Arc<dyn ProgressCallback>>,
    total: usize,
    produced: usize,
    failed: usize,
    finished: bool,
}

impl HashRun {
    /// Number of paths submitted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Entries produced so far.
    #[must_use]
    pub fn produced(&self) -> usize {
        self.produced
    }

    /// Failures reported so far.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed
    }
}

impl Iterator for HashRun {
    type Item = Result<CatalogEntry, HashError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.results.recv() {
            Ok(Ok(entry)) => {
                self.produced += 1;
                if let Some(ref progress) = self.progress {
                    progress.on_entry(self.produced, self.total, &entry.path);
                }
                Some(Ok(entry))
            }
            Ok(Err(e)) => {
                self.failed += 1;
                Some(Err(e))
            }
            Err(_) => {
                self.finished = true;
                if let Some(ref progress) = self.progress {
                    progress.on_finish(self.produced, self.failed);
                }
                None
            }
        }
    }
}

/// Collected outcome of [`HashingPipeline::run`].
#[derive(Debug)]
pub struct HashReport {
    /// Entries in completion order
    pub catalog: Catalog,
    /// Files that could not be processed
    pub failures: Vec<HashError>,
    /// Number of paths submitted
    pub total: usize,
}

impl HashReport {
    /// Check if every submitted path produced an entry.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.catalog.len() == self.total
    }
}
