//! file-catalog - Content-Addressed File Catalog
//!
//! Recursively hashes every file under a storage directory into a JSON
//! catalog, then lists the catalog or reports pairs of files with identical
//! content.
//!
//! # Architecture
//!
//! * [`scanner`]: Enumeration, content hashing and per-file metadata.
//! * [`pipeline`]: The concurrent hashing worker pool.
//! * [`catalog`]: Catalog entries and their JSON persistence.
//! * [`duplicates`]: Fingerprint grouping and pair enumeration.
//! * [`output`]: Text, JSON and CSV renderers.
//!
//! The `run_*` functions implement the CLI subcommands against any writer;
//! [`run_app`] wires them to the process.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod scanner;

use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::catalog::Catalog;
use crate::cli::{Cli, Commands, ReportFormat};
use crate::config::{available_cores, Config};
use crate::duplicates::{DuplicateReport, DuplicateSummary};
use crate::error::ExitCode;
use crate::output::{summary_line, write_entries, CsvOutput, JsonOutput, PairTable};
use crate::pipeline::{HashReport, HashingPipeline};
use crate::progress::{Progress, ProgressCallback};
use crate::scanner::FileEnumerator;

/// Run the parsed command line.
///
/// # Errors
///
/// Returns an error if the command cannot complete; nothing is written to
/// stdout in that case.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);
    log::debug!(
        "file-catalog {} (log level: {})",
        env!("CARGO_PKG_VERSION"),
        logging::current_level_name()
    );

    let color = !cli.no_color && io::stdout().is_terminal();
    if !color {
        yansi::disable();
    }

    match cli.command {
        Commands::Hash(args) => {
            let jobs = match args.jobs {
                Some(jobs) => jobs,
                None => Config::load().worker_count(available_cores()),
            };
            let progress: Arc<dyn ProgressCallback> = Arc::new(Progress::new(cli.quiet));
            run_hash(&args.storage, &args.output, jobs, Some(progress))?;
        }
        Commands::Show(args) => {
            let mut out = io::stdout().lock();
            run_show(&args.input, &mut out)?;
        }
        Commands::Dupes(args) => {
            let mut out = io::stdout().lock();
            run_dupes(&args.input, args.format, color, &mut out)?;
        }
    }

    Ok(ExitCode::Success)
}

/// Hash every file under `storage` with `jobs` workers and write the catalog
/// to `output`.
///
/// Files that fail to hash are logged and left out. The catalog file is not
/// touched if enumeration fails.
///
/// # Errors
///
/// Returns an error if enumeration fails, the workers cannot start, or the
/// catalog cannot be written.
pub fn run_hash(
    storage: &Path,
    output: &Path,
    jobs: usize,
    progress: Option<Arc<dyn ProgressCallback>>,
) -> Result<HashReport> {
    let files = FileEnumerator::new(storage)
        .enumerate()
        .with_context(|| format!("Failed to enumerate {}", storage.display()))?;
    log::info!("Hashing {} files under {}", files.len(), storage.display());

    let mut pipeline = HashingPipeline::new(jobs);
    if let Some(progress) = progress {
        pipeline = pipeline.with_progress_callback(progress);
    }
    let report = pipeline.run(files).context("Failed to start hashing")?;

    if !report.failures.is_empty() {
        log::warn!(
            "{} of {} files could not be hashed",
            report.failures.len(),
            report.total
        );
    }

    report
        .catalog
        .save(output)
        .with_context(|| format!("Failed to save catalog to {}", output.display()))?;
    log::info!("File metadata has been serialized to {}", output.display());

    Ok(report)
}

/// Write one line per catalog entry to `out`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or `out` fails.
pub fn run_show<W: Write>(input: &Path, out: &mut W) -> Result<usize> {
    let catalog = load_catalog(input)?;
    write_entries(out, &catalog).context("Failed to write entries")?;
    Ok(catalog.len())
}

/// Write the duplicate report for the catalog at `input` to `out`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or `out` fails.
pub fn run_dupes<W: Write>(
    input: &Path,
    format: ReportFormat,
    color: bool,
    out: &mut W,
) -> Result<DuplicateSummary> {
    let catalog = load_catalog(input)?;
    let report = DuplicateReport::from_catalog(&catalog);

    match format {
        ReportFormat::Table => {
            PairTable::new(color)
                .write_to(out, &report.pairs)
                .context("Failed to write duplicate table")?;
            log::info!("{}", summary_line(&report.summary));
        }
        ReportFormat::Json => JsonOutput::new(&report).write_to(out, true)?,
        ReportFormat::Csv => CsvOutput::new(&report.pairs).write_to(&mut *out)?,
    }

    Ok(report.summary)
}

fn load_catalog(input: &Path) -> Result<Catalog> {
    Catalog::load(input)
        .with_context(|| format!("Error deserializing metadata from: {}", input.display()))
}
