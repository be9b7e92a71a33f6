//! End-to-end run: scan every source root, merge, write artifacts

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};

use crate::catalog::{merge, Corpus};
use crate::config::AggregateConfig;
use crate::error::{MemepackError, Result};
use crate::output::{write_corpus, OutputPaths, ASSETS_DIR};
use crate::scan::{CopyStats, Scanner};
use crate::store::AssetStore;
use crate::trace_time;

/// Inputs for one run
#[derive(Debug, Clone)]
pub struct AggregateOptions {
    pub sources: Vec<PathBuf>,
    pub out_dir: PathBuf,
    pub config: AggregateConfig,
}

/// What a run produced
#[derive(Debug, Clone)]
pub struct Aggregation {
    pub corpus: Corpus,
    /// Canonical roots that were scanned
    pub scanned: Vec<PathBuf>,
    /// Roots skipped because they do not exist
    pub skipped: Vec<PathBuf>,
    pub stats: CopyStats,
    pub outputs: OutputPaths,
}

/// Run the whole pipeline with `generated_at` as the catalog timestamp.
///
/// Missing roots are skipped with a warning; if none remain the run fails
/// with [`MemepackError::NoSources`] before anything is written. A root that
/// resolves to an already scanned directory is scanned once.
pub fn aggregate(options: &AggregateOptions, generated_at: DateTime<Utc>) -> Result<Aggregation> {
    let start = Instant::now();
    let store = AssetStore::new(options.out_dir.join(ASSETS_DIR));
    let scanner = Scanner::new(&options.config, store);

    let mut scans = Vec::new();
    let mut skipped = Vec::new();
    let mut seen = HashSet::new();
    for source in &options.sources {
        if !is_source_root(source) {
            tracing::warn!(source = %source.display(), "skipping missing source");
            skipped.push(source.clone());
            continue;
        }
        let canonical =
            fs::canonicalize(source).map_err(|e| MemepackError::io_at("resolve", source, e))?;
        if !seen.insert(canonical) {
            tracing::warn!(source = %source.display(), "skipping duplicate source");
            continue;
        }
        scans.push(scanner.scan(source)?);
    }

    if scans.is_empty() {
        return Err(MemepackError::NoSources {
            skipped: skipped.len(),
        });
    }

    let mut stats = CopyStats::default();
    for scan in &scans {
        stats.add(scan.stats);
    }
    let scanned = scans.iter().map(|s| s.root.clone()).collect();

    let corpus = merge(scans, generated_at);
    trace_time!(start, "merge", items = corpus.catalog.total_items);

    let outputs = write_corpus(&options.out_dir, &corpus)?;
    trace_time!(start, "aggregate");

    Ok(Aggregation {
        corpus,
        scanned,
        skipped,
        stats,
        outputs,
    })
}

fn is_source_root(path: &Path) -> bool {
    path.is_dir()
}
