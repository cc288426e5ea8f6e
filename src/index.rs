use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::extractor::LanguageAdapter;
use crate::scanner::FileEntry;
use crate::selector::Selector;
use crate::symbol::{FileSummary, Symbol};

/// Read and extract every entry in parallel. Unreadable or unparsable files
/// are logged and left out; the result is sorted by path.
pub fn index_files(entries: &[FileEntry], extractor: &dyn LanguageAdapter, jobs: usize) -> Result<Vec<FileSummary>> {
    let run = || -> Vec<FileSummary> {
        entries
            .par_iter()
            .filter_map(|e| {
                let bytes = match std::fs::read(&e.abs_path) {
                    Ok(b) => b,
                    Err(err) => {
                        tracing::warn!(path = %e.abs_path.display(), error = %err, "skipping unreadable file");
                        return None;
                    }
                };
                match extractor.extract(&e.rel_path, &bytes) {
                    Ok(summary) => Some(summary),
                    Err(err) => {
                        tracing::warn!(error = %err, "skipping file that failed to parse");
                        None
                    }
                }
            })
            .collect()
    };

    let mut summaries = if jobs == 0 {
        run()
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .context("Failed to build extraction thread pool")?;
        pool.install(run)
    };

    summaries.sort_by(|a, b| a.path.cmp(&b.path));
    tracing::debug!(files = summaries.len(), "index built");
    Ok(summaries)
}

/// Every symbol across `summaries` accepted by `selector`, in index order.
pub fn query<'a>(summaries: &'a [FileSummary], selector: &'a Selector) -> impl Iterator<Item = &'a Symbol> + 'a {
    summaries
        .iter()
        .flat_map(|s| s.symbols.iter())
        .filter(move |sym| selector.matches(sym))
}
