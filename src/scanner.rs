use anyhow::{Context, Result};
use ignore::overrides::{Override, OverrideBuilder};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

use crate::ignore_matcher::{is_ignored, IgnoreMatcher};

fn default_overrides(root: &Path, exclude_dir_names: &[String]) -> Result<Override> {
    let mut ob = OverrideBuilder::new(root);

    // Overrides are whitelists unless negated with `!`.
    for d in [".git", "vendor", "node_modules", "target"] {
        ob.add(&format!("!**/{d}"))?;
        ob.add(&format!("!**/{d}/**"))?;
    }

    // Project-specific excluded dirs
    for d in exclude_dir_names {
        let d = d.trim().trim_matches('/');
        if d.is_empty() {
            continue;
        }
        ob.add(&format!("!**/{d}"))?;
        ob.add(&format!("!**/{d}/**"))?;
    }

    Ok(ob.build()?)
}

#[derive(Debug, Clone)]
pub struct FileEntry {
    pub abs_path: PathBuf,
    pub rel_path: PathBuf,
    pub bytes: u64,
}

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub root: PathBuf,
    pub max_file_bytes: u64,
    pub exclude_dir_names: Vec<String>,
    pub ignore: Option<IgnoreMatcher>,
}

/// Collect `*.go` files under `opts.root`, sorted by relative path.
pub fn scan_go_files(opts: &ScanOptions) -> Result<Vec<FileEntry>> {
    let root = opts.root.clone();
    let meta = std::fs::metadata(&root).with_context(|| format!("Target does not exist: {}", root.display()))?;
    if meta.is_file() {
        let bytes = meta.len();
        if bytes > opts.max_file_bytes {
            return Ok(vec![]);
        }
        let rel_path = root.file_name().map(PathBuf::from).unwrap_or_else(|| root.clone());
        return Ok(vec![FileEntry {
            abs_path: root,
            rel_path,
            bytes,
        }]);
    }

    let overrides = default_overrides(&root, &opts.exclude_dir_names)?;
    let ignore = opts.ignore.clone();
    let filter_root = root.clone();
    let walker = WalkBuilder::new(&root)
        .standard_filters(true) // .gitignore, .ignore, hidden, etc.
        .overrides(overrides)
        .filter_entry(move |dent| {
            let Ok(rel) = dent.path().strip_prefix(&filter_root) else {
                return true;
            };
            if rel.as_os_str().is_empty() {
                return true;
            }
            let is_dir = dent.file_type().is_some_and(|ft| ft.is_dir());
            !is_ignored(ignore.as_ref(), rel, is_dir)
        })
        .build();

    let mut entries = Vec::new();
    for item in walker {
        let dent = match item {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };

        if !dent.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        if dent.path().extension().and_then(|e| e.to_str()) != Some("go") {
            continue;
        }

        let abs_path = dent.into_path();
        let bytes = match std::fs::metadata(&abs_path).map(|m| m.len()) {
            Ok(b) => b,
            Err(_) => continue,
        };
        if bytes > opts.max_file_bytes {
            tracing::debug!(path = %abs_path.display(), bytes, "skipping oversized file");
            continue;
        }

        let rel_path = path_relative_to(&abs_path, &root)
            .with_context(|| format!("Failed to relativize path: {}", abs_path.display()))?;

        entries.push(FileEntry {
            abs_path,
            rel_path,
            bytes,
        });
    }

    entries.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
    Ok(entries)
}

fn path_relative_to(path: &Path, base: &Path) -> Result<PathBuf> {
    let rel = path
        .strip_prefix(base)
        .with_context(|| format!("{} is not under {}", path.display(), base.display()))?;
    Ok(rel.to_path_buf())
}
