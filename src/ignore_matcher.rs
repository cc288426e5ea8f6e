//! Gitignore-style path exclusion for the scanner.

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::Path;

use crate::error::IgnoreError;
use crate::symbol::normalize_path_for_output;

#[derive(Debug, Clone)]
pub struct IgnoreMatcher {
    inner: Gitignore,
}

impl IgnoreMatcher {
    /// Read a newline-delimited pattern file. Blank lines and `#` comments
    /// (after trimming) are skipped; `!` negates; a trailing `/` restricts a
    /// pattern to directories; later patterns override earlier ones.
    pub fn load(path: &Path) -> Result<Self, IgnoreError> {
        let text = std::fs::read_to_string(path).map_err(|source| IgnoreError::Io {
            path: normalize_path_for_output(path),
            source,
        })?;
        Self::from_patterns(text.lines(), Some(path))
    }

    pub fn from_patterns<'a>(lines: impl IntoIterator<Item = &'a str>, origin: Option<&Path>) -> Result<Self, IgnoreError> {
        let origin_label = origin.map(normalize_path_for_output).unwrap_or_else(|| "<patterns>".to_string());

        // Relative paths are matched as given, so the root is empty.
        let mut builder = GitignoreBuilder::new("");
        for line in lines {
            let pattern = line.trim();
            if pattern.is_empty() || pattern.starts_with('#') {
                continue;
            }
            builder
                .add_line(origin.map(Path::to_path_buf), pattern)
                .map_err(|source| IgnoreError::Pattern {
                    path: origin_label.clone(),
                    source,
                })?;
        }

        let inner = builder.build().map_err(|source| IgnoreError::Pattern {
            path: origin_label,
            source,
        })?;
        Ok(Self { inner })
    }

    pub fn matches(&self, rel_path: &Path, is_dir: bool) -> bool {
        self.inner.matched(rel_path, is_dir).is_ignore()
    }
}

/// An absent matcher never ignores anything.
pub fn is_ignored(matcher: Option<&IgnoreMatcher>, rel_path: &Path, is_dir: bool) -> bool {
    matcher.is_some_and(|m| m.matches(rel_path, is_dir))
}
