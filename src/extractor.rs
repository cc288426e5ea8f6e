use std::borrow::Cow;
use std::path::Path;

use crate::error::ExtractError;
use crate::language::LanguageRegistry;
use crate::native::extract_native;
use crate::symbol::{assemble, normalize_path_for_output, FileSummary};
use crate::walker::walk_source;

/// One supported source language. A multi-language front end keeps one
/// adapter per language and dispatches on its own.
pub trait LanguageAdapter: Send + Sync {
    fn language(&self) -> &'static str;
    fn extract(&self, path: &Path, source: &[u8]) -> Result<FileSummary, ExtractError>;
}

/// Go symbol extractor: syntax walker first, native parser on any refusal.
pub struct GoExtractor {
    registry: LanguageRegistry,
}

impl GoExtractor {
    pub const LANGUAGE: &'static str = "go";

    pub fn new(registry: LanguageRegistry) -> Self {
        Self { registry }
    }
}

impl Default for GoExtractor {
    fn default() -> Self {
        Self::new(LanguageRegistry::default())
    }
}

impl LanguageAdapter for GoExtractor {
    fn language(&self) -> &'static str {
        Self::LANGUAGE
    }

    fn extract(&self, path: &Path, source: &[u8]) -> Result<FileSummary, ExtractError> {
        let text: Cow<'_, str> = String::from_utf8_lossy(source);

        let extraction = match walk_source(&self.registry, Self::LANGUAGE, path, &text) {
            Ok(ex) => ex,
            Err(reason) => {
                tracing::debug!(path = %path.display(), %reason, "syntax walker declined; using native parser");
                extract_native(&text).map_err(|e| ExtractError::NativeParse {
                    path: normalize_path_for_output(path),
                    line: e.line,
                    message: e.message,
                })?
            }
        };

        let summary = assemble(path, Self::LANGUAGE, extraction);
        tracing::trace!(
            path = %summary.path,
            symbols = summary.symbols.len(),
            imports = summary.imports.len(),
            "extracted"
        );
        Ok(summary)
    }
}

/// Extract with the default registry.
pub fn extract(path: &Path, source: &[u8]) -> Result<FileSummary, ExtractError> {
    GoExtractor::default().extract(path, source)
}
