use std::collections::HashMap;
use std::path::Path;
use tree_sitter::Language;

/// A tree-sitter grammar the syntax walker can run, plus the rules for which
/// paths it claims.
pub trait SyntaxDriver: Send + Sync {
    fn name(&self) -> &'static str;
    /// Primary file extensions handled by this driver (lowercase, without dot).
    fn extensions(&self) -> &'static [&'static str];
    fn handles_path(&self, path: &Path) -> bool;
    /// Interpreter names that identify this language on a `#!` first line.
    fn interpreters(&self) -> &'static [&'static str] {
        &[]
    }
    fn language(&self) -> Language;
}

/// Explicit driver table handed to the extractor at construction time.
pub struct LanguageRegistry {
    drivers: Vec<Box<dyn SyntaxDriver>>,
    by_ext: HashMap<String, usize>,
}

impl LanguageRegistry {
    /// A registry that detects nothing; every file takes the native path.
    pub fn empty() -> Self {
        Self {
            drivers: Vec::new(),
            by_ext: HashMap::new(),
        }
    }

    pub fn with_driver(mut self, driver: Box<dyn SyntaxDriver>) -> Self {
        self.register(driver);
        self
    }

    pub fn register(&mut self, driver: Box<dyn SyntaxDriver>) {
        let idx = self.drivers.len();
        for ext in driver.extensions() {
            self.by_ext.insert(ext.to_string(), idx);
        }
        self.drivers.push(driver);
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }

    /// Pick the driver for `path`: extension index first, then each driver's
    /// own `handles_path`, then a `#!`-style first line.
    pub fn detect(&self, path: &Path, source: &[u8]) -> Option<&dyn SyntaxDriver> {
        let ext = path_ext_lower(path);
        if let Some(d) = self.by_ext.get(&ext).and_then(|&idx| self.drivers.get(idx)) {
            if d.handles_path(path) {
                return Some(d.as_ref());
            }
        }

        if let Some(d) = self.drivers.iter().find(|d| d.handles_path(path)) {
            return Some(d.as_ref());
        }

        let interp = interpreter_of(source)?;
        self.drivers
            .iter()
            .find(|d| d.interpreters().contains(&interp.as_str()))
            .map(|d| d.as_ref())
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        #[allow(unused_mut)]
        let mut registry = Self::empty();

        #[cfg(feature = "lang-go")]
        registry.register(Box::new(GoSyntax));

        registry
    }
}

fn path_ext_lower(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Interpreter named on the first line, for both `#!/usr/bin/env go` and the
/// `//usr/bin/env go run "$0" "$@"; exit` trick Go scripts use.
fn interpreter_of(source: &[u8]) -> Option<String> {
    let end = source.iter().position(|&b| b == b'\n').unwrap_or(source.len());
    let first = std::str::from_utf8(&source[..end]).ok()?.trim();
    let (rest, slashed) = match first.strip_prefix("#!") {
        Some(rest) => (rest, false),
        None => (first.strip_prefix("//")?, true),
    };

    let mut words = rest.split_whitespace();
    let program = words.next()?;
    // `//` lines are only a launcher when they name a path, not prose.
    if slashed && !program.contains('/') {
        return None;
    }
    let base = program.rsplit('/').next().unwrap_or(program);
    let interp = if base == "env" { words.next()? } else { base };
    if interp.is_empty() {
        return None;
    }
    Some(interp.to_string())
}

#[cfg(feature = "lang-go")]
pub struct GoSyntax;

#[cfg(feature = "lang-go")]
impl SyntaxDriver for GoSyntax {
    fn name(&self) -> &'static str {
        "go"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["go"]
    }

    fn handles_path(&self, path: &Path) -> bool {
        path_ext_lower(path) == "go"
    }

    fn interpreters(&self) -> &'static [&'static str] {
        &["go", "gorun"]
    }

    fn language(&self) -> Language {
        tree_sitter_go::LANGUAGE.into()
    }
}
