use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;

pub const FUNCTION_DEFINITION: &str = "function_definition";
pub const METHOD_DEFINITION: &str = "method_definition";
pub const TYPE_DEFINITION: &str = "type_definition";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Symbol {
    pub kind: String,
    pub name: String,
    pub signature: String,

    /// Receiver parameter list, e.g. `(r *Thing)`. Empty unless `kind` is a method.
    pub receiver: String,

    /// 1-based, inclusive.
    pub start_line: u32,

    /// 1-based, inclusive; never below `start_line`.
    pub end_line: u32,

    /// Set by [`assemble`]; extraction strategies leave it empty.
    pub file: String,
}

impl Symbol {
    pub fn new(kind: &str, name: impl Into<String>, signature: impl Into<String>, start_line: u32, end_line: u32) -> Self {
        Self {
            kind: kind.to_string(),
            name: name.into(),
            signature: signature.into(),
            receiver: String::new(),
            start_line,
            end_line,
            file: String::new(),
        }
    }

    pub fn with_receiver(mut self, receiver: impl Into<String>) -> Self {
        self.receiver = receiver.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub path: String,
    pub language: String,
    pub imports: Vec<String>,
    pub symbols: Vec<Symbol>,
}

/// Raw output of one extraction strategy, before ordering.
#[derive(Debug, Default)]
pub struct Extraction {
    pub imports: Vec<String>,
    pub symbols: Vec<Symbol>,
}

impl Extraction {
    pub fn add_import(&mut self, path: &str) {
        if !path.is_empty() {
            self.imports.push(path.to_string());
        }
    }

    pub fn add_symbol(&mut self, sym: Symbol) {
        if !sym.name.is_empty() {
            self.symbols.push(sym);
        }
    }
}

/// Shared post-processing for both extraction strategies.
///
/// - imports: deduplicated, lexicographic order
/// - symbols: `(start_line, name)` ascending; equal keys keep discovery order
/// - inverted spans are clamped so `end_line >= start_line`
pub fn assemble(path: &Path, language: &str, extraction: Extraction) -> FileSummary {
    let file = normalize_path_for_output(path);

    let imports: BTreeSet<String> = extraction.imports.into_iter().filter(|s| !s.is_empty()).collect();

    let mut symbols: Vec<Symbol> = extraction
        .symbols
        .into_iter()
        .filter(|s| !s.name.is_empty())
        .map(|mut s| {
            if s.end_line < s.start_line {
                s.end_line = s.start_line;
            }
            s.file = file.clone();
            s
        })
        .collect();

    // `sort_by` is stable.
    symbols.sort_by(|a, b| a.start_line.cmp(&b.start_line).then_with(|| a.name.cmp(&b.name)));

    FileSummary {
        path: file,
        language: language.to_string(),
        imports: imports.into_iter().collect(),
        symbols,
    }
}

pub fn normalize_path_for_output(p: &Path) -> String {
    p.to_string_lossy().replace('\\', "/")
}

/// Collapse every whitespace run to a single space and trim the ends.
pub fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_ws = false;
    for ch in s.chars() {
        let is_ws = ch.is_whitespace();
        if is_ws {
            if !prev_ws {
                out.push(' ');
            }
        } else {
            out.push(ch);
        }
        prev_ws = is_ws;
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(name: &str, start: u32, end: u32) -> Symbol {
        Symbol::new(FUNCTION_DEFINITION, name, format!("func {name}()"), start, end)
    }

    #[test]
    fn assemble_sorts_by_line_then_name() {
        let mut ex = Extraction::default();
        ex.add_symbol(sym("zeta", 10, 12));
        ex.add_symbol(sym("beta", 3, 4));
        ex.add_symbol(sym("alpha", 10, 11));

        let summary = assemble(Path::new("pkg/a.go"), "go", ex);
        let order: Vec<(&str, u32)> = summary.symbols.iter().map(|s| (s.name.as_str(), s.start_line)).collect();
        assert_eq!(order, vec![("beta", 3), ("alpha", 10), ("zeta", 10)]);
        assert!(summary.symbols.iter().all(|s| s.file == "pkg/a.go"));
    }

    #[test]
    fn assemble_keeps_discovery_order_for_identical_keys() {
        let mut ex = Extraction::default();
        ex.add_symbol(Symbol::new(TYPE_DEFINITION, "T", "type T int", 5, 5));
        ex.add_symbol(Symbol::new(TYPE_DEFINITION, "T", "type T string", 5, 5));

        let summary = assemble(Path::new("t.go"), "go", ex);
        assert_eq!(summary.symbols[0].signature, "type T int");
        assert_eq!(summary.symbols[1].signature, "type T string");
    }

    #[test]
    fn assemble_dedups_and_sorts_imports() {
        let mut ex = Extraction::default();
        for p in ["strings", "fmt", "", "strings", "errors"] {
            ex.add_import(p);
        }
        let summary = assemble(Path::new("x.go"), "go", ex);
        assert_eq!(summary.imports, vec!["errors", "fmt", "strings"]);
    }

    #[test]
    fn assemble_clamps_inverted_span_and_drops_nameless() {
        let mut ex = Extraction::default();
        ex.symbols.push(sym("", 1, 2));
        ex.symbols.push(sym("inverted", 9, 4));

        let summary = assemble(Path::new("x.go"), "go", ex);
        assert_eq!(summary.symbols.len(), 1);
        assert_eq!(summary.symbols[0].start_line, 9);
        assert_eq!(summary.symbols[0].end_line, 9);
    }

    #[test]
    fn collapse_whitespace_normalizes_runs() {
        assert_eq!(collapse_whitespace("  Foo struct {\n\tA int\n}  "), "Foo struct { A int }");
    }
}
