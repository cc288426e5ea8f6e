//! Selector query language: `kind[clause, clause, ...]`.
//!
//! ```text
//! selector := kind? ('[' clause (',' clause)* ']')?
//! kind     := '*' | [a-z_][a-z0-9_]*
//! clause   := (name|signature|receiver|file) '=' '/' regex '/'
//!           | (start|end|line) ('<=' | '>=' | '=') positive-integer
//! ```
//!
//! Every clause must hold for a symbol to match; there is no OR. Whitespace
//! may pad a clause but never appears between a field, its operator and its
//! value.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use crate::error::SelectorError;
use crate::symbol::Symbol;

pub const WILDCARD: &str = "*";

#[derive(Debug, Clone)]
pub struct Selector {
    pub kind: String,
    pub name_re: Option<Regex>,
    pub signature_re: Option<Regex>,
    pub receiver_re: Option<Regex>,
    pub file_re: Option<Regex>,
    pub start_min: Option<u32>,
    pub start_max: Option<u32>,
    pub end_min: Option<u32>,
    pub end_max: Option<u32>,
    pub line: Option<u32>,
    /// The selector text as given, for diagnostics.
    pub raw: String,
}

impl Selector {
    fn with_kind(kind: &str, raw: &str) -> Self {
        Self {
            kind: kind.to_string(),
            name_re: None,
            signature_re: None,
            receiver_re: None,
            file_re: None,
            start_min: None,
            start_max: None,
            end_min: None,
            end_max: None,
            line: None,
            raw: raw.to_string(),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        self.kind == WILDCARD
    }

    /// Evaluate against `sym`, stopping at the first failing check: kind,
    /// the regexes, start/end bounds, then exact-line containment.
    pub fn matches(&self, sym: &Symbol) -> bool {
        if !self.is_wildcard() && self.kind != sym.kind {
            return false;
        }

        let regex_checks = [
            (&self.name_re, &sym.name),
            (&self.signature_re, &sym.signature),
            (&self.receiver_re, &sym.receiver),
            (&self.file_re, &sym.file),
        ];
        for (re, field) in regex_checks {
            if let Some(re) = re {
                if !re.is_match(field) {
                    return false;
                }
            }
        }

        if !within(sym.start_line, self.start_min, self.start_max) {
            return false;
        }
        if !within(sym.end_line, self.end_min, self.end_max) {
            return false;
        }

        match self.line {
            Some(line) => sym.start_line <= line && line <= sym.end_line,
            None => true,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl std::str::FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_selector(s)
    }
}

fn within(value: u32, min: Option<u32>, max: Option<u32>) -> bool {
    min.map_or(true, |m| value >= m) && max.map_or(true, |m| value <= m)
}

fn kind_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\*|[a-z_][a-z0-9_]*)$").expect("kind pattern compiles"))
}

fn line_filter_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(start|end|line)(<=|>=|=)([0-9]+)$").expect("line filter pattern compiles"))
}

pub fn parse_selector(raw: &str) -> Result<Selector, SelectorError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(SelectorError::Empty);
    }

    let (kind_part, filter_part) = match text.find('[') {
        Some(open) => {
            let Some(inner) = text[open + 1..].strip_suffix(']') else {
                return Err(SelectorError::MalformedBracket { raw: raw.to_string() });
            };
            (&text[..open], Some(inner))
        }
        None => (text, None),
    };

    let kind = match kind_part.trim() {
        "" => WILDCARD,
        k => k,
    };
    if !kind_re().is_match(kind) {
        return Err(SelectorError::InvalidKind { kind: kind.to_string() });
    }

    let mut sel = Selector::with_kind(kind, raw);

    if let Some(filters) = filter_part.filter(|f| !f.trim().is_empty()) {
        for (position, clause) in split_clauses(filters).into_iter().enumerate() {
            let clause = clause.trim();
            if clause.is_empty() {
                return Err(SelectorError::EmptyClause {
                    position,
                    filters: filters.to_string(),
                });
            }
            apply_clause(&mut sel, clause)?;
        }
    }

    check_range("start", sel.start_min, sel.start_max)?;
    check_range("end", sel.end_min, sel.end_max)?;

    Ok(sel)
}

/// Split a filter section on top-level commas.
///
/// Commas inside a `/regex/` literal belong to the regex. Inside a literal a
/// backslash escapes exactly the next character, so `\/` does not close it.
pub fn split_clauses(filters: &str) -> Vec<String> {
    let mut clauses = Vec::new();
    let mut current = String::new();
    let mut in_regex = false;
    let mut escaped = false;

    for ch in filters.chars() {
        if in_regex {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '/' {
                in_regex = false;
            }
            current.push(ch);
            continue;
        }

        match ch {
            '/' => {
                in_regex = true;
                current.push(ch);
            }
            ',' => clauses.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    clauses.push(current);
    clauses
}

fn apply_clause(sel: &mut Selector, clause: &str) -> Result<(), SelectorError> {
    let regex_targets: [(&str, &mut Option<Regex>); 4] = [
        ("name=", &mut sel.name_re),
        ("signature=", &mut sel.signature_re),
        ("receiver=", &mut sel.receiver_re),
        ("file=", &mut sel.file_re),
    ];
    for (prefix, slot) in regex_targets {
        if let Some(value) = clause.strip_prefix(prefix) {
            *slot = Some(compile_regex_literal(clause, value)?);
            return Ok(());
        }
    }

    let Some(caps) = line_filter_re().captures(clause) else {
        return Err(SelectorError::UnsupportedFilter {
            clause: clause.to_string(),
        });
    };

    let invalid = |reason: &'static str| SelectorError::InvalidLineFilter {
        clause: clause.to_string(),
        reason,
    };

    let value: u32 = caps[3].parse().map_err(|_| invalid("line number out of range"))?;
    if value == 0 {
        return Err(invalid("line numbers start at 1"));
    }

    let (min, max) = match &caps[1] {
        "start" => (&mut sel.start_min, &mut sel.start_max),
        "end" => (&mut sel.end_min, &mut sel.end_max),
        _ => {
            if &caps[2] != "=" {
                return Err(invalid("line only supports '='"));
            }
            sel.line = Some(value);
            return Ok(());
        }
    };

    // Repeated bounds tighten: every clause must hold.
    match &caps[2] {
        ">=" => *min = Some(min.map_or(value, |m| m.max(value))),
        "<=" => *max = Some(max.map_or(value, |m| m.min(value))),
        _ => {
            *min = Some(min.map_or(value, |m| m.max(value)));
            *max = Some(max.map_or(value, |m| m.min(value)));
        }
    }
    Ok(())
}

fn compile_regex_literal(clause: &str, value: &str) -> Result<Regex, SelectorError> {
    let pattern = value
        .strip_prefix('/')
        .and_then(|v| v.strip_suffix('/'))
        .ok_or_else(|| SelectorError::InvalidRegex {
            clause: clause.to_string(),
            reason: "value must be delimited by '/'".to_string(),
        })?;

    Regex::new(pattern).map_err(|e| SelectorError::InvalidRegex {
        clause: clause.to_string(),
        reason: e.to_string(),
    })
}

fn check_range(field: &'static str, min: Option<u32>, max: Option<u32>) -> Result<(), SelectorError> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => Err(SelectorError::InvalidRange { field, min, max }),
        _ => Ok(()),
    }
}
