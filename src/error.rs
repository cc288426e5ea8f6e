use thiserror::Error;

/// The only way extraction fails: both strategies gave up and the native
/// parser could not make sense of the source.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("{path}:{line}: {message}")]
    NativeParse {
        path: String,
        line: u32,
        message: String,
    },
}

/// Reasons the syntax walker path refuses a file. Never surfaced to callers;
/// any of these sends extraction to the native fallback.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WalkError {
    #[error("unsupported language: {detected}")]
    UnsupportedLanguage { detected: String },

    #[error("grammar rejected by parser: {0}")]
    Language(String),

    #[error("parser produced no tree")]
    NoTree,

    #[error("syntax tree root is empty for non-empty source")]
    EmptyRoot,
}

#[derive(Debug, Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("malformed selector brackets: {raw:?}")]
    MalformedBracket { raw: String },

    #[error("invalid selector kind {kind:?} (expected `*` or [a-z_][a-z0-9_]*)")]
    InvalidKind { kind: String },

    #[error("empty filter clause at position {position} in {filters:?}")]
    EmptyClause { position: usize, filters: String },

    #[error("invalid regex in clause {clause:?}: {reason}")]
    InvalidRegex { clause: String, reason: String },

    #[error("invalid line filter {clause:?}: {reason}")]
    InvalidLineFilter { clause: String, reason: &'static str },

    #[error("unsupported filter clause {clause:?}")]
    UnsupportedFilter { clause: String },

    #[error("invalid {field} range: min {min} exceeds max {max}")]
    InvalidRange {
        field: &'static str,
        min: u32,
        max: u32,
    },
}

#[derive(Debug, Error)]
pub enum IgnoreError {
    #[error("failed to read ignore file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid ignore pattern in {path}: {source}")]
    Pattern {
        path: String,
        #[source]
        source: ignore::Error,
    },
}
