pub mod config;
pub mod error;
pub mod extractor;
pub mod ignore_matcher;
pub mod index;
pub mod language;
pub mod native;
pub mod scanner;
pub mod selector;
pub mod symbol;
pub mod walker;

pub use error::{ExtractError, IgnoreError, SelectorError, WalkError};
pub use extractor::{extract, GoExtractor, LanguageAdapter};
pub use ignore_matcher::{is_ignored, IgnoreMatcher};
pub use language::{LanguageRegistry, SyntaxDriver};
pub use selector::{parse_selector, Selector};
pub use symbol::{FileSummary, Symbol, FUNCTION_DEFINITION, METHOD_DEFINITION, TYPE_DEFINITION};
