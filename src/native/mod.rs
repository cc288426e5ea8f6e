//! Fallback extraction path: a native Go declaration parser.
//!
//! Used whenever the syntax walker refuses a file. Its parse errors are the
//! only extraction errors surfaced to callers.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod printer;

use ast::{Decl, FuncDecl, GenDecl, SourceFile};
pub use parser::{parse_file, ParseError};

use crate::symbol::{Extraction, Symbol, FUNCTION_DEFINITION, METHOD_DEFINITION, TYPE_DEFINITION};

/// Parse `source` and collect imports and declarations, visiting nested type
/// declarations right after their enclosing function.
pub fn extract_native(source: &str) -> Result<Extraction, ParseError> {
    let file = parse_file(source)?;
    Ok(collect(&file))
}

fn collect(file: &SourceFile) -> Extraction {
    let mut out = Extraction::default();
    for import in &file.imports {
        out.add_import(&import.path);
    }

    for decl in &file.decls {
        match decl {
            Decl::Func(func) => collect_func(func, &mut out),
            Decl::Gen(gen) => collect_types(gen, &mut out),
        }
    }
    out
}

fn collect_func(func: &FuncDecl, out: &mut Extraction) {
    let sym = match func.receiver() {
        Some(recv) => Symbol::new(METHOD_DEFINITION, &func.name, func.signature(), func.start_line, func.end_line)
            .with_receiver(recv),
        // A receiver list with no fields, `func () M()`, is still a method.
        None if func.recv.is_some() => {
            Symbol::new(METHOD_DEFINITION, &func.name, func.signature(), func.start_line, func.end_line)
        }
        None => Symbol::new(FUNCTION_DEFINITION, &func.name, func.signature(), func.start_line, func.end_line),
    };
    out.add_symbol(sym);

    for gen in &func.nested {
        collect_types(gen, out);
    }
}

fn collect_types(gen: &GenDecl, out: &mut Extraction) {
    for spec in &gen.specs {
        out.add_symbol(Symbol::new(
            TYPE_DEFINITION,
            &spec.name,
            spec.signature(),
            spec.start_line,
            spec.end_line,
        ));
    }
}
