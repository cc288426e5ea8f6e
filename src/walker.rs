//! Primary extraction path: walk a tree-sitter syntax tree.

use std::path::Path;
use tree_sitter::{Node, Parser};

use crate::error::WalkError;
use crate::language::LanguageRegistry;
use crate::native::printer::render_type_source;
use crate::symbol::{collapse_whitespace, Extraction, Symbol, FUNCTION_DEFINITION, METHOD_DEFINITION, TYPE_DEFINITION};

/// Parse `source` with the driver detected for `path` and collect imports and
/// declarations.
///
/// Any `Err` here is a signal to fall back, not a failure of extraction.
pub fn walk_source(registry: &LanguageRegistry, declared: &str, path: &Path, source: &str) -> Result<Extraction, WalkError> {
    let driver = registry.detect(path, source.as_bytes()).ok_or_else(|| WalkError::UnsupportedLanguage {
        detected: "unknown".to_string(),
    })?;
    if driver.name() != declared {
        return Err(WalkError::UnsupportedLanguage {
            detected: driver.name().to_string(),
        });
    }

    let mut parser = Parser::new();
    parser
        .set_language(&driver.language())
        .map_err(|e| WalkError::Language(e.to_string()))?;

    // The tree is dropped on every return below, including the empty-root rejection.
    let tree = parser.parse(source, None).ok_or(WalkError::NoTree)?;
    let root = tree.root_node();
    check_root(root.kind(), root.child_count() as usize, source)?;

    let src = source.as_bytes();
    let mut out = Extraction::default();
    let mut cursor = tree.walk();
    loop {
        visit(cursor.node(), src, &mut out);

        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return Ok(out);
            }
        }
    }
}

/// A root with no type tag, or with no children over non-blank source, means
/// the grammar silently produced nothing.
fn check_root(kind: &str, child_count: usize, source: &str) -> Result<(), WalkError> {
    if kind.is_empty() || (child_count == 0 && !source.trim().is_empty()) {
        return Err(WalkError::EmptyRoot);
    }
    Ok(())
}

fn visit(node: Node, src: &[u8], out: &mut Extraction) {
    match node.kind() {
        "import_spec" => {
            if let Some(path) = import_path(node, src) {
                out.add_import(&path);
            }
        }
        "function_declaration" => {
            if let Some(sym) = function_symbol(node, src, false) {
                out.add_symbol(sym);
            }
        }
        "method_declaration" => {
            if let Some(sym) = function_symbol(node, src, true) {
                out.add_symbol(sym);
            }
        }
        "type_spec" | "type_alias" => {
            if let Some(sym) = type_symbol(node, src) {
                out.add_symbol(sym);
            }
        }
        _ => {}
    }
}

fn import_path(node: Node, src: &[u8]) -> Option<String> {
    let mut cursor = node.walk();
    let lit = node
        .children(&mut cursor)
        .filter(|c| matches!(c.kind(), "interpreted_string_literal" | "raw_string_literal"))
        .last()?;
    let path = strip_string_quotes(node_text(src, lit));
    (!path.is_empty()).then_some(path)
}

fn function_symbol(node: Node, src: &[u8], is_method: bool) -> Option<Symbol> {
    let mut name: Option<&str> = None;
    let mut receiver: Option<String> = None;
    let mut type_params: Option<String> = None;
    let mut params: Option<String> = None;
    let mut result: Option<String> = None;

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        let kind = child.kind();
        if kind == "comment" {
            continue;
        }
        match kind {
            "identifier" | "field_identifier" if name.is_none() => {
                name = Some(node_text(src, child).trim());
            }
            "parameter_list" if name.is_none() => {
                if is_method && receiver.is_none() {
                    receiver = Some(receiver_text(child, src));
                }
            }
            "type_parameter_list" if params.is_none() && type_params.is_none() => {
                type_params = Some(collapse_whitespace(node_text(src, child)));
            }
            "parameter_list" if params.is_none() => {
                params = Some(collapse_whitespace(node_text(src, child)));
            }
            "block" => {}
            _ if params.is_some() && result.is_none() => {
                result = Some(collapse_whitespace(node_text(src, child)));
            }
            _ => {}
        }
    }

    let name = name.filter(|n| !n.is_empty())?;

    let mut signature = String::from("func ");
    if let Some(recv) = receiver.as_deref().filter(|r| !r.is_empty()) {
        signature.push_str(recv);
        signature.push(' ');
    }
    signature.push_str(name);
    if let Some(tp) = type_params.as_deref() {
        signature.push_str(tp);
    }
    signature.push_str(params.as_deref().unwrap_or("()"));
    if let Some(res) = result.as_deref() {
        signature.push(' ');
        signature.push_str(res);
    }

    let (start, end) = line_span(node);
    let kind = if is_method { METHOD_DEFINITION } else { FUNCTION_DEFINITION };
    Some(Symbol::new(kind, name, signature, start, end).with_receiver(receiver.unwrap_or_default()))
}

/// The first receiver parameter as `(names type)`, rendered the same way as
/// the native parser renders fields. Empty for `()`.
fn receiver_text(list: Node, src: &[u8]) -> String {
    let mut cursor = list.walk();
    let Some(param) = list
        .named_children(&mut cursor)
        .find(|c| c.kind() == "parameter_declaration")
    else {
        return String::new();
    };
    let Some(ty) = param.child_by_field_name("type") else {
        return String::new();
    };

    let mut param_cursor = param.walk();
    let names: Vec<&str> = param
        .named_children(&mut param_cursor)
        .filter(|c| c.kind() == "identifier")
        .map(|c| node_text(src, c).trim())
        .collect();

    let ty = render_type_source(node_text(src, ty));
    if names.is_empty() {
        format!("({ty})")
    } else {
        format!("({} {ty})", names.join(", "))
    }
}

fn type_symbol(node: Node, src: &[u8]) -> Option<Symbol> {
    let mut cursor = node.walk();
    let name_node = node
        .named_children(&mut cursor)
        .find(|c| matches!(c.kind(), "type_identifier" | "identifier"))?;
    let name = node_text(src, name_node).trim();
    if name.is_empty() {
        return None;
    }

    let signature = format!("type {}", collapse_whitespace(node_text(src, node)));
    let (start, end) = line_span(node);
    Some(Symbol::new(TYPE_DEFINITION, name, signature, start, end))
}

fn line_span(node: Node) -> (u32, u32) {
    let start = node.start_position().row as u32 + 1;
    let end = node.end_position().row as u32 + 1;
    (start, end.max(start))
}

fn node_text<'a>(source: &'a [u8], node: Node) -> &'a str {
    let start = node.start_byte();
    let end = node.end_byte();
    std::str::from_utf8(&source[start..end]).unwrap_or("")
}

pub(crate) fn strip_string_quotes(s: &str) -> String {
    let t = s.trim();
    if t.len() >= 2 {
        let bytes = t.as_bytes();
        let first = bytes[0];
        let last = bytes[t.len() - 1];
        if (first == b'"' && last == b'"') || (first == b'`' && last == b'`') {
            return t[1..t.len() - 1].to_string();
        }
    }
    t.to_string()
}
