//! Renders a run of type-expression tokens with gofmt-like spacing.

use super::lexer::{tokenize, Token, TokenKind};
use crate::symbol::collapse_whitespace;

pub fn render_type(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut prev: Option<TokenKind> = None;

    for (i, tok) in tokens.iter().enumerate() {
        let next = tokens.get(i + 1).map(|t| t.kind);

        // `a int; }` prints as `a int }`.
        if tok.kind == TokenKind::Semicolon && matches!(next, Some(TokenKind::RBrace) | None) {
            continue;
        }

        if let Some(p) = prev {
            if needs_space(p, tok.kind, next) {
                out.push(' ');
            }
        }

        if tok.kind == TokenKind::Semicolon {
            out.push(';');
        } else {
            out.push_str(tok.text);
        }
        prev = Some(tok.kind);
    }

    out
}

/// Re-render type source text taken from elsewhere (e.g. a syntax tree
/// node) so it reads exactly like the native parser's output.
pub fn render_type_source(text: &str) -> String {
    match tokenize(text) {
        Ok(toks) => render_type(&toks),
        Err(_) => collapse_whitespace(text),
    }
}

fn needs_space(prev: TokenKind, cur: TokenKind, next: Option<TokenKind>) -> bool {
    use TokenKind::*;

    match (prev, cur) {
        (LBrace, RBrace) => false,
        (LBrace, _) | (_, RBrace) => true,
        (LParen | LBracket | Star | Dot | Tilde | Ellipsis, _) => false,
        (Arrow, Chan) => false,
        (_, RParen | RBracket | Comma | Dot | Semicolon) => false,
        (Struct | Interface, LBrace) => false,
        (_, LBrace) => true,
        (RParen, LParen) => true,
        (_, LParen) => false,
        (Chan, Arrow) => false,
        // `x []int` is a field, `List[T]` an instantiation.
        (Ident, LBracket) => next == Some(RBracket),
        (Map | RBracket, LBracket) => false,
        (_, Pipe | Assign) | (Pipe | Assign | Comma | Semicolon, _) => true,
        (RBracket, _) => false,
        _ => true,
    }
}
