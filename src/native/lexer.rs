//! Logos-based Go tokenizer with automatic semicolon insertion.

use logos::Logos;

/// A token with its kind, text, and 1-based line numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub line: u32,
    pub end_line: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub line: u32,
    pub message: String,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r]+")]
pub enum TokenKind {
    // =========================================================================
    // TRIVIA (never emitted by `tokenize`)
    // =========================================================================
    #[token("\n")]
    Newline,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*[^*]*\*+([^/*][^*]*\*+)*/")]
    BlockComment,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("package")]
    Package,

    #[token("import")]
    Import,

    #[token("func")]
    Func,

    #[token("type")]
    Type,

    #[token("var")]
    Var,

    #[token("const")]
    Const,

    #[token("struct")]
    Struct,

    #[token("interface")]
    Interface,

    #[token("map")]
    Map,

    #[token("chan")]
    Chan,

    /// Keywords that end a statement when they end a line.
    #[token("break")]
    #[token("continue")]
    #[token("fallthrough")]
    #[token("return")]
    Jump,

    #[token("case")]
    #[token("default")]
    #[token("defer")]
    #[token("else")]
    #[token("for")]
    #[token("go")]
    #[token("goto")]
    #[token("if")]
    #[token("range")]
    #[token("select")]
    #[token("switch")]
    Keyword,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[\p{L}_][\p{L}\p{N}_]*")]
    Ident,

    #[regex(r"[0-9]([0-9a-zA-Z_.]|[eEpP][+-])*")]
    #[regex(r"\.[0-9]([0-9a-zA-Z_]|[eE][+-])*")]
    Number,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    String,

    #[regex(r"`[^`]*`")]
    RawString,

    #[regex(r"'([^'\\\n]|\\.)*'")]
    Rune,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token(",")]
    Comma,

    #[token(";")]
    Semicolon,

    #[token(".")]
    Dot,

    #[token("...")]
    Ellipsis,

    #[token(":")]
    Colon,

    #[token(":=")]
    Define,

    #[token("=")]
    Assign,

    #[token("*")]
    Star,

    #[token("~")]
    Tilde,

    #[token("|")]
    Pipe,

    #[token("<-")]
    Arrow,

    #[token("++")]
    #[token("--")]
    IncDec,

    #[token("+")]
    #[token("-")]
    #[token("/")]
    #[token("%")]
    #[token("&")]
    #[token("^")]
    #[token("<<")]
    #[token(">>")]
    #[token("&^")]
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token("%=")]
    #[token("&=")]
    #[token("|=")]
    #[token("^=")]
    #[token("<<=")]
    #[token(">>=")]
    #[token("&^=")]
    #[token("&&")]
    #[token("||")]
    #[token("==")]
    #[token("!=")]
    #[token("<")]
    #[token("<=")]
    #[token(">")]
    #[token(">=")]
    #[token("!")]
    Op,
}

impl TokenKind {
    /// Whether a newline after this token terminates the statement.
    fn ends_statement(self) -> bool {
        matches!(
            self,
            TokenKind::Ident
                | TokenKind::Number
                | TokenKind::String
                | TokenKind::RawString
                | TokenKind::Rune
                | TokenKind::Jump
                | TokenKind::IncDec
                | TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::RBrace
        )
    }
}

fn auto_semi<'a>(out: &mut Vec<Token<'a>>, last: &mut Option<TokenKind>, line: u32) {
    if last.is_some_and(TokenKind::ends_statement) {
        out.push(Token {
            kind: TokenKind::Semicolon,
            text: "",
            line,
            end_line: line,
        });
    }
    *last = None;
}

/// Tokenize Go source, dropping comments and turning significant newlines
/// into `Semicolon` tokens whose text is empty.
pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>, LexError> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);

    // A leading `#!` line is treated as a comment.
    let body = if input.starts_with("#!") {
        &input[input.find('\n').unwrap_or(input.len())..]
    } else {
        input
    };

    let mut out: Vec<Token<'_>> = Vec::new();
    let mut line: u32 = 1;
    let mut last: Option<TokenKind> = None;
    let mut lexer = TokenKind::lexer(body);

    while let Some(res) = lexer.next() {
        let text = lexer.slice();
        let kind = match res {
            Ok(k) => k,
            Err(()) => {
                return Err(LexError {
                    line,
                    message: format!("invalid token {:?}", text),
                })
            }
        };
        let newlines = text.matches('\n').count() as u32;

        match kind {
            TokenKind::Newline => {
                auto_semi(&mut out, &mut last, line);
                line += 1;
            }
            TokenKind::LineComment => {}
            TokenKind::BlockComment => {
                if newlines > 0 {
                    auto_semi(&mut out, &mut last, line);
                    line += newlines;
                }
            }
            _ => {
                out.push(Token {
                    kind,
                    text,
                    line,
                    end_line: line + newlines,
                });
                line += newlines;
                last = Some(kind);
            }
        }
    }
    auto_semi(&mut out, &mut last, line);

    Ok(out)
}
