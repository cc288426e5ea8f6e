//! Recursive-descent parser for Go declarations.
//!
//! Only the shape of declarations is recovered: imports, function and method
//! headers, and type specs. Function bodies are skipped except for the type
//! declarations they contain; `const`/`var` declarations are skipped whole.

use super::ast::{Decl, Field, FieldList, FuncDecl, GenDecl, ImportSpec, Results, SourceFile, TypeSpec};
use super::lexer::{tokenize, Token, TokenKind};
use super::printer::render_type;
use crate::walker::strip_string_quotes;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub line: u32,
    pub message: String,
}

type PResult<T> = Result<T, ParseError>;

pub fn parse_file(source: &str) -> PResult<SourceFile> {
    let tokens = tokenize(source).map_err(|e| ParseError {
        line: e.line,
        message: e.message,
    })?;
    Parser::new(tokens).source_file()
}

struct Parser<'a> {
    toks: Vec<Token<'a>>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(toks: Vec<Token<'a>>) -> Self {
        Self { toks, pos: 0 }
    }

    // -----------------------------------------------------------------------
    // Token plumbing
    // -----------------------------------------------------------------------

    fn peek(&self) -> Option<TokenKind> {
        self.toks.get(self.pos).map(|t| t.kind)
    }

    fn peek_at(&self, n: usize) -> Option<TokenKind> {
        self.toks.get(self.pos + n).map(|t| t.kind)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek() == Some(kind)
    }

    fn current_line(&self) -> u32 {
        self.toks
            .get(self.pos)
            .or_else(|| self.toks.last())
            .map(|t| t.line)
            .unwrap_or(1)
    }

    /// End line of the most recently consumed token.
    fn last_end_line(&self) -> u32 {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.toks.get(i))
            .map(|t| t.end_line)
            .unwrap_or(1)
    }

    fn error<T>(&self, message: impl Into<String>) -> PResult<T> {
        Err(ParseError {
            line: self.current_line(),
            message: message.into(),
        })
    }

    fn bump(&mut self) -> PResult<Token<'a>> {
        match self.toks.get(self.pos) {
            Some(&tok) => {
                self.pos += 1;
                Ok(tok)
            }
            None => self.error("unexpected end of file"),
        }
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> PResult<Token<'a>> {
        match self.toks.get(self.pos) {
            Some(&tok) if tok.kind == kind => {
                self.pos += 1;
                Ok(tok)
            }
            Some(tok) => {
                let found = if tok.text.is_empty() { "newline" } else { tok.text };
                self.error(format!("expected {what}, found {found:?}"))
            }
            None => self.error(format!("expected {what}, found end of file")),
        }
    }

    /// A declaration must be followed by `;` (explicit or inserted), or EOF.
    fn expect_terminator(&mut self, after: &str) -> PResult<()> {
        if self.peek().is_none() || self.eat(TokenKind::Semicolon) {
            return Ok(());
        }
        self.error(format!("expected ';' after {after}"))
    }

    fn skip_semicolons(&mut self) {
        while self.eat(TokenKind::Semicolon) {}
    }

    /// Consume a balanced group starting at an opening bracket.
    fn skip_group(&mut self) -> PResult<()> {
        let open = self.bump()?;
        if !matches!(open.kind, TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace) {
            return Err(ParseError {
                line: open.line,
                message: format!("expected opening bracket, found {:?}", open.text),
            });
        }

        let mut stack = vec![open.kind];
        while let Some(&top) = stack.last() {
            let Some(tok) = self.toks.get(self.pos).copied() else {
                return Err(ParseError {
                    line: open.line,
                    message: format!("unclosed {:?}", open.text),
                });
            };
            self.pos += 1;
            match tok.kind {
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => stack.push(tok.kind),
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    if closer_of(top) != tok.kind {
                        return Err(ParseError {
                            line: tok.line,
                            message: format!("mismatched {:?}", tok.text),
                        });
                    }
                    stack.pop();
                }
                _ => {}
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // File structure
    // -----------------------------------------------------------------------

    fn source_file(&mut self) -> PResult<SourceFile> {
        self.skip_semicolons();
        self.expect(TokenKind::Package, "'package'")?;
        let package = self.expect(TokenKind::Ident, "package name")?.text.to_string();
        self.expect_terminator("package clause")?;

        let mut file = SourceFile {
            package,
            imports: Vec::new(),
            decls: Vec::new(),
        };

        loop {
            self.skip_semicolons();
            let Some(kind) = self.peek() else { break };
            match kind {
                TokenKind::Import => {
                    self.import_decl(&mut file.imports)?;
                    self.expect_terminator("import declaration")?;
                }
                TokenKind::Func => {
                    let decl = self.func_decl()?;
                    file.decls.push(Decl::Func(decl));
                    self.expect_terminator("function declaration")?;
                }
                TokenKind::Type => {
                    let decl = self.type_decl()?;
                    file.decls.push(Decl::Gen(decl));
                    self.expect_terminator("type declaration")?;
                }
                TokenKind::Var | TokenKind::Const => {
                    let nested = self.value_decl()?;
                    file.decls.extend(nested.into_iter().map(Decl::Gen));
                    self.expect_terminator("value declaration")?;
                }
                _ => return self.error("non-declaration statement outside function body"),
            }
        }

        Ok(file)
    }

    fn import_decl(&mut self, out: &mut Vec<ImportSpec>) -> PResult<()> {
        self.expect(TokenKind::Import, "'import'")?;
        if !self.eat(TokenKind::LParen) {
            out.push(self.import_spec()?);
            return Ok(());
        }

        loop {
            self.skip_semicolons();
            if self.eat(TokenKind::RParen) {
                return Ok(());
            }
            out.push(self.import_spec()?);
            if !self.at(TokenKind::RParen) {
                self.expect(TokenKind::Semicolon, "';' or ')' in import group")?;
            }
        }
    }

    fn import_spec(&mut self) -> PResult<ImportSpec> {
        let name = match self.peek() {
            Some(TokenKind::Ident | TokenKind::Dot) => Some(self.bump()?.text.to_string()),
            _ => None,
        };
        let tok = self.bump()?;
        if !matches!(tok.kind, TokenKind::String | TokenKind::RawString) {
            return Err(ParseError {
                line: tok.line,
                message: format!("expected import path, found {:?}", tok.text),
            });
        }
        Ok(ImportSpec {
            name,
            path: strip_string_quotes(tok.text),
            line: tok.line,
        })
    }

    /// Skip a `var`/`const` declaration. Only the type declarations inside
    /// function literals in its initializers are kept.
    fn value_decl(&mut self) -> PResult<Vec<GenDecl>> {
        let keyword = self.bump()?;
        let grouped = self.eat(TokenKind::LParen);
        let mut nested = Vec::new();
        let mut depth = 0usize;

        while let Some(kind) = self.peek() {
            match kind {
                TokenKind::Semicolon if depth == 0 && !grouped => return Ok(nested),
                TokenKind::LBrace => {
                    self.body(&mut nested)?;
                    continue;
                }
                TokenKind::LParen | TokenKind::LBracket => depth += 1,
                TokenKind::RParen if grouped && depth == 0 => {
                    self.pos += 1;
                    return Ok(nested);
                }
                TokenKind::RParen | TokenKind::RBracket if depth > 0 => depth -= 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    return self.error("unbalanced closing bracket");
                }
                _ => {}
            }
            self.pos += 1;
        }

        if grouped || depth > 0 {
            return Err(ParseError {
                line: keyword.line,
                message: format!("unclosed {} declaration", keyword.text),
            });
        }
        Ok(nested)
    }

    // -----------------------------------------------------------------------
    // Functions
    // -----------------------------------------------------------------------

    fn func_decl(&mut self) -> PResult<FuncDecl> {
        let start_line = self.expect(TokenKind::Func, "'func'")?.line;

        let recv = if self.at(TokenKind::LParen) {
            Some(self.field_list(TokenKind::LParen, TokenKind::RParen)?)
        } else {
            None
        };

        let name = self.expect(TokenKind::Ident, "function name")?.text.to_string();

        let type_params = if self.at(TokenKind::LBracket) {
            Some(self.field_list(TokenKind::LBracket, TokenKind::RBracket)?)
        } else {
            None
        };

        let params = self.field_list(TokenKind::LParen, TokenKind::RParen)?;
        let results = self.results()?;

        let mut nested = Vec::new();
        if self.at(TokenKind::LBrace) {
            self.body(&mut nested)?;
        }

        Ok(FuncDecl {
            recv,
            name,
            type_params,
            params,
            results,
            start_line,
            end_line: self.last_end_line(),
            nested,
        })
    }

    fn results(&mut self) -> PResult<Option<Results>> {
        if self.at(TokenKind::LParen) {
            return Ok(Some(Results::List(self.field_list(TokenKind::LParen, TokenKind::RParen)?)));
        }
        if self.starts_type() {
            let start = self.pos;
            self.skip_type()?;
            return Ok(Some(Results::Type(render_type(&self.toks[start..self.pos]))));
        }
        Ok(None)
    }

    /// Walk a function body, collecting `type` declarations at statement
    /// starts (at any depth, including inside function literals).
    fn body(&mut self, nested: &mut Vec<GenDecl>) -> PResult<()> {
        let open = self.expect(TokenKind::LBrace, "'{'")?;
        let mut depth = 1usize;
        let mut prev = TokenKind::LBrace;

        while depth > 0 {
            let Some(kind) = self.peek() else {
                return Err(ParseError {
                    line: open.line,
                    message: "unclosed function body".to_string(),
                });
            };

            if kind == TokenKind::Type && matches!(prev, TokenKind::LBrace | TokenKind::Semicolon | TokenKind::Colon) {
                nested.push(self.type_decl()?);
                prev = TokenKind::RParen;
                continue;
            }

            self.pos += 1;
            match kind {
                TokenKind::LBrace | TokenKind::LParen | TokenKind::LBracket => depth += 1,
                TokenKind::RBrace | TokenKind::RParen | TokenKind::RBracket => depth -= 1,
                _ => {}
            }
            prev = kind;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Parameter lists
    // -----------------------------------------------------------------------

    /// Parse `(...)` or `[...]` into fields, applying Go's grouping rule:
    /// if any entry is `name Type`, bare identifiers are names sharing the
    /// next entry's type; otherwise every entry is a type.
    fn field_list(&mut self, open: TokenKind, close: TokenKind) -> PResult<FieldList> {
        let open_tok = self.expect(open, "parameter list")?;

        let mut entries: Vec<(usize, usize)> = Vec::new();
        loop {
            if self.eat(close) {
                break;
            }
            let start = self.pos;
            loop {
                match self.peek() {
                    None => {
                        return Err(ParseError {
                            line: open_tok.line,
                            message: format!("unclosed {:?}", open_tok.text),
                        })
                    }
                    Some(TokenKind::Comma) => break,
                    Some(k) if k == close => break,
                    Some(TokenKind::Semicolon) => return self.error("unexpected newline in parameter list"),
                    Some(TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace) => self.skip_group()?,
                    Some(TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace) => {
                        return self.error("mismatched bracket in parameter list")
                    }
                    Some(_) => self.pos += 1,
                }
            }
            if start == self.pos {
                return self.error("empty parameter entry");
            }
            entries.push((start, self.pos));
            if !self.eat(TokenKind::Comma) {
                self.expect(close, "closing bracket")?;
                break;
            }
        }

        self.group_fields(&entries)
    }

    fn group_fields(&self, entries: &[(usize, usize)]) -> PResult<FieldList> {
        let named = |&(s, e): &(usize, usize)| -> bool {
            let toks = &self.toks[s..e];
            if toks.len() < 2 || toks[0].kind != TokenKind::Ident {
                return false;
            }
            match toks[1].kind {
                TokenKind::Dot => false,
                // `List[T]` is an instantiated type, `xs [4]T` a named array.
                TokenKind::LBracket => matching_close(toks, 1).is_some_and(|end| end + 1 < toks.len()),
                _ => true,
            }
        };

        if !entries.iter().any(named) {
            let fields = entries
                .iter()
                .map(|&(s, e)| Field {
                    names: Vec::new(),
                    ty: render_type(&self.toks[s..e]),
                })
                .collect();
            return Ok(FieldList { fields });
        }

        let mut fields = Vec::new();
        let mut pending: Vec<String> = Vec::new();
        for entry in entries {
            let (s, e) = *entry;
            if named(entry) {
                pending.push(self.toks[s].text.to_string());
                fields.push(Field {
                    names: std::mem::take(&mut pending),
                    ty: render_type(&self.toks[s + 1..e]),
                });
            } else if e - s == 1 && self.toks[s].kind == TokenKind::Ident {
                pending.push(self.toks[s].text.to_string());
            } else {
                return Err(ParseError {
                    line: self.toks[s].line,
                    message: "mixed named and unnamed parameters".to_string(),
                });
            }
        }
        if !pending.is_empty() {
            return Err(ParseError {
                line: self.last_end_line(),
                message: format!("missing type for {}", pending.join(", ")),
            });
        }
        Ok(FieldList { fields })
    }

    // -----------------------------------------------------------------------
    // Types
    // -----------------------------------------------------------------------

    fn type_decl(&mut self) -> PResult<GenDecl> {
        self.expect(TokenKind::Type, "'type'")?;
        if !self.eat(TokenKind::LParen) {
            return Ok(GenDecl {
                specs: vec![self.type_spec()?],
            });
        }

        let mut specs = Vec::new();
        loop {
            self.skip_semicolons();
            if self.eat(TokenKind::RParen) {
                return Ok(GenDecl { specs });
            }
            specs.push(self.type_spec()?);
            if !self.at(TokenKind::RParen) {
                self.expect(TokenKind::Semicolon, "';' or ')' in type group")?;
            }
        }
    }

    fn type_spec(&mut self) -> PResult<TypeSpec> {
        let name_tok = self.expect(TokenKind::Ident, "type name")?;

        let type_params = if self.looks_like_type_params() {
            Some(self.field_list(TokenKind::LBracket, TokenKind::RBracket)?)
        } else {
            None
        };

        let alias = self.eat(TokenKind::Assign);

        let start = self.pos;
        self.skip_type()?;
        let ty = render_type(&self.toks[start..self.pos]);

        Ok(TypeSpec {
            name: name_tok.text.to_string(),
            type_params,
            alias,
            ty,
            start_line: name_tok.line,
            end_line: self.last_end_line(),
        })
    }

    /// `type L[T any] ...` versus the array type in `type A [N]int`.
    fn looks_like_type_params(&self) -> bool {
        if !self.at(TokenKind::LBracket) || self.peek_at(1) != Some(TokenKind::Ident) {
            return false;
        }
        matches!(
            self.peek_at(2),
            Some(
                TokenKind::Ident
                    | TokenKind::Comma
                    | TokenKind::Star
                    | TokenKind::Tilde
                    | TokenKind::LBracket
                    | TokenKind::Interface
                    | TokenKind::Func
                    | TokenKind::Map
                    | TokenKind::Chan
                    | TokenKind::Struct
            )
        )
    }

    fn starts_type(&self) -> bool {
        matches!(
            self.peek(),
            Some(
                TokenKind::Ident
                    | TokenKind::Star
                    | TokenKind::LBracket
                    | TokenKind::LParen
                    | TokenKind::Map
                    | TokenKind::Chan
                    | TokenKind::Arrow
                    | TokenKind::Func
                    | TokenKind::Struct
                    | TokenKind::Interface
                    | TokenKind::Tilde
            )
        )
    }

    fn skip_type(&mut self) -> PResult<()> {
        self.skip_type_operand()?;
        // Constraint unions: `~int | ~string`.
        while self.eat(TokenKind::Pipe) {
            self.skip_type_operand()?;
        }
        Ok(())
    }

    fn skip_type_operand(&mut self) -> PResult<()> {
        let Some(kind) = self.peek() else {
            return self.error("expected type, found end of file");
        };
        match kind {
            TokenKind::Ident => {
                self.pos += 1;
                if self.eat(TokenKind::Dot) {
                    self.expect(TokenKind::Ident, "qualified type name")?;
                }
                if self.at(TokenKind::LBracket) {
                    self.skip_group()?;
                }
                Ok(())
            }
            TokenKind::Star | TokenKind::Tilde => {
                self.pos += 1;
                self.skip_type_operand()
            }
            TokenKind::LBracket => {
                self.skip_group()?;
                self.skip_type_operand()
            }
            TokenKind::LParen => self.skip_group(),
            TokenKind::Map => {
                self.pos += 1;
                if !self.at(TokenKind::LBracket) {
                    return self.error("expected '[' after map");
                }
                self.skip_group()?;
                self.skip_type_operand()
            }
            TokenKind::Chan => {
                self.pos += 1;
                self.eat(TokenKind::Arrow);
                self.skip_type_operand()
            }
            TokenKind::Arrow => {
                self.pos += 1;
                self.expect(TokenKind::Chan, "'chan'")?;
                self.skip_type_operand()
            }
            TokenKind::Func => {
                self.pos += 1;
                if !self.at(TokenKind::LParen) {
                    return self.error("expected '(' after func");
                }
                self.skip_group()?;
                if self.at(TokenKind::LParen) {
                    self.skip_group()?;
                } else if self.starts_type() {
                    self.skip_type_operand()?;
                }
                Ok(())
            }
            TokenKind::Struct | TokenKind::Interface => {
                self.pos += 1;
                if !self.at(TokenKind::LBrace) {
                    return self.error("expected '{' after struct/interface");
                }
                self.skip_group()
            }
            _ => {
                let found = self.toks[self.pos].text;
                self.error(format!("expected type, found {found:?}"))
            }
        }
    }
}

fn closer_of(open: TokenKind) -> TokenKind {
    match open {
        TokenKind::LParen => TokenKind::RParen,
        TokenKind::LBracket => TokenKind::RBracket,
        _ => TokenKind::RBrace,
    }
}

/// Index of the bracket closing `toks[open]`, if balanced within `toks`.
fn matching_close(toks: &[Token], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, t) in toks.iter().enumerate().skip(open) {
        match t.kind {
            TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
            TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn funcs(file: &SourceFile) -> Vec<&FuncDecl> {
        file.decls
            .iter()
            .filter_map(|d| match d {
                Decl::Func(f) => Some(f),
                _ => None,
            })
            .collect()
    }

    fn types(file: &SourceFile) -> Vec<&TypeSpec> {
        file.decls
            .iter()
            .filter_map(|d| match d {
                Decl::Gen(g) => Some(g.specs.iter()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    #[test]
    fn parses_package_and_imports() {
        let file = parse_file("package demo\n\nimport \"fmt\"\nimport (\n\tstr \"strings\"\n\t. `os`\n)\n").unwrap();
        assert_eq!(file.package, "demo");
        let paths: Vec<&str> = file.imports.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["fmt", "strings", "os"]);
        assert_eq!(file.imports[1].name.as_deref(), Some("str"));
        assert_eq!(file.imports[2].line, 6);
    }

    #[test]
    fn groups_parameters_like_go() {
        let file = parse_file("package p\nfunc f(a, b int, c ...string) (n int, err error) { return }\nfunc g(int, *pkg.T) error\n").unwrap();
        let fs = funcs(&file);
        assert_eq!(fs[0].signature(), "func f(a, b int, c ...string) (n int, err error)");
        assert_eq!(fs[1].signature(), "func g(int, *pkg.T) error");
        assert_eq!((fs[1].start_line, fs[1].end_line), (3, 3));
    }

    #[test]
    fn parses_methods_and_generics() {
        let src = "package p\n\nfunc (l *List[T]) Push(v T) {\n\tl.items = append(l.items, v)\n}\n\nfunc Map[T, U any](xs []T, f func(T) U) []U {\n\treturn nil\n}\n";
        let file = parse_file(src).unwrap();
        let fs = funcs(&file);
        assert_eq!(fs[0].receiver().as_deref(), Some("(l *List[T])"));
        assert_eq!(fs[0].signature(), "func (l *List[T]) Push(v T)");
        assert_eq!((fs[0].start_line, fs[0].end_line), (3, 5));
        assert_eq!(fs[1].signature(), "func Map[T, U any](xs []T, f func(T) U) []U");
    }

    #[test]
    fn result_types_with_braces_do_not_start_the_body() {
        let file = parse_file("package p\nfunc f() interface{} {\n\treturn nil\n}\nfunc g() struct{ A int } { return struct{ A int }{} }\n").unwrap();
        let fs = funcs(&file);
        assert_eq!(fs[0].signature(), "func f() interface{}");
        assert_eq!(fs[0].end_line, 4);
        assert_eq!(fs[1].signature(), "func g() struct{ A int }");
    }

    #[test]
    fn parses_type_specs() {
        let src = "package p\n\ntype (\n\tID int\n\tAlias = string\n\tArr [4]byte\n\tList[T any] struct {\n\t\titems []T\n\t}\n)\n";
        let file = parse_file(src).unwrap();
        let ts = types(&file);
        let sigs: Vec<String> = ts.iter().map(|t| t.signature()).collect();
        assert_eq!(
            sigs,
            vec!["type ID int", "type Alias = string", "type Arr [4]byte", "type List[T any] struct{ items []T }"]
        );
        assert_eq!((ts[3].start_line, ts[3].end_line), (7, 9));
    }

    #[test]
    fn finds_type_declarations_inside_bodies() {
        let src = "package p\nfunc f(x any) {\n\tswitch x.(type) {\n\tcase int:\n\t}\n\ttype local struct{}\n\t_ = func() {\n\t\ttype inner int\n\t}\n}\n";
        let file = parse_file(src).unwrap();
        let f = funcs(&file)[0];
        let names: Vec<&str> = f.nested.iter().flat_map(|g| g.specs.iter()).map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["local", "inner"]);
        assert_eq!(f.end_line, 10);
    }

    #[test]
    fn skips_value_declarations() {
        let src = "package p\nvar (\n\ta = 1\n\tb = func() int { return 2 }()\n)\nconst c = 3\nvar handler = func() {}\nfunc after() {}\n";
        let file = parse_file(src).unwrap();
        assert_eq!(funcs(&file)[0].name, "after");
    }

    #[test]
    fn collects_types_inside_function_literal_initializers() {
        let src = "package p\n\nvar f = func() {\n\ttype inner int\n}\n\nvar (\n\tx = 1\n\tg = func() int {\n\t\ttype deep struct{ n int }\n\t\treturn 0\n\t}()\n)\n\nfunc after() {}\n";
        let file = parse_file(src).unwrap();
        let names: Vec<&str> = types(&file).iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["inner", "deep"]);
        assert_eq!(types(&file)[0].start_line, 4);
        assert_eq!(funcs(&file)[0].name, "after");
    }

    #[test]
    fn unclosed_value_group_is_an_error() {
        let err = parse_file("package p\nvar (\n\ta = 1\n").unwrap_err();
        assert_eq!(err.line, 2);
    }

    #[test]
    fn rejects_missing_package_clause() {
        let err = parse_file("func f() {}\n").unwrap_err();
        assert!(err.message.contains("package"), "{err:?}");
    }

    #[test]
    fn rejects_statements_at_top_level() {
        let err = parse_file("package p\nx := 1\n").unwrap_err();
        assert_eq!(err.line, 2);
    }

    #[test]
    fn rejects_unclosed_body() {
        let err = parse_file("package p\nfunc f() {\n\tif true {\n}\n").unwrap_err();
        assert!(err.message.contains("unclosed"), "{err:?}");
    }

    #[test]
    fn rejects_nameless_function() {
        assert!(parse_file("package p\nfunc () {}\n").is_err());
    }
}
