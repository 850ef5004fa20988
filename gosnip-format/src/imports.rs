//! Leading import declarations of a Go file.

use std::ops::Range;

use gosnip_core::{Result, SourceContext};

use crate::scanner::{Token, TokenKind, scan};

/// One import spec with the comments attached to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    /// Comment lines above the spec, verbatim.
    pub doc: Vec<String>,
    /// Explicit local name, including `_` and `.`.
    pub name: Option<String>,
    /// Unquoted import path.
    pub path: String,
    /// The path literal as written.
    pub literal: String,
    /// Comment on the same line after the path, verbatim.
    pub comment: Option<String>,
}

impl ImportSpec {
    /// Append the spec's lines to `out`, dropping the explicit name unless
    /// `keep_name` is set.
    pub fn write_to(&self, out: &mut String, keep_name: bool) {
        for line in &self.doc {
            out.push_str(line);
            out.push('\n');
        }
        if keep_name {
            if let Some(name) = &self.name {
                out.push_str(name);
                out.push(' ');
            }
        }
        out.push_str(&self.literal);
        if let Some(comment) = &self.comment {
            out.push(' ');
            out.push_str(comment);
        }
        out.push('\n');
    }
}

/// An `import` declaration and its byte span in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    /// From the `import` keyword to the closing parenthesis, or to the end
    /// of the trailing comment of a single spec.
    pub span: Range<usize>,
    pub specs: Vec<ImportSpec>,
    /// Comments after the last spec of a group.
    pub trailing: Vec<String>,
    /// Whether the specs were wrapped in parentheses.
    pub grouped: bool,
}

/// Parse the import declarations that directly follow the package clause.
///
/// ```
/// use gosnip_core::SourceContext;
/// use gosnip_format::parse_imports;
///
/// let ctx = SourceContext::new("package main\n\nimport f \"fmt\" // print\n", "main.go");
/// let decls = parse_imports(&ctx).unwrap();
/// assert_eq!(decls[0].specs[0].name.as_deref(), Some("f"));
/// assert_eq!(decls[0].specs[0].comment.as_deref(), Some("// print"));
/// ```
pub fn parse_imports(ctx: &SourceContext) -> Result<Vec<ImportDecl>> {
    let tokens = scan(ctx)?;
    let mut parser = Parser {
        ctx,
        tokens: &tokens,
        pos: 0,
    };
    parser.skip_package_clause()?;

    let mut decls = Vec::new();
    loop {
        parser.skip_trivia();
        match parser.peek() {
            Some(token) if token.is_word(ctx.src(), "import") => {
                decls.push(parser.decl()?);
            }
            _ => break,
        }
    }
    Ok(decls)
}

struct Parser<'a> {
    ctx: &'a SourceContext,
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn src(&self) -> &'a str {
        self.ctx.src()
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn text(&self, token: &Token) -> String {
        token.text(self.src()).to_string()
    }

    fn error(&self, expected: &str, found: Option<&Token>) -> Box<gosnip_core::Error> {
        let src = self.src();
        let (what, at) = match found {
            Some(token) if token.kind == TokenKind::Newline => {
                ("newline".to_string(), token.span.start)
            }
            Some(token) => (token.text(src).to_string(), token.span.start),
            None => ("EOF".to_string(), src.len()),
        };
        self.ctx
            .parse_error(format!("expected {expected}, found '{what}'"), Some(at))
    }

    /// Skip newlines, comments and semicolons.
    fn skip_trivia(&mut self) {
        while let Some(token) = self.peek() {
            let trivia = matches!(token.kind, TokenKind::Newline | TokenKind::Semi);
            if trivia || token.kind.is_comment() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn skip_package_clause(&mut self) -> Result<()> {
        self.skip_trivia();
        let keyword = self.next();
        if !keyword.is_some_and(|t| t.is_word(self.src(), "package")) {
            return Err(self.error("'package'", keyword));
        }
        let name = self.next();
        if !name.is_some_and(|t| t.kind == TokenKind::Ident) {
            return Err(self.error("'IDENT'", name));
        }
        Ok(())
    }

    fn decl(&mut self) -> Result<ImportDecl> {
        let start = self.next().map_or(0, |t| t.span.start);

        if self.peek().is_some_and(|t| t.kind == TokenKind::LParen) {
            self.pos += 1;
            return self.group(start);
        }

        let mut spec = self.spec(Vec::new())?;
        let mut end = self.tokens[self.pos - 1].span.end;
        if let Some(token) = self.peek() {
            if token.kind.is_comment() {
                spec.comment = Some(self.text(token));
                end = token.span.end;
                self.pos += 1;
            }
        }

        Ok(ImportDecl {
            span: start..end,
            specs: vec![spec],
            trailing: Vec::new(),
            grouped: false,
        })
    }

    fn group(&mut self, start: usize) -> Result<ImportDecl> {
        let mut specs: Vec<ImportSpec> = Vec::new();
        let mut pending = Vec::new();
        let mut same_line = false;

        loop {
            let Some(token) = self.peek() else {
                return Err(self.error("')'", None));
            };

            match token.kind {
                TokenKind::Newline => {
                    same_line = false;
                    self.pos += 1;
                }
                TokenKind::Semi => self.pos += 1,
                TokenKind::LineComment | TokenKind::BlockComment => {
                    let text = self.text(token);
                    match specs.last_mut() {
                        Some(last) if same_line => {
                            last.comment = Some(match last.comment.take() {
                                Some(prev) => format!("{prev} {text}"),
                                None => text,
                            });
                        }
                        _ => pending.push(text),
                    }
                    self.pos += 1;
                }
                TokenKind::RParen => {
                    self.pos += 1;
                    return Ok(ImportDecl {
                        span: start..token.span.end,
                        specs,
                        trailing: pending,
                        grouped: true,
                    });
                }
                _ => {
                    specs.push(self.spec(std::mem::take(&mut pending))?);
                    same_line = true;
                }
            }
        }
    }

    fn spec(&mut self, doc: Vec<String>) -> Result<ImportSpec> {
        let mut name = None;
        if let Some(token) = self.peek() {
            if matches!(token.kind, TokenKind::Ident | TokenKind::Dot) {
                name = Some(self.text(token));
                self.pos += 1;
            }
        }

        let path = self.next();
        match path {
            Some(token) if matches!(token.kind, TokenKind::String | TokenKind::RawString) => {
                let literal = self.text(token);
                Ok(ImportSpec {
                    doc,
                    name,
                    path: unquote(&literal),
                    literal,
                    comment: None,
                })
            }
            _ => Err(self.error("import path", path)),
        }
    }
}

/// Strip the quotes of a string literal and resolve simple escapes.
fn unquote(literal: &str) -> String {
    let inner = literal
        .get(1..literal.len().saturating_sub(1))
        .unwrap_or_default();
    if literal.starts_with('`') {
        return inner.to_string();
    }

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}
