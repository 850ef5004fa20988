//! Formatting collaborators.
//!
//! [`IndentFormatter`] is a pure Rust layout pass that handles the
//! output of the snippet renderer. [`Gofmt`] pipes the source through
//! the `gofmt` executable for canonical output.

use std::{
    io::Write,
    path::PathBuf,
    process::{Command, Stdio},
};

use gosnip_core::{Error, Result, SourceContext};
use tracing::debug;

use crate::{
    Indent,
    scanner::{Token, TokenKind, scan, significant},
};

/// Turns raw Go source into formatted Go source.
pub trait Formatter {
    /// Format `src`. `filename` is used in diagnostics only.
    fn format(&self, filename: &str, src: &str) -> Result<String>;
}

impl<T: Formatter + ?Sized> Formatter for &T {
    fn format(&self, filename: &str, src: &str) -> Result<String> {
        (**self).format(filename, src)
    }
}

impl<T: Formatter + ?Sized> Formatter for Box<T> {
    fn format(&self, filename: &str, src: &str) -> Result<String> {
        (**self).format(filename, src)
    }
}

/// A rewrite applied to already formatted source.
pub trait Process {
    /// Rewrite `src`, re-formatting the result with `formatter`.
    fn apply(&self, filename: &str, src: &str, formatter: &dyn Formatter) -> Result<String>;
}

/// Format `src`, then run each process over the result in order.
pub fn format_source(
    formatter: &dyn Formatter,
    filename: &str,
    src: &str,
    processes: &[&dyn Process],
) -> Result<String> {
    let mut out = formatter.format(filename, src)?;
    for process in processes {
        out = process.apply(filename, &out, formatter)?;
    }
    Ok(out)
}

const TOP_LEVEL_KEYWORDS: &[&str] = &["package", "import", "func", "type", "var", "const"];

/// Re-indents Go source by delimiter depth.
///
/// Validates the package clause and delimiter balance, replaces leading
/// whitespace with one indent unit per open block, puts `case` and
/// `default` at the level of their `switch`, separates top-level
/// declarations of different kinds with a blank line and collapses runs of
/// blank lines. Lines inside multi-line raw strings and block comments are
/// kept verbatim. Spacing within a line is left alone.
///
/// ```
/// use gosnip_format::{Formatter, IndentFormatter};
///
/// let out = IndentFormatter::default()
///     .format("main.go", "package main\nfunc main() {\nprintln(1)\n}\n\n")
///     .unwrap();
/// assert_eq!(out, "package main\n\nfunc main() {\n\tprintln(1)\n}\n");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct IndentFormatter {
    indent: Indent,
}

impl IndentFormatter {
    pub fn new(indent: Indent) -> Self {
        Self { indent }
    }

    pub fn indent(&self) -> Indent {
        self.indent
    }
}

impl Formatter for IndentFormatter {
    fn format(&self, filename: &str, src: &str) -> Result<String> {
        debug!(filename, bytes = src.len(), "indent formatting");

        let ctx = SourceContext::new(src, filename);
        let tokens = scan(&ctx)?;
        check_package_clause(&ctx, &tokens)?;
        check_balance(&ctx, &tokens)?;

        Ok(Layout::new(src, &tokens, self.indent).run())
    }
}

fn describe(src: &str, token: Option<&Token>) -> String {
    match token {
        Some(token) if token.kind == TokenKind::Ident => token.text(src).to_string(),
        Some(token) if token.kind == TokenKind::String => "literal".to_string(),
        Some(token) => token.text(src).to_string(),
        None => "EOF".to_string(),
    }
}

fn check_package_clause(ctx: &SourceContext, tokens: &[Token]) -> Result<()> {
    let src = ctx.src();
    let mut iter = significant(tokens);

    let first = iter.next();
    if !first.is_some_and(|t| t.is_word(src, "package")) {
        return Err(ctx.parse_error(
            format!("expected 'package', found '{}'", describe(src, first)),
            Some(first.map_or(src.len(), |t| t.span.start)),
        ));
    }

    let name = iter.next();
    let valid = name.is_some_and(|t| {
        t.kind == TokenKind::Ident && !TOP_LEVEL_KEYWORDS.contains(&t.text(src))
    });
    if !valid {
        return Err(ctx.parse_error(
            format!("expected 'IDENT', found '{}'", describe(src, name)),
            Some(name.map_or(src.len(), |t| t.span.start)),
        ));
    }
    Ok(())
}

fn check_balance(ctx: &SourceContext, tokens: &[Token]) -> Result<()> {
    let src = ctx.src();
    let mut open: Vec<&Token> = Vec::new();

    for token in tokens {
        if token.kind.is_opener() {
            open.push(token);
        } else if token.kind.is_closer() {
            let Some(opener) = open.pop() else {
                return Err(ctx.parse_error(
                    format!("unexpected '{}'", token.kind.delimiter()),
                    Some(token.span.start),
                ));
            };
            let expected = opener.kind.closer();
            if expected != Some(token.kind) {
                let expected = expected.map_or("", |k| k.delimiter());
                return Err(ctx.parse_error(
                    format!(
                        "expected '{expected}', found '{}'",
                        token.kind.delimiter()
                    ),
                    Some(token.span.start),
                ));
            }
        }
    }

    match open.last() {
        Some(opener) => {
            let expected = opener.kind.closer().map_or("", |k| k.delimiter());
            Err(ctx.parse_error(
                format!("expected '{expected}', found 'EOF'"),
                Some(src.len()),
            ))
        }
        None => Ok(()),
    }
}

#[derive(Debug, Clone, Copy)]
struct Open {
    kind: TokenKind,
    level: usize,
}

struct Layout<'a> {
    src: &'a str,
    tokens: &'a [Token],
    indent: Indent,
    stack: Vec<Open>,
    lines: Vec<Option<String>>,
    last_keyword: Option<&'a str>,
    pending_level: Option<usize>,
}

impl<'a> Layout<'a> {
    fn new(src: &'a str, tokens: &'a [Token], indent: Indent) -> Self {
        Self {
            src,
            tokens,
            indent,
            stack: Vec::new(),
            lines: Vec::new(),
            last_keyword: None,
            pending_level: None,
        }
    }

    fn run(mut self) -> String {
        let src = self.src;
        let tokens = self.tokens;
        let multiline: Vec<_> = tokens
            .iter()
            .filter(|t| t.is_multiline(src))
            .map(|t| t.span.clone())
            .collect();

        let mut next = 0;
        let mut start = 0;
        for raw in src.split('\n') {
            let end = start + raw.len();

            let first = next;
            while next < tokens.len() && tokens[next].span.start <= end {
                next += 1;
            }
            let line_tokens: Vec<&Token> = tokens[first..next]
                .iter()
                .filter(|t| t.kind != TokenKind::Newline)
                .collect();

            let verbatim = multiline.iter().any(|r| r.start < start && start < r.end);
            let continues = multiline.iter().any(|r| r.start >= start && r.end > end);
            if verbatim {
                self.lines.push(Some(raw.trim_end_matches('\r').to_string()));
            } else if continues {
                self.line(raw.trim_start(), &line_tokens);
            } else {
                self.line(raw.trim(), &line_tokens);
            }
            self.track(&line_tokens);

            start = end + 1;
        }

        while matches!(self.lines.last(), Some(None)) {
            self.lines.pop();
        }

        let mut out = String::new();
        for line in self.lines.iter() {
            if let Some(line) = line {
                out.push_str(line);
            }
            out.push('\n');
        }
        out
    }

    fn line(&mut self, text: &str, tokens: &[&Token]) {
        if text.is_empty() {
            self.blank();
            return;
        }

        let leading_closers = tokens.iter().take_while(|t| t.kind.is_closer()).count();
        let mut level = if leading_closers > 0 {
            let at = self.stack.len().saturating_sub(leading_closers);
            self.stack.get(at).map_or(0, |open| open.level)
        } else {
            self.stack.last().map_or(0, |open| open.level + 1)
        };

        let first = tokens.first();
        let is_case = first
            .is_some_and(|t| t.is_word(self.src, "case") || t.is_word(self.src, "default"));
        let in_block = self
            .stack
            .last()
            .is_some_and(|open| open.kind == TokenKind::LBrace);
        if is_case && in_block && leading_closers == 0 {
            level = level.saturating_sub(1);
        }

        if self.stack.is_empty() {
            let keyword = first
                .filter(|t| t.kind == TokenKind::Ident)
                .map(|t| t.text(self.src))
                .filter(|word| TOP_LEVEL_KEYWORDS.contains(word));
            if let Some(keyword) = keyword {
                if self.last_keyword.is_some_and(|last| last != keyword) {
                    self.separate();
                }
                self.last_keyword = Some(keyword);
            }
        }

        let mut line = String::new();
        self.indent.write(&mut line, level);
        line.push_str(text);
        self.lines.push(Some(line));

        self.pending_level = Some(level);
    }

    fn track(&mut self, tokens: &[&Token]) {
        let level = self
            .pending_level
            .take()
            .unwrap_or_else(|| self.stack.last().map_or(0, |open| open.level + 1));
        for token in tokens {
            if token.kind.is_opener() {
                self.stack.push(Open {
                    kind: token.kind,
                    level,
                });
            } else if token.kind.is_closer() {
                self.stack.pop();
            }
        }
    }

    fn blank(&mut self) {
        if matches!(self.lines.last(), Some(Some(_))) {
            self.lines.push(None);
        }
    }

    /// Insert a blank line before the current declaration and its doc
    /// comment.
    fn separate(&mut self) {
        let mut at = self.lines.len();
        while at > 0 {
            match &self.lines[at - 1] {
                Some(line) if line.starts_with("//") || line.starts_with("/*") => at -= 1,
                _ => break,
            }
        }
        if at > 0 && self.lines[at - 1].is_some() {
            self.lines.insert(at, None);
        }
    }
}

/// Formats through the `gofmt` executable.
#[derive(Debug, Clone)]
pub struct Gofmt {
    program: PathBuf,
}

impl Default for Gofmt {
    fn default() -> Self {
        Self {
            program: PathBuf::from("gofmt"),
        }
    }
}

impl Gofmt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific `gofmt` binary, e.g. `$GOROOT/bin/gofmt`.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Formatter for Gofmt {
    fn format(&self, filename: &str, src: &str) -> Result<String> {
        debug!(filename, program = %self.program.display(), "running gofmt");

        let ctx = SourceContext::new(src, filename);
        let io_error = |e| Error::io(&self.program, e);

        let mut child = Command::new(&self.program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(io_error)?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(src.as_bytes()).map_err(io_error)?;
        }

        let output = child.wait_with_output().map_err(io_error)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let (message, offset) = gofmt_diagnostic(src, &stderr);
            return Err(ctx.parse_error(message, offset));
        }

        String::from_utf8(output.stdout).map_err(|e| ctx.format_error(e.to_string()))
    }
}

/// Split the first `<standard input>:line:col: message` entry of gofmt's
/// stderr into a message and a byte offset.
fn gofmt_diagnostic(src: &str, stderr: &str) -> (String, Option<usize>) {
    let first = stderr.lines().next().unwrap_or("").trim();
    let rest = first.strip_prefix("<standard input>:").unwrap_or(first);

    let mut parts = rest.splitn(3, ':');
    let line = parts.next().and_then(|s| s.trim().parse::<usize>().ok());
    let col = parts.next().and_then(|s| s.trim().parse::<usize>().ok());
    let message = parts.next().map(str::trim);

    match (line, col, message) {
        (Some(line), Some(col), Some(message)) => {
            (message.to_string(), Some(offset_of(src, line, col)))
        }
        _ => (first.to_string(), None),
    }
}

/// Byte offset of a 1-based line and column.
fn offset_of(src: &str, line: usize, col: usize) -> usize {
    let line_start: usize = src
        .split('\n')
        .take(line.saturating_sub(1))
        .map(|l| l.len() + 1)
        .sum();
    (line_start + col.saturating_sub(1)).min(src.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(src: &str) -> String {
        IndentFormatter::default().format("main.go", src).unwrap()
    }

    #[test]
    fn test_hello() {
        let raw = "package main\nimport (\nfmt \"fmt\"\n)\nfunc main() {\nfmt.Println(\"Hello, 世界\")\n}\n\n";
        insta::assert_snapshot!(format(raw), @r#"
        package main

        import (
        	fmt "fmt"
        )

        func main() {
        	fmt.Println("Hello, 世界")
        }
        "#);
    }

    #[test]
    fn test_nested_openers_indent_once() {
        let raw = "package main\nfunc main() {\ndefer func() {\nrecover()\n}()\nx := []int{\n1,\n}\n}\n";
        assert_eq!(
            format(raw),
            "package main\n\nfunc main() {\n\tdefer func() {\n\t\trecover()\n\t}()\n\tx := []int{\n\t\t1,\n\t}\n}\n"
        );
    }

    #[test]
    fn test_case_at_switch_level() {
        let raw = "package main\nfunc f(x int) {\nswitch x {\ncase 1:\nreturn\ndefault:\n}\n}\n";
        assert_eq!(
            format(raw),
            "package main\n\nfunc f(x int) {\n\tswitch x {\n\tcase 1:\n\t\treturn\n\tdefault:\n\t}\n}\n"
        );
    }

    #[test]
    fn test_collapses_blank_lines() {
        let raw = "\n\npackage main\n\n\n\nvar a = 1\nvar b = 2\n\n\n";
        assert_eq!(format(raw), "package main\n\nvar a = 1\nvar b = 2\n");
    }

    #[test]
    fn test_separates_declarations_before_doc_comment() {
        let raw = "package main\n// A is a constant.\nconst A = 1\n";
        assert_eq!(
            format(raw),
            "package main\n\n// A is a constant.\nconst A = 1\n"
        );
    }

    #[test]
    fn test_raw_string_kept_verbatim() {
        let raw = "package main\nfunc f() {\nx := `line one  \n  { line two\n`\n_ = x\n}\n";
        assert_eq!(
            format(raw),
            "package main\n\nfunc f() {\n\tx := `line one  \n  { line two\n`\n\t_ = x\n}\n"
        );
    }

    #[test]
    fn test_spaces_indent() {
        let out = IndentFormatter::new(Indent::Spaces(2))
            .format("main.go", "package main\nfunc f() {\nreturn\n}\n")
            .unwrap();
        assert_eq!(out, "package main\n\nfunc f() {\n  return\n}\n");
    }

    #[test]
    fn test_parse_errors() {
        let f = IndentFormatter::default();

        let err = f.format("main.go", "func main() {}").unwrap_err();
        assert!(
            err.to_string()
                .starts_with("go codes parse failed: expected 'package', found 'func' in main.go")
        );

        let err = f
            .format("main.go", "package main\nfunc main() {\nf(}\n")
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("expected ')', found '}'"));
        assert!(message.contains("\t3\tf(}"));

        let err = f.format("main.go", "package main\nfunc main() {\n").unwrap_err();
        assert!(err.to_string().contains("expected '}', found 'EOF'"));
        assert!(err.is_source_error());
    }

    #[test]
    fn test_format_source_runs_processes() {
        struct Upper;

        impl Process for Upper {
            fn apply(
                &self,
                filename: &str,
                src: &str,
                formatter: &dyn Formatter,
            ) -> Result<String> {
                formatter.format(filename, &src.replace("a = 1", "a = 2"))
            }
        }

        let out = format_source(
            &IndentFormatter::default(),
            "main.go",
            "package main\nvar a = 1\n",
            &[&Upper],
        )
        .unwrap();
        assert_eq!(out, "package main\n\nvar a = 2\n");
    }

    #[test]
    fn test_gofmt_diagnostic() {
        let src = "package main\nfunc {\n";
        let (message, offset) =
            gofmt_diagnostic(src, "<standard input>:2:6: expected 'IDENT', found '{'\n");
        assert_eq!(message, "expected 'IDENT', found '{'");
        assert_eq!(offset, Some(18));

        let (message, offset) = gofmt_diagnostic(src, "something odd");
        assert_eq!(message, "something odd");
        assert_eq!(offset, None);
    }

    #[test]
    fn test_gofmt_missing_program() {
        let err = Gofmt::with_program("/nonexistent/bin/gofmt")
            .format("main.go", "package main\n")
            .unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }
}
