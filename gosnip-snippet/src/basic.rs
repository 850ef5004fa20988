//! Literals, comments, blocks and free-form expressions.

use gosnip_core::{Error, Result};

use crate::{Node, Snippet, Type};

/// Literal source text, emitted verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lit(String);

impl Lit {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// A double-quoted, escaped string literal.
    pub fn string(s: &str) -> Self {
        Self(quote_string(s))
    }

    pub fn int(v: i64) -> Self {
        Self(v.to_string())
    }

    pub fn uint(v: u64) -> Self {
        Self(v.to_string())
    }

    pub fn bool(v: bool) -> Self {
        Self(v.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Snippet for Lit {
    fn write_to(&self, out: &mut String) {
        out.push_str(&self.0);
    }
}

/// Predeclared identifiers and bare keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltIn {
    Iota,
    True,
    False,
    Nil,
    Break,
    Continue,
    Fallthrough,
}

impl BuiltIn {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuiltIn::Iota => "iota",
            BuiltIn::True => "true",
            BuiltIn::False => "false",
            BuiltIn::Nil => "nil",
            BuiltIn::Break => "break",
            BuiltIn::Continue => "continue",
            BuiltIn::Fallthrough => "fallthrough",
        }
    }
}

impl Snippet for BuiltIn {
    fn write_to(&self, out: &mut String) {
        out.push_str(self.as_str());
    }
}

/// A block of `//` line comments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comments(Vec<String>);

impl Comments {
    /// Build comments from lines. Empty lines are dropped and embedded
    /// newlines split into separate comment lines.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines = lines
            .into_iter()
            .filter(|line| !line.as_ref().is_empty())
            .flat_map(|line| {
                line.as_ref()
                    .split('\n')
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect();
        Self(lines)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn lines(&self) -> &[String] {
        &self.0
    }
}

impl Snippet for Comments {
    fn write_to(&self, out: &mut String) {
        for line in &self.0 {
            out.push_str("// ");
            out.push_str(line);
            out.push('\n');
        }
    }
}

/// A statement block: `{`, one statement per line, `}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Body(Vec<Node>);

impl Body {
    pub fn new<I, N>(stmts: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        Self(stmts.into_iter().map(Into::into).collect())
    }

    pub fn stmt(mut self, stmt: impl Into<Node>) -> Self {
        self.0.push(stmt.into());
        self
    }

    pub fn stmts(&self) -> &[Node] {
        &self.0
    }
}

impl Snippet for Body {
    fn write_to(&self, out: &mut String) {
        out.push('{');
        for stmt in &self.0 {
            out.push('\n');
            stmt.write_to(out);
        }
        out.push_str("\n}");
    }
}

/// A composite literal, `T{\nelt,\n...}`.
///
/// The type is left out when it is the empty interface.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeLit {
    ty: Option<Type>,
    elts: Vec<Node>,
}

impl CompositeLit {
    pub fn new(ty: impl Into<Type>) -> Self {
        let ty = ty.into();
        Self {
            ty: (!ty.is_empty_interface()).then_some(ty),
            elts: Vec::new(),
        }
    }

    /// A composite literal without a type, as used for nested elements.
    pub fn untyped() -> Self {
        Self {
            ty: None,
            elts: Vec::new(),
        }
    }

    pub fn elt(mut self, elt: impl Into<Node>) -> Self {
        self.elts.push(elt.into());
        self
    }

    pub fn elts<I, N>(mut self, elts: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.elts.extend(elts.into_iter().map(Into::into));
        self
    }

    pub fn ty(&self) -> Option<&Type> {
        self.ty.as_ref()
    }
}

impl Snippet for CompositeLit {
    fn write_to(&self, out: &mut String) {
        if let Some(ty) = &self.ty {
            ty.write_to(out);
        }
        out.push('{');
        for elt in &self.elts {
            out.push('\n');
            elt.write_to(out);
            out.push(',');
        }
        out.push_str("\n}");
    }
}

/// Free-form expression text.
///
/// ```
/// use gosnip_snippet::{Expr, Ident, Lit, Node, Snippet};
///
/// let i = Ident::new("i").unwrap();
/// assert_eq!(Expr::template("?++", [i]).unwrap().render(), "i++");
///
/// let args: [Node; 2] = [Lit::int(1).into(), Lit::int(2).into()];
/// assert_eq!(Expr::template("$2 - $1", args).unwrap().render(), "2 - 1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr(String);

impl Expr {
    pub fn raw(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Fill a template with rendered arguments.
    ///
    /// Each `?` takes the next argument in order; `$N` takes the N-th
    /// argument (1-based) without advancing. A placeholder with no matching
    /// argument is an error.
    pub fn template<I, N>(template: &str, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        let args: Vec<String> = args.into_iter().map(|arg| arg.into().render()).collect();
        let missing = |placeholder: &str| {
            Box::new(Error::Placeholder {
                template: template.to_string(),
                placeholder: placeholder.to_string(),
            })
        };

        let mut out = String::with_capacity(template.len());
        let mut next = 0;
        let mut chars = template.char_indices().peekable();

        while let Some((_, c)) = chars.next() {
            match c {
                '?' => {
                    let arg = args.get(next).ok_or_else(|| missing("?"))?;
                    out.push_str(arg);
                    next += 1;
                }
                '$' if chars.peek().is_some_and(|(_, d)| d.is_ascii_digit()) => {
                    let mut digits = String::new();
                    while let Some((_, d)) = chars.peek().filter(|(_, d)| d.is_ascii_digit()) {
                        digits.push(*d);
                        chars.next();
                    }
                    let placeholder = format!("${digits}");
                    let arg = digits
                        .parse::<usize>()
                        .ok()
                        .and_then(|n| n.checked_sub(1))
                        .and_then(|idx| args.get(idx))
                        .ok_or_else(|| missing(&placeholder))?;
                    out.push_str(arg);
                }
                _ => out.push(c),
            }
        }

        Ok(Self(out))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Snippet for Expr {
    fn write_to(&self, out: &mut String) {
        out.push_str(&self.0);
    }
}

/// Quote `s` as a Go interpreted string literal.
pub fn quote_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        escape_char(&mut out, c, '"');
    }
    out.push('"');
    out
}

/// Quote `c` as a Go rune literal.
pub fn quote_rune(c: char) -> String {
    let mut out = String::with_capacity(3);
    out.push('\'');
    escape_char(&mut out, c, '\'');
    out.push('\'');
    out
}

fn escape_char(out: &mut String, c: char, quote: char) {
    match c {
        '\x07' => out.push_str("\\a"),
        '\x08' => out.push_str("\\b"),
        '\x0c' => out.push_str("\\f"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        '\x0b' => out.push_str("\\v"),
        '\\' => out.push_str("\\\\"),
        c if c == quote => {
            out.push('\\');
            out.push(c);
        }
        c if is_printable(c) => out.push(c),
        c if (c as u32) < 0x80 => out.push_str(&format!("\\x{:02x}", c as u32)),
        c if (c as u32) <= 0xffff => out.push_str(&format!("\\u{:04x}", c as u32)),
        c => out.push_str(&format!("\\U{:08x}", c as u32)),
    }
}

/// Letters, marks, numbers, punctuation, symbols and the ASCII space.
/// Other spaces, format characters and private-use code points are escaped.
fn is_printable(c: char) -> bool {
    c == ' ' || !(c.is_control() || c.is_whitespace() || is_format(c) || is_private_use(c))
}

fn is_format(c: char) -> bool {
    matches!(
        c,
        '\u{ad}'
            | '\u{600}'..='\u{605}'
            | '\u{61c}'
            | '\u{6dd}'
            | '\u{70f}'
            | '\u{890}'..='\u{891}'
            | '\u{8e2}'
            | '\u{180e}'
            | '\u{200b}'..='\u{200f}'
            | '\u{202a}'..='\u{202e}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{206f}'
            | '\u{feff}'
            | '\u{fff9}'..='\u{fffb}'
            | '\u{110bd}'
            | '\u{110cd}'
            | '\u{13430}'..='\u{1343f}'
            | '\u{1bca0}'..='\u{1bca3}'
            | '\u{1d173}'..='\u{1d17a}'
            | '\u{e0001}'
            | '\u{e0020}'..='\u{e007f}'
    )
}

fn is_private_use(c: char) -> bool {
    matches!(
        c,
        '\u{e000}'..='\u{f8ff}' | '\u{f0000}'..='\u{ffffd}' | '\u{100000}'..='\u{10fffd}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BuiltinType, Call, Ident};

    #[test]
    fn test_expr_template() {
        let one = || Node::from(Lit::int(1));
        assert_eq!(Expr::template("? + ?", [one(), one()]).unwrap().render(), "1 + 1");

        let quoted = || Node::from(Lit::string("1"));
        assert_eq!(
            Expr::template("? + ?", [quoted(), quoted()]).unwrap().render(),
            r#""1" + "1""#
        );

        let i = Ident::new("i").unwrap();
        assert_eq!(Expr::template("?++", [i]).unwrap().render(), "i++");
    }

    #[test]
    fn test_expr_positional_placeholders() {
        let args = [Ident::new("a").unwrap(), Ident::new("b").unwrap()];
        let expr = Expr::template("$2, $1 = $1, $2", args).unwrap();
        assert_eq!(expr.render(), "b, a = a, b");

        let price = Expr::template("cost$ * ?", [Ident::new("n").unwrap()]).unwrap();
        assert_eq!(price.render(), "cost$ * n");
    }

    #[test]
    fn test_expr_missing_argument() {
        let err = Expr::template("? + ?", [Lit::int(1)]).unwrap_err();
        assert!(matches!(*err, Error::Placeholder { ref placeholder, .. } if placeholder == "?"));

        let err = Expr::template("$0", [Lit::int(1)]).unwrap_err();
        assert!(matches!(*err, Error::Placeholder { ref placeholder, .. } if placeholder == "$0"));

        let err = Expr::template("$3", [Lit::int(1)]).unwrap_err();
        assert!(err.to_string().contains("$3"));
    }

    #[test]
    fn test_comments() {
        assert_eq!(
            Comments::new(["123123", "123123"]).render(),
            "// 123123\n// 123123\n"
        );
        assert_eq!(Comments::new(["a\nb", ""]).render(), "// a\n// b\n");
        assert!(Comments::new([""]).is_empty());
    }

    #[test]
    fn test_body() {
        let body = Body::new([
            Expr::raw(r#"a := Fn("1")"#),
            Expr::raw(r#"v := Fn("1")"#),
        ]);
        assert_eq!(body.render(), "{\na := Fn(\"1\")\nv := Fn(\"1\")\n}");
        assert_eq!(Body::default().render(), "{\n}");
    }

    #[test]
    fn test_composite_lit() {
        let lit = CompositeLit::new(Type::slice(BuiltinType::String))
            .elt(Lit::string("1"))
            .elt(Lit::string("2"));
        assert_eq!(lit.render(), "[]string{\n\"1\",\n\"2\",\n}");

        let untyped = CompositeLit::new(Type::interface()).elt(Call::new("f").unwrap());
        assert_eq!(untyped.render(), "{\nf(),\n}");
    }

    #[test]
    fn test_builtins() {
        assert_eq!(BuiltIn::Iota.render(), "iota");
        assert_eq!(BuiltIn::Nil.render(), "nil");
        assert_eq!(BuiltIn::Fallthrough.render(), "fallthrough");
    }

    #[test]
    fn test_quote_string() {
        assert_eq!(quote_string("string"), r#""string""#);
        assert_eq!(quote_string("Hello, 世界"), "\"Hello, 世界\"");
        assert_eq!(quote_string("a\"b\\c\n"), r#""a\"b\\c\n""#);
        assert_eq!(quote_string("\x01'"), r#""\x01'""#);
    }

    #[test]
    fn test_quote_rune() {
        assert_eq!(quote_rune('b'), "'b'");
        assert_eq!(quote_rune('\''), r"'\''");
        assert_eq!(quote_rune('"'), "'\"'");
        assert_eq!(quote_rune('\u{1}'), r"'\x01'");
    }

    #[test]
    fn test_non_printing_chars_are_escaped() {
        assert_eq!(quote_string("a\u{a0}b"), r#""a\u00a0b""#);
        assert_eq!(quote_string("\u{3000}"), r#""\u3000""#);
        assert_eq!(quote_string("\u{200b}"), r#""\u200b""#);
        assert_eq!(quote_string("\u{2028}"), r#""\u2028""#);
        assert_eq!(quote_string("\u{e000}"), r#""\ue000""#);
        assert_eq!(quote_string("\u{e0041}"), r#""\U000e0041""#);
        assert_eq!(quote_rune('\u{a0}'), r"'\u00a0'");
        assert_eq!(quote_rune(' '), "' '");
        assert_eq!(quote_rune('é'), "'é'");
    }
}
